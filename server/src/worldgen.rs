//! Builds the arcade hall scene at startup.
//!
//! Geometry construction is the controller's job: each structural part is
//! announced to the table's mechanics through `on_create_table_part`, and
//! `on_setup_table` runs once after the fixture is complete.

use arcade_shared::frame::Frame;
use arcade_shared::state::{ArcadeTableState, TableKind};
use arcade_shared::tables::MechanicsRegistry;
use arcade_shared::vec3::vec3;
use arcade_shared::world::{Node, NodeId, NodeKind, World};

use crate::config::TableDef;

/// Tilt of the air-hockey playing surface, radians. The puck's vector force
/// has to cancel the resulting lateral pull.
const SURFACE_TILT: f64 = 0.05;

/// Mass of a fresh puck.
const PUCK_MASS: f64 = 1.2;

/// Build one table fixture and run its mechanics setup hooks.
pub fn build_table(
    world: &mut World,
    registry: &mut MechanicsRegistry,
    def: &TableDef,
    state: &ArcadeTableState,
) -> NodeId {
    let root = world.tables_root();
    let table = world.spawn(root, Node::new(def.name.clone(), NodeKind::Model));

    let mut parts = Vec::new();
    match def.kind {
        TableKind::AirHockey => build_air_hockey(world, table, &mut parts),
        TableKind::Foosball => build_foosball(world, table, &mut parts),
        TableKind::Pinball => build_pinball(world, table, &mut parts),
    }

    let mechanics = registry.get_mut(def.kind);
    for part in parts {
        mechanics.on_create_table_part(world, table, state, part);
    }
    mechanics.on_setup_table(world, table, state);
    tracing::info!("Built {} ({:?})", def.name, def.kind);
    table
}

fn spawn_part(world: &mut World, parent: NodeId, name: &str) -> NodeId {
    world.spawn(parent, Node::new(name, NodeKind::Part))
}

fn build_air_hockey(world: &mut World, table: NodeId, parts: &mut Vec<NodeId>) {
    let surface_frame = Frame::identity().rotated_around(vec3(0.0, 0.0, 1.0), SURFACE_TILT);

    let mut ground = Node::new("Ground", NodeKind::Part);
    ground.frame = surface_frame;
    parts.push(world.spawn(table, ground));

    parts.push(spawn_part(world, table, "Rim"));
    parts.push(spawn_part(world, table, "GoalHome"));
    parts.push(spawn_part(world, table, "GoalAway"));

    let control = world.spawn(table, Node::new("Control", NodeKind::Model));
    let seat = world.spawn(control, Node::new("Seat", NodeKind::Seat));
    world.spawn(seat, Node::new("Attachment", NodeKind::Attachment));
    parts.push(spawn_part(world, control, "Paddle"));

    let control_plane = world.spawn(table, Node::new("ControlPlane", NodeKind::Part));
    world.spawn(control_plane, Node::new("Attachment", NodeKind::Attachment));

    let puck_plane = world.spawn(table, Node::new("PuckPlane", NodeKind::Part));
    world.spawn(puck_plane, Node::new("Attachment", NodeKind::Attachment));

    world.spawn(table, Node::new("Pieces", NodeKind::Model));

    let mut template = Node::new("PuckTemplate", NodeKind::Part);
    template.mass = PUCK_MASS;
    template.frame = surface_frame;
    let template = world.spawn(table, template);
    world.spawn(template, Node::new("Attachment", NodeKind::Attachment));
    world.spawn(template, Node::new("Sparks", NodeKind::ParticleEmitter));
    world.spawn(template, Node::new("Light", NodeKind::PointLight));
    world.spawn(template, Node::new("VectorForce", NodeKind::VectorForce));

    world.spawn(table, Node::new("Scoreboard", NodeKind::Display));
}

fn build_foosball(world: &mut World, table: NodeId, parts: &mut Vec<NodeId>) {
    let game_box = world.spawn(table, Node::new("Box", NodeKind::Model));
    parts.push(spawn_part(world, game_box, "PanelHome"));
    parts.push(spawn_part(world, game_box, "PanelAway"));
    parts.push(spawn_part(world, game_box, "Field"));
    parts.push(spawn_part(world, table, "Legs"));
}

fn build_pinball(world: &mut World, table: NodeId, parts: &mut Vec<NodeId>) {
    let cabinet = world.spawn(table, Node::new("Cabinet", NodeKind::Model));
    parts.push(spawn_part(world, cabinet, "Body"));
    parts.push(spawn_part(world, cabinet, "Glass"));
    parts.push(spawn_part(world, table, "Legs"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(kind: TableKind, color: u32) -> (World, NodeId) {
        let mut world = World::new();
        let mut registry = MechanicsRegistry::new();
        let def = TableDef::new("Table1", kind, color);
        let state = ArcadeTableState::new(color);
        let table = build_table(&mut world, &mut registry, &def, &state);
        (world, table)
    }

    #[test]
    fn air_hockey_fixture_has_the_full_rig() {
        let (world, table) = build(TableKind::AirHockey, 0xd65050);
        let control = world.find_child(table, "Control").unwrap();
        assert!(world
            .find_child_of_kind(control, "Seat", NodeKind::Seat)
            .is_some());
        assert!(world.find_child(table, "ControlPlane").is_some());
        assert!(world.find_child(table, "PuckPlane").is_some());
        assert!(world.find_child(table, "Pieces").is_some());
        assert!(world
            .find_child_of_kind(table, "PuckTemplate", NodeKind::Part)
            .is_some());
        assert!(world
            .find_child_of_kind(table, "Ground", NodeKind::Part)
            .is_some());
    }

    #[test]
    fn air_hockey_setup_draws_the_scoreboard() {
        let (world, table) = build(TableKind::AirHockey, 0xd65050);
        let display = world
            .find_child_of_kind(table, "Scoreboard", NodeKind::Display)
            .unwrap();
        assert_eq!(world.get(display).unwrap().text, "HOME 0  AWAY 0");
    }

    #[test]
    fn air_hockey_parts_take_the_theme_color() {
        let (world, table) = build(TableKind::AirHockey, 0xd65050);
        let rim = world.find_child(table, "Rim").unwrap();
        assert_eq!(world.get(rim).unwrap().color, 0xd65050);
    }

    #[test]
    fn foosball_recolors_box_panels_but_not_legs() {
        let (world, table) = build(TableKind::Foosball, 0x50b450);
        let game_box = world.find_child(table, "Box").unwrap();
        let panel = world.find_child(game_box, "PanelHome").unwrap();
        let legs = world.find_child(table, "Legs").unwrap();
        assert_eq!(world.get(panel).unwrap().color, 0x50b450);
        assert_eq!(world.get(legs).unwrap().color, 0xffffff);
    }

    #[test]
    fn pinball_recolors_cabinet_but_not_legs() {
        let (world, table) = build(TableKind::Pinball, 0xc8a432);
        let cabinet = world.find_child(table, "Cabinet").unwrap();
        let body = world.find_child(cabinet, "Body").unwrap();
        let legs = world.find_child(table, "Legs").unwrap();
        assert_eq!(world.get(body).unwrap().color, 0xc8a432);
        assert_eq!(world.get(legs).unwrap().color, 0xffffff);
    }
}
