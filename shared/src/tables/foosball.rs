//! Foosball mechanics: the minimum viable table variant.
//!
//! Only part recoloring is active; every other hook is a deliberate,
//! side-effect-free no-op.

use rand_chacha::ChaCha8Rng;

use crate::state::ArcadeTableState;
use crate::world::{NodeId, World};

use super::{
    ArcadeController, BehaviorState, ClientNetwork, InputEvent, ServerNetwork, TableMechanics,
};

pub struct FoosballMechanics;

impl TableMechanics for FoosballMechanics {
    fn on_setup_table(&mut self, _world: &mut World, _table: NodeId, _state: &ArcadeTableState) {}

    fn on_create_table_part(
        &mut self,
        world: &mut World,
        _table: NodeId,
        state: &ArcadeTableState,
        part: NodeId,
    ) {
        let in_box = world
            .get(part)
            .and_then(|n| n.parent())
            .and_then(|p| world.get(p))
            .map(|n| n.name == "Box")
            .unwrap_or(false);
        if in_box {
            if let Some(node) = world.get_mut(part) {
                node.color = state.color;
            }
        }
    }

    fn on_game_start(
        &mut self,
        _world: &mut World,
        _table_name: &str,
        _user_id: u64,
        _network: &mut dyn ServerNetwork,
    ) {
    }

    fn on_game_over(&mut self, _world: &mut World, _table_name: &str, _user_id: u64) {}

    fn on_event(
        &mut self,
        _world: &mut World,
        _table: NodeId,
        _event_name: &str,
        _part: Option<NodeId>,
    ) {
    }

    fn on_score_changed(
        &mut self,
        _world: &mut World,
        _table_name: &str,
        _state: &ArcadeTableState,
    ) {
    }

    fn on_client_input_began(
        &mut self,
        _world: &mut World,
        _table_name: &str,
        _controller: &mut ArcadeController,
        _network: &mut dyn ClientNetwork,
        _input: InputEvent,
    ) {
    }

    fn on_client_input_ended(
        &mut self,
        _world: &mut World,
        _table_name: &str,
        _controller: &mut ArcadeController,
        _network: &mut dyn ClientNetwork,
        _input: InputEvent,
    ) {
    }

    fn on_client_new_piece(
        &mut self,
        _world: &mut World,
        _table_name: &str,
        _piece_type: &str,
        _piece_name: &str,
        _rng: &mut ChaCha8Rng,
    ) {
    }

    fn on_npc_playing_behavior(
        &mut self,
        _world: &mut World,
        _table_name: &str,
        _user_id: u64,
        _behavior: &mut BehaviorState,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::test_support::NullClientNetwork;
    use crate::tables::{InputSource, KeyCode};
    use crate::world::{Node, NodeKind};

    fn foosball_table(world: &mut World) -> (NodeId, NodeId, NodeId) {
        let root = world.tables_root();
        let table = world.spawn(root, Node::new("Table3", NodeKind::Model));
        let game_box = world.spawn(table, Node::new("Box", NodeKind::Model));
        let panel = world.spawn(game_box, Node::new("Panel", NodeKind::Part));
        let legs = world.spawn(table, Node::new("Legs", NodeKind::Part));
        (table, panel, legs)
    }

    #[test]
    fn recolors_only_parts_parented_under_the_box() {
        let mut world = World::new();
        let (table, panel, legs) = foosball_table(&mut world);
        let state = ArcadeTableState::new(0x50b450);
        let mut mechanics = FoosballMechanics;

        mechanics.on_create_table_part(&mut world, table, &state, panel);
        mechanics.on_create_table_part(&mut world, table, &state, legs);

        assert_eq!(world.get(panel).unwrap().color, 0x50b450);
        assert_eq!(world.get(legs).unwrap().color, 0xffffff);
    }

    #[test]
    fn unused_hooks_leave_the_world_untouched() {
        let mut world = World::new();
        let (table, _, _) = foosball_table(&mut world);
        let state = ArcadeTableState::new(0x50b450);
        let mut mechanics = FoosballMechanics;
        let mut controller = ArcadeController {
            table_name: Some("Table3".to_string()),
            ..ArcadeController::default()
        };

        mechanics.on_setup_table(&mut world, table, &state);
        mechanics.on_score_changed(&mut world, "Table3", &state);
        mechanics.on_game_over(&mut world, "Table3", 7);
        mechanics.on_client_input_began(
            &mut world,
            "Table3",
            &mut controller,
            &mut NullClientNetwork,
            InputEvent {
                source: InputSource::Keyboard,
                key: KeyCode::W,
            },
        );

        assert!(!controller.forward_down);
        assert_eq!(world.get(table).unwrap().children().len(), 2);
    }
}
