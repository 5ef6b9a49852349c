//! Air-hockey mechanics: constraint-driven paddle control, velocity-based
//! movement, and a puck lifecycle with gravity compensation for tilted
//! tables.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::frame::Frame;
use crate::rig::{
    apply_impulse, bind_to_plane, set_network_owner, update_body_velocity, weld_assemblage,
    BodyVelocityOptions,
};
use crate::scoreboard::update_scoreboard;
use crate::state::ArcadeTableState;
use crate::vec3::{add, normalize, scale, sub, vec3, Vec3};
use crate::world::{NodeId, NodeKind, World};

use super::{
    ArcadeController, BehaviorState, ClientNetwork, InputEvent, InputSource, KeyCode,
    ServerNetwork, TableMechanics,
};

/// Commanded paddle speed along each seat axis.
const PUSHER_SPEED: f64 = 35.0;
/// Impulse magnitude for the spawn kick.
const PUCK_KICK_FORCE: f64 = 10_000.0;
/// Character budget of the table's scoreboard display.
const SCOREBOARD_CHARACTERS: usize = 14;

pub struct AirHockeyMechanics {
    /// Next puck serial. Shared across every air-hockey table served by this
    /// instance, so puck names stay globally unique.
    puck_number: u64,
}

impl AirHockeyMechanics {
    pub fn new() -> Self {
        Self { puck_number: 1 }
    }

    fn draw_scoreboard(&self, world: &mut World, table: NodeId, state: &ArcadeTableState) {
        let text = format!("HOME {}  AWAY {}", state.goals_home, state.goals_away);
        update_scoreboard(world, table, &text, SCOREBOARD_CHARACTERS);
    }

    /// Recompute the commanded paddle velocity from the directional flags.
    ///
    /// Key-up updates pass `require_already_exists` so releasing the final
    /// held key never creates a driver out of thin air.
    fn update_paddle_velocity(
        &self,
        world: &mut World,
        control: NodeId,
        controller: &mut ArcadeController,
        frame: Frame,
        key: KeyCode,
        down: bool,
    ) {
        if controller.table_name.is_none() {
            return;
        }
        match key {
            KeyCode::A => controller.left_down = down,
            KeyCode::D => controller.right_down = down,
            KeyCode::W => controller.forward_down = down,
            KeyCode::S => controller.backward_down = down,
            _ => return,
        }
        let mut velocity = Vec3::ZERO;
        if controller.left_down {
            velocity = add(velocity, scale(frame.right, -PUSHER_SPEED));
        }
        if controller.right_down {
            velocity = add(velocity, scale(frame.right, PUSHER_SPEED));
        }
        if controller.forward_down {
            velocity = add(velocity, scale(frame.look, PUSHER_SPEED));
        }
        if controller.backward_down {
            velocity = add(velocity, scale(frame.look, -PUSHER_SPEED));
        }
        update_body_velocity(
            world,
            control,
            Some(velocity),
            BodyVelocityOptions {
                require_already_exists: !down,
            },
        );
    }

    /// Replace the table's puck: clear the piece container, clone the
    /// template, weld it, light it up, and level it against the ground tilt.
    fn reset_puck(
        &mut self,
        world: &mut World,
        table_name: &str,
        table: Option<NodeId>,
        user_id: Option<u64>,
        network: &mut dyn ServerNetwork,
    ) {
        let pieces = table.and_then(|t| world.find_child(t, "Pieces"));
        let ground = table.and_then(|t| world.find_child_of_kind(t, "Ground", NodeKind::Part));
        let template =
            table.and_then(|t| world.find_child_of_kind(t, "PuckTemplate", NodeKind::Part));
        let puck = template.and_then(|t| world.clone_subtree(t));

        // Single-puck guarantee: the container is cleared before anything
        // is added to it.
        if let Some(pieces) = pieces {
            let children = world
                .get(pieces)
                .map(|n| n.children().to_vec())
                .unwrap_or_default();
            for child in children {
                world.destroy(child);
            }
        }

        let (puck, pieces) = match (puck, pieces) {
            (Some(puck), Some(pieces)) => (puck, pieces),
            _ => return,
        };

        self.puck_number += 1;
        let name = format!("Puck{}", self.puck_number);
        weld_assemblage(world, puck);
        if let Some(node) = world.get_mut(puck) {
            node.name = name.clone();
        }
        world.set_parent(puck, pieces);

        if let Some(sparks) = world.find_child_of_kind(puck, "Sparks", NodeKind::ParticleEmitter) {
            if let Some(node) = world.get_mut(sparks) {
                node.enabled = true;
            }
        }
        if let Some(light) = world.find_child_of_kind(puck, "Light", NodeKind::PointLight) {
            if let Some(node) = world.get_mut(light) {
                node.enabled = true;
            }
        }
        let force = world.find_child_of_kind(puck, "VectorForce", NodeKind::VectorForce);
        if let (Some(force), Some(ground)) = (force, ground) {
            // Cancel the pull component that drags the puck along a tilted
            // surface: (world up - ground up) * g * m keeps it level.
            let ground_up = normalize(world.get(ground).map(|n| n.frame.up).unwrap_or(Vec3::UP));
            let mass = world.get(puck).map(|n| n.mass).unwrap_or(1.0);
            let lift = scale(sub(Vec3::UP, ground_up), world.gravity * mass);
            if let Some(node) = world.get_mut(force) {
                node.force = lift;
            }
        }

        if let Some(user_id) = user_id {
            set_network_owner(world, puck, Some(user_id));
            network.fire_new_piece(user_id, table_name, "Puck", &name);
        }
        tracing::debug!("Spawned {} at {}", name, table_name);
    }

    /// Client-local puck attachment: bind it to the puck plane and kick it
    /// in a random direction along the table surface.
    fn attach_client_puck(
        &self,
        world: &mut World,
        table: NodeId,
        puck: NodeId,
        rng: &mut ChaCha8Rng,
    ) {
        let puck_attachment = world.find_child_of_kind(puck, "Attachment", NodeKind::Attachment);
        let plane_attachment = world
            .find_child(table, "PuckPlane")
            .and_then(|p| world.find_child_of_kind(p, "Attachment", NodeKind::Attachment));
        if let (Some(puck_attachment), Some(plane_attachment)) = (puck_attachment, plane_attachment)
        {
            bind_to_plane(world, puck, puck_attachment, plane_attachment);
        }

        let plane_frame = world
            .find_child_of_kind(table, "Ground", NodeKind::Part)
            .and_then(|g| world.get(g))
            .map(|n| n.frame)
            .unwrap_or_default();
        random_kick_in_plane(world, puck, plane_frame, PUCK_KICK_FORCE, rng);
    }
}

impl Default for AirHockeyMechanics {
    fn default() -> Self {
        Self::new()
    }
}

impl TableMechanics for AirHockeyMechanics {
    fn on_setup_table(&mut self, world: &mut World, table: NodeId, state: &ArcadeTableState) {
        self.draw_scoreboard(world, table, state);
    }

    fn on_create_table_part(
        &mut self,
        world: &mut World,
        _table: NodeId,
        state: &ArcadeTableState,
        part: NodeId,
    ) {
        if let Some(node) = world.get_mut(part) {
            node.color = state.color;
        }
    }

    fn on_game_start(
        &mut self,
        world: &mut World,
        table_name: &str,
        user_id: u64,
        network: &mut dyn ServerNetwork,
    ) {
        let table = world.find_table(table_name);
        let control = table.and_then(|t| world.find_child(t, "Control"));
        let control_plane = table.and_then(|t| world.find_child(t, "ControlPlane"));
        let seat = control.and_then(|c| world.find_child_of_kind(c, "Seat", NodeKind::Seat));

        if let Some(seat) = seat {
            // one-time rig per table instance, guarded by existence
            let already_bound = world
                .find_child_of_kind(seat, "PlaneConstraint", NodeKind::PlaneConstraint)
                .is_some();
            if !already_bound {
                if let Some(control) = control {
                    weld_assemblage(world, control);
                }
                let seat_attachment =
                    world.find_child_of_kind(seat, "Attachment", NodeKind::Attachment);
                let plane_attachment = control_plane
                    .and_then(|p| world.find_child_of_kind(p, "Attachment", NodeKind::Attachment));
                if let (Some(seat_attachment), Some(plane_attachment)) =
                    (seat_attachment, plane_attachment)
                {
                    bind_to_plane(world, seat, seat_attachment, plane_attachment);
                }
            }
        }

        if let Some(control) = control {
            update_body_velocity(world, control, None, BodyVelocityOptions::default());
            set_network_owner(world, control, Some(user_id));
        }
        tracing::debug!("Air hockey start at {} for user {}", table_name, user_id);
        self.reset_puck(world, table_name, table, Some(user_id), network);
    }

    fn on_game_over(&mut self, world: &mut World, table_name: &str, user_id: u64) {
        let table = world.find_table(table_name);
        let control = table.and_then(|t| world.find_child(t, "Control"));
        if let Some(control) = control {
            set_network_owner(world, control, None);
            update_body_velocity(world, control, None, BodyVelocityOptions::default());
        }
        tracing::debug!("Air hockey over at {} for user {}", table_name, user_id);
    }

    fn on_event(
        &mut self,
        _world: &mut World,
        _table: NodeId,
        _event_name: &str,
        _part: Option<NodeId>,
    ) {
    }

    fn on_score_changed(&mut self, world: &mut World, table_name: &str, state: &ArcadeTableState) {
        if let Some(table) = world.find_table(table_name) {
            self.draw_scoreboard(world, table, state);
        }
    }

    fn on_client_input_began(
        &mut self,
        world: &mut World,
        table_name: &str,
        controller: &mut ArcadeController,
        _network: &mut dyn ClientNetwork,
        input: InputEvent,
    ) {
        let table = world.find_table(table_name);
        let control = table.and_then(|t| world.find_child(t, "Control"));
        let seat = control.and_then(|c| world.find_child_of_kind(c, "Seat", NodeKind::Seat));
        let (control, seat) = match (control, seat) {
            (Some(control), Some(seat)) => (control, seat),
            _ => return,
        };
        if input.source != InputSource::Keyboard {
            return;
        }
        let frame = match world.get(seat) {
            Some(node) => node.frame,
            None => return,
        };
        self.update_paddle_velocity(world, control, controller, frame, input.key, true);
    }

    fn on_client_input_ended(
        &mut self,
        world: &mut World,
        table_name: &str,
        controller: &mut ArcadeController,
        _network: &mut dyn ClientNetwork,
        input: InputEvent,
    ) {
        let table = world.find_table(table_name);
        let control = table.and_then(|t| world.find_child(t, "Control"));
        let seat = control.and_then(|c| world.find_child_of_kind(c, "Seat", NodeKind::Seat));
        let (control, seat) = match (control, seat) {
            (Some(control), Some(seat)) => (control, seat),
            _ => return,
        };
        if input.source != InputSource::Keyboard {
            return;
        }
        let frame = match world.get(seat) {
            Some(node) => node.frame,
            None => return,
        };
        self.update_paddle_velocity(world, control, controller, frame, input.key, false);
    }

    fn on_client_new_piece(
        &mut self,
        world: &mut World,
        table_name: &str,
        piece_type: &str,
        piece_name: &str,
        rng: &mut ChaCha8Rng,
    ) {
        let table = world.find_table(table_name);
        let piece = table
            .and_then(|t| world.find_child(t, "Pieces"))
            .and_then(|p| world.find_child(p, piece_name));
        let (table, piece) = match (table, piece) {
            (Some(table), Some(piece)) => (table, piece),
            _ => return,
        };
        if piece_type == "Puck" {
            self.attach_client_puck(world, table, piece, rng);
        }
    }

    fn on_npc_playing_behavior(
        &mut self,
        world: &mut World,
        table_name: &str,
        _user_id: u64,
        _behavior: &mut BehaviorState,
    ) {
        // automated play is an extension point; resolve the table and stop
        let _table = match world.find_table(table_name) {
            Some(table) => table,
            None => return,
        };
    }
}

/// Kick `target` with an impulse of magnitude `force` in a uniformly random
/// direction within the plane spanned by `plane.right` and `plane.look`.
pub fn random_kick_in_plane(
    world: &mut World,
    target: NodeId,
    plane: Frame,
    force: f64,
    rng: &mut ChaCha8Rng,
) {
    let angle = rng.gen::<f64>() * std::f64::consts::TAU;
    let kick = plane.rotate_to_world(vec3(angle.cos() * force, 0.0, angle.sin() * force));
    apply_impulse(world, target, kick);
}
