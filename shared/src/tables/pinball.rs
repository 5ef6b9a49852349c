//! Pinball mechanics. Same minimal shape as foosball for now: cabinet
//! recoloring only, every other hook a no-op.

use rand_chacha::ChaCha8Rng;

use crate::state::ArcadeTableState;
use crate::world::{NodeId, World};

use super::{
    ArcadeController, BehaviorState, ClientNetwork, InputEvent, ServerNetwork, TableMechanics,
};

pub struct PinballMechanics;

impl TableMechanics for PinballMechanics {
    fn on_setup_table(&mut self, _world: &mut World, _table: NodeId, _state: &ArcadeTableState) {}

    fn on_create_table_part(
        &mut self,
        world: &mut World,
        _table: NodeId,
        state: &ArcadeTableState,
        part: NodeId,
    ) {
        let in_cabinet = world
            .get(part)
            .and_then(|n| n.parent())
            .and_then(|p| world.get(p))
            .map(|n| n.name == "Cabinet")
            .unwrap_or(false);
        if in_cabinet {
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
