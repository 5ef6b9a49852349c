//! Shared mechanics contract for the arcade minigame tables.
//!
//! Every table kind implements [`TableMechanics`]; the table-lifecycle
//! controller dispatches lifecycle and input events through the
//! [`MechanicsRegistry`]. Hooks are side-effect-only notifications and must
//! tolerate a half-loaded world: any missing node silently ends the hook.

pub mod airhockey;
pub mod foosball;
pub mod pinball;

use rand_chacha::ChaCha8Rng;

use crate::state::{ArcadeTableState, TableKind};
use crate::world::{NodeId, World};

use self::airhockey::AirHockeyMechanics;
use self::foosball::FoosballMechanics;
use self::pinball::PinballMechanics;

/// Where an input event came from. Table controls only react to keyboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Mouse,
    Gamepad,
    Touch,
}

/// Keys the input service relays to seated players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Space,
    Tab,
}

/// One key-down or key-up notification.
#[derive(Debug, Clone, Copy)]
pub struct InputEvent {
    pub source: InputSource,
    pub key: KeyCode,
}

/// Per-player transient input state while seated at a table.
///
/// The directional flags are only meaningful while `table_name` is set;
/// input handling short-circuits for a player who is not seated.
#[derive(Debug, Clone, Default)]
pub struct ArcadeController {
    pub table_name: Option<String>,
    pub left_down: bool,
    pub right_down: bool,
    pub forward_down: bool,
    pub backward_down: bool,
}

/// Outbound server events. Fire-and-forget: a lost notification just means
/// the client never attaches local behavior to that piece.
pub trait ServerNetwork {
    fn fire_new_piece(
        &mut self,
        user_id: u64,
        table_name: &str,
        piece_type: &str,
        piece_name: &str,
    );
}

/// Outbound client events. No current table kind sends anything; the hook
/// signatures carry the channel for variants that will.
pub trait ClientNetwork {
    fn fire_table_event(&mut self, table_name: &str, event_name: &str);
}

/// Scratch state for an automated occupant driving a table.
#[derive(Debug, Clone, Default)]
pub struct BehaviorState {
    pub status: String,
}

/// The polymorphic capability set every table kind implements.
///
/// All hooks are notifications: no return values, no ordering assumptions
/// beyond the lifecycle the names imply. Unused hooks are cheap no-ops, not
/// omissions.
pub trait TableMechanics {
    /// Table initialized or reset into a known state. Render any
    /// state-derived visuals.
    fn on_setup_table(&mut self, world: &mut World, table: NodeId, state: &ArcadeTableState);

    /// A structural part was added while the table geometry is built.
    /// Must be safe to call for parts this game does not care about.
    fn on_create_table_part(
        &mut self,
        world: &mut World,
        table: NodeId,
        state: &ArcadeTableState,
        part: NodeId,
    );

    /// A participant starts actively playing.
    fn on_game_start(
        &mut self,
        world: &mut World,
        table_name: &str,
        user_id: u64,
        network: &mut dyn ServerNetwork,
    );

    /// The participant stopped playing.
    fn on_game_over(&mut self, world: &mut World, table_name: &str, user_id: u64);

    /// Game-specific world event. Unknown event names must not fail.
    fn on_event(
        &mut self,
        world: &mut World,
        table: NodeId,
        event_name: &str,
        part: Option<NodeId>,
    );

    /// Score fields changed. Refresh any visible scoreboard.
    fn on_score_changed(&mut self, world: &mut World, table_name: &str, state: &ArcadeTableState);

    /// Client-side key-down.
    fn on_client_input_began(
        &mut self,
        world: &mut World,
        table_name: &str,
        controller: &mut ArcadeController,
        network: &mut dyn ClientNetwork,
        input: InputEvent,
    );

    /// Client-side key-up.
    fn on_client_input_ended(
        &mut self,
        world: &mut World,
        table_name: &str,
        controller: &mut ArcadeController,
        network: &mut dyn ClientNetwork,
        input: InputEvent,
    );

    /// The server announced a freshly spawned piece.
    fn on_client_new_piece(
        &mut self,
        world: &mut World,
        table_name: &str,
        piece_type: &str,
        piece_name: &str,
        rng: &mut ChaCha8Rng,
    );

    /// Automated-occupant hook. Extension point; no kind drives a table yet.
    fn on_npc_playing_behavior(
        &mut self,
        world: &mut World,
        table_name: &str,
        user_id: u64,
        behavior: &mut BehaviorState,
    );
}

/// Fixed table-kind to mechanics mapping, built once at startup.
///
/// Each kind gets one singleton instance, so per-instance counters (such as
/// the air-hockey puck serial) are shared across every table of that kind.
pub struct MechanicsRegistry {
    air_hockey: AirHockeyMechanics,
    foosball: FoosballMechanics,
    pinball: PinballMechanics,
}

impl MechanicsRegistry {
    pub fn new() -> Self {
        Self {
            air_hockey: AirHockeyMechanics::new(),
            foosball: FoosballMechanics,
            pinball: PinballMechanics,
        }
    }

    pub fn get_mut(&mut self, kind: TableKind) -> &mut dyn TableMechanics {
        match kind {
            TableKind::AirHockey => &mut self.air_hockey,
            TableKind::Foosball => &mut self.foosball,
            TableKind::Pinball => &mut self.pinball,
        }
    }
}

impl Default for MechanicsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ServerNetwork;

    /// Records fired new-piece events for assertions.
    #[derive(Default)]
    pub struct RecordingNetwork {
        pub fired: Vec<(u64, String, String, String)>,
    }

    impl ServerNetwork for RecordingNetwork {
        fn fire_new_piece(
            &mut self,
            user_id: u64,
            table_name: &str,
            piece_type: &str,
            piece_name: &str,
        ) {
            self.fired.push((
                user_id,
                table_name.to_string(),
                piece_type.to_string(),
                piece_name.to_string(),
            ));
        }
    }

    /// Discards client events.
    pub struct NullClientNetwork;

    impl super::ClientNetwork for NullClientNetwork {
        fn fire_table_event(&mut self, _table_name: &str, _event_name: &str) {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Node, NodeKind};

    #[test]
    fn registry_serves_every_table_kind() {
        let mut registry = MechanicsRegistry::new();
        let mut world = World::new();
        let root = world.tables_root();
        let table = world.spawn(root, Node::new("Table1", NodeKind::Model));

        // every kind resolves and survives an unknown event
        for kind in [TableKind::AirHockey, TableKind::Foosball, TableKind::Pinball] {
            registry
                .get_mut(kind)
                .on_event(&mut world, table, "SomethingNew", None);
        }
    }

    #[test]
    fn npc_behavior_tolerates_a_missing_table() {
        let mut registry = MechanicsRegistry::new();
        let mut world = World::new();
        let mut behavior = BehaviorState::default();
        for kind in [TableKind::AirHockey, TableKind::Foosball, TableKind::Pinball] {
            registry
                .get_mut(kind)
                .on_npc_playing_behavior(&mut world, "Nowhere", 3, &mut behavior);
        }
    }
}
