use std::collections::HashMap;

use arcade_shared::protocol::TableWire;
use arcade_shared::state::{ArcadeTableState, TableKind};
use arcade_shared::tables::{MechanicsRegistry, ServerNetwork};
use arcade_shared::world::World;

use crate::config::ServerConfig;
use crate::worldgen;

struct TableEntry {
    kind: TableKind,
    state: ArcadeTableState,
}

/// Central controller state owned by the game task: the world, the fixed
/// mechanics registry, per-table state, and seat occupancy.
///
/// Occupancy is the call discipline that keeps physics authority exclusive:
/// `on_game_start` is never dispatched for a table whose previous occupant
/// has not gone through `on_game_over`.
pub struct GameState {
    pub world: World,
    registry: MechanicsRegistry,
    tables: HashMap<String, TableEntry>,
    /// table name -> seated participant
    occupants: HashMap<String, u64>,
    next_user_id: u64,
}

impl GameState {
    pub fn new(config: &ServerConfig) -> Self {
        let mut world = World::new();
        let mut registry = MechanicsRegistry::new();
        let mut tables = HashMap::new();
        for def in &config.tables {
            let state = ArcadeTableState::new(def.color);
            worldgen::build_table(&mut world, &mut registry, def, &state);
            tables.insert(
                def.name.clone(),
                TableEntry {
                    kind: def.kind,
                    state,
                },
            );
        }
        Self {
            world,
            registry,
            tables,
            occupants: HashMap::new(),
            next_user_id: 1,
        }
    }

    /// Hand out the next participant id.
    pub fn allocate_user(&mut self) -> u64 {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }

    /// Seat a participant at a table. Refuses unknown tables and tables
    /// that already have an occupant.
    pub fn join_table(
        &mut self,
        user_id: u64,
        table_name: &str,
        network: &mut dyn ServerNetwork,
    ) -> bool {
        let kind = match self.tables.get(table_name) {
            Some(entry) => entry.kind,
            None => return false,
        };
        if self.occupants.contains_key(table_name) {
            return false;
        }
        self.occupants.insert(table_name.to_string(), user_id);
        self.registry
            .get_mut(kind)
            .on_game_start(&mut self.world, table_name, user_id, network);
        true
    }

    /// Release a participant's seat, if they hold one.
    pub fn leave_table(&mut self, user_id: u64) {
        let table_name = self
            .occupants
            .iter()
            .find(|(_, occupant)| **occupant == user_id)
            .map(|(name, _)| name.clone());
        let table_name = match table_name {
            Some(name) => name,
            None => return,
        };
        self.occupants.remove(&table_name);
        if let Some(entry) = self.tables.get(&table_name) {
            self.registry
                .get_mut(entry.kind)
                .on_game_over(&mut self.world, &table_name, user_id);
        }
    }

    /// Route a world event into the table's mechanics. Goal events also
    /// bump the score and refresh the scoreboard; the new score is returned
    /// when it changed.
    pub fn table_event(&mut self, table_name: &str, event_name: &str) -> Option<(u32, u32)> {
        let kind = match self.tables.get(table_name) {
            Some(entry) => entry.kind,
            None => return None,
        };
        if let Some(table) = self.world.find_table(table_name) {
            self.registry
                .get_mut(kind)
                .on_event(&mut self.world, table, event_name, None);
        }

        let (scored, snapshot) = match self.tables.get_mut(table_name) {
            Some(entry) => {
                let scored = match event_name {
                    "GoalHome" => {
                        entry.state.goals_home += 1;
                        true
                    }
                    "GoalAway" => {
                        entry.state.goals_away += 1;
                        true
                    }
                    _ => false,
                };
                (scored, entry.state.clone())
            }
            None => return None,
        };
        if !scored {
            return None;
        }

        self.registry
            .get_mut(kind)
            .on_score_changed(&mut self.world, table_name, &snapshot);
        Some((snapshot.goals_home, snapshot.goals_away))
    }

    pub fn occupant(&self, table_name: &str) -> Option<u64> {
        self.occupants.get(table_name).copied()
    }

    /// Snapshot of every table for the welcome message, ordered by name.
    pub fn snapshot(&self) -> Vec<TableWire> {
        let mut tables: Vec<TableWire> = self
            .tables
            .iter()
            .map(|(name, entry)| TableWire {
                name: name.clone(),
                kind: entry.kind,
                color: entry.state.color,
                goals_home: entry.state.goals_home,
                goals_away: entry.state.goals_away,
            })
            .collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        tables
    }
}
