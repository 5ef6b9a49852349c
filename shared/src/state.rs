use serde::{Deserialize, Serialize};

/// Closed set of minigame kinds. Decides which mechanics govern a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    AirHockey,
    Foosball,
    Pinball,
}

/// Per-table mutable state, owned by the server's table registry. Mechanics
/// read it inside lifecycle hooks and never hold on to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcadeTableState {
    /// Theme color applied to table parts (0xRRGGBB).
    pub color: u32,
    pub goals_home: u32,
    pub goals_away: u32,
}

impl ArcadeTableState {
    pub fn new(color: u32) -> Self {
        Self {
            color,
            goals_home: 0,
            goals_away: 0,
        }
    }
}
