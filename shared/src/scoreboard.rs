//! Scoreboard text capability.
//!
//! The character budget lives here: callers hand over the full string and
//! this module fits it to the display.

use crate::world::{NodeId, NodeKind, World};

/// Render `text` on a table's `Scoreboard` display, truncated and then
/// space-padded to exactly `max_chars` characters. A table without a
/// scoreboard is a no-op.
pub fn update_scoreboard(world: &mut World, table: NodeId, text: &str, max_chars: usize) {
    let display = match world.find_child_of_kind(table, "Scoreboard", NodeKind::Display) {
        Some(display) => display,
        None => return,
    };
    let mut fitted: String = text.chars().take(max_chars).collect();
    while fitted.chars().count() < max_chars {
        fitted.push(' ');
    }
    if let Some(node) = world.get_mut(display) {
        node.text = fitted;
    }
}
