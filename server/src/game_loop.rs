use tokio::sync::{broadcast, mpsc, oneshot};

use arcade_shared::protocol::{NewPieceMsg, ScoreStateMsg, WelcomeMsg, PROTOCOL_VERSION};
use arcade_shared::tables::ServerNetwork;

use crate::config::ServerConfig;
use crate::state::GameState;

/// Commands from client connections to the game task
pub enum GameCommand {
    PlayerJoin {
        response: oneshot::Sender<(u64, WelcomeMsg)>,
    },
    PlayerLeave {
        id: u64,
    },
    JoinTable {
        id: u64,
        table_name: String,
    },
    LeaveTable {
        id: u64,
    },
    TableEvent {
        table_name: String,
        event_name: String,
    },
}

/// Broadcasts from the game task to all connections
#[derive(Debug, Clone)]
pub enum GameBroadcast {
    /// Targeted: only the named participant's connection forwards it.
    NewPiece { user_id: u64, msg: NewPieceMsg },
    ScoreState(ScoreStateMsg),
}

/// The outbound network capability, backed by the broadcast channel.
/// "Fire to a participant" becomes a targeted broadcast that each
/// connection filters on its own id.
struct BroadcastNetwork<'a> {
    tx: &'a broadcast::Sender<GameBroadcast>,
}

impl ServerNetwork for BroadcastNetwork<'_> {
    fn fire_new_piece(
        &mut self,
        user_id: u64,
        table_name: &str,
        piece_type: &str,
        piece_name: &str,
    ) {
        let _ = self.tx.send(GameBroadcast::NewPiece {
            user_id,
            msg: NewPieceMsg {
                table_name: table_name.to_string(),
                piece_type: piece_type.to_string(),
                piece_name: piece_name.to_string(),
            },
        });
    }
}

/// Run the controller task. Owns all game state and processes one event at
/// a time; every dispatched hook runs to completion before the next.
pub async fn run_game_loop(
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameBroadcast>,
    config: ServerConfig,
) {
    let mut state = GameState::new(&config);

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            GameCommand::PlayerJoin { response } => {
                let id = state.allocate_user();
                let welcome = WelcomeMsg {
                    protocol_version: PROTOCOL_VERSION,
                    self_id: id,
                    tables: state.snapshot(),
                };
                let _ = response.send((id, welcome));
                tracing::info!("Player {} joined", id);
            }
            GameCommand::PlayerLeave { id } => {
                state.leave_table(id);
                tracing::info!("Player {} left", id);
            }
            GameCommand::JoinTable { id, table_name } => {
                let mut network = BroadcastNetwork { tx: &broadcast_tx };
                if state.join_table(id, &table_name, &mut network) {
                    tracing::info!("Player {} seated at {}", id, table_name);
                } else {
                    tracing::info!("Player {} denied a seat at {}", id, table_name);
                }
            }
            GameCommand::LeaveTable { id } => {
                state.leave_table(id);
            }
            GameCommand::TableEvent {
                table_name,
                event_name,
            } => {
                if let Some((goals_home, goals_away)) = state.table_event(&table_name, &event_name)
                {
                    let _ = broadcast_tx.send(GameBroadcast::ScoreState(ScoreStateMsg {
                        table_name,
                        goals_home,
                        goals_away,
                    }));
                }
            }
        }
    }

    tracing::info!("Game loop ended");
}
