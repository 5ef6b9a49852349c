use serde::{Deserialize, Serialize};

use crate::state::TableKind;

/// Protocol version - increment when making breaking changes.
/// Client should check this and show error if incompatible.
pub const PROTOCOL_VERSION: u32 = 1;

// === Server -> Client ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMsg {
    #[serde(rename = "welcome")]
    Welcome(WelcomeMsg),
    #[serde(rename = "new_piece")]
    NewPiece(NewPieceMsg),
    #[serde(rename = "score_state")]
    ScoreState(ScoreStateMsg),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMsg {
    pub protocol_version: u32,
    pub self_id: u64,
    pub tables: Vec<TableWire>,
}

/// Announcement of a freshly spawned piece, addressed to the seated player
/// so their client can attach local physics behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPieceMsg {
    pub table_name: String,
    pub piece_type: String,
    pub piece_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStateMsg {
    pub table_name: String,
    pub goals_home: u32,
    pub goals_away: u32,
}

/// Snapshot of one table fixture, sent in the welcome message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableWire {
    pub name: String,
    pub kind: TableKind,
    pub color: u32,
    pub goals_home: u32,
    pub goals_away: u32,
}

// === Client -> Server ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMsg {
    #[serde(rename = "join_table")]
    #[serde(rename_all = "camelCase")]
    JoinTable { table_name: String },
    #[serde(rename = "leave_table")]
    LeaveTable,
    #[serde(rename = "table_event")]
    #[serde(rename_all = "camelCase")]
    TableEvent {
        table_name: String,
        event_name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_msg_welcome_roundtrip() {
        let msg = ServerMsg::Welcome(WelcomeMsg {
            protocol_version: PROTOCOL_VERSION,
            self_id: 7,
            tables: vec![TableWire {
                name: "Table1".to_string(),
                kind: TableKind::AirHockey,
                color: 0xd65050,
                goals_home: 0,
                goals_away: 0,
            }],
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"welcome\""));
        assert!(json.contains("\"protocolVersion\":1"));
        assert!(json.contains("\"AirHockey\""));
        let parsed: ServerMsg = serde_json::from_str(&json).unwrap();
        match parsed {
            ServerMsg::Welcome(w) => {
                assert_eq!(w.protocol_version, PROTOCOL_VERSION);
                assert_eq!(w.self_id, 7);
                assert_eq!(w.tables.len(), 1);
            }
            _ => panic!("Expected Welcome"),
        }
    }

    #[test]
    fn server_msg_new_piece_roundtrip() {
        let msg = ServerMsg::NewPiece(NewPieceMsg {
            table_name: "Table1".to_string(),
            piece_type: "Puck".to_string(),
            piece_name: "Puck2".to_string(),
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"new_piece\""));
        assert!(json.contains("\"pieceName\":\"Puck2\""));
        let parsed: ServerMsg = serde_json::from_str(&json).unwrap();
        match parsed {
            ServerMsg::NewPiece(p) => {
                assert_eq!(p.table_name, "Table1");
                assert_eq!(p.piece_type, "Puck");
                assert_eq!(p.piece_name, "Puck2");
            }
            _ => panic!("Expected NewPiece"),
        }
    }

    #[test]
    fn server_msg_score_state_roundtrip() {
        let msg = ServerMsg::ScoreState(ScoreStateMsg {
            table_name: "Table1".to_string(),
            goals_home: 3,
            goals_away: 1,
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"score_state\""));
        assert!(json.contains("\"goalsHome\":3"));
        let parsed: ServerMsg = serde_json::from_str(&json).unwrap();
        match parsed {
            ServerMsg::ScoreState(s) => {
                assert_eq!(s.goals_home, 3);
                assert_eq!(s.goals_away, 1);
            }
            _ => panic!("Expected ScoreState"),
        }
    }

    #[test]
    fn client_msg_join_table_roundtrip() {
        let msg = ClientMsg::JoinTable {
            table_name: "Table1".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"join_table\""));
        assert!(json.contains("\"tableName\":\"Table1\""));
        let parsed: ClientMsg = serde_json::from_str(&json).unwrap();
        match parsed {
            ClientMsg::JoinTable { table_name } => assert_eq!(table_name, "Table1"),
            _ => panic!("Expected JoinTable"),
        }
    }

    #[test]
    fn client_msg_leave_table_roundtrip() {
        let json = serde_json::to_string(&ClientMsg::LeaveTable).unwrap();
        assert!(json.contains("\"type\":\"leave_table\""));
        let parsed: ClientMsg = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, ClientMsg::LeaveTable));
    }

    #[test]
    fn client_msg_table_event_roundtrip() {
        let msg = ClientMsg::TableEvent {
            table_name: "Table1".to_string(),
            event_name: "GoalHome".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"table_event\""));
        assert!(json.contains("\"eventName\":\"GoalHome\""));
        let parsed: ClientMsg = serde_json::from_str(&json).unwrap();
        match parsed {
            ClientMsg::TableEvent {
                table_name,
                event_name,
            } => {
                assert_eq!(table_name, "Table1");
                assert_eq!(event_name, "GoalHome");
            }
            _ => panic!("Expected TableEvent"),
        }
    }
}
