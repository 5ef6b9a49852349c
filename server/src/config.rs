use std::collections::HashSet;

use arcade_shared::state::TableKind;

/// One table fixture to build into the world at startup.
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: String,
    pub kind: TableKind,
    /// Theme color (0xRRGGBB).
    pub color: u32,
}

impl TableDef {
    pub fn new(name: &str, kind: TableKind, color: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            color,
        }
    }
}

/// Server configuration
pub struct ServerConfig {
    pub listen_addr: String,
    pub tables: Vec<TableDef>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9001".to_string(),
            tables: vec![
                TableDef::new("Table1", TableKind::AirHockey, 0xd65050),
                TableDef::new("Table2", TableKind::AirHockey, 0x5078d6),
                TableDef::new("Table3", TableKind::Foosball, 0x50b450),
                TableDef::new("Table4", TableKind::Pinball, 0xc8a432),
            ],
        }
    }
}

impl ServerConfig {
    /// Reject configurations the world builder cannot honor.
    pub fn validate(&self) -> Result<(), String> {
        if self.tables.is_empty() {
            return Err("at least one table fixture is required".to_string());
        }
        let mut seen = HashSet::new();
        for table in &self.tables {
            if table.name.is_empty() {
                return Err("table fixture with an empty name".to_string());
            }
            if !seen.insert(table.name.as_str()) {
                return Err(format!("duplicate table name '{}'", table.name));
            }
        }
        Ok(())
    }
}
