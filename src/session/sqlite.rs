use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::session::{SqlSession, StatementResult};

/// In-process SQLite-backed session.
///
/// The connection is the single shared resource for one interactive problem
/// session; temporary tables live exactly as long as it does.
pub struct SqliteSession {
    conn: Connection,
}

impl SqliteSession {
    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, String> {
        Connection::open_in_memory()
            .map(|conn| Self { conn })
            .map_err(|e| format!("Failed to open in-memory database: {e}"))
    }

    /// Open (or create) a file-backed database.
    pub fn open(path: &Path) -> Result<Self, String> {
        Connection::open(path)
            .map(|conn| Self { conn })
            .map_err(|e| format!("Failed to open database {}: {e}", path.display()))
    }
}

impl SqlSession for SqliteSession {
    fn execute(&mut self, sql: &str) -> Result<StatementResult, String> {
        let mut statement = self.conn.prepare(sql).map_err(|e| e.to_string())?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        if columns.is_empty() {
            statement.execute([]).map_err(|e| e.to_string())?;
            return Ok(StatementResult::default());
        }

        let mut rows = statement.query([]).map_err(|e| e.to_string())?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next().map_err(|e| e.to_string())? {
            let mut cells = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                cells.push(render_value(row.get_ref(idx).map_err(|e| e.to_string())?));
            }
            collected.push(cells);
        }
        Ok(StatementResult {
            columns,
            rows: collected,
        })
    }
}

fn render_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(text) => Some(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(blob) => Some(format!("<{} bytes>", blob.len())),
    }
}
