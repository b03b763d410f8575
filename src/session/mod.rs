/// SQLite-backed session implementation.
pub mod sqlite;

pub use sqlite::SqliteSession;

/// Column names and rows produced by a single statement.
///
/// Statements that return nothing (DDL, DML) yield an empty result. Cells are
/// rendered to text; `None` marks SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementResult {
    /// Column names, in select order. Empty for non-query statements.
    pub columns: Vec<String>,
    /// Result rows, each with one cell per column.
    pub rows: Vec<Vec<Option<String>>>,
}

impl StatementResult {
    /// True when the statement produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the result as a bordered ASCII table, the same shape the
    /// problem statements themselves use. NULL cells print as `null`.
    pub fn to_ascii_table(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                let len = cell.as_deref().unwrap_or("null").len();
                if idx < widths.len() && len > widths[idx] {
                    widths[idx] = len;
                }
            }
        }

        let border = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );
        let format_row = |cells: Vec<&str>| {
            format!(
                "|{}|",
                cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &width)| format!(" {cell:<width$} "))
                    .collect::<Vec<_>>()
                    .join("|")
            )
        };

        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        out.push_str(&format_row(
            self.columns.iter().map(String::as_str).collect(),
        ));
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_row(
                row.iter().map(|c| c.as_deref().unwrap_or("null")).collect(),
            ));
            out.push('\n');
        }
        out.push_str(&border);
        out
    }
}

/// The one capability the fixture pipeline needs from the surrounding
/// application: execute SQL text, return the rows it produced.
///
/// Implementations are synchronous and single-threaded; statements are issued
/// one at a time with no batching, retries, or cancellation.
pub trait SqlSession {
    /// Execute a single SQL statement.
    fn execute(&mut self, sql: &str) -> Result<StatementResult, String>;
}
