use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parser::type_lookup::TypeLookup;

/// Declared type of a parsed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Variable-length string. Also the fallback for unrecognized tokens.
    Varchar,
    /// Calendar date.
    Date,
    /// Date and time of day.
    Timestamp,
    /// Single-precision floating point.
    Float,
    /// Double-precision floating point.
    Double,
    /// Fixed-point decimal.
    Decimal,
    /// True/false flag.
    Boolean,
}

impl ColumnType {
    /// The SQL keyword emitted in generated DDL.
    pub fn sql_keyword(self) -> &'static str {
        match self {
            ColumnType::Int => "INT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Boolean => "BOOLEAN",
        }
    }

    /// True for types whose values are emitted unquoted in generated DML.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ColumnType::Int
                | ColumnType::BigInt
                | ColumnType::Float
                | ColumnType::Double
                | ColumnType::Decimal
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_keyword())
    }
}

/// A single parsed column: name as written, plus its resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, case preserved from the problem text.
    pub name: String,
    /// Resolved declared type.
    pub column_type: ColumnType,
}

/// Ordered column list for one logical table, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Logical table name, case preserved from the problem text.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

/// Parse `Table:` schema sections out of a problem statement.
///
/// Each section is the literal marker `Table:` (case-insensitive), the table
/// name on the remainder of that line, and any number of `| name | type |`
/// rows. Anything that is not a two-column pipe row (borders, the
/// `| Column Name | Type |` header, prose) is skipped without error. A
/// section with no column rows yields nothing; a text with no sections yields
/// an empty Vec, which callers must surface as a usage error rather than a
/// crash. A repeated table name replaces the earlier section's columns while
/// keeping its original position.
pub fn parse_problem_schema(text: &str, types: &TypeLookup) -> Vec<TableSchema> {
    let marker = Regex::new(r"(?i)\bTable:\s*").expect("valid table marker regex");
    let column_row = Regex::new(r"^\|\s*([A-Za-z0-9_]+)\s*\|\s*([A-Za-z0-9_]+)\s*\|")
        .expect("valid column row regex");

    let mut tables: Vec<TableSchema> = Vec::new();
    for section in marker.split(text).skip(1) {
        let section = section.trim();
        let mut lines = section.lines();
        let Some(name_line) = lines.next() else {
            continue;
        };
        let name = name_line.trim();
        if name.is_empty() {
            continue;
        }

        let mut columns = Vec::new();
        for line in lines {
            if let Some(cap) = column_row.captures(line.trim()) {
                columns.push(Column {
                    name: cap[1].to_string(),
                    column_type: types.resolve(&cap[2]),
                });
            }
        }
        if columns.is_empty() {
            continue;
        }

        if let Some(existing) = tables.iter_mut().find(|t| t.name == name) {
            existing.columns = columns;
        } else {
            tables.push(TableSchema {
                name: name.to_string(),
                columns,
            });
        }
    }
    tables
}
