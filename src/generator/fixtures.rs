use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::parser::input_rows::RowBlock;
use crate::parser::names::{escape_string_literal, physical_table_name, quote_identifier};
use crate::parser::schema::{ColumnType, TableSchema};
use crate::session::SqlSession;

/// Unique per-build token appended to every generated physical table name.
///
/// Regenerated on every fixture build so rebuilds never collide with tables
/// left behind by prior runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token: 8 uppercase hex characters.
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(hex[..8].to_ascii_uppercase())
    }

    /// Build a token from caller-supplied text, for reproducible runs.
    pub fn from_text(text: &str) -> Result<Self, String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!(
                "Invalid session token '{text}': expected ASCII letters and digits"
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bidirectional association between logical and generated physical names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping {
    logical_to_physical: BTreeMap<String, String>,
    physical_to_logical: BTreeMap<String, String>,
}

impl NameMapping {
    /// Associate a logical name with its physical name.
    pub fn insert(&mut self, logical: impl Into<String>, physical: impl Into<String>) {
        let logical = logical.into();
        let physical = physical.into();
        self.physical_to_logical
            .insert(physical.clone(), logical.clone());
        self.logical_to_physical.insert(logical, physical);
    }

    /// Physical name for a logical name, if mapped.
    pub fn physical(&self, logical: &str) -> Option<&str> {
        self.logical_to_physical.get(logical).map(String::as_str)
    }

    /// Logical name for a physical name, if mapped.
    pub fn logical(&self, physical: &str) -> Option<&str> {
        self.physical_to_logical.get(physical).map(String::as_str)
    }

    /// True when no names are mapped.
    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }

    /// Number of mapped names.
    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    /// Iterate `(logical, physical)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.logical_to_physical
            .iter()
            .map(|(l, p)| (l.as_str(), p.as_str()))
    }
}

/// Generated statements for one logical table.
#[derive(Debug, Clone)]
pub struct TableFixture {
    /// Logical table name as written in the problem text.
    pub logical: String,
    /// Generated physical table name.
    pub physical: String,
    /// Table (re)creation statements, in execution order.
    pub create: Vec<String>,
    /// One insertion statement per surviving sample row, in source order.
    pub inserts: Vec<String>,
}

/// Complete set of generated statements for one problem build.
///
/// The name mapping is fully populated before any statement is built, so the
/// rewriter and the insertion step never see a partially-built mapping.
#[derive(Debug, Clone)]
pub struct FixturePlan {
    /// Token embedded in every physical name of this build.
    pub token: SessionToken,
    /// Per-table statements, in schema source order.
    pub tables: Vec<TableFixture>,
    /// Logical-to-physical name mapping for this build.
    pub mapping: NameMapping,
}

/// A row insertion that failed during application.
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    /// Logical name of the table the row belongs to.
    pub table: String,
    /// Zero-based index of the row within its block.
    pub row_index: usize,
    /// Error text reported by the session.
    pub error: String,
}

/// Outcome of applying a plan through a session: best-effort, not
/// transactional, so partial success is a valid end state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Number of tables created.
    pub tables_created: usize,
    /// Number of rows inserted successfully.
    pub rows_inserted: usize,
    /// Rows whose insertion failed, in encounter order.
    pub failures: Vec<RowFailure>,
}

/// Plan the fixtures for a parsed problem: generate physical names and the
/// full DDL/DML statement set. Pure; nothing touches a database here.
///
/// Tables with no matching row block get an empty insert list and will simply
/// be created empty. Value lookup is by exact schema column name against the
/// block header; a sample column the schema does not declare is ignored, and
/// a declared column the sample omits inserts as NULL.
pub fn plan_fixtures(
    schemas: &[TableSchema],
    blocks: &[RowBlock],
    token: SessionToken,
) -> FixturePlan {
    let mut mapping = NameMapping::default();
    for schema in schemas {
        mapping.insert(
            schema.name.clone(),
            physical_table_name(&schema.name, token.as_str()),
        );
    }

    let mut tables = Vec::with_capacity(schemas.len());
    for schema in schemas {
        let physical = physical_table_name(&schema.name, token.as_str());
        let create = vec![
            format!("DROP TABLE IF EXISTS {}", quote_identifier(&physical)),
            create_table_statement(&physical, schema),
        ];
        let inserts = match blocks.iter().find(|b| b.table == schema.name) {
            Some(block) => block
                .rows
                .iter()
                .map(|row| insert_statement(&physical, schema, block, row))
                .collect(),
            None => Vec::new(),
        };
        tables.push(TableFixture {
            logical: schema.name.clone(),
            physical,
            create,
            inserts,
        });
    }

    FixturePlan {
        token,
        tables,
        mapping,
    }
}

/// Execute a plan through a session.
///
/// A failed creation statement is fatal and aborts the build; a failed row
/// insertion is recorded and does not stop subsequent rows.
pub fn apply_fixtures<S: SqlSession>(
    plan: &FixturePlan,
    session: &mut S,
) -> Result<LoadReport, String> {
    let mut report = LoadReport::default();
    for table in &plan.tables {
        for statement in &table.create {
            session.execute(statement).map_err(|e| {
                format!(
                    "Failed to create table {} for '{}': {e}",
                    table.physical, table.logical
                )
            })?;
        }
        report.tables_created += 1;

        for (row_index, statement) in table.inserts.iter().enumerate() {
            match session.execute(statement) {
                Ok(_) => report.rows_inserted += 1,
                Err(error) => report.failures.push(RowFailure {
                    table: table.logical.clone(),
                    row_index,
                    error,
                }),
            }
        }
    }
    Ok(report)
}

/// Render the whole plan as a single SQL script, one commented section per
/// table.
pub fn format_script(plan: &FixturePlan) -> String {
    let mut out = String::new();
    for table in &plan.tables {
        out.push_str(&format!("-- {} -> {}\n", table.logical, table.physical));
        for statement in table.create.iter().chain(table.inserts.iter()) {
            out.push_str(statement);
            out.push_str(";\n");
        }
        out.push('\n');
    }
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

fn create_table_statement(physical: &str, schema: &TableSchema) -> String {
    let columns = schema
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), c.column_type))
        .collect::<Vec<_>>()
        .join(",\n  ");
    format!(
        "CREATE TEMPORARY TABLE {} (\n  {}\n)",
        quote_identifier(physical),
        columns
    )
}

fn insert_statement(
    physical: &str,
    schema: &TableSchema,
    block: &RowBlock,
    row: &[Option<String>],
) -> String {
    let columns = schema
        .columns
        .iter()
        .map(|c| quote_identifier(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let values = schema
        .columns
        .iter()
        .map(|c| {
            let cell = block
                .column_index(&c.name)
                .and_then(|idx| row.get(idx))
                .and_then(|v| v.as_deref());
            render_value(cell, c.column_type)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(physical),
        columns,
        values
    )
}

// Numeric values pass through unquoted; the caller is trusted to have
// supplied numeric-looking text. Everything else is quoted and escaped.
fn render_value(cell: Option<&str>, column_type: ColumnType) -> String {
    match cell {
        None => "NULL".to_string(),
        Some(text) if column_type.is_numeric() => text.to_string(),
        Some(text) => format!("'{}'", escape_string_literal(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Column;

    fn token() -> SessionToken {
        SessionToken::from_text("AB12CD34").unwrap()
    }

    fn employee_schema() -> TableSchema {
        TableSchema {
            name: "Employee".to_string(),
            columns: vec![
                Column {
                    name: "empId".to_string(),
                    column_type: ColumnType::Int,
                },
                Column {
                    name: "name".to_string(),
                    column_type: ColumnType::Varchar,
                },
            ],
        }
    }

    #[test]
    fn generated_token_is_eight_uppercase_hex_chars() {
        let token = SessionToken::generate();
        assert_eq!(token.as_str().len(), 8);
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn from_text_rejects_non_alphanumeric_tokens() {
        assert!(SessionToken::from_text("ab12cd34").is_ok());
        assert!(SessionToken::from_text("").is_err());
        assert!(SessionToken::from_text("AB-12").is_err());
    }

    #[test]
    fn mapping_is_bidirectional() {
        let plan = plan_fixtures(&[employee_schema()], &[], token());
        assert_eq!(
            plan.mapping.physical("Employee"),
            Some("TEMP_EMPLOYEE_AB12CD34")
        );
        assert_eq!(
            plan.mapping.logical("TEMP_EMPLOYEE_AB12CD34"),
            Some("Employee")
        );
        assert_eq!(plan.mapping.len(), 1);
    }

    #[test]
    fn create_statements_drop_then_create() {
        let plan = plan_fixtures(&[employee_schema()], &[], token());
        assert_eq!(
            plan.tables[0].create[0],
            "DROP TABLE IF EXISTS \"TEMP_EMPLOYEE_AB12CD34\""
        );
        assert_eq!(
            plan.tables[0].create[1],
            "CREATE TEMPORARY TABLE \"TEMP_EMPLOYEE_AB12CD34\" (\n  \"empId\" INT,\n  \"name\" VARCHAR\n)"
        );
    }

    #[test]
    fn table_without_row_block_plans_no_inserts() {
        let plan = plan_fixtures(&[employee_schema()], &[], token());
        assert!(plan.tables[0].inserts.is_empty());
    }

    #[test]
    fn insert_values_follow_declared_types() {
        let block = RowBlock {
            table: "Employee".to_string(),
            columns: vec!["empId".to_string(), "name".to_string()],
            rows: vec![
                vec![Some("3".to_string()), Some("Brad".to_string())],
                vec![Some("4".to_string()), None],
            ],
        };
        let plan = plan_fixtures(&[employee_schema()], &[block], token());
        assert_eq!(
            plan.tables[0].inserts[0],
            "INSERT INTO \"TEMP_EMPLOYEE_AB12CD34\" (\"empId\", \"name\") VALUES (3, 'Brad')"
        );
        assert_eq!(
            plan.tables[0].inserts[1],
            "INSERT INTO \"TEMP_EMPLOYEE_AB12CD34\" (\"empId\", \"name\") VALUES (4, NULL)"
        );
    }

    #[test]
    fn missing_sample_column_inserts_null_and_extras_are_ignored() {
        let block = RowBlock {
            table: "Employee".to_string(),
            columns: vec!["name".to_string(), "bogus".to_string()],
            rows: vec![vec![Some("Dan".to_string()), Some("x".to_string())]],
        };
        let plan = plan_fixtures(&[employee_schema()], &[block], token());
        assert_eq!(
            plan.tables[0].inserts[0],
            "INSERT INTO \"TEMP_EMPLOYEE_AB12CD34\" (\"empId\", \"name\") VALUES (NULL, 'Dan')"
        );
    }

    #[test]
    fn string_values_are_quote_escaped() {
        let block = RowBlock {
            table: "Employee".to_string(),
            columns: vec!["empId".to_string(), "name".to_string()],
            rows: vec![vec![Some("5".to_string()), Some("O'Brien".to_string())]],
        };
        let plan = plan_fixtures(&[employee_schema()], &[block], token());
        assert!(plan.tables[0].inserts[0].ends_with("VALUES (5, 'O''Brien')"));
    }
}
