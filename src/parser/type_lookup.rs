use std::collections::HashMap;

use crate::parser::names::normalize_identifier;
use crate::parser::schema::ColumnType;

/// Lookup table mapping declared-type tokens to target column types.
///
/// Ships with the built-in LeetCode-style token table and can be overlaid
/// from JSON, where explicit entries take precedence over the built-ins.
#[derive(Debug, Clone)]
pub struct TypeLookup {
    types: HashMap<String, ColumnType>,
}

impl TypeLookup {
    /// Create a lookup preloaded with the built-in token table.
    pub fn new() -> Self {
        let mut types = HashMap::new();
        for (token, column_type) in [
            ("int", ColumnType::Int),
            ("integer", ColumnType::Int),
            ("bigint", ColumnType::BigInt),
            ("varchar", ColumnType::Varchar),
            ("string", ColumnType::Varchar),
            ("text", ColumnType::Varchar),
            ("date", ColumnType::Date),
            ("datetime", ColumnType::Timestamp),
            ("timestamp", ColumnType::Timestamp),
            ("float", ColumnType::Float),
            ("double", ColumnType::Double),
            ("decimal", ColumnType::Decimal),
            ("numeric", ColumnType::Decimal),
            ("bool", ColumnType::Boolean),
            ("boolean", ColumnType::Boolean),
        ] {
            types.insert(token.to_string(), column_type);
        }
        Self { types }
    }

    /// Overlay token mappings from a JSON object, e.g. `{"money": "DECIMAL"}`.
    ///
    /// Loaded entries take precedence over the built-ins.
    pub fn load_from_json(&mut self, json: &str) -> Result<(), String> {
        let parsed: HashMap<String, ColumnType> =
            serde_json::from_str(json).map_err(|e| format!("Invalid type map JSON: {e}"))?;
        for (token, column_type) in parsed {
            self.types.insert(normalize_identifier(&token), column_type);
        }
        Ok(())
    }

    /// Get the mapped type for a token, if any. Matching is case-insensitive.
    pub fn get(&self, token: &str) -> Option<ColumnType> {
        self.types.get(&normalize_identifier(token)).copied()
    }

    /// Resolve a token to a column type, falling back to `Varchar` for
    /// anything unrecognized. Never an error.
    pub fn resolve(&self, token: &str) -> ColumnType {
        self.get(token).unwrap_or(ColumnType::Varchar)
    }
}

impl Default for TypeLookup {
    fn default() -> Self {
        Self::new()
    }
}
