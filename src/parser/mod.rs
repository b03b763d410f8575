/// Sample-input parsing: `<name> table:` ASCII blocks into row sets.
pub mod input_rows;
/// Identifier quoting, normalization, and physical-name construction.
pub mod names;
/// Problem-statement parsing: `Table:` sections into table schemas.
pub mod schema;
/// Maps declared type tokens to target column types, with JSON overrides.
pub mod type_lookup;
