/// Fixture planning and application: physical names, DDL/DML, load reports.
pub mod fixtures;
/// Logical-to-physical name substitution in free-form query text.
pub mod rewriter;
