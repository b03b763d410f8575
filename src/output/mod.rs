/// Writes the generated fixture script, report, and rewritten query to disk.
pub mod formatter;
/// Builds a Markdown report of detected tables, name mapping, and row loads.
pub mod report;
