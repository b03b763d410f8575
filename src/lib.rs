//! Turn LeetCode-style SQL problem statements into ephemeral table fixtures.
#![warn(missing_docs)]

/// Fixture planning, physical-name mapping, and query rewriting.
pub mod generator;
/// File output and markdown report generation.
pub mod output;
/// Problem-text parsing: schema sections, sample-input tables, and identifiers.
pub mod parser;
/// The SQL execution seam: session trait and the SQLite-backed implementation.
pub mod session;
