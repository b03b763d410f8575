#![allow(dead_code)]

use std::path::PathBuf;

use prob2sql::generator::fixtures::{plan_fixtures, FixturePlan, SessionToken};
use prob2sql::parser::input_rows::{self, RowBlock};
use prob2sql::parser::schema::{self, TableSchema};
use prob2sql::parser::type_lookup::TypeLookup;

pub(crate) const FIXED_TOKEN: &str = "AB12CD34";

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture(fixture: &str, file: &str) -> String {
    let path = fixture_dir(fixture).join(file);
    std::fs::read_to_string(path).expect("fixture file should be readable")
}

pub(crate) fn parse_fixture_schemas(fixture: &str) -> Vec<TableSchema> {
    schema::parse_problem_schema(&read_fixture(fixture, "problem.txt"), &TypeLookup::new())
}

pub(crate) fn parse_fixture_blocks(fixture: &str) -> Vec<RowBlock> {
    input_rows::parse_input_tables(&read_fixture(fixture, "input.txt"))
}

pub(crate) fn fixed_token() -> SessionToken {
    SessionToken::from_text(FIXED_TOKEN).expect("fixed token should be valid")
}

pub(crate) fn plan_fixture(fixture: &str) -> (Vec<TableSchema>, FixturePlan) {
    let schemas = parse_fixture_schemas(fixture);
    let blocks = parse_fixture_blocks(fixture);
    let plan = plan_fixtures(&schemas, &blocks, fixed_token());
    (schemas, plan)
}
