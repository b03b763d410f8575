use std::fmt::Write;

use crate::generator::fixtures::{FixturePlan, LoadReport};
use crate::parser::schema::TableSchema;

/// Build a markdown report with the detected tables, their physical names,
/// and (when the plan was executed) the row-load summary.
pub fn build_report(
    schemas: &[TableSchema],
    plan: &FixturePlan,
    load: Option<&LoadReport>,
) -> String {
    let mut report = String::new();

    writeln!(report, "# prob2sql Fixture Report").unwrap();
    writeln!(report).unwrap();
    writeln!(report, "Session token: `{}`", plan.token).unwrap();
    writeln!(report).unwrap();

    writeln!(report, "## Detected Tables").unwrap();
    writeln!(report).unwrap();
    writeln!(report, "| Logical | Physical | Columns |").unwrap();
    writeln!(report, "|---------|----------|---------|").unwrap();

    for schema in schemas {
        let physical = plan.mapping.physical(&schema.name).unwrap_or("(not created)");
        let columns = schema
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.column_type))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(report, "| {} | {} | {} |", schema.name, physical, columns).unwrap();
    }

    if let Some(load) = load {
        writeln!(report).unwrap();
        writeln!(report, "## Load Summary").unwrap();
        writeln!(report).unwrap();
        writeln!(report, "- Tables created: {}", load.tables_created).unwrap();
        writeln!(report, "- Rows inserted: {}", load.rows_inserted).unwrap();
        writeln!(report, "- Failed rows: {}", load.failures.len()).unwrap();

        if !load.failures.is_empty() {
            writeln!(report).unwrap();
            writeln!(report, "## Failed Rows").unwrap();
            writeln!(report).unwrap();
            for failure in &load.failures {
                writeln!(
                    report,
                    "- **{}** row {}: {}",
                    failure.table,
                    failure.row_index + 1,
                    failure.error
                )
                .unwrap();
            }
        }
    }

    report
}
