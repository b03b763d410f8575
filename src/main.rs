//! CLI entry point for `prob2sql`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use prob2sql::generator::fixtures::{self, LoadReport, SessionToken};
use prob2sql::generator::rewriter;
use prob2sql::output::formatter;
use prob2sql::output::report;
use prob2sql::parser::input_rows;
use prob2sql::parser::schema;
use prob2sql::parser::type_lookup::TypeLookup;
use prob2sql::session::{SqlSession, SqliteSession};

#[derive(Parser)]
#[command(
    name = "prob2sql",
    about = "Turn LeetCode-style SQL problem statements into ephemeral table fixtures"
)]
struct Cli {
    /// Problem statement file containing the `Table:` schema sections
    problem: PathBuf,

    /// Sample-input file with the ASCII data tables
    #[arg(long)]
    input: Option<PathBuf>,

    /// Query file referencing the logical table names (plain SQL or a
    /// markdown-fenced sql block)
    #[arg(long)]
    query: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "prob2sql-output")]
    output_dir: PathBuf,

    /// JSON file overriding the declared-type lookup table
    #[arg(long)]
    type_map: Option<PathBuf>,

    /// Fixed session token (default: a fresh random token per run)
    #[arg(long)]
    token: Option<String>,

    /// Execute the fixtures (and the query, if given) against SQLite
    #[arg(long)]
    execute: bool,

    /// Also print the query plan for the rewritten query (implies --execute)
    #[arg(long)]
    explain: bool,

    /// SQLite database path (default: in-memory)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Write the load summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Stage 1: read inputs
    let problem_text = read_file(&cli.problem);
    let input_text = cli.input.as_deref().map(read_file);
    let query_text = cli.query.as_deref().map(read_file).map(|text| {
        rewriter::extract_sql_codeblock(&text).unwrap_or_else(|| text.trim().to_string())
    });

    // Stage 2: type lookup, with optional JSON overlay
    let mut types = TypeLookup::new();
    if let Some(path) = &cli.type_map {
        let overlay = read_file(path);
        if let Err(e) = types.load_from_json(&overlay) {
            eprintln!("Error in {}: {e}", path.display());
            process::exit(2);
        }
    }

    // Stage 3: parse the schema sections
    let schemas = schema::parse_problem_schema(&problem_text, &types);
    if schemas.is_empty() {
        eprintln!(
            "No 'Table:' schema sections detected in {}",
            cli.problem.display()
        );
        process::exit(2);
    }
    if cli.verbose {
        eprintln!("Parsed {} table schema(s)", schemas.len());
    }

    // Stage 4: parse the sample-input blocks
    let blocks = input_text
        .as_deref()
        .map(input_rows::parse_input_tables)
        .unwrap_or_default();
    if cli.verbose {
        let rows: usize = blocks.iter().map(|b| b.rows.len()).sum();
        eprintln!("Parsed {} data block(s), {rows} row(s)", blocks.len());
    }

    // Stage 5: plan fixtures under a fresh (or fixed) session token
    let token = match &cli.token {
        Some(text) => match SessionToken::from_text(text) {
            Ok(token) => token,
            Err(e) => {
                eprintln!("{e}");
                process::exit(2);
            }
        },
        None => SessionToken::generate(),
    };
    let plan = fixtures::plan_fixtures(&schemas, &blocks, token);
    for (logical, physical) in plan.mapping.iter() {
        println!("{logical} -> {physical}");
    }

    // Stage 6: rewrite the query against the fresh mapping
    let rewritten = query_text
        .as_deref()
        .map(|q| rewriter::rewrite_query(q, &plan.mapping));

    // Stage 7: optionally execute against SQLite
    let outcome = if cli.execute || cli.explain {
        Some(execute_plan(&cli, &plan, rewritten.as_deref()))
    } else {
        None
    };
    let load = outcome.as_ref().map(|o| o.load.clone());

    // Stage 8: write output files
    let name = cli
        .problem
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("problem");
    let script = fixtures::format_script(&plan);
    let report_md = report::build_report(&schemas, &plan, load.as_ref());
    if let Err(e) = formatter::write_output(
        &cli.output_dir,
        name,
        &script,
        &report_md,
        rewritten.as_deref(),
    ) {
        eprintln!("Error writing output: {e}");
        process::exit(2);
    }
    if cli.verbose {
        eprintln!("Wrote output files to {}", cli.output_dir.display());
    }

    if let (Some(path), Some(load)) = (&cli.summary_json, load.as_ref()) {
        match serde_json::to_string_pretty(load) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    eprintln!("Error writing {}: {e}", path.display());
                    process::exit(2);
                }
            }
            Err(e) => {
                eprintln!("Error serializing load summary: {e}");
                process::exit(2);
            }
        }
    }

    // Partial row failures and downstream query errors are valid end states,
    // but flag them to scripts.
    if outcome
        .as_ref()
        .is_some_and(|o| o.query_failed || !o.load.failures.is_empty())
    {
        process::exit(1);
    }
}

fn read_file(path: &std::path::Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(2);
        }
    }
}

struct ExecOutcome {
    load: LoadReport,
    query_failed: bool,
}

fn execute_plan(cli: &Cli, plan: &fixtures::FixturePlan, rewritten: Option<&str>) -> ExecOutcome {
    let session = match &cli.db {
        Some(path) => SqliteSession::open(path),
        None => SqliteSession::open_in_memory(),
    };
    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    let load = match fixtures::apply_fixtures(plan, &mut session) {
        Ok(load) => load,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };
    for failure in &load.failures {
        eprintln!(
            "Row insert failed: {} row {}: {}",
            failure.table,
            failure.row_index + 1,
            failure.error
        );
    }
    if cli.verbose {
        eprintln!(
            "Created {} table(s), inserted {} row(s), {} failure(s)",
            load.tables_created,
            load.rows_inserted,
            load.failures.len()
        );
    }

    let mut query_failed = false;
    if let Some(query) = rewritten {
        if cli.explain {
            match session.execute(&rewriter::explain_statement(query)) {
                Ok(result) => println!("{}", result.to_ascii_table()),
                Err(e) => {
                    eprintln!("Explain failed: {e}");
                    query_failed = true;
                }
            }
        }
        if cli.execute {
            match session.execute(query) {
                Ok(result) => println!("{}", result.to_ascii_table()),
                Err(e) => {
                    eprintln!("Query execution failed: {e}");
                    query_failed = true;
                }
            }
        }
    }

    ExecOutcome { load, query_failed }
}
