use std::path::{Component, Path};

/// Write all output files to the specified directory.
///
/// Produces `<name>_fixtures.sql` and `<name>_report.md`, plus
/// `<name>_query.sql` when a rewritten query is supplied.
pub fn write_output(
    output_dir: &Path,
    name: &str,
    script: &str,
    report: &str,
    rewritten_query: Option<&str>,
) -> Result<(), String> {
    validate_output_name(name)?;

    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create output directory: {e}"))?;

    let script_path = output_dir.join(format!("{name}_fixtures.sql"));
    std::fs::write(&script_path, script)
        .map_err(|e| format!("Failed to write {}: {e}", script_path.display()))?;

    let report_path = output_dir.join(format!("{name}_report.md"));
    std::fs::write(&report_path, report)
        .map_err(|e| format!("Failed to write {}: {e}", report_path.display()))?;

    if let Some(query) = rewritten_query {
        let query_path = output_dir.join(format!("{name}_query.sql"));
        std::fs::write(&query_path, query)
            .map_err(|e| format!("Failed to write {}: {e}", query_path.display()))?;
    }

    Ok(())
}

fn validate_output_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Output name must not be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!(
            "Invalid output name '{name}': path separators are not allowed"
        ));
    }
    let candidate = Path::new(name);
    if candidate.is_absolute()
        || candidate.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        })
    {
        return Err(format!(
            "Invalid output name '{name}': traversal segments are not allowed"
        ));
    }
    Ok(())
}
