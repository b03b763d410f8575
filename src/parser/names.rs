/// Quote an identifier for use in generated DDL/DML.
///
/// Double-quotes the name and doubles embedded double quotes, so the engine
/// preserves the identifier's case exactly as written in the problem text.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Return the identifier without surrounding double quotes.
pub fn unquote_identifier(ident: &str) -> &str {
    ident
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(ident)
}

/// Normalize an identifier for case-insensitive matching.
///
/// Trims whitespace, removes surrounding double quotes on a single identifier,
/// and lowercases the result.
pub fn normalize_identifier(ident: &str) -> String {
    unquote_identifier(ident.trim()).to_ascii_lowercase()
}

/// Build the physical name for a logical table under a session token.
///
/// Examples:
/// - `("Employee", "AB12CD34")` -> `"TEMP_EMPLOYEE_AB12CD34"`
/// - `("Bonus", "FFFF0000")` -> `"TEMP_BONUS_FFFF0000"`
pub fn physical_table_name(logical: &str, token: &str) -> String {
    format!("TEMP_{}_{}", logical.to_uppercase(), token)
}

/// Escape a value for embedding in a single-quoted SQL string literal.
pub fn escape_string_literal(value: &str) -> String {
    value.replace('\'', "''")
}
