use regex::{NoExpand, Regex};

use crate::generator::fixtures::NameMapping;

/// Replace logical table names in query text with their physical names.
///
/// Matches are whole-word and case-insensitive. Names are processed longest
/// first (ties broken lexicographically), so a logical name that is a prefix
/// of another never gets substituted inside the longer name. Unmapped
/// references pass through unchanged; an empty mapping returns the input
/// verbatim. This is a pure lexical transform with no SQL awareness.
pub fn rewrite_query(query: &str, mapping: &NameMapping) -> String {
    let mut names: Vec<(&str, &str)> = mapping.iter().collect();
    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    let mut rewritten = query.to_string();
    for (logical, physical) in names {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(logical));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        rewritten = re.replace_all(&rewritten, NoExpand(physical)).into_owned();
    }
    rewritten
}

/// Extract the SQL body from a ```` ```sql ```` fenced code block.
///
/// Returns `None` when the text carries no fence, letting callers fall back
/// to treating the whole text as SQL.
pub fn extract_sql_codeblock(text: &str) -> Option<String> {
    let fence = Regex::new(r"(?is)```sql\s*(.*?)\s*```").expect("valid code fence regex");
    fence.captures(text).map(|cap| cap[1].trim().to_string())
}

/// Wrap a rewritten query in the plan-inspection statement.
pub fn explain_statement(sql: &str) -> String {
    format!("EXPLAIN QUERY PLAN\n{sql}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> NameMapping {
        let mut mapping = NameMapping::default();
        for (logical, physical) in pairs {
            mapping.insert(*logical, *physical);
        }
        mapping
    }

    #[test]
    fn rewrites_whole_word_case_insensitively() {
        let mapping = mapping(&[("Employee", "TEMP_EMPLOYEE_AB12CD34")]);
        assert_eq!(
            rewrite_query("SELECT * FROM Employee", &mapping),
            "SELECT * FROM TEMP_EMPLOYEE_AB12CD34"
        );
        assert_eq!(
            rewrite_query("select * from employee e", &mapping),
            "select * from TEMP_EMPLOYEE_AB12CD34 e"
        );
    }

    #[test]
    fn empty_mapping_is_a_no_op() {
        let query = "SELECT * FROM Employee WHERE x = 1";
        assert_eq!(rewrite_query(query, &NameMapping::default()), query);
    }

    #[test]
    fn longer_names_are_substituted_first() {
        let mapping = mapping(&[
            ("Order", "TEMP_ORDER_AB12CD34"),
            ("Orders", "TEMP_ORDERS_AB12CD34"),
        ]);
        assert_eq!(
            rewrite_query("SELECT * FROM Orders JOIN Order", &mapping),
            "SELECT * FROM TEMP_ORDERS_AB12CD34 JOIN TEMP_ORDER_AB12CD34"
        );
    }

    #[test]
    fn result_is_independent_of_mapping_insertion_order() {
        let forward = mapping(&[("Order", "TEMP_ORDER_X"), ("Orders", "TEMP_ORDERS_X")]);
        let reverse = mapping(&[("Orders", "TEMP_ORDERS_X"), ("Order", "TEMP_ORDER_X")]);
        let query = "SELECT * FROM Orders o, Order p";
        assert_eq!(
            rewrite_query(query, &forward),
            rewrite_query(query, &reverse)
        );
    }

    #[test]
    fn unmapped_names_pass_through() {
        let mapping = mapping(&[("Employee", "TEMP_EMPLOYEE_X")]);
        assert_eq!(
            rewrite_query("SELECT * FROM Bonus", &mapping),
            "SELECT * FROM Bonus"
        );
    }

    #[test]
    fn partial_word_matches_are_left_alone() {
        let mapping = mapping(&[("Order", "TEMP_ORDER_X")]);
        assert_eq!(
            rewrite_query("SELECT * FROM Preorders", &mapping),
            "SELECT * FROM Preorders"
        );
    }

    #[test]
    fn qualified_references_are_rewritten() {
        let mapping = mapping(&[("Employee", "TEMP_EMPLOYEE_X")]);
        assert_eq!(
            rewrite_query("SELECT Employee.name FROM Employee", &mapping),
            "SELECT TEMP_EMPLOYEE_X.name FROM TEMP_EMPLOYEE_X"
        );
    }

    #[test]
    fn replacement_has_no_sql_awareness_and_hits_matching_column_names() {
        // A column spelled like a mapped table name is rewritten too; the
        // transform is purely lexical and defers any fallout to execution.
        let mapping = mapping(&[("Bonus", "TEMP_BONUS_X")]);
        assert_eq!(
            rewrite_query("SELECT bonus FROM Bonus", &mapping),
            "SELECT TEMP_BONUS_X FROM TEMP_BONUS_X"
        );
    }

    #[test]
    fn extracts_fenced_sql() {
        let text = "Here you go:\n```sql\nSELECT 1\n```\nEnjoy.";
        assert_eq!(extract_sql_codeblock(text), Some("SELECT 1".to_string()));
        assert_eq!(extract_sql_codeblock("no fence"), None);
    }

    #[test]
    fn fence_marker_is_case_insensitive() {
        assert_eq!(
            extract_sql_codeblock("```SQL\nSELECT 2\n```"),
            Some("SELECT 2".to_string())
        );
    }

    #[test]
    fn explain_prefixes_the_query() {
        assert_eq!(
            explain_statement("SELECT 1"),
            "EXPLAIN QUERY PLAN\nSELECT 1"
        );
    }
}
