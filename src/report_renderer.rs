// report_renderer.rs
use crate::code_comparator::ComparisonResult;

/// Renders a comparison into the downloadable text payload: one missing code
/// per line between two rules, then a summary line. Pure string-building;
/// whoever called us decides where the payload lands.
pub fn render(result: &ComparisonResult, source_label: &str, reference_label: &str) -> String {
    let rule = "-".repeat(40);
    let mut payload = String::new();

    payload.push('\n');
    payload.push_str(&rule);
    payload.push('\n');
    payload.push_str(&format!(
        "Codes present in '{}' but missing in '{}':\n",
        source_label, reference_label
    ));

    if result.missing_codes.is_empty() {
        payload.push_str("No missing codes.\n");
    } else {
        for code in &result.missing_codes {
            payload.push_str(code);
            payload.push('\n');
        }
    }

    payload.push_str(&rule);
    payload.push('\n');
    payload.push_str(&format!(
        "Missing codes: {} of {} checked.\n",
        result.missing_count(),
        result.source_total
    ));

    payload
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::code_comparator::ComparisonResult;

    #[test]
    fn lists_each_missing_code_on_its_own_line_in_order() {
        let result = ComparisonResult {
            missing_codes: vec!["A1".to_string(), "B2".to_string()],
            source_total: 5,
        };

        let payload = render(&result, "online.csv", "catalog.xlsx");
        let lines: Vec<&str> = payload.lines().collect();

        assert_eq!(
            lines[2],
            "Codes present in 'online.csv' but missing in 'catalog.xlsx':"
        );
        assert_eq!(lines[3], "A1");
        assert_eq!(lines[4], "B2");
        assert_eq!(lines[6], "Missing codes: 2 of 5 checked.");
    }

    #[test]
    fn clean_comparison_says_so_instead_of_listing_nothing() {
        let result = ComparisonResult {
            missing_codes: vec![],
            source_total: 3,
        };

        let payload = render(&result, "a.csv", "b.csv");
        assert!(payload.contains("No missing codes.\n"));
        assert!(payload.contains("Missing codes: 0 of 3 checked.\n"));
    }
}
