// code_comparator.rs
use crate::column_loader::ColumnValues;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Unique normalized codes from one column: an ordered first-seen list for
/// iteration plus a membership index for lookups.
#[derive(Debug)]
pub struct NormalizedCodeSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl NormalizedCodeSet {
    pub fn from_values(column: &ColumnValues) -> Self {
        let mut ordered = Vec::new();
        let mut members = HashSet::new();
        for raw in &column.values {
            if let Some(code) = normalize_code(raw) {
                if members.insert(code.clone()) {
                    ordered.push(code);
                }
            }
        }
        NormalizedCodeSet { ordered, members }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.members.contains(code)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ordered.iter()
    }
}

/// Outcome of one source-vs-reference comparison. `missing_codes` keeps the
/// first-seen order of the source file; `source_total` counts the distinct
/// normalized source codes that were checked.
#[derive(Debug)]
pub struct ComparisonResult {
    pub missing_codes: Vec<String>,
    pub source_total: usize,
}

impl ComparisonResult {
    pub fn missing_count(&self) -> usize {
        self.missing_codes.len()
    }
}

/// Canonical form of a raw cell: trims whitespace, flattens the `123.0`
/// artifact spreadsheet readers produce for integer codes, and drops blanks.
/// Both sides of every comparison go through this one function.
pub fn normalize_code(raw: &str) -> Option<String> {
    static FLOAT_ARTIFACT: OnceLock<Regex> = OnceLock::new();
    let float_artifact =
        FLOAT_ARTIFACT.get_or_init(|| Regex::new(r"^-?\d+\.0+$").expect("pattern is valid"));

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if float_artifact.is_match(trimmed) {
        let integer_part = trimmed
            .split('.')
            .next()
            .expect("matched pattern has an integer part");
        return Some(integer_part.to_string());
    }

    Some(trimmed.to_string())
}

/// Reports which source codes the reference file does not carry.
pub fn compare(source: &ColumnValues, reference: &ColumnValues) -> ComparisonResult {
    let source_codes = NormalizedCodeSet::from_values(source);
    let reference_codes = NormalizedCodeSet::from_values(reference);

    let missing_codes = source_codes
        .iter()
        .filter(|code| !reference_codes.contains(code))
        .cloned()
        .collect();

    ComparisonResult {
        missing_codes,
        source_total: source_codes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::{compare, normalize_code, ComparisonResult};
    use crate::column_loader::ColumnValues;

    fn column(values: &[&str]) -> ColumnValues {
        ColumnValues {
            source: "test.csv".to_string(),
            column: "Code".to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn missing(result: &ComparisonResult) -> Vec<&str> {
        result.missing_codes.iter().map(String::as_str).collect()
    }

    #[test]
    fn reports_missing_codes_in_first_seen_order() {
        let source = column(&["A1", "A2", "A1", " A3 "]);
        let reference = column(&["A2", "A3"]);

        let result = compare(&source, &reference);
        assert_eq!(missing(&result), vec!["A1"]);
        assert_eq!(result.missing_count(), 1);
        assert_eq!(result.source_total, 3);
    }

    #[test]
    fn float_artifacts_collapse_to_integer_form() {
        let source = column(&["100.0", "101.0"]);
        let reference = column(&["100"]);

        let result = compare(&source, &reference);
        assert_eq!(missing(&result), vec!["101"]);
        assert_eq!(result.missing_count(), 1);
    }

    #[test]
    fn empty_source_compares_clean() {
        let result = compare(&column(&[]), &column(&["X"]));
        assert!(result.missing_codes.is_empty());
        assert_eq!(result.missing_count(), 0);
        assert_eq!(result.source_total, 0);
    }

    #[test]
    fn empty_reference_reports_everything_missing() {
        let result = compare(&column(&["X"]), &column(&[]));
        assert_eq!(missing(&result), vec!["X"]);
        assert_eq!(result.missing_count(), 1);
        assert_eq!(result.source_total, 1);
    }

    #[test]
    fn comparing_a_column_to_itself_finds_nothing() {
        let source = column(&["B7", "B8 ", "B7", "", "B9"]);
        let result = compare(&source, &source);
        assert_eq!(result.missing_count(), 0);
        assert_eq!(result.source_total, 3);
    }

    #[test]
    fn ordering_survives_duplicates_and_blanks() {
        let source = column(&["Z", "", "Y", "Z", "X", "Y", "W"]);
        let reference = column(&["Y"]);

        let result = compare(&source, &reference);
        assert_eq!(missing(&result), vec!["Z", "X", "W"]);
        assert_eq!(result.source_total, 4);
    }

    #[test]
    fn count_always_matches_missing_list_length() {
        let source = column(&["1", "2", "3", "4"]);
        let reference = column(&["2", "4"]);

        let result = compare(&source, &reference);
        assert_eq!(result.missing_count(), result.missing_codes.len());
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["123.0", " A1 ", "0042", "-7.00", "9.5"] {
            let once = normalize_code(raw).expect("non-blank should normalize");
            let twice = normalize_code(&once).expect("normalized code should survive");
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalization_keeps_real_decimals_and_leading_zeros() {
        assert_eq!(normalize_code("9.5"), Some("9.5".to_string()));
        assert_eq!(normalize_code("007"), Some("007".to_string()));
        assert_eq!(normalize_code("A1.0B"), Some("A1.0B".to_string()));
        assert_eq!(normalize_code("-12.000"), Some("-12".to_string()));
        assert_eq!(normalize_code("   "), None);
    }

    #[test]
    fn formatting_variants_of_one_code_count_once() {
        let source = column(&["123", "123.0", " 123 "]);
        let reference = column(&[]);

        let result = compare(&source, &reference);
        assert_eq!(missing(&result), vec!["123"]);
        assert_eq!(result.source_total, 1);
    }
}
