//! Parsing of user-supplied datasets.

use crate::dataset::TextProblem;
use crate::error::{Error, Result};

/// Parse a comma-separated list of integers, dropping entries that are not numbers.
///
/// `"5, 3, x, 8"` gives `[5, 3, 8]`. Nothing numeric at all is an error.
pub fn parse_array(raw: &str) -> Result<Vec<i64>> {
    let values: Vec<i64> = raw
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect();
    if values.is_empty() {
        return Err(Error::InvalidInput(
            "enter at least one integer, separated by commas".into(),
        ));
    }
    Ok(values)
}

/// Validate a custom text and pattern pair.
pub fn parse_text_problem(text: &str, pattern: &str) -> Result<TextProblem> {
    if text.is_empty() {
        return Err(Error::InvalidInput("text must not be empty".into()));
    }
    if pattern.is_empty() {
        return Err(Error::InvalidInput("pattern must not be empty".into()));
    }
    if pattern.chars().count() > text.chars().count() {
        return Err(Error::InvalidInput(
            "pattern must not be longer than the text".into(),
        ));
    }
    Ok(TextProblem {
        text: text.to_string(),
        pattern: pattern.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_skips_non_numeric_entries() {
        assert_eq!(parse_array("5, 3, x, 8").unwrap(), vec![5, 3, 8]);
        assert_eq!(parse_array(" -4 ,, 12 ").unwrap(), vec![-4, 12]);
    }

    #[test]
    fn array_needs_a_number() {
        assert!(matches!(parse_array(""), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_array("a, b, 1.5"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn text_problem_checks() {
        assert!(parse_text_problem("ABC", "").is_err());
        assert!(parse_text_problem("", "A").is_err());
        assert!(parse_text_problem("AB", "ABC").is_err());

        let ok = parse_text_problem("héllo", "éll").unwrap();
        assert_eq!(ok.pattern, "éll");
    }

    #[test]
    fn pattern_length_counts_chars_not_bytes() {
        // Four bytes, two chars.
        assert!(parse_text_problem("ab", "éé").is_ok());
    }
}
