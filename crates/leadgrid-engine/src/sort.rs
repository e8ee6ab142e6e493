//! Row ordering for a single column.
//!
//! A column sorts numerically when more than 70% of its non-blank values parse
//! as finite numbers. Numeric sorting treats blank and unparseable values as
//! `0`; text sorting compares case-insensitively. Both are stable.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Share of non-blank values that must parse as numbers, as `NUM / DEN`.
/// The comparison is strict: exactly 70% stays textual.
const NUMERIC_SHARE_NUM: usize = 7;
const NUMERIC_SHARE_DEN: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction (used when a header is clicked twice).
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Parse a cell as a finite number. Surrounding whitespace is ignored.
///
/// Words such as `inf` or `NaN` that `f64::from_str` accepts are rejected.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Classify a column's values as numeric.
pub fn is_numeric_column<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut non_blank = 0usize;
    let mut numeric = 0usize;
    for value in values {
        if value.trim().is_empty() {
            continue;
        }
        non_blank += 1;
        if parse_number(value).is_some() {
            numeric += 1;
        }
    }
    non_blank > 0 && numeric * NUMERIC_SHARE_DEN > non_blank * NUMERIC_SHARE_NUM
}

/// Compute the new row order for sorting `rows` by column `col`.
///
/// Returns a permutation: position `i` holds the index of the row that ends
/// up at `i`. Rows shorter than `col` are treated as blank.
pub fn sorted_row_order(rows: &[Vec<String>], col: usize, direction: SortDirection) -> Vec<usize> {
    let numeric = is_numeric_column(rows.iter().map(|row| cell_at(row, col)));

    let mut order: Vec<usize> = (0..rows.len()).collect();
    if numeric {
        let keys: Vec<f64> = rows
            .iter()
            .map(|row| parse_number(cell_at(row, col)).unwrap_or(0.0))
            .collect();
        order.sort_by(|&a, &b| directed(keys[a].partial_cmp(&keys[b]), direction));
    } else {
        let keys: Vec<String> = rows.iter().map(|row| cell_at(row, col).to_lowercase()).collect();
        order.sort_by(|&a, &b| directed(Some(keys[a].cmp(&keys[b])), direction));
    }
    order
}

fn cell_at(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

fn directed(ordering: Option<Ordering>, direction: SortDirection) -> Ordering {
    let ordering = ordering.unwrap_or(Ordering::Equal);
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Vec<String>> {
        values.iter().map(|v| vec![v.to_string()]).collect()
    }

    fn sorted(values: &[&str], direction: SortDirection) -> Vec<String> {
        let rows = column(values);
        sorted_row_order(&rows, 0, direction)
            .into_iter()
            .map(|i| rows[i][0].clone())
            .collect()
    }

    #[test]
    fn test_parse_number_rejects_words() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn test_numeric_threshold_is_strict() {
        // 7 of 10 is exactly 70%: not numeric.
        let mut values = vec!["1"; 7];
        values.extend(["a", "b", "c"]);
        assert!(!is_numeric_column(values.iter().copied()));

        // 3 of 4 is 75%.
        assert!(is_numeric_column(["10", "2", "abc", "1"]));
    }

    #[test]
    fn test_blank_values_are_ignored_for_classification() {
        assert!(is_numeric_column(["1", "", "  ", "2"]));
        assert!(!is_numeric_column(["", ""]));
    }

    #[test]
    fn test_numeric_sort_coerces_text_to_zero() {
        assert_eq!(
            sorted(&["10", "2", "abc", "1"], SortDirection::Asc),
            vec!["abc", "1", "2", "10"]
        );
        assert_eq!(
            sorted(&["10", "2", "abc", "1"], SortDirection::Desc),
            vec!["10", "2", "1", "abc"]
        );
    }

    #[test]
    fn test_text_sort_is_case_insensitive_and_stable() {
        let rows = vec![
            vec!["beta".to_string(), "first".to_string()],
            vec!["Alpha".to_string(), "x".to_string()],
            vec!["BETA".to_string(), "second".to_string()],
        ];
        let order = sorted_row_order(&rows, 0, SortDirection::Asc);
        assert_eq!(order, vec![1, 0, 2]);

        let order = sorted_row_order(&rows, 0, SortDirection::Desc);
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_numeric_ties_keep_original_order() {
        let rows = vec![
            vec!["1".to_string(), "a".to_string()],
            vec!["".to_string(), "b".to_string()],
            vec!["1.0".to_string(), "c".to_string()],
            vec!["0".to_string(), "d".to_string()],
        ];
        assert_eq!(sorted_row_order(&rows, 0, SortDirection::Asc), vec![1, 3, 0, 2]);
        assert_eq!(sorted_row_order(&rows, 0, SortDirection::Desc), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_short_rows_sort_as_blank() {
        let rows = vec![
            vec!["x".to_string(), "3".to_string()],
            vec!["y".to_string()],
            vec!["z".to_string(), "1".to_string()],
        ];
        assert_eq!(sorted_row_order(&rows, 1, SortDirection::Asc), vec![1, 2, 0]);
        assert_eq!(cell_at(&rows[1], 1), "");
    }
}
