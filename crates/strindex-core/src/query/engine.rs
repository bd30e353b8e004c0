//! Filter application over a snapshot of stored records.

use crate::models::Record;
use crate::query::filter::FilterSpec;

/// Matching records in their original order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub data: Vec<Record>,
    pub count: usize,
}

/// Apply `spec` to an owned snapshot, keeping the relative order of matches.
pub fn filter_snapshot(spec: &FilterSpec, records: Vec<Record>) -> FilterOutcome {
    let data: Vec<Record> = records
        .into_iter()
        .filter(|record| spec.matches(record))
        .collect();
    let count = data.len();
    FilterOutcome { data, count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::interpreter::interpret_query;

    fn records(values: &[&str]) -> Vec<Record> {
        values.iter().map(|v| Record::new(*v)).collect()
    }

    fn values(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.data.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn longer_than_five_keeps_only_length_six() {
        let store = records(&["abcde", "abcdef"]);
        let spec = interpret_query("strings longer than 5").unwrap();
        let outcome = filter_snapshot(&spec, store);
        assert_eq!(values(&outcome), vec!["abcdef"]);
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn contains_letter_excludes_values_without_it() {
        let store = records(&["pizza", "hello", "zebra"]);
        let spec = interpret_query("strings containing the letter z").unwrap();
        let outcome = filter_snapshot(&spec, store);
        assert_eq!(values(&outcome), vec!["pizza", "zebra"]);
    }

    #[test]
    fn constraints_are_anded() {
        let store = records(&["level", "hello", "hello world", "noon"]);
        let spec = interpret_query("single word strings that are not palindromic").unwrap();
        let outcome = filter_snapshot(&spec, store);
        assert_eq!(values(&outcome), vec!["hello"]);
    }

    #[test]
    fn order_is_preserved() {
        let store = records(&["ccc", "a", "bb", "dddd", "e"]);
        let spec = FilterSpec {
            max_length: Some(2),
            ..FilterSpec::default()
        };
        let outcome = filter_snapshot(&spec, store);
        assert_eq!(values(&outcome), vec!["a", "bb", "e"]);
    }

    #[test]
    fn empty_input_yields_empty_outcome() {
        let outcome = filter_snapshot(&FilterSpec::default(), Vec::new());
        assert_eq!(outcome, FilterOutcome::default());
    }

    #[test]
    fn matching_records_are_returned_unchanged() {
        let store = records(&["madam", "sir"]);
        let expected = vec![store[0].clone()];
        let spec = FilterSpec {
            is_palindrome: Some(true),
            ..FilterSpec::default()
        };
        assert_eq!(filter_snapshot(&spec, store).data, expected);
    }
}
