//! Canonical structured filter shared by both query surfaces.

use serde::{Deserialize, Serialize};

use crate::errors::{Conflict, StrIndexError, StrIndexResult};
use crate::models::Record;

/// Optional-field predicate over stored records. Unset fields impose no
/// constraint and are omitted when serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_word_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterSpec {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.min_word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Reject jointly unsatisfiable field combinations.
    pub fn validate(&self) -> Result<(), Conflict> {
        if let (Some(min_length), Some(max_length)) = (self.min_length, self.max_length) {
            if min_length > max_length {
                return Err(Conflict::LengthBounds {
                    min_length,
                    max_length,
                });
            }
        }
        if let (Some(word_count), Some(min_word_count)) = (self.word_count, self.min_word_count) {
            return Err(Conflict::WordCount {
                word_count,
                min_word_count,
            });
        }
        Ok(())
    }

    /// Logical AND of every set field against `record`.
    pub fn matches(&self, record: &Record) -> bool {
        let props = &record.properties;
        let length = props.length as i64;
        let words = props.word_count as i64;

        self.is_palindrome.map_or(true, |p| props.is_palindrome == p)
            && self.min_length.map_or(true, |min| length >= min)
            && self.max_length.map_or(true, |max| length <= max)
            && self.word_count.map_or(true, |n| words == n)
            && self.min_word_count.map_or(true, |min| words >= min)
            && self
                .contains_character
                .map_or(true, |c| record.value.contains(c))
    }
}

// ---------------------------------------------------------------------------
// Structured query surface
// ---------------------------------------------------------------------------

/// Parameters accepted by the structured query surface.
///
/// `min_word_count` is only reachable through natural-language queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    #[serde(default)]
    pub is_palindrome: Option<bool>,
    #[serde(default)]
    pub min_length: Option<i64>,
    #[serde(default)]
    pub max_length: Option<i64>,
    #[serde(default)]
    pub word_count: Option<i64>,
    #[serde(default)]
    pub contains_character: Option<String>,
}

impl StructuredQuery {
    /// Convert into a validated [`FilterSpec`].
    pub fn to_filter_spec(&self) -> StrIndexResult<FilterSpec> {
        let contains_character = match self.contains_character.as_deref() {
            None => None,
            Some(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(StrIndexError::InvalidParameter {
                            name: "contains_character",
                            reason: format!("expected a single character, got {raw:?}"),
                        })
                    }
                }
            }
        };

        let spec = FilterSpec {
            is_palindrome: self.is_palindrome,
            min_length: self.min_length,
            max_length: self.max_length,
            word_count: self.word_count,
            min_word_count: None,
            contains_character,
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn spec() -> FilterSpec {
        FilterSpec::default()
    }

    #[test]
    fn empty_spec_matches_everything() {
        assert!(spec().is_empty());
        assert!(spec().matches(&Record::new("anything at all")));
        assert!(spec().matches(&Record::new("")));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let filter = FilterSpec {
            min_length: Some(5),
            max_length: Some(5),
            ..spec()
        };
        assert!(filter.matches(&Record::new("hello")));
        assert!(!filter.matches(&Record::new("hell")));
        assert!(!filter.matches(&Record::new("hellos")));
    }

    #[test]
    fn negative_max_length_matches_nothing() {
        let filter = FilterSpec {
            max_length: Some(-1),
            ..spec()
        };
        assert!(!filter.matches(&Record::new("")));
    }

    #[test]
    fn fields_combine_with_and() {
        let filter = FilterSpec {
            word_count: Some(1),
            is_palindrome: Some(false),
            ..spec()
        };
        assert!(filter.matches(&Record::new("hello")));
        assert!(!filter.matches(&Record::new("level")));
        assert!(!filter.matches(&Record::new("hello world")));
    }

    #[test]
    fn min_word_count_is_lower_bound() {
        let filter = FilterSpec {
            min_word_count: Some(2),
            ..spec()
        };
        assert!(!filter.matches(&Record::new("one")));
        assert!(filter.matches(&Record::new("one two")));
        assert!(filter.matches(&Record::new("one two three")));
    }

    #[test]
    fn contains_character_is_case_sensitive() {
        let filter = FilterSpec {
            contains_character: Some('z'),
            ..spec()
        };
        assert!(filter.matches(&Record::new("pizza")));
        assert!(!filter.matches(&Record::new("PIZZA")));
        assert!(!filter.matches(&Record::new("hello")));
    }

    #[test]
    fn validate_rejects_inverted_length_bounds() {
        let filter = FilterSpec {
            min_length: Some(6),
            max_length: Some(4),
            ..spec()
        };
        assert_eq!(
            filter.validate(),
            Err(Conflict::LengthBounds {
                min_length: 6,
                max_length: 4
            })
        );
    }

    #[test]
    fn validate_rejects_exact_and_minimum_word_count() {
        let filter = FilterSpec {
            word_count: Some(1),
            min_word_count: Some(2),
            ..spec()
        };
        assert!(matches!(filter.validate(), Err(Conflict::WordCount { .. })));
    }

    #[test]
    fn validate_accepts_equal_bounds() {
        let filter = FilterSpec {
            min_length: Some(3),
            max_length: Some(3),
            ..spec()
        };
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn structured_query_requires_single_character() {
        let query = StructuredQuery {
            contains_character: Some("ab".into()),
            ..StructuredQuery::default()
        };
        let err = query.to_filter_spec().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);

        let query = StructuredQuery {
            contains_character: Some(String::new()),
            ..StructuredQuery::default()
        };
        assert!(query.to_filter_spec().is_err());
    }

    #[test]
    fn structured_query_checks_conflicts() {
        let query = StructuredQuery {
            min_length: Some(10),
            max_length: Some(2),
            ..StructuredQuery::default()
        };
        let err = query.to_filter_spec().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConflictingQuery);
    }

    #[test]
    fn structured_query_converts_fields() {
        let query = StructuredQuery {
            is_palindrome: Some(true),
            min_length: Some(3),
            contains_character: Some("é".into()),
            ..StructuredQuery::default()
        };
        let filter = query.to_filter_spec().unwrap();
        assert_eq!(filter.is_palindrome, Some(true));
        assert_eq!(filter.min_length, Some(3));
        assert_eq!(filter.contains_character, Some('é'));
        assert_eq!(filter.min_word_count, None);
    }

    #[test]
    fn serialized_spec_lists_only_set_fields() {
        let filter = FilterSpec {
            word_count: Some(1),
            contains_character: Some('a'),
            ..spec()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"word_count": 1, "contains_character": "a"})
        );
    }
}
