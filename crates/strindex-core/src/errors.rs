//! Error types for the strindex core library.

/// A contradiction between filter fields, carrying the offending values so
/// callers can see exactly which constraints to correct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Conflict {
    /// The sentence asked for both palindromes and non-palindromes.
    #[error("both 'palindrome' and 'not palindrome' found")]
    PalindromePolarity,
    /// `min_length` is greater than `max_length`.
    #[error("min_length ({min_length}) > max_length ({max_length})")]
    LengthBounds { min_length: i64, max_length: i64 },
    /// An exact word count and a minimum word count were both requested.
    #[error(
        "exact word_count ({word_count}) and min_word_count ({min_word_count}) cannot both be set"
    )]
    WordCount { word_count: i64, min_word_count: i64 },
}

impl Conflict {
    /// Names of the filter fields involved in the conflict.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Conflict::PalindromePolarity => &["is_palindrome"],
            Conflict::LengthBounds { .. } => &["min_length", "max_length"],
            Conflict::WordCount { .. } => &["word_count", "min_word_count"],
        }
    }
}

/// Coarse classification of [`StrIndexError`], stable across messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    TypeError,
    DuplicateContent,
    NotFound,
    ConflictingQuery,
    UnparsableQuery,
    InvalidParameter,
    Internal,
}

/// Top-level error enum for the strindex core library.
#[derive(Debug, thiserror::Error)]
pub enum StrIndexError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    #[error("'{field}' must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("String already exists: {0}")]
    DuplicateContent(String),

    #[error("String not found: {0}")]
    NotFound(String),

    #[error("Conflicting query: {0}")]
    ConflictingQuery(#[from] Conflict),

    #[error("Unable to parse natural language query, no valid filters found: {0:?}")]
    UnparsableQuery(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrIndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StrIndexError::MissingField(_) => ErrorKind::MissingField,
            StrIndexError::InvalidType { .. } => ErrorKind::TypeError,
            StrIndexError::DuplicateContent(_) => ErrorKind::DuplicateContent,
            StrIndexError::NotFound(_) => ErrorKind::NotFound,
            StrIndexError::ConflictingQuery(_) => ErrorKind::ConflictingQuery,
            StrIndexError::UnparsableQuery(_) => ErrorKind::UnparsableQuery,
            StrIndexError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            StrIndexError::Json(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status a transport layer would typically answer with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::MissingField
            | ErrorKind::UnparsableQuery
            | ErrorKind::InvalidParameter => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::DuplicateContent => 409,
            ErrorKind::TypeError | ErrorKind::ConflictingQuery => 422,
            ErrorKind::Internal => 500,
        }
    }
}

#[cfg(feature = "python")]
impl From<StrIndexError> for pyo3::PyErr {
    fn from(err: StrIndexError) -> pyo3::PyErr {
        use pyo3::exceptions::{
            PyKeyError, PyLookupError, PyRuntimeError, PyTypeError, PyValueError,
        };

        match &err {
            StrIndexError::MissingField(_) => PyKeyError::new_err(err.to_string()),
            StrIndexError::InvalidType { .. } => PyTypeError::new_err(err.to_string()),
            StrIndexError::NotFound(_) => PyLookupError::new_err(err.to_string()),
            StrIndexError::DuplicateContent(_)
            | StrIndexError::ConflictingQuery(_)
            | StrIndexError::UnparsableQuery(_)
            | StrIndexError::InvalidParameter { .. } => PyValueError::new_err(err.to_string()),
            StrIndexError::Json(_) => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

pub type StrIndexResult<T> = Result<T, StrIndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_detail_names_fields_and_values() {
        let err = StrIndexError::from(Conflict::LengthBounds {
            min_length: 10,
            max_length: 4,
        });
        assert_eq!(err.kind(), ErrorKind::ConflictingQuery);
        assert_eq!(
            err.to_string(),
            "Conflicting query: min_length (10) > max_length (4)"
        );
        match err {
            StrIndexError::ConflictingQuery(c) => {
                assert_eq!(c.fields(), &["min_length", "max_length"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(StrIndexError::MissingField("value").status_code(), 400);
        assert_eq!(
            StrIndexError::InvalidType {
                field: "value",
                expected: "string"
            }
            .status_code(),
            422
        );
        assert_eq!(StrIndexError::DuplicateContent("x".into()).status_code(), 409);
        assert_eq!(StrIndexError::NotFound("x".into()).status_code(), 404);
        assert_eq!(
            StrIndexError::UnparsableQuery("nice".into()).status_code(),
            400
        );
        assert_eq!(
            StrIndexError::from(Conflict::PalindromePolarity).status_code(),
            422
        );
    }

    #[test]
    fn conflict_messages_carry_values() {
        assert_eq!(
            Conflict::WordCount {
                word_count: 1,
                min_word_count: 2
            }
            .to_string(),
            "exact word_count (1) and min_word_count (2) cannot both be set"
        );
        assert_eq!(
            StrIndexError::from(Conflict::PalindromePolarity).to_string(),
            "Conflicting query: both 'palindrome' and 'not palindrome' found"
        );
    }

    #[test]
    fn missing_field_message() {
        assert_eq!(
            StrIndexError::MissingField("value").to_string(),
            "Missing 'value' in request body"
        );
    }
}
