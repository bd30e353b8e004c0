//! Natural-language filter interpreter.
//!
//! Maps a free-text sentence onto a [`FilterSpec`] by running a fixed, ordered
//! list of phrase rules over the lower-cased text. Each rule sets at most the
//! fields of its own dimension; conflicts are checked once every rule has run.
//!
//! Evaluation order:
//!
//! 1. palindrome polarity
//! 2. word count: `more than N words`, then `at least N words`, then the
//!    plural cues, then the singular cues (first match wins)
//! 3. lower length bound: `longer than N`, `at least N`, `minimum N`
//!    (a later match overwrites an earlier one)
//! 4. upper length bound: `shorter than N`, `less than N`, `maximum N`
//!    (same overwrite rule)
//! 5. character containment, then the `first vowel` alias
//!
//! Queries longer than the configured guard are rejected outright rather than
//! cut, so every rule always sees the whole sentence.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::errors::{Conflict, StrIndexError, StrIndexResult};
use crate::models::ParsedQuery;
use crate::query::filter::FilterSpec;
use crate::query::guards::{bounded_query, MAX_QUERY_LENGTH};

// ---------------------------------------------------------------------------
// Regex patterns (compiled once via LazyLock)
// ---------------------------------------------------------------------------

/// Group 1 marks a negated occurrence.
static PALINDROME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(not\s+(?:a\s+)?|non-?)?palindrom(?:es|e|ic)\b").unwrap()
});

static MORE_THAN_WORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmore\s+than\s+(\d+)\s+words?\b").unwrap());

static AT_LEAST_WORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bat\s+least\s+(\d+|one)\s+words?\b").unwrap());

static PLURAL_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bmultiple\s+words\b|\bmore\s+than\s+one\s+words?\b").unwrap()
});

static SINGULAR_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:single|one)[\s-]+word\b").unwrap());

// Length patterns: group 1 is the number, group 2 a trailing `word(s)` that
// moves the phrase into the word-count dimension.

static LONGER_THAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blonger\s+than\s+(\d+)(\s+words?\b)?").unwrap());

static AT_LEAST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bat\s+least\s+(\d+)(\s+words?\b)?").unwrap());

static MINIMUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bminimum\s+(?:length\s+(?:of\s+)?)?(\d+)(\s+words?\b)?").unwrap()
});

static SHORTER_THAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bshorter\s+than\s+(\d+)(\s+words?\b)?").unwrap());

static LESS_THAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bless\s+than\s+(\d+)(\s+words?\b)?").unwrap());

static MAXIMUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bmaximum\s+(?:length\s+(?:of\s+)?)?(\d+)(\s+words?\b)?").unwrap()
});

/// Group 1 is the cue, group 2 a `letter`/`character` marker, group 3 an
/// opening quote and group 4 the candidate token.
static CONTAINS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(containing|contains|contain|with|has)\s+(?:the\s+)?((?:letter|character)\s*)?(['"])?(\w+)\b"#,
    )
    .unwrap()
});

const FIRST_VOWEL: &str = "first vowel";

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

type Rule = fn(&str, &mut FilterSpec) -> Result<(), Conflict>;

/// Recognition rules in evaluation order.
const RULES: &[(&str, Rule)] = &[
    ("palindrome", palindrome_rule),
    ("word_count", word_count_rule),
    ("min_length", lower_length_rule),
    ("max_length", upper_length_rule),
    ("contains_character", contains_rule),
];

fn palindrome_rule(text: &str, spec: &mut FilterSpec) -> Result<(), Conflict> {
    let mut positive = false;
    let mut negative = false;
    for caps in PALINDROME_RE.captures_iter(text) {
        if caps.get(1).is_some() {
            negative = true;
        } else {
            positive = true;
        }
    }
    match (positive, negative) {
        (true, true) => return Err(Conflict::PalindromePolarity),
        (false, true) => spec.is_palindrome = Some(false),
        (true, false) => spec.is_palindrome = Some(true),
        (false, false) => {}
    }
    Ok(())
}

fn word_count_rule(text: &str, spec: &mut FilterSpec) -> Result<(), Conflict> {
    if let Some(n) = first_number(&MORE_THAN_WORDS_RE, text).and_then(|n| n.checked_add(1)) {
        spec.min_word_count = Some(n);
    } else if let Some(n) = first_number(&AT_LEAST_WORDS_RE, text) {
        spec.min_word_count = Some(n);
    } else if PLURAL_WORDS_RE.is_match(text) {
        spec.min_word_count = Some(2);
    } else if SINGULAR_WORD_RE.is_match(text) {
        spec.word_count = Some(1);
    }
    Ok(())
}

/// Lower-bound phrasings in evaluation order; the last one that matches wins.
fn lower_length_rule(text: &str, spec: &mut FilterSpec) -> Result<(), Conflict> {
    let candidates = [
        first_length(&LONGER_THAN_RE, text).and_then(|n| n.checked_add(1)),
        first_length(&AT_LEAST_RE, text),
        first_length(&MINIMUM_RE, text),
    ];
    if let Some(n) = candidates.into_iter().flatten().last() {
        spec.min_length = Some(n);
    }
    Ok(())
}

fn upper_length_rule(text: &str, spec: &mut FilterSpec) -> Result<(), Conflict> {
    let candidates = [
        first_length(&SHORTER_THAN_RE, text).map(|n| n - 1),
        first_length(&LESS_THAN_RE, text).map(|n| n - 1),
        first_length(&MAXIMUM_RE, text),
    ];
    if let Some(n) = candidates.into_iter().flatten().last() {
        spec.max_length = Some(n);
    }
    Ok(())
}

/// `with` and `has` only name a character when it is marked as a letter or
/// quoted; otherwise `with a minimum` or `with 3 words` would capture the
/// article or the number.
fn contains_rule(text: &str, spec: &mut FilterSpec) -> Result<(), Conflict> {
    let captured = CONTAINS_RE.captures_iter(text).find_map(|caps| {
        let marked = caps.get(2).is_some() || caps.get(3).is_some();
        if !marked && matches!(&caps[1], "with" | "has") {
            return None;
        }
        let mut chars = caps.get(4)?.as_str().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    });
    if let Some(c) = captured {
        spec.contains_character = Some(c);
    }
    if text.contains(FIRST_VOWEL) {
        spec.contains_character = Some('a');
    }
    Ok(())
}

fn first_number(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| match m.as_str() {
            "one" => Some(1),
            digits => digits.parse::<i64>().ok(),
        })
}

/// First match of a length pattern that is not followed by `word(s)`.
fn first_length(re: &Regex, text: &str) -> Option<i64> {
    re.captures_iter(text)
        .filter(|caps| caps.get(2).is_none())
        .find_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok()))
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Translates free-text queries into validated [`FilterSpec`]s.
#[derive(Clone, Debug)]
pub struct Interpreter {
    max_query_length: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(MAX_QUERY_LENGTH)
    }
}

impl Interpreter {
    pub fn new(max_query_length: usize) -> Self {
        Self { max_query_length }
    }

    /// Lower-cased, trimmed form of `query`. Two queries with the same
    /// normalized form always interpret identically.
    ///
    /// Fails with *invalid-parameter* when the trimmed text is longer than the
    /// configured limit.
    pub fn normalize(&self, query: &str) -> StrIndexResult<String> {
        bounded_query(query, self.max_query_length)
            .map(str::to_lowercase)
            .ok_or_else(|| StrIndexError::InvalidParameter {
                name: "query",
                reason: format!("must be at most {} characters", self.max_query_length),
            })
    }

    /// Interpret `query` into a conflict-free, non-empty filter.
    pub fn interpret(&self, query: &str) -> StrIndexResult<FilterSpec> {
        let text = self.normalize(query)?;
        let mut spec = FilterSpec::default();

        for (name, rule) in RULES {
            rule(&text, &mut spec).inspect_err(|conflict| {
                debug!(rule = *name, %conflict, "rule rejected query");
            })?;
        }

        spec.validate()?;
        if spec.is_empty() {
            return Err(StrIndexError::UnparsableQuery(query.to_string()));
        }

        debug!(query = %text, filters = ?spec, "interpreted query");
        Ok(spec)
    }

    /// Interpret `query` and wrap the result with the caller's original text.
    pub fn parse(&self, query: &str) -> StrIndexResult<ParsedQuery> {
        Ok(ParsedQuery {
            original: query.to_string(),
            parsed_filters: self.interpret(query)?,
        })
    }
}

/// Interpret `query` with the default guards.
pub fn interpret_query(query: &str) -> StrIndexResult<FilterSpec> {
    Interpreter::default().interpret(query)
}
