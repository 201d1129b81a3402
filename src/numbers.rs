//! Parsing of label number lists such as `"1-5,7,9-11"`.

use std::str::FromStr;

use thiserror::Error;

/// Why a number list could not be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NumberRangeError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a valid range (expected START-END)")]
    InvalidRange(String),

    #[error("no label numbers given")]
    Empty,

    #[error("too many label numbers (at most {} per run)", MAX_NUMBERS)]
    TooMany,
}

/// Upper bound on the numbers one list may expand to.
pub const MAX_NUMBERS: u64 = 1_000_000;

/// Expands a comma-separated list of numbers and inclusive `START-END` ranges.
///
/// Ranges whose end is before their start contribute nothing, but the list as
/// a whole must produce at least one number and at most [`MAX_NUMBERS`].
///
/// ```
/// use pinlabel::numbers::parse_number_ranges;
///
/// assert_eq!(
///     parse_number_ranges("1-5,7,9-11").unwrap(),
///     vec![1, 2, 3, 4, 5, 7, 9, 10, 11]
/// );
/// assert!(parse_number_ranges("1-2-3").is_err());
/// ```
pub fn parse_number_ranges(value: &str) -> Result<Vec<u64>, NumberRangeError> {
    let mut result = Vec::new();

    for part in value.split(',') {
        if part.contains('-') {
            let bounds: Vec<&str> = part.split('-').collect();
            let [start, end] = bounds.as_slice() else {
                return Err(NumberRangeError::InvalidRange(part.to_string()));
            };
            let start = parse_number(start)?;
            let end = parse_number(end)?;
            let count = if end < start { 0 } else { (end - start).saturating_add(1) };
            if count > MAX_NUMBERS - result.len() as u64 {
                return Err(NumberRangeError::TooMany);
            }
            result.extend(start..=end);
        } else {
            if result.len() as u64 >= MAX_NUMBERS {
                return Err(NumberRangeError::TooMany);
            }
            result.push(parse_number(part)?);
        }
    }

    if result.is_empty() {
        return Err(NumberRangeError::Empty);
    }

    Ok(result)
}

fn parse_number(token: &str) -> Result<u64, NumberRangeError> {
    token
        .trim()
        .parse()
        .map_err(|_| NumberRangeError::NotANumber(token.to_string()))
}

/// A parsed number list, usable directly as a clap argument type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberRanges(Vec<u64>);

impl NumberRanges {
    /// The expanded numbers, in the order they were listed.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }
}

impl FromStr for NumberRanges {
    type Err = NumberRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_number_ranges(s).map(NumberRanges)
    }
}
