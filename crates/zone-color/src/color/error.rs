//! Hex color parse failures

use std::fmt;

/// Why a string was not accepted as a hex color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseColorReason {
    /// Neither 3 nor 6 digits after the optional `#`
    DigitCount(usize),
    /// A character that is not a hex digit
    BadDigit(char),
}

/// A rejected hex color, with the offending input.
///
/// Config files carry colors as strings, so the message quotes the input
/// back: `invalid color "#12345": expected 3 or 6 hex digits, found 5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    input: String,
    reason: ParseColorReason,
}

impl ParseColorError {
    pub(crate) fn new(input: &str, reason: ParseColorReason) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse, as given
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reason(&self) -> ParseColorReason {
        self.reason
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: ", self.input)?;
        match self.reason {
            ParseColorReason::DigitCount(n) => {
                write!(f, "expected 3 or 6 hex digits, found {n}")
            }
            ParseColorReason::BadDigit(c) => write!(f, "{c:?} is not a hex digit"),
        }
    }
}

impl std::error::Error for ParseColorError {}
