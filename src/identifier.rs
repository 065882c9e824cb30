use std::fmt;

/// Prefix shared by every Mathematical Reviews number.
const PREFIX: &str = "MR";

/// Checks if `key` resembles a valid Mathematical Reviews identifier: `MR` followed only by
/// decimal digits, 9 or 10 characters in total. No trimming or case folding is applied.
pub fn is_valid(key: &str) -> bool {
    matches!(key.len(), 9 | 10)
        && key
            .strip_prefix(PREFIX)
            .is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
}

/// A Mathematical Reviews number such as `MR1996800`.
///
/// Only constructible through [`MrNumber::parse`], so holding one means the lexical checks
/// already passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MrNumber<'a>(&'a str);

impl<'a> MrNumber<'a> {
    pub fn parse(key: &'a str) -> Option<Self> {
        is_valid(key).then_some(MrNumber(key))
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The digits following the `MR` prefix.
    pub fn digits(&self) -> &'a str {
        &self.0[PREFIX.len()..]
    }
}

impl fmt::Display for MrNumber<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
