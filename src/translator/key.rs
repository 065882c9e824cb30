//! MathSciNet drops the leading zero after `MR` from the keys it generates: a request for
//! `MR0546620` returns `@article {MR546620, ...`. This module can put the requested key back.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::identifier::MrNumber;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyCorrection {
    /// Return the markup exactly as MathSciNet produced it.
    #[default]
    Keep,
    /// Replace a key that names the same MR number as the request but lost its leading zeros.
    Restore,
}

static ENTRY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\s*[A-Za-z]+\s*\{\s*([^,\s]+)\s*,").unwrap());

/// Corrects the BibTeX key of the first entry in `code` according to `mode`.
pub fn correct_key(requested: MrNumber<'_>, code: String, mode: KeyCorrection) -> String {
    if mode == KeyCorrection::Keep {
        return code;
    }

    let Some(found) = ENTRY_KEY_RE.captures(&code).and_then(|c| c.get(1)) else {
        return code;
    };

    let key = found.as_str();
    if key == requested.as_str() || !same_number(key, requested) {
        return code;
    }

    info!(returned = key, requested = %requested, "restoring BibTeX key");
    let mut fixed = String::with_capacity(code.len() + 1);
    fixed.push_str(&code[..found.start()]);
    fixed.push_str(requested.as_str());
    fixed.push_str(&code[found.end()..]);
    fixed
}

fn same_number(key: &str, requested: MrNumber<'_>) -> bool {
    let Some(digits) = key.strip_prefix("MR") else {
        return false;
    };
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.trim_start_matches('0') == requested.digits().trim_start_matches('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    const DROPPED: &str = "\n@article {MR546620,\n    AUTHOR = {Someone},\n  MRNUMBER = {546620},\n}";

    fn mr(s: &str) -> MrNumber<'_> {
        MrNumber::parse(s).expect("valid identifier")
    }

    #[test]
    fn keep_is_pass_through() {
        let out = correct_key(mr("MR0546620"), DROPPED.to_string(), KeyCorrection::Keep);
        assert_eq!(out, DROPPED);
    }

    #[test]
    fn restore_puts_leading_zero_back() {
        let out = correct_key(mr("MR0546620"), DROPPED.to_string(), KeyCorrection::Restore);
        assert!(out.starts_with("\n@article {MR0546620,\n"), "{out}");
        // Only the key changes.
        assert!(out.contains("MRNUMBER = {546620}"));
    }

    #[test]
    fn restore_leaves_matching_key_alone() {
        let code = "\n@article {MR1996800,\n}".to_string();
        assert_eq!(
            correct_key(mr("MR1996800"), code.clone(), KeyCorrection::Restore),
            code
        );
    }

    #[test]
    fn restore_ignores_unrelated_key() {
        let code = "\n@article {MR1234567,\n}".to_string();
        assert_eq!(
            correct_key(mr("MR0546620"), code.clone(), KeyCorrection::Restore),
            code
        );
    }

    #[test]
    fn restore_without_entry_is_noop() {
        assert_eq!(
            correct_key(mr("MR0546620"), String::new(), KeyCorrection::Restore),
            ""
        );
    }
}
