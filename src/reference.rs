use std::fmt;

/// Version marker for error entries: older than anything MathSciNet can return, so a real
/// record always supersedes it.
pub const OLDEST_VERSION: &str = "0";

/// A single BibTeX record, as returned by MathSciNet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    entry: String,
}

impl Reference {
    pub fn new(entry: impl Into<String>) -> Self {
        Reference {
            entry: entry.into(),
        }
    }

    pub fn bibtex(&self) -> &str {
        &self.entry
    }
}

/// Why an identifier did not produce a [`Reference`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub id: String,
    /// The identifier up to its last `v`, i.e. without a version suffix.
    pub bare_id: String,
    pub updated: &'static str,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>, id: impl Into<String>) -> Self {
        let id = id.into();
        let bare_id = match id.rfind('v') {
            Some(idx) => id[..idx].to_string(),
            None => id.clone(),
        };
        ErrorInfo {
            message: message.into(),
            id,
            bare_id,
            updated: OLDEST_VERSION,
        }
    }

    /// BibTeX comment explaining the error.
    pub fn bibtex(&self) -> String {
        format!("@comment{{{}: {}}}", self.id, self.message)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {} ({})", self.message, self.id)
    }
}

/// What became of one input identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Reference),
    Failed(ErrorInfo),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_and_message_formats() {
        let info = ErrorInfo::new("Not found", "MR0000000");
        assert_eq!(info.bibtex(), "@comment{MR0000000: Not found}");
        assert_eq!(info.to_string(), "Error: Not found (MR0000000)");
        assert_eq!(info.updated, OLDEST_VERSION);
    }

    #[test]
    fn bare_id_strips_version_suffix() {
        assert_eq!(ErrorInfo::new("x", "1234.5678v2").bare_id, "1234.5678");
        assert_eq!(ErrorInfo::new("x", "av1v3").bare_id, "av1");
    }

    #[test]
    fn bare_id_without_version_is_whole_id() {
        assert_eq!(ErrorInfo::new("x", "MR1996800").bare_id, "MR1996800");
        assert_eq!(ErrorInfo::new("x", "").bare_id, "");
    }

    #[test]
    fn outcome_error_flag() {
        assert!(Outcome::Failed(ErrorInfo::new("x", "y")).is_error());
        assert!(!Outcome::Found(Reference::new("@article{MR1,}")).is_error());
    }
}
