//! Errors surfaced by grammar construction and the parse entry point.
//!
//! An ordinary mismatch is never an error: rules report it as an empty set
//! of surviving branches and the engine backtracks.

use thiserror::Error;

/// Usage and policy errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A rule name was dereferenced that the grammar does not define.
    #[error("rule `{name}` is not defined")]
    RuleNotFound { name: String },

    /// A mandatory collaborator was missing or malformed.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// More than one branch survived the entry rule.
    #[error("ambiguous parse: {branches} interpretations of `{rule}` survived")]
    AmbiguousParse { rule: String, branches: usize },

    /// The parse observed its cancellation token.
    #[error("parse was cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn rule_not_found(name: &str) -> Self {
        Error::RuleNotFound {
            name: name.to_owned(),
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
