//! Error types for ussd-engine.
//!
//! Session termination is NOT an error: a terminal tag such as `response`
//! ends a session through [`TagOutcome::Terminate`](crate::tags::TagOutcome),
//! never through this enum. Everything here is a real fault — a malformed
//! template, a misused session, or a broken invariant.

use thiserror::Error;

/// Main error type for ussd-engine operations.
#[derive(Error, Debug)]
pub enum UssdError {
    /// No handler is registered for the tag name.
    #[error("unknown tag: {tag}")]
    UnknownTag {
        /// The unregistered tag name.
        tag: String,
    },

    /// A required attribute is absent from a tag.
    #[error("missing attribute `{attribute}` on <{tag}>")]
    MissingAttribute {
        /// Tag the attribute was expected on.
        tag: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// Input was fed to a tag that does not collect input.
    #[error("tag <{tag}> does not accept input")]
    UnexpectedInput {
        /// The tag that received input.
        tag: String,
    },

    /// Session with the given ID was not found.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Session has already reached a terminal step.
    #[error("session has ended: {0}")]
    SessionEnded(String),

    /// Invalid state transition attempted.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        from: crate::session::SessionState,
        to: crate::session::SessionState,
    },

    /// The stored cursor no longer resolves in the template tree.
    #[error("cursor {path} does not resolve in the template")]
    InvalidCursor {
        /// The dangling cursor path.
        path: crate::node::NodePath,
    },

    /// A redirect names a screen that does not exist in the tree.
    #[error("no screen with id `{name}`")]
    UnknownScreen {
        /// The missing screen id.
        name: String,
    },

    /// Document order ran out before a terminal tag was reached.
    #[error("template exhausted before reaching a terminal tag")]
    TemplateExhausted,

    /// Too many dispatches in a single request (redirect cycle).
    #[error("step limit of {limit} dispatches exceeded")]
    StepLimitExceeded {
        /// The configured limit that was hit.
        limit: usize,
    },

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Convenience Result type for ussd-engine operations.
pub type Result<T> = std::result::Result<T, UssdError>;
