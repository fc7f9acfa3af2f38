//! Error Types
//!
//! A single error enum shared by every component (C1-C9). Propagation
//! policy: derivation and enumeration failures surface immediately;
//! rewrite failures roll back to the pre-pass state (callers receive the
//! untouched store alongside the error).

use thiserror::Error;

/// The universe a fuzzy set is tagged with: objects or attributes.
///
/// Every operation that takes a fuzzy set checks this tag against what it
/// expects and fails with [`FcaError::ShapeMismatch`] on mismatch, rather
/// than silently operating on the wrong axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Universe {
    Objects,
    Attributes,
}

impl std::fmt::Display for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Universe::Objects => write!(f, "objects"),
            Universe::Attributes => write!(f, "attributes"),
        }
    }
}

/// Errors produced by the FCA core.
#[derive(Error, Debug)]
pub enum FcaError {
    /// A fuzzy set's universe did not match the one an operation expected.
    #[error("shape mismatch: expected a set over {expected}, got one over {found}")]
    ShapeMismatch { expected: Universe, found: Universe },

    /// An incidence's attribute count did not match a store's.
    #[error("attribute count mismatch: expected {expected} attributes, found {found}")]
    AttributeCountMismatch { expected: usize, found: usize },

    /// An operation requiring a loaded incidence was called with none loaded.
    #[error("no incidence loaded")]
    EmptyContext,

    /// A binary-only operation was called on a non-{0,1} incidence.
    #[error("operation requires a binary (0/1) incidence")]
    NotBinary,

    /// A logic name not present in the registry.
    #[error("unknown logic: {0}")]
    UnknownLogic(String),

    /// A rewrite-rule name not present in the registry.
    #[error("unknown rewrite rule: {0}")]
    UnknownRewrite(String),

    /// A registered rewrite returned a result violating store invariants.
    #[error("rewrite '{rule}' violated store invariants: {reason}")]
    InvariantViolation { rule: String, reason: String },

    /// User-requested cancellation was observed.
    #[error("operation cancelled")]
    Cancelled,

    /// A shape or index argument was out of range for the incidence.
    #[error("index {index} out of range for {universe} (size {size})")]
    IndexOutOfRange {
        index: usize,
        universe: Universe,
        size: usize,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

pub type FcaResult<T> = Result<T, FcaError>;
