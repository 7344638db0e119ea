//! Error types for Provar property-based testing.
//!
//! Case failures are never errors; they travel inside
//! [`TestResult`](crate::data::TestResult). This type covers contract
//! violations in the integrating code: retrieving a type-erased value as
//! the wrong type, indexing outside the active type list, or invoking an
//! overload set that covers none of a type list's kinds.

use crate::param::ParamKind;
use thiserror::Error;

/// Main error type for Provar harness operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvarError {
    /// A type-erased value was retrieved as a type other than the one stored.
    #[error("type mismatch retrieving erased value: stored {stored}, requested {requested}")]
    TypeMismatch {
        stored: &'static str,
        requested: &'static str,
    },

    /// A type index does not name a member of the active type list.
    #[error("type index {index} out of bounds for a list of {len} types")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An overload set has no arm whose constraint matches the given kind.
    #[error("no overload arm matches {kind} values")]
    DispatchNoMatch { kind: ParamKind },
}

/// Result type for Provar operations.
pub type Result<T> = std::result::Result<T, ProvarError>;
