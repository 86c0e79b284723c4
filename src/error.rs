use thiserror::Error;

/// Errors returned by fallible collection operations.
///
/// Lookups of absent keys are not errors; they resolve to `None` or a caller
/// supplied default.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialisation or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value of this type cannot be used as a collection key.
    #[error("cannot use a value of type `{found}` as a collection key")]
    InvalidKey {
        /// Type name of the rejected value.
        found: &'static str,
    },

    /// More items were requested than the collection holds.
    #[error("requested {requested} items but the collection only holds {available}")]
    NotEnoughItems {
        /// Number of items asked for.
        requested: usize,
        /// Number of items available.
        available: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
