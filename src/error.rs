//! Error type shared by the engine, the module pipeline and backends.
//!
//! Reconciliation itself defines no error taxonomy: malformed trees are caller
//! error. What can fail is the backend, and an old tree that was never mounted.
//! Failures propagate out of [`Engine::patch`](crate::Engine::patch) with `?`;
//! there is no rollback, so a failed pass may leave the backend partially
//! mutated.

/// Errors surfaced by a patch pass.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A backend mutation failed.
    #[error("backend operation `{op}` failed: {reason}")]
    Backend {
        /// Name of the backend operation.
        op: &'static str,
        /// Error description.
        reason: String,
    },
    /// A node that must already be mounted carries no backend handle.
    #[error("vnode `{sel}` has no backend handle; it was never mounted")]
    Unmounted {
        /// Selector of the offending node (empty for text nodes).
        sel: String,
    },
}

impl Error {
    /// Build a [`Error::Backend`] from any displayable failure.
    pub fn backend(op: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Backend {
            op,
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
