//! Error types for cache reads

use thiserror::Error;

use crate::key::ResourceKey;
use crate::resource::GroupResource;

/// Errors raised by an [`IndexedStore`](crate::IndexedStore) implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A key could not be built from or parsed into namespace/name form
    #[error("invalid object key {key:?}: {reason}")]
    InvalidKey {
        /// The offending key, as given
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// The backing cache could not be read
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an invalid key error
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by listers
#[derive(Debug, Error)]
pub enum ListerError {
    /// No object is cached under the requested key
    #[error("{resource} \"{}\" not found", .key.name())]
    NotFound {
        /// Resource kind that was looked up
        resource: GroupResource,
        /// Key that was looked up
        key: ResourceKey,
    },

    /// The backing store failed; passed through untouched
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ListerError {
    /// Whether this error means the object is simply not cached (yet)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
