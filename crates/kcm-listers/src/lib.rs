//! Typed, read-only listers over shared Kubernetes object caches
//!
//! Controllers never talk to the API server to look objects up. They read from
//! a local cache that something else keeps in sync, through a [`Lister`] bound
//! to one resource kind:
//!
//! - [`IndexedStore`] - the cache contract (list, list by namespace, get by key)
//! - [`ResourceIndexer`] - the single generic algorithm: selector filtering and
//!   exact-key lookup, optionally scoped to a namespace
//! - [`Lister`] / [`NamespaceLister`] - cluster-wide and namespace-scoped facades
//! - [`SharedInformerFactory`] - type-keyed registry of stores handed to
//!   components that build their own listers
//!
//! Everything returned is an `Arc<K>` aliasing the cached object. Callers that
//! need to mutate must clone the inner value first.

#![deny(missing_docs)]

pub mod apps_v1;
pub mod error;
pub mod indexer;
pub mod informers;
pub mod key;
pub mod lister;
pub mod resource;
pub mod store;

pub use error::{ListerError, StoreError};
pub use indexer::ResourceIndexer;
pub use informers::SharedInformerFactory;
pub use key::ResourceKey;
pub use lister::{Lister, NamespaceLister};
pub use resource::GroupResource;
pub use store::{IndexedStore, MemoryStore};

pub use kube::core::{Expression, Selector};

/// Selector that matches every object, including objects without labels
pub fn everything() -> Selector {
    Selector::from_iter(std::iter::empty::<Expression>())
}
