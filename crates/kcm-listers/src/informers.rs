//! Shared registry of per-kind caches
//!
//! The factory does not start watches or keep anything in sync. Whatever owns
//! the caches registers them here once; consumers (controllers, cloud providers
//! that ask for informers) pull typed listers back out.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use kube::Resource;
use tracing::debug;

use crate::lister::Lister;
use crate::resource::GroupResource;
use crate::store::IndexedStore;

type ErasedStore = Arc<dyn Any + Send + Sync>;

/// Type-keyed set of shared stores, cheap to clone
///
/// Clones share the same registry, so a store registered through one handle is
/// visible through every other.
#[derive(Clone, Default)]
pub struct SharedInformerFactory {
    stores: Arc<DashMap<TypeId, ErasedStore>>,
}

impl SharedInformerFactory {
    /// Create an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the shared store for kind `K`, replacing any previous one
    ///
    /// Returns `true` if a store for `K` was already registered.
    pub fn register<K>(&self, store: Arc<dyn IndexedStore<K>>) -> bool
    where
        K: Resource<DynamicType = ()> + 'static,
    {
        let replaced = self
            .stores
            .insert(TypeId::of::<K>(), Arc::new(store))
            .is_some();
        debug!(resource = %GroupResource::of::<K>(), replaced, "registered shared store");
        replaced
    }

    /// Shared store for kind `K`, if one was registered
    pub fn store<K>(&self) -> Option<Arc<dyn IndexedStore<K>>>
    where
        K: Resource<DynamicType = ()> + 'static,
    {
        let erased = self.stores.get(&TypeId::of::<K>())?.value().clone();
        erased
            .downcast::<Arc<dyn IndexedStore<K>>>()
            .ok()
            .map(|store| Arc::clone(&*store))
    }

    /// Lister over the shared store for kind `K`, if one was registered
    pub fn lister<K>(&self) -> Option<Lister<K>>
    where
        K: Resource<DynamicType = ()> + 'static,
    {
        self.store::<K>().map(Lister::for_resource)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no kind has been registered
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Whether both handles refer to the same registry
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.stores, &other.stores)
    }
}

impl fmt::Debug for SharedInformerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedInformerFactory")
            .field("kinds", &self.stores.len())
            .finish()
    }
}
