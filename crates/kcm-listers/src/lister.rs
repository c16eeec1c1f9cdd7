//! Typed lister facades
//!
//! [`Lister`] reads a kind across the whole cluster; [`NamespaceLister`] is
//! derived from it and sees one namespace. Neither holds state of its own.
//! Objects returned here must be treated as read-only.

use std::sync::Arc;

use kube::core::Selector;
use kube::Resource;

use crate::error::ListerError;
use crate::indexer::ResourceIndexer;
use crate::resource::GroupResource;
use crate::store::IndexedStore;

/// Lists and gets objects of kind `K` across all namespaces
#[derive(Debug)]
pub struct Lister<K: Resource> {
    indexer: ResourceIndexer<K>,
}

impl<K: Resource> Lister<K> {
    /// Create a lister over `store` for the given resource kind
    pub fn new(store: Arc<dyn IndexedStore<K>>, resource: GroupResource) -> Self {
        Self {
            indexer: ResourceIndexer::new(store, resource),
        }
    }

    /// Lists all cached objects whose labels match `selector`
    pub fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError> {
        self.indexer.list(selector)
    }

    /// Gets a cluster-scoped object by name
    pub fn get(&self, name: &str) -> Result<Arc<K>, ListerError> {
        self.indexer.get(name)
    }

    /// Returns a lister scoped to `namespace`
    pub fn namespaced(&self, namespace: &str) -> NamespaceLister<K> {
        NamespaceLister {
            indexer: self.indexer.namespaced(namespace),
        }
    }

    /// Resource kind this lister reads
    pub fn resource(&self) -> &GroupResource {
        self.indexer.resource()
    }
}

impl<K> Lister<K>
where
    K: Resource<DynamicType = ()>,
{
    /// Create a lister whose resource descriptor is derived from `K`
    pub fn for_resource(store: Arc<dyn IndexedStore<K>>) -> Self {
        Self::new(store, GroupResource::of::<K>())
    }
}

impl<K: Resource> Clone for Lister<K> {
    fn clone(&self) -> Self {
        Self {
            indexer: self.indexer.clone(),
        }
    }
}

/// Lists and gets objects of kind `K` in a single namespace
#[derive(Debug)]
pub struct NamespaceLister<K: Resource> {
    indexer: ResourceIndexer<K>,
}

impl<K: Resource> NamespaceLister<K> {
    /// Lists the namespace's cached objects whose labels match `selector`
    pub fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError> {
        self.indexer.list(selector)
    }

    /// Gets an object in the namespace by name
    pub fn get(&self, name: &str) -> Result<Arc<K>, ListerError> {
        self.indexer.get(name)
    }

    /// Namespace this lister is bound to (`None` when built from an empty namespace)
    pub fn namespace(&self) -> Option<&str> {
        self.indexer.namespace()
    }
}

impl<K: Resource> Clone for NamespaceLister<K> {
    fn clone(&self) -> Self {
        Self {
            indexer: self.indexer.clone(),
        }
    }
}
