//! The generic read path shared by every lister
//!
//! [`ResourceIndexer`] binds a store to a resource kind and, optionally, a
//! namespace. Every typed lister is a thin wrapper around it, so selector
//! filtering and key composition live in exactly one place.

use std::fmt;
use std::sync::Arc;

use kube::core::{Selector, SelectorExt};
use kube::{Resource, ResourceExt};

use crate::error::ListerError;
use crate::key::ResourceKey;
use crate::resource::GroupResource;
use crate::store::IndexedStore;

/// Read-only view of one resource kind in a shared store
pub struct ResourceIndexer<K: Resource> {
    store: Arc<dyn IndexedStore<K>>,
    resource: GroupResource,
    namespace: Option<String>,
}

impl<K: Resource> ResourceIndexer<K> {
    /// Bind `store` to the resource kind described by `resource`
    pub fn new(store: Arc<dyn IndexedStore<K>>, resource: GroupResource) -> Self {
        Self {
            store,
            resource,
            namespace: None,
        }
    }

    /// Same store and kind, scoped to `namespace`
    ///
    /// An empty namespace leaves the view cluster-wide.
    pub fn namespaced(&self, namespace: &str) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resource: self.resource.clone(),
            namespace: Some(namespace).filter(|ns| !ns.is_empty()).map(String::from),
        }
    }

    /// Resource kind this indexer reads
    pub fn resource(&self) -> &GroupResource {
        &self.resource
    }

    /// Namespace this indexer is scoped to, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Cached objects in scope whose labels match `selector`
    ///
    /// Returns an empty vector, not an error, when nothing matches.
    pub fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError> {
        let objects = match &self.namespace {
            Some(ns) => self.store.list_namespace(ns)?,
            None => self.store.list()?,
        };

        if selector.selects_all() {
            return Ok(objects);
        }

        Ok(objects
            .into_iter()
            .filter(|obj| selector.matches(obj.labels()))
            .collect())
    }

    /// Cached object named `name` in scope
    pub fn get(&self, name: &str) -> Result<Arc<K>, ListerError> {
        let key = ResourceKey::new(self.namespace.as_deref(), name);
        match self.store.get_by_key(&key)? {
            Some(obj) => Ok(obj),
            None => Err(ListerError::NotFound {
                resource: self.resource.clone(),
                key,
            }),
        }
    }
}

impl<K: Resource> Clone for ResourceIndexer<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resource: self.resource.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl<K: Resource> fmt::Debug for ResourceIndexer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceIndexer")
            .field("resource", &self.resource)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
