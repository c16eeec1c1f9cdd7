//! Indexed object caches that listers read from
//!
//! The store is the only synchronization point between the component keeping
//! the cache current and the controllers reading it. Listers add no locking of
//! their own, so implementations must tolerate any number of concurrent readers.

use std::sync::Arc;

use dashmap::DashMap;
use kube::runtime::reflector::{ObjectRef, Store};
use kube::Resource;
use tracing::trace;

use crate::error::StoreError;
use crate::key::ResourceKey;

/// Read access to a keyed cache of one resource kind
pub trait IndexedStore<K: Resource>: Send + Sync {
    /// Snapshot of every cached object
    fn list(&self) -> Result<Vec<Arc<K>>, StoreError>;

    /// Snapshot of the cached objects in one namespace
    ///
    /// The default scans [`list`](Self::list); stores with a namespace index
    /// should override it.
    fn list_namespace(&self, namespace: &str) -> Result<Vec<Arc<K>>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|obj| obj.meta().namespace.as_deref() == Some(namespace))
            .collect())
    }

    /// Object cached under `key`, if any
    fn get_by_key(&self, key: &ResourceKey) -> Result<Option<Arc<K>>, StoreError>;
}

/// A kube-rs reflector store is an indexed store keyed by object reference
impl<K> IndexedStore<K> for Store<K>
where
    K: Resource<DynamicType = ()> + Clone + Send + Sync + 'static,
{
    fn list(&self) -> Result<Vec<Arc<K>>, StoreError> {
        Ok(self.state())
    }

    fn get_by_key(&self, key: &ResourceKey) -> Result<Option<Arc<K>>, StoreError> {
        let mut obj_ref = ObjectRef::<K>::new(key.name());
        if let Some(ns) = key.namespace() {
            obj_ref = obj_ref.within(ns);
        }
        Ok(self.get(&obj_ref))
    }
}

/// In-memory store keyed by namespace/name
///
/// Useful where no reflector is running: tests, and caches fed by hand.
pub struct MemoryStore<K> {
    objects: DashMap<ResourceKey, Arc<K>>,
}

impl<K: Resource> MemoryStore<K> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            objects: DashMap::new(),
        }
    }

    /// Insert or replace an object, returning the previous entry
    pub fn insert(&self, obj: K) -> Result<Option<Arc<K>>, StoreError> {
        let key = ResourceKey::from_resource(&obj)?;
        trace!(key = %key, "caching object");
        Ok(self.objects.insert(key, Arc::new(obj)))
    }

    /// Remove the object cached under `key`
    pub fn remove(&self, key: &ResourceKey) -> Option<Arc<K>> {
        self.objects.remove(key).map(|(_, obj)| obj)
    }

    /// Number of cached objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<K: Resource> Default for MemoryStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> IndexedStore<K> for MemoryStore<K>
where
    K: Resource + Send + Sync,
{
    fn list(&self) -> Result<Vec<Arc<K>>, StoreError> {
        Ok(self
            .objects
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect())
    }

    fn list_namespace(&self, namespace: &str) -> Result<Vec<Arc<K>>, StoreError> {
        Ok(self
            .objects
            .iter()
            .filter(|entry| entry.key().namespace() == Some(namespace))
            .map(|entry| Arc::clone(entry.value()))
            .collect())
    }

    fn get_by_key(&self, key: &ResourceKey) -> Result<Option<Arc<K>>, StoreError> {
        Ok(self.objects.get(key).map(|entry| Arc::clone(entry.value())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::ControllerRevision;
    use kube::core::ObjectMeta;
    use kube::runtime::{reflector, watcher};

    fn revision(namespace: &str, name: &str) -> ControllerRevision {
        ControllerRevision {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            revision: 1,
            ..Default::default()
        }
    }

    // =========================================================================
    // MemoryStore
    // =========================================================================

    #[test]
    fn insert_replaces_existing_entry() {
        let store = MemoryStore::new();
        assert!(store.insert(revision("a", "web")).unwrap().is_none());

        let mut newer = revision("a", "web");
        newer.revision = 2;
        let previous = store.insert(newer).unwrap().unwrap();

        assert_eq!(previous.revision, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn list_namespace_uses_key_namespace() {
        let store = MemoryStore::new();
        store.insert(revision("a", "web")).unwrap();
        store.insert(revision("a", "db")).unwrap();
        store.insert(revision("b", "web")).unwrap();

        assert_eq!(store.list().unwrap().len(), 3);
        assert_eq!(store.list_namespace("a").unwrap().len(), 2);
        assert!(store.list_namespace("c").unwrap().is_empty());
    }

    #[test]
    fn remove_drops_entry() {
        let store = MemoryStore::new();
        store.insert(revision("a", "web")).unwrap();

        let key = ResourceKey::namespaced("a", "web");
        assert!(store.remove(&key).is_some());
        assert!(store.get_by_key(&key).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn unnamed_objects_are_rejected() {
        let store: MemoryStore<ControllerRevision> = MemoryStore::new();
        assert!(store.insert(ControllerRevision::default()).is_err());
    }

    // =========================================================================
    // Reflector store
    // =========================================================================

    #[test]
    fn reflector_store_lookup_by_key() {
        let (reader, mut writer) = reflector::store::<ControllerRevision>();
        writer.apply_watcher_event(&watcher::Event::Apply(revision("a", "web")));
        writer.apply_watcher_event(&watcher::Event::Apply(revision("b", "web")));

        let found = reader
            .get_by_key(&ResourceKey::namespaced("b", "web"))
            .unwrap()
            .unwrap();
        assert_eq!(found.metadata.namespace.as_deref(), Some("b"));

        assert!(reader
            .get_by_key(&ResourceKey::cluster("web"))
            .unwrap()
            .is_none());
        assert_eq!(reader.list_namespace("a").unwrap().len(), 1);
    }
}
