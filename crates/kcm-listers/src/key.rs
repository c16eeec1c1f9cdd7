//! Namespace/name keys for cached objects
//!
//! Keys render as `namespace/name` for namespaced objects and as a bare `name`
//! for cluster-scoped ones. An empty namespace is the same as no namespace.

use std::fmt;

use kube::Resource;

use crate::error::StoreError;

/// Composite cache key of an optional namespace and a name
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    namespace: Option<String>,
    name: String,
}

impl ResourceKey {
    /// Build a key, treating an empty namespace as cluster scope
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(String::from),
            name: name.into(),
        }
    }

    /// Key of a cluster-scoped object
    pub fn cluster(name: impl Into<String>) -> Self {
        Self::new(None, name)
    }

    /// Key of a namespaced object
    pub fn namespaced(namespace: &str, name: impl Into<String>) -> Self {
        Self::new(Some(namespace), name)
    }

    /// Key under which an object is cached
    pub fn from_resource<K: Resource>(obj: &K) -> Result<Self, StoreError> {
        let meta = obj.meta();
        let name = meta
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| StoreError::invalid_key("", "object has no metadata.name"))?;
        Ok(Self::new(meta.namespace.as_deref(), name))
    }

    /// Parse a `namespace/name` or `name` key
    pub fn parse(key: &str) -> Result<Self, StoreError> {
        let mut parts = key.split('/');
        let parsed = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), None, None) => Self::cluster(name),
            (Some(namespace), Some(name), None) => Self::new(Some(namespace), name),
            _ => return Err(StoreError::invalid_key(key, "unexpected key format")),
        };
        if parsed.name.is_empty() {
            return Err(StoreError::invalid_key(key, "name is empty"));
        }
        Ok(parsed)
    }

    /// Namespace, if the key is namespaced
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}
