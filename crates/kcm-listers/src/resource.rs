//! Resource kind descriptors used for error reporting

use std::fmt;

use kube::Resource;

/// API group plus resource name, e.g. `controllerrevision.apps`
///
/// Core-group resources render without a suffix (`pod`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupResource {
    group: String,
    resource: String,
}

impl GroupResource {
    /// Create a descriptor from an explicit group and resource name
    pub fn new(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
        }
    }

    /// Derive the descriptor for a statically typed resource
    ///
    /// Uses the lowercased kind as the resource name.
    pub fn of<K: Resource<DynamicType = ()>>() -> Self {
        Self::new(K::group(&()), K::kind(&()).to_ascii_lowercase())
    }

    /// API group (empty for the core group)
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Resource name
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::ControllerRevision;
    use k8s_openapi::api::core::v1::ConfigMap;

    #[test]
    fn grouped_resource_is_qualified() {
        assert_eq!(
            GroupResource::of::<ControllerRevision>().to_string(),
            "controllerrevision.apps"
        );
    }

    #[test]
    fn core_resource_has_no_suffix() {
        let gr = GroupResource::of::<ConfigMap>();
        assert_eq!(gr.group(), "");
        assert_eq!(gr.to_string(), "configmap");
    }
}
