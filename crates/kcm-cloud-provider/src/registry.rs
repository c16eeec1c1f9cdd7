//! Cloud provider plugin registry
//!
//! [`ProviderRegistry`] is the collaborator startup talks to. Each
//! [`CloudProviderRegistry`] owns its plugins and its record of warned
//! disabled providers; there is no process-global registry.

use std::path::Path;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
#[cfg(test)]
use mockall::automock;
use tracing::{info, warn};

use crate::error::{BoxError, ProviderError};
use crate::provider::CloudProvider;

/// Provider name that delegates cloud loops to an out-of-process manager
pub const EXTERNAL_CLOUD_PROVIDER: &str = "external";

/// Builds a provider from the raw contents of its config file, if one was given
pub type ProviderFactory =
    Arc<dyn Fn(Option<&[u8]>) -> Result<Arc<dyn CloudProvider>, BoxError> + Send + Sync>;

/// Source of cloud provider plugins
#[cfg_attr(test, automock)]
pub trait ProviderRegistry: Send + Sync {
    /// Whether `name` selects the out-of-process provider
    fn is_external(&self, name: &str) -> bool;

    /// Construct the provider registered as `name`
    ///
    /// Returns `Ok(None)` when `name` selects no in-process provider at all.
    fn init_cloud_provider<'a>(
        &self,
        name: &str,
        config_file: Option<&'a Path>,
    ) -> Result<Option<Arc<dyn CloudProvider>>, ProviderError>;

    /// Emit the migration warning for a disabled in-tree provider
    fn disable_warning_for_provider(&self, name: &str);

    /// The error reported when a disabled in-tree provider is requested
    fn error_for_disabled_provider(&self, name: &str) -> ProviderError;
}

struct InTreeProvider {
    name: &'static str,
    detail: &'static str,
}

/// Providers that used to be compiled in, with where they live now
const IN_TREE_PROVIDERS: &[InTreeProvider] = &[
    InTreeProvider {
        name: "aws",
        detail: "The AWS provider has moved to https://github.com/kubernetes/cloud-provider-aws",
    },
    InTreeProvider {
        name: "azure",
        detail: "The Azure provider has moved to https://github.com/kubernetes-sigs/cloud-provider-azure",
    },
    InTreeProvider {
        name: "gce",
        detail: "The GCE provider has moved to https://github.com/kubernetes/cloud-provider-gcp",
    },
    InTreeProvider {
        name: "openstack",
        detail: "The OpenStack provider has moved to https://github.com/kubernetes/cloud-provider-openstack",
    },
    InTreeProvider {
        name: "vsphere",
        detail: "The vSphere provider has moved to https://github.com/kubernetes/cloud-provider-vsphere",
    },
];

fn in_tree_provider(name: &str) -> Option<&'static InTreeProvider> {
    IN_TREE_PROVIDERS.iter().find(|p| p.name == name)
}

/// In-memory plugin registry
#[derive(Default)]
pub struct CloudProviderRegistry {
    factories: DashMap<String, ProviderFactory>,
    warned: DashSet<String>,
}

impl CloudProviderRegistry {
    /// Create a registry with no plugins
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin factory under `name`
    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Result<(), ProviderError>
    where
        F: Fn(Option<&[u8]>) -> Result<Arc<dyn CloudProvider>, BoxError> + Send + Sync + 'static,
    {
        match self.factories.entry(name.into()) {
            Entry::Occupied(entry) => Err(ProviderError::AlreadyRegistered {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                info!(provider = %entry.key(), "Registered cloud provider");
                entry.insert(Arc::new(factory));
                Ok(())
            }
        }
    }

    /// Whether a plugin is registered under `name`
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Names of all registered plugins, sorted
    pub fn registered_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Disabled providers a warning was emitted for, sorted
    pub fn warned_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.warned.iter().map(|name| name.key().clone()).collect();
        names.sort();
        names
    }
}

impl ProviderRegistry for CloudProviderRegistry {
    fn is_external(&self, name: &str) -> bool {
        name == EXTERNAL_CLOUD_PROVIDER
    }

    fn init_cloud_provider(
        &self,
        name: &str,
        config_file: Option<&Path>,
    ) -> Result<Option<Arc<dyn CloudProvider>>, ProviderError> {
        if name.is_empty() {
            return Ok(None);
        }
        if self.is_external(name) {
            info!("External cloud provider specified");
            return Ok(None);
        }

        if let Some(provider) = in_tree_provider(name) {
            warn!(provider = name, detail = provider.detail, "Built-in cloud provider is deprecated");
        }

        let config = match config_file {
            Some(path) => Some(std::fs::read(path).map_err(|source| ProviderError::ConfigFile {
                path: path.to_path_buf(),
                source,
            })?),
            None => None,
        };

        // Plugin code must not run under the shard lock
        let factory = self
            .factories
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ProviderError::Unknown {
                name: name.to_string(),
            })?;

        let cloud = factory(config.as_deref()).map_err(|source| ProviderError::Init {
            name: name.to_string(),
            source,
        })?;

        info!(provider = name, "Cloud provider initialized");
        Ok(Some(cloud))
    }

    fn disable_warning_for_provider(&self, name: &str) {
        self.warned.insert(name.to_string());
        match in_tree_provider(name) {
            Some(provider) => warn!(
                provider = name,
                detail = provider.detail,
                "Built-in cloud provider is disabled, use --cloud-provider=external"
            ),
            None => warn!(
                provider = name,
                "Built-in cloud providers are disabled, use --cloud-provider=external"
            ),
        }
    }

    fn error_for_disabled_provider(&self, name: &str) -> ProviderError {
        ProviderError::Disabled {
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    struct StaticCloud;

    impl CloudProvider for StaticCloud {
        fn provider_name(&self) -> &str {
            "static"
        }

        fn has_cluster_id(&self) -> bool {
            true
        }
    }

    fn static_factory(_config: Option<&[u8]>) -> Result<Arc<dyn CloudProvider>, BoxError> {
        Ok(Arc::new(StaticCloud))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = CloudProviderRegistry::new();
        registry.register("static", static_factory).unwrap();

        let err = registry.register("static", static_factory).unwrap_err();
        assert!(matches!(err, ProviderError::AlreadyRegistered { ref name } if name == "static"));
        assert_eq!(registry.registered_providers(), vec!["static"]);
        assert!(registry.is_registered("static"));
        assert!(!registry.is_registered("external"));
    }

    #[test]
    fn only_external_is_external() {
        let registry = CloudProviderRegistry::new();
        assert!(registry.is_external("external"));
        assert!(!registry.is_external("External"));
        assert!(!registry.is_external(""));
        assert!(!registry.is_external("aws"));
    }

    // =========================================================================
    // init_cloud_provider
    // =========================================================================

    #[test]
    fn empty_and_external_names_build_nothing() {
        let registry = CloudProviderRegistry::new();
        assert!(registry.init_cloud_provider("", None).unwrap().is_none());
        assert!(registry.init_cloud_provider("external", None).unwrap().is_none());
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let registry = CloudProviderRegistry::new();
        let err = registry.init_cloud_provider("static", None).err().unwrap();
        assert_eq!(err.to_string(), "unknown cloud provider \"static\"");
    }

    #[test]
    fn factory_receives_config_file_contents() {
        let seen = Arc::new(Mutex::new(None));
        let registry = CloudProviderRegistry::new();
        let sink = Arc::clone(&seen);
        registry
            .register("static", move |config: Option<&[u8]>| {
                *sink.lock().unwrap() = config.map(<[u8]>::to_vec);
                static_factory(config)
            })
            .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[Global]\nzone = a\n").unwrap();

        let cloud = registry
            .init_cloud_provider("static", Some(file.path()))
            .unwrap()
            .unwrap();
        assert_eq!(cloud.provider_name(), "static");
        assert_eq!(
            seen.lock().unwrap().as_deref(),
            Some(b"[Global]\nzone = a\n".as_slice())
        );
    }

    #[test]
    fn factory_without_config_gets_none() {
        let registry = CloudProviderRegistry::new();
        registry
            .register("static", |config: Option<&[u8]>| {
                assert!(config.is_none());
                static_factory(config)
            })
            .unwrap();
        assert!(registry.init_cloud_provider("static", None).unwrap().is_some());
    }

    #[test]
    fn unreadable_config_file_is_an_error() {
        let registry = CloudProviderRegistry::new();
        registry.register("static", static_factory).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("cloud.conf");
        let err = registry
            .init_cloud_provider("static", Some(&missing))
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::ConfigFile { ref path, .. } if path == &missing));
    }

    #[test]
    fn factory_failure_is_wrapped() {
        let registry = CloudProviderRegistry::new();
        registry
            .register("static", |_: Option<&[u8]>| -> Result<Arc<dyn CloudProvider>, BoxError> {
                Err("credentials expired".into())
            })
            .unwrap();

        let err = registry.init_cloud_provider("static", None).err().unwrap();
        assert_eq!(
            err.to_string(),
            "could not init cloud provider \"static\": credentials expired"
        );
    }

    // =========================================================================
    // Disabled providers
    // =========================================================================

    #[test]
    fn disabled_warnings_are_recorded_per_registry() {
        let registry = CloudProviderRegistry::new();
        registry.disable_warning_for_provider("gce");
        registry.disable_warning_for_provider("aws");
        registry.disable_warning_for_provider("aws");
        registry.disable_warning_for_provider("made-up");

        assert_eq!(registry.warned_providers(), vec!["aws", "gce", "made-up"]);
        assert!(CloudProviderRegistry::new().warned_providers().is_empty());
    }

    #[test]
    fn disabled_error_names_the_provider() {
        let err = CloudProviderRegistry::new().error_for_disabled_provider("vsphere");
        assert!(matches!(err, ProviderError::Disabled { ref name } if name == "vsphere"));
        assert!(err.to_string().contains("--cloud-provider=external"));
    }
}
