//! Startup selection of the cloud provider and controller loop mode

use std::fmt;
use std::sync::Arc;

use kcm_listers::SharedInformerFactory;
use tracing::{debug, info, warn};

use crate::config::CloudProviderConfig;
use crate::error::BootstrapError;
use crate::loop_mode::ControllerLoopMode;
use crate::provider::CloudProvider;
use crate::registry::ProviderRegistry;

/// Outcome of a successful selection
pub struct CloudSelection {
    /// The in-process provider, if one was built
    pub cloud: Option<Arc<dyn CloudProvider>>,
    /// Which controller loops this process runs
    pub loop_mode: ControllerLoopMode,
}

impl CloudSelection {
    /// Name of the constructed provider, if any
    pub fn provider_name(&self) -> Option<&str> {
        self.cloud.as_deref().map(CloudProvider::provider_name)
    }
}

impl fmt::Debug for CloudSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudSelection")
            .field("cloud", &self.provider_name())
            .field("loop_mode", &self.loop_mode)
            .finish()
    }
}

/// Decide the cloud integration mode and build the provider it needs
///
/// Runs once at startup. Precedence:
///
/// 1. `external` provider: with no volume plugin named, nothing is built and
///    the result is `ExternalLoops` with no provider. That is a transitional
///    state and is not an error. Otherwise the volume plugin is built from the
///    registry; failure is fatal.
/// 2. No provider: `IncludeCloudLoops`, nothing built.
/// 3. Any other name: in-tree providers are disabled. The registry warns and
///    the disabled-provider error is returned.
///
/// A built provider must report a ClusterID unless `allow_untagged_cloud` is
/// set, and receives `informers` if it has the informer-consumer capability.
pub fn create_cloud_provider(
    config: &CloudProviderConfig,
    registry: &dyn ProviderRegistry,
    informers: &SharedInformerFactory,
) -> Result<CloudSelection, BootstrapError> {
    let (cloud, loop_mode) = if registry.is_external(&config.cloud_provider) {
        if config.external_cloud_volume_plugin.is_empty() {
            debug!("External cloud provider without a volume plugin, no in-process provider");
            return Ok(CloudSelection {
                cloud: None,
                loop_mode: ControllerLoopMode::ExternalLoops,
            });
        }

        let cloud = registry
            .init_cloud_provider(
                &config.external_cloud_volume_plugin,
                config.cloud_config_file.as_deref(),
            )
            .map_err(|source| BootstrapError::ProviderConstructionFailed {
                provider: config.external_cloud_volume_plugin.clone(),
                source,
            })?;
        (cloud, ControllerLoopMode::ExternalLoops)
    } else if config.cloud_provider.is_empty() {
        (None, ControllerLoopMode::IncludeCloudLoops)
    } else {
        registry.disable_warning_for_provider(&config.cloud_provider);
        return Err(BootstrapError::ProviderDisabled {
            provider: config.cloud_provider.clone(),
            source: registry.error_for_disabled_provider(&config.cloud_provider),
        });
    };

    if let Some(cloud) = &cloud {
        if !cloud.has_cluster_id() {
            if !config.allow_untagged_cloud {
                return Err(BootstrapError::MissingClusterId {
                    provider: cloud.provider_name().to_string(),
                });
            }
            warn!(
                provider = cloud.provider_name(),
                "Detected a cluster without a ClusterID.  A ClusterID will be required in the future.  Please tag your cluster to avoid any future issues"
            );
        }

        if let Some(user) = cloud.informer_user() {
            debug!(provider = cloud.provider_name(), "Passing shared informers to cloud provider");
            user.set_informers(informers.clone());
        }
    }

    let selection = CloudSelection { cloud, loop_mode };
    info!(
        provider = selection.provider_name().unwrap_or("none"),
        loop_mode = %selection.loop_mode,
        "Cloud provider selected"
    );
    Ok(selection)
}
