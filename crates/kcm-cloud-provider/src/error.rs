//! Error types for provider construction and startup selection

use std::path::PathBuf;

use thiserror::Error;

use crate::loop_mode::ControllerLoopMode;

/// Error returned by plugin factories
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by a [`ProviderRegistry`](crate::ProviderRegistry)
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A factory was registered twice under the same name
    #[error("cloud provider {name:?} was registered twice")]
    AlreadyRegistered {
        /// Provider name
        name: String,
    },

    /// No factory is registered under the name
    #[error("unknown cloud provider {name:?}")]
    Unknown {
        /// Provider name
        name: String,
    },

    /// The cloud config file could not be read
    #[error("couldn't read cloud provider configuration {}: {source}", .path.display())]
    ConfigFile {
        /// Path that was given
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The plugin factory failed
    #[error("could not init cloud provider {name:?}: {source}")]
    Init {
        /// Provider name
        name: String,
        /// Error returned by the factory
        source: BoxError,
    },

    /// An in-tree provider was requested; those are no longer built in
    #[error("cloud provider {name:?} is disabled, built-in cloud providers are no longer supported (use --cloud-provider=external)")]
    Disabled {
        /// Provider name
        name: String,
    },
}

/// Fatal startup errors from [`create_cloud_provider`](crate::create_cloud_provider)
///
/// Each variant points the operator at a different fix: the volume plugin or
/// its config, the `--cloud-provider` value, or the cluster's ClusterID tag.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The registry failed to build the external cloud volume plugin
    #[error("cloud provider could not be initialized: {source}")]
    ProviderConstructionFailed {
        /// Plugin name passed to the registry
        provider: String,
        /// Registry error
        source: ProviderError,
    },

    /// A named in-tree provider was requested
    #[error("cloud provider could not be initialized: {source}")]
    ProviderDisabled {
        /// Requested provider name
        provider: String,
        /// Registry error describing the disabled provider
        source: ProviderError,
    },

    /// The provider reports no ClusterID and untagged clusters are not allowed
    #[error("no ClusterID Found.  A ClusterID is required for the cloud provider to function properly.  This check can be bypassed by setting the allow-untagged-cloud option")]
    MissingClusterId {
        /// Provider that reported the missing tag
        provider: String,
    },
}

impl BootstrapError {
    /// Provider name the error concerns
    pub fn provider(&self) -> &str {
        match self {
            Self::ProviderConstructionFailed { provider, .. }
            | Self::ProviderDisabled { provider, .. }
            | Self::MissingClusterId { provider } => provider,
        }
    }

    /// Loop mode that was in effect when selection failed
    ///
    /// Every failing branch runs after the in-tree loops have been ruled out.
    pub fn loop_mode(&self) -> ControllerLoopMode {
        ControllerLoopMode::ExternalLoops
    }
}
