//! Command-line options and config file loading

use std::path::{Path, PathBuf};

use clap::Parser;
use kcm_cloud_provider::CloudProviderConfig;
use thiserror::Error;

use crate::telemetry::LogFormat;

/// Errors loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// kcm-controller-manager - selects the cloud integration mode at startup
#[derive(Parser, Debug)]
#[command(name = "kcm-controller-manager", version, about, long_about = None)]
pub struct Options {
    /// The provider for cloud services. Empty for no provider, "external" for an out-of-process one
    #[arg(long, env = "KCM_CLOUD_PROVIDER")]
    pub cloud_provider: Option<String>,

    /// Plugin to use when --cloud-provider=external, for volume operations
    #[arg(long, env = "KCM_EXTERNAL_CLOUD_VOLUME_PLUGIN")]
    pub external_cloud_volume_plugin: Option<String>,

    /// Path to the cloud provider configuration file
    #[arg(long, env = "KCM_CLOUD_CONFIG")]
    pub cloud_config: Option<PathBuf>,

    /// Allow the cluster to run without the cluster-id on cloud instances
    #[arg(long, env = "KCM_ALLOW_UNTAGGED_CLOUD")]
    pub allow_untagged_cloud: bool,

    /// YAML file with cloud provider settings; flags override its values
    #[arg(long, env = "KCM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Options {
    /// Merge the config file (if any) with the flags
    pub fn resolve(&self) -> Result<CloudProviderConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => CloudProviderConfig::default(),
        };

        if let Some(provider) = &self.cloud_provider {
            config.cloud_provider = provider.clone();
        }
        if let Some(plugin) = &self.external_cloud_volume_plugin {
            config.external_cloud_volume_plugin = plugin.clone();
        }
        if let Some(path) = &self.cloud_config {
            config.cloud_config_file = Some(path.clone());
        }
        if self.allow_untagged_cloud {
            config.allow_untagged_cloud = true;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<CloudProviderConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
