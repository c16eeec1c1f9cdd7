//! Cloud provider startup configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Inputs to cloud provider selection
///
/// Empty strings mean "not set", matching how the flags arrive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudProviderConfig {
    /// Requested provider: empty, `external`, or an in-tree name
    pub cloud_provider: String,

    /// Plugin to build for volume operations when the provider is external
    pub external_cloud_volume_plugin: String,

    /// Path to the provider configuration file
    pub cloud_config_file: Option<PathBuf>,

    /// Accept providers that report no ClusterID, with a warning
    pub allow_untagged_cloud: bool,
}
