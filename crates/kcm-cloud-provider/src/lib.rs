//! Cloud provider selection for the controller manager
//!
//! At startup the controller manager decides which cloud integration mode the
//! cluster runs in and, when an in-process provider is needed, constructs it:
//!
//! - no `--cloud-provider`: every loop runs in-tree, no provider ([`ControllerLoopMode::IncludeCloudLoops`])
//! - `--cloud-provider=external`: cloud loops run out of process; a provider is
//!   only built when an external cloud volume plugin is named
//! - any other name: in-tree providers are disabled, startup fails
//!
//! The decision lives in [`create_cloud_provider`]. Plugins come from a
//! [`ProviderRegistry`]; [`CloudProviderRegistry`] is the in-memory one.

#![deny(missing_docs)]

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod loop_mode;
pub mod provider;
pub mod registry;

pub use bootstrap::{create_cloud_provider, CloudSelection};
pub use config::CloudProviderConfig;
pub use error::{BootstrapError, BoxError, ProviderError};
pub use loop_mode::{filter_controllers, known_controllers, ControllerDescriptor, ControllerLoopMode};
pub use provider::{CloudProvider, InformerUser};
pub use registry::{CloudProviderRegistry, ProviderFactory, ProviderRegistry, EXTERNAL_CLOUD_PROVIDER};
