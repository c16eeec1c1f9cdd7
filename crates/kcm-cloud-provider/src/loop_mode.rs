//! Controller loop modes and the controllers they gate

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Which family of controller loops this process runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerLoopMode {
    /// No cloud provider: run every loop, cloud-dependent ones included, with in-tree behaviour only
    IncludeCloudLoops,
    /// Cloud-dependent loops run elsewhere (an external cloud controller manager)
    #[default]
    ExternalLoops,
}

impl ControllerLoopMode {
    /// Whether cloud-provider controllers run in this process
    pub fn includes_cloud_loops(self) -> bool {
        matches!(self, Self::IncludeCloudLoops)
    }

    /// Whether `controller` should be started under this mode
    pub fn should_start(self, controller: &ControllerDescriptor) -> bool {
        !controller.is_cloud_provider_controller() || self.includes_cloud_loops()
    }
}

impl fmt::Display for ControllerLoopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncludeCloudLoops => f.write_str("IncludeCloudLoops"),
            Self::ExternalLoops => f.write_str("ExternalLoops"),
        }
    }
}

/// A controller the manager knows how to start
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerDescriptor {
    name: String,
    cloud_provider_controller: bool,
}

impl ControllerDescriptor {
    /// A controller that needs no cloud provider
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cloud_provider_controller: false,
        }
    }

    /// A controller that only runs alongside an in-process cloud provider
    pub fn cloud(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cloud_provider_controller: true,
        }
    }

    /// Controller name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a cloud-provider controller
    pub fn is_cloud_provider_controller(&self) -> bool {
        self.cloud_provider_controller
    }
}

/// The controllers to start under `mode`, in catalogue order
pub fn filter_controllers(
    mode: ControllerLoopMode,
    controllers: &[ControllerDescriptor],
) -> Vec<&ControllerDescriptor> {
    controllers
        .iter()
        .filter(|controller| {
            let start = mode.should_start(controller);
            if !start {
                info!(controller = controller.name(), loop_mode = %mode, "Skipping a cloud provider controller");
            }
            start
        })
        .collect()
}

/// Well-known controller-manager controllers
pub fn known_controllers() -> Vec<ControllerDescriptor> {
    vec![
        ControllerDescriptor::new("namespace-controller"),
        ControllerDescriptor::new("garbage-collector-controller"),
        ControllerDescriptor::new("deployment-controller"),
        ControllerDescriptor::new("replicaset-controller"),
        ControllerDescriptor::new("statefulset-controller"),
        ControllerDescriptor::new("daemonset-controller"),
        ControllerDescriptor::new("job-controller"),
        ControllerDescriptor::new("cronjob-controller"),
        ControllerDescriptor::new("node-ipam-controller"),
        ControllerDescriptor::new("node-lifecycle-controller"),
        ControllerDescriptor::new("persistentvolume-binder-controller"),
        ControllerDescriptor::cloud("service-lb-controller"),
        ControllerDescriptor::cloud("node-route-controller"),
        ControllerDescriptor::cloud("cloud-node-lifecycle-controller"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_external() {
        assert_eq!(ControllerLoopMode::default(), ControllerLoopMode::ExternalLoops);
    }

    #[test]
    fn external_loops_skip_cloud_controllers() {
        let controllers = known_controllers();
        let started = filter_controllers(ControllerLoopMode::ExternalLoops, &controllers);

        assert!(started.iter().all(|c| !c.is_cloud_provider_controller()));
        assert_eq!(started.len(), controllers.len() - 3);
        assert!(started.iter().any(|c| c.name() == "node-lifecycle-controller"));
    }

    #[test]
    fn include_cloud_loops_starts_everything() {
        let controllers = known_controllers();
        let started = filter_controllers(ControllerLoopMode::IncludeCloudLoops, &controllers);
        assert_eq!(started.len(), controllers.len());
        assert_eq!(started[0].name(), "namespace-controller");
    }

    #[test]
    fn loop_mode_serializes_by_name() {
        assert_eq!(
            serde_json::to_string(&ControllerLoopMode::IncludeCloudLoops).unwrap(),
            "\"IncludeCloudLoops\""
        );
        assert_eq!(ControllerLoopMode::ExternalLoops.to_string(), "ExternalLoops");
    }
}
