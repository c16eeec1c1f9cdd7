//! Startup decision report printed on stdout

use serde::Serialize;

use kcm_cloud_provider::{filter_controllers, CloudSelection, ControllerDescriptor, ControllerLoopMode};

/// What startup decided
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupReport<'a> {
    pub loop_mode: ControllerLoopMode,
    pub cloud_provider: Option<&'a str>,
    pub controllers: Vec<&'a str>,
    pub skipped: Vec<&'a str>,
}

impl<'a> StartupReport<'a> {
    pub fn new(selection: &'a CloudSelection, catalogue: &'a [ControllerDescriptor]) -> Self {
        let controllers: Vec<&str> = filter_controllers(selection.loop_mode, catalogue)
            .into_iter()
            .map(ControllerDescriptor::name)
            .collect();
        let skipped = catalogue
            .iter()
            .map(ControllerDescriptor::name)
            .filter(|name| !controllers.contains(name))
            .collect();

        Self {
            loop_mode: selection.loop_mode,
            cloud_provider: selection.provider_name(),
            controllers,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcm_cloud_provider::known_controllers;

    #[test]
    fn external_loops_report_skipped_cloud_controllers() {
        let selection = CloudSelection {
            cloud: None,
            loop_mode: ControllerLoopMode::ExternalLoops,
        };
        let catalogue = known_controllers();
        let report = StartupReport::new(&selection, &catalogue);

        assert_eq!(
            report.skipped,
            vec![
                "service-lb-controller",
                "node-route-controller",
                "cloud-node-lifecycle-controller"
            ]
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["loopMode"], "ExternalLoops");
        assert!(json["cloudProvider"].is_null());
    }

    #[test]
    fn include_cloud_loops_skips_nothing() {
        let selection = CloudSelection {
            cloud: None,
            loop_mode: ControllerLoopMode::IncludeCloudLoops,
        };
        let catalogue = known_controllers();
        let report = StartupReport::new(&selection, &catalogue);

        assert!(report.skipped.is_empty());
        assert_eq!(report.controllers.len(), catalogue.len());
    }
}
