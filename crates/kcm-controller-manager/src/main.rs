//! Controller manager entrypoint
//!
//! Parses the cloud provider options, initializes logging, runs the one-time
//! cloud provider selection and prints which controllers this process would
//! start. A selection error aborts startup with a non-zero exit.

mod options;
mod report;
mod telemetry;

use anyhow::Context;
use clap::Parser;

use kcm_cloud_provider::{create_cloud_provider, known_controllers, CloudProviderRegistry};
use kcm_listers::SharedInformerFactory;

use crate::options::Options;
use crate::report::StartupReport;

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    telemetry::init_telemetry(options.log_format)?;

    let config = options.resolve()?;
    tracing::debug!(?config, "Resolved cloud provider configuration");

    // No plugins are compiled in; external volume plugins register here
    let registry = CloudProviderRegistry::new();
    let informers = SharedInformerFactory::new();

    let selection = create_cloud_provider(&config, &registry, &informers)
        .context("failed to select cloud provider")?;

    let controllers = known_controllers();
    let report = StartupReport::new(&selection, &controllers);
    tracing::info!(
        started = report.controllers.len(),
        skipped = report.skipped.len(),
        "Controller set resolved"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
