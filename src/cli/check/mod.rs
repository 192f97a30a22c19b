//! Check command - one-shot availability report

use clap::Args;
use serde::Serialize;

use crate::domain::{ProviderStatus, ShutdownSignal};
use crate::infrastructure::logging::init_logging;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Only check this feature
    pub feature: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FeatureReport {
    feature: String,
    providers: Vec<ProviderStatus>,
}

impl FeatureReport {
    fn has_available(&self) -> bool {
        self.providers.iter().any(|p| p.available)
    }
}

/// Fails when a requested feature, or every feature, has no available provider
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let (config, config_error) = super::load_config();
    init_logging(&config.logging);

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
    }

    let service = crate::create_generation_service(&config, ShutdownSignal::never())?;

    let reports: Vec<FeatureReport> = match &args.feature {
        Some(feature) => vec![FeatureReport {
            feature: feature.clone(),
            providers: service.provider_statuses(feature).await?,
        }],
        None => service
            .all_statuses()
            .await
            .into_iter()
            .map(|(feature, providers)| FeatureReport { feature, providers })
            .collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", render_report(report));
        }
    }

    match (&args.feature, reports.iter().any(FeatureReport::has_available)) {
        (_, true) => Ok(()),
        (Some(feature), false) => anyhow::bail!("No provider is available for '{}'", feature),
        (None, false) => anyhow::bail!("No provider is available"),
    }
}

fn render_report(report: &FeatureReport) -> String {
    let mut out = format!("{}\n", report.feature);

    for provider in &report.providers {
        out.push_str(&format!(
            "  [{}] {}\n",
            if provider.available { "up" } else { "--" },
            provider.name
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report() {
        let report = FeatureReport {
            feature: "image-generation".to_string(),
            providers: vec![
                ProviderStatus {
                    name: "fal".to_string(),
                    priority: 1,
                    available: true,
                },
                ProviderStatus {
                    name: "replicate".to_string(),
                    priority: 2,
                    available: false,
                },
            ],
        };

        assert!(report.has_available());
        assert_eq!(
            render_report(&report),
            "image-generation\n  [up] fal\n  [--] replicate\n"
        );
    }
}
