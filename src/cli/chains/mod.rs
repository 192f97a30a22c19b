//! Chains command - prints the configured provider chains

use clap::Args;

use crate::domain::{ChainConfig, RequiredConfig};
use crate::infrastructure::logging::init_logging;

#[derive(Debug, Args)]
pub struct ChainsArgs {
    /// Print the chains as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ChainsArgs) -> anyhow::Result<()> {
    let (config, config_error) = super::load_config();
    init_logging(&config.logging);

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
    }

    let definition = crate::load_registry_definition(&config)?;
    let chains = definition.registry.chains();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chains)?);
        return Ok(());
    }

    for chain in chains {
        print!("{}", render_chain(chain));
    }

    Ok(())
}

fn describe_requirement(config: &RequiredConfig) -> String {
    match config {
        RequiredConfig::Credentials { keys } => format!("credentials: {}", keys.join(", ")),
        RequiredConfig::Reachable { base_url_key } => format!("reachable: {}", base_url_key),
    }
}

fn render_chain(chain: &ChainConfig) -> String {
    let mut out = format!("{}\n", chain.feature());

    for provider in chain.providers() {
        out.push_str(&format!(
            "  {:>3}  {:<12} {} (attempts: {}, backoff: {}ms)\n",
            provider.priority(),
            provider.name(),
            describe_requirement(provider.required_config()),
            provider.max_attempts(),
            provider.backoff_base_ms(),
        ));
    }

    out
}
