//! CLI module for the generation gateway
//!
//! - `serve`: HTTP server
//! - `chains`: print the configured provider chains
//! - `check`: probe provider availability once and report

pub mod chains;
pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// PMP Generation Gateway - provider chains with retry and fallback
#[derive(Parser)]
#[command(name = "pmp-generation-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print the provider chain of every feature
    Chains(chains::ChainsArgs),

    /// Check which providers are currently available
    Check(check::CheckArgs),
}

/// Load `.env` and the configuration; a broken configuration falls back to
/// defaults and the error is handed back for logging once logging is up
pub(crate) fn load_config() -> (AppConfig, Option<config::ConfigError>) {
    dotenvy::dotenv().ok();

    match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}
