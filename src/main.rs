use clap::Parser;
use pmp_generation_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Chains(args) => cli::chains::run(args).await,
        Command::Check(args) => cli::check::run(args).await,
    }
}
