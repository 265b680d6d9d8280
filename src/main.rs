use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use she_pal::client::update::check_for_update;
use she_pal::commands::{AddressCommand, NetworksCommand, VersionCommand};

#[derive(Debug, Parser)]
#[command(
    name = "she-pal",
    author = "SHE Pal",
    version = "0.1.0",
    about = "A CLI tool for inspecting SHE networks",
    long_about = "A command-line interface for the SHE network registry: list configured \
                  networks and endpoints, fetch node versions, and resolve the SHE address \
                  linked to an EVM account."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(
        name = "networks",
        about = "List the registered SHE networks",
        long_about = "Lists every registered network with its chain id (decimal and hex for \
                      EVM chains), RPC endpoint and explorer links."
    )]
    Networks(NetworksCommand),

    #[command(
        name = "version",
        about = "Fetch node versions from the Cosmos networks",
        long_about = "Queries the node-info endpoint of one or all Cosmos networks and \
                      reports the running node version alongside chain id and genesis URL."
    )]
    Version(VersionCommand),

    #[command(
        name = "address",
        about = "Look up an address and its linked SHE address",
        long_about = "Validates a SHE or EVM address locally, builds the SheTrace explorer \
                      link, and for EVM addresses derives the linked SHE address via the \
                      network's RPC endpoint."
    )]
    Address(AddressCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    check_for_update();

    let outcome = match cli.command {
        Commands::Networks(cmd) => cmd.execute(),
        Commands::Version(cmd) => cmd.execute().await,
        Commands::Address(cmd) => cmd.execute().await,
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
