use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tokio::task::JoinSet;

use crate::coordinator::FetchState;
use crate::registry::Environment;
use crate::service::NetworkService;
use crate::utils::{display_error, display_header, display_info, display_success};

#[derive(Debug, Args)]
pub struct VersionCommand {
    #[arg(help = "Cosmos chain id (e.g. pacific-1); all networks when omitted")]
    chain_id: Option<String>,

    #[arg(long, help = "Seconds to wait per network", default_value = "15")]
    timeout_secs: u64,
}

impl VersionCommand {
    pub async fn execute(self) -> Result<()> {
        display_header("SHE Node Versions");

        let service = Arc::new(NetworkService::new()?);

        let chain_ids: Vec<String> = match &self.chain_id {
            Some(id) => {
                // fail early on an unknown id instead of spawning anything
                service.resolve(Environment::Cosmos, id)?;
                vec![id.clone()]
            }
            None => service
                .list_networks()
                .iter()
                .filter(|e| e.environment == Environment::Cosmos)
                .map(|e| e.chain_id.clone())
                .collect(),
        };

        let timeout = Duration::from_secs(self.timeout_secs);
        let mut tasks = JoinSet::new();

        for chain_id in chain_ids {
            let service = Arc::clone(&service);
            tasks.spawn(async move {
                let state = match service.subscribe_version(&chain_id) {
                    Ok(mut sub) => tokio::time::timeout(timeout, sub.settled())
                        .await
                        .unwrap_or(FetchState::Loading),
                    Err(e) => FetchState::Error(e.to_string()),
                };
                (chain_id, state)
            });
        }

        while let Some(result) = tasks.join_next().await {
            let (chain_id, state) = result?;
            let entry = service.resolve(Environment::Cosmos, &chain_id)?;

            println!("\n{} {}", "→".bright_cyan(), entry.name.bold());
            display_info("Chain ID", &entry.chain_id);
            if let Some(genesis) = &entry.genesis_url {
                display_info("Genesis", genesis);
            }

            match state {
                FetchState::Success(Some(version)) => {
                    display_success(&format!("Version: {version}"))
                }
                FetchState::Error(reason) => display_error(&format!("Unavailable: {reason}")),
                _ => display_error("Unavailable: no version reported in time"),
            }
        }

        Ok(())
    }
}
