use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::address::{shetrace_address_url, validate_address, AddressKind};
use crate::coordinator::FetchState;
use crate::registry::Environment;
use crate::service::NetworkService;
use crate::utils::{display_error, display_header, display_info, display_success};

#[derive(Debug, Args)]
pub struct AddressCommand {
    #[arg(help = "SHE (she...) or EVM (0x...) address")]
    address: String,

    #[arg(long, help = "EVM chain id, decimal or hex", default_value = "1329")]
    chain_id: String,
}

impl AddressCommand {
    pub async fn execute(self) -> Result<()> {
        display_header("SHE Address Lookup");

        let address = self.address.trim();

        // validation happens locally; nothing is sent for malformed input
        let kind = match validate_address(address) {
            Ok(kind) => kind,
            Err(e) => {
                display_error(&e.to_string());
                return Ok(());
            }
        };

        let service = NetworkService::new()?;
        let entry = service.resolve(Environment::Evm, &self.chain_id)?;
        let cosmos_chain = service
            .registry()
            .counterpart(entry)
            .map(|e| e.chain_id.clone())
            .unwrap_or_else(|| entry.chain_id.clone());

        display_info("Network", &format!("{} ({})", entry.name, entry.chain_id));
        display_info("Address", address);

        if kind == AddressKind::She {
            display_info("Explorer", &shetrace_address_url(address, &cosmos_chain));
            return Ok(());
        }

        println!("\n{}", "Deriving linked SHE address...".bright_cyan());

        let mut sub = service.subscribe_linked_address(&self.chain_id, Some(address))?;
        match sub.settled().await {
            FetchState::Success(Some(linked)) => {
                display_success(&format!("Linked SHE address: {linked}"));
                display_info("Explorer", &shetrace_address_url(&linked, &cosmos_chain));
            }
            FetchState::Error(reason) => display_error(&format!("Unavailable: {reason}")),
            _ => display_error("Unavailable: no address returned"),
        }

        Ok(())
    }
}
