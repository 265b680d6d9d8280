use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::registry::{Environment, NetworkRegistry};
use crate::utils::{display_header, display_networks};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EnvironmentFilter {
    Evm,
    Cosmos,
}

impl From<EnvironmentFilter> for Environment {
    fn from(filter: EnvironmentFilter) -> Self {
        match filter {
            EnvironmentFilter::Evm => Environment::Evm,
            EnvironmentFilter::Cosmos => Environment::Cosmos,
        }
    }
}

#[derive(Debug, Args)]
pub struct NetworksCommand {
    #[arg(long, value_enum, help = "Only show networks of one environment")]
    environment: Option<EnvironmentFilter>,
}

impl NetworksCommand {
    pub fn execute(self) -> Result<()> {
        display_header("Registered SHE Networks");

        let registry = NetworkRegistry::builtin();
        match self.environment.map(Environment::from) {
            Some(environment) => {
                let filtered: Vec<_> = registry
                    .entries()
                    .iter()
                    .filter(|e| e.environment == environment)
                    .cloned()
                    .collect();
                display_networks(&filtered);
            }
            None => display_networks(registry.entries()),
        }

        Ok(())
    }
}
