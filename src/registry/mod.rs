use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ResolveError;

/// Identifier space a chain id belongs to. EVM chains carry a numeric id
/// (with an equivalent hex form), Cosmos chains a ledger-style string id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Evm,
    Cosmos,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Evm => write!(f, "EVM"),
            Environment::Cosmos => write!(f, "Cosmos"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplorerLink {
    pub name: String,
    pub url: String,
}

impl ExplorerLink {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// One registered network. Entries are built once at startup and never
/// mutated; `chain_id` is unique within its environment, and for EVM entries
/// `hex_chain_id` is the base-16 form of the same number.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkEntry {
    pub environment: Environment,
    pub name: String,
    pub chain_id: String,
    pub hex_chain_id: Option<String>,
    pub rpc_url: String,
    pub rest_url: Option<String>,
    pub genesis_url: Option<String>,
    pub explorer_links: Vec<ExplorerLink>,
}

/// Reduced per-network projection handed to callers that only need
/// connection endpoints, keyed by chain id.
#[derive(Debug, Clone, Serialize)]
pub struct ChainConfig {
    pub chain_id: String,
    pub rpc_url: String,
    pub rest_url: String,
    pub explorer_url: Option<String>,
}

pub struct NetworkRegistry {
    entries: Vec<NetworkEntry>,
}

impl NetworkRegistry {
    /// The built-in SHE networks: three EVM chains and their three Cosmos
    /// counterparts (Mainnet, Testnet, Devnet).
    pub fn builtin() -> Self {
        let entries = vec![
            NetworkEntry {
                environment: Environment::Evm,
                name: "Mainnet".to_string(),
                chain_id: "1329".to_string(),
                hex_chain_id: Some("0x531".to_string()),
                rpc_url: "https://evm-rpc.she-apis.com".to_string(),
                rest_url: None,
                genesis_url: None,
                explorer_links: vec![
                    ExplorerLink::new("SheTrace", "https://shetrace.com/?chain=pacific-1"),
                    ExplorerLink::new("SheScan", "https://www.shescan.app/?chain=pacific-1"),
                ],
            },
            NetworkEntry {
                environment: Environment::Evm,
                name: "Testnet".to_string(),
                chain_id: "1328".to_string(),
                hex_chain_id: Some("0x530".to_string()),
                rpc_url: "https://evm-rpc-testnet.she-apis.com".to_string(),
                rest_url: None,
                genesis_url: None,
                explorer_links: vec![
                    ExplorerLink::new("SheTrace", "https://shetrace.com/?chain=atlantic-2"),
                    ExplorerLink::new("SheScan", "https://www.shescan.app/?chain=atlantic-2"),
                ],
            },
            NetworkEntry {
                environment: Environment::Evm,
                name: "Devnet".to_string(),
                chain_id: "713715".to_string(),
                hex_chain_id: Some("0xAE3F3".to_string()),
                rpc_url: "https://evm-rpc-arctic-1.she-apis.com".to_string(),
                rest_url: None,
                genesis_url: None,
                explorer_links: vec![ExplorerLink::new(
                    "SheTrace",
                    "https://shetrace.com/?chain=arctic-1",
                )],
            },
            NetworkEntry {
                environment: Environment::Cosmos,
                name: "Mainnet".to_string(),
                chain_id: "pacific-1".to_string(),
                hex_chain_id: None,
                rpc_url: "https://wallet.rpc.pacific-1.shenetwork.io".to_string(),
                rest_url: Some("https://rest.pacific-1.she.io".to_string()),
                genesis_url: Some(
                    "https://raw.githubusercontent.com/she-protocol/she-networks/main/she-mainnet/genesis.json"
                        .to_string(),
                ),
                explorer_links: vec![
                    ExplorerLink::new("SheTrace", "https://shetrace.com/?chain=pacific-1"),
                    ExplorerLink::new("SheScan", "https://www.shescan.app/?chain=pacific-1"),
                ],
            },
            NetworkEntry {
                environment: Environment::Cosmos,
                name: "Testnet".to_string(),
                chain_id: "atlantic-2".to_string(),
                hex_chain_id: None,
                rpc_url: "https://wallet.rpc.atlantic-2.shenetwork.io".to_string(),
                rest_url: Some("https://rest-testnet.she-apis.com".to_string()),
                genesis_url: Some(
                    "https://raw.githubusercontent.com/she-protocol/she-networks/main/she-testnet/genesis.json"
                        .to_string(),
                ),
                explorer_links: vec![
                    ExplorerLink::new("SheTrace", "https://shetrace.com/?chain=atlantic-2"),
                    ExplorerLink::new("SheScan", "https://www.shescan.app/?chain=atlantic-2"),
                ],
            },
            NetworkEntry {
                environment: Environment::Cosmos,
                name: "Devnet".to_string(),
                chain_id: "arctic-1".to_string(),
                hex_chain_id: None,
                rpc_url: "https://wallet.rpc.arctic-1.shenetwork.io".to_string(),
                rest_url: Some("https://rest-arctic-1.she-apis.com".to_string()),
                genesis_url: Some(
                    "https://raw.githubusercontent.com/she-protocol/she-networks/main/she-devnet/genesis.json"
                        .to_string(),
                ),
                explorer_links: vec![ExplorerLink::new(
                    "SheTrace",
                    "https://shetrace.com/?chain=arctic-1",
                )],
            },
        ];

        Self { entries }
    }

    /// Build a registry from caller-supplied entries (alternate deployments,
    /// tests against local endpoints).
    pub fn from_entries(entries: Vec<NetworkEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[NetworkEntry] {
        &self.entries
    }

    /// Exact lookup of a chain id within one identifier space. Cosmos ids are
    /// matched case-sensitively; EVM ids are accepted in either decimal or
    /// `0x`-hex form and normalized to the same entry. Anything that matches
    /// neither form is `UnknownNetwork`, never a partial match.
    pub fn resolve(&self, environment: Environment, chain_id: &str) -> Result<&NetworkEntry, ResolveError> {
        let unknown = || ResolveError::UnknownNetwork {
            environment,
            chain_id: chain_id.to_string(),
        };

        match environment {
            Environment::Cosmos => self
                .entries
                .iter()
                .filter(|e| e.environment == Environment::Cosmos)
                .find(|e| e.chain_id == chain_id)
                .ok_or_else(unknown),
            Environment::Evm => {
                let wanted = parse_evm_chain_id(chain_id).ok_or_else(unknown)?;
                self.entries
                    .iter()
                    .filter(|e| e.environment == Environment::Evm)
                    .find(|e| parse_evm_chain_id(&e.chain_id) == Some(wanted))
                    .ok_or_else(unknown)
            }
        }
    }

    /// The same-named entry in the other environment (EVM Mainnet has the
    /// Cosmos Mainnet as counterpart and vice versa).
    pub fn counterpart(&self, entry: &NetworkEntry) -> Option<&NetworkEntry> {
        self.entries
            .iter()
            .find(|e| e.environment != entry.environment && e.name == entry.name)
    }

    /// Reduced Cosmos endpoint mapping, derived from the canonical entries.
    /// The explorer URL is the first explorer link with its query trimmed.
    pub fn chain_configs(&self) -> BTreeMap<String, ChainConfig> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let rest_url = entry.rest_url.clone()?;
                let explorer_url = entry
                    .explorer_links
                    .first()
                    .and_then(|link| link.url.split('?').next())
                    .map(|base| base.trim_end_matches('/').to_string());
                Some((
                    entry.chain_id.clone(),
                    ChainConfig {
                        chain_id: entry.chain_id.clone(),
                        rpc_url: entry.rpc_url.clone(),
                        rest_url,
                        explorer_url,
                    },
                ))
            })
            .collect()
    }
}

/// Normalizes an EVM chain id given in decimal or `0x`-hex form.
fn parse_evm_chain_id(raw: &str) -> Option<u64> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        raw.parse::<u64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_entry_by_its_own_chain_id() {
        let registry = NetworkRegistry::builtin();
        for entry in registry.entries() {
            let resolved = registry
                .resolve(entry.environment, &entry.chain_id)
                .expect("registered id must resolve");
            assert_eq!(resolved.chain_id, entry.chain_id);
            assert_eq!(resolved.rpc_url, entry.rpc_url);
        }
    }

    #[test]
    fn evm_hex_and_decimal_ids_resolve_to_the_same_entry() {
        let registry = NetworkRegistry::builtin();
        for entry in registry.entries() {
            let Some(hex) = &entry.hex_chain_id else { continue };
            let by_hex = registry.resolve(Environment::Evm, hex).unwrap();
            let by_dec = registry.resolve(Environment::Evm, &entry.chain_id).unwrap();
            assert_eq!(by_hex.chain_id, by_dec.chain_id);
        }
    }

    #[test]
    fn hex_chain_id_encodes_the_same_number_as_decimal() {
        let registry = NetworkRegistry::builtin();
        for entry in registry.entries() {
            let Some(hex) = &entry.hex_chain_id else { continue };
            assert_eq!(
                parse_evm_chain_id(hex),
                parse_evm_chain_id(&entry.chain_id),
                "hex/decimal mismatch for {}",
                entry.chain_id
            );
        }
    }

    #[test]
    fn unknown_ids_never_partially_match() {
        let registry = NetworkRegistry::builtin();
        assert!(matches!(
            registry.resolve(Environment::Cosmos, "nonexistent-id"),
            Err(ResolveError::UnknownNetwork { .. })
        ));
        assert!(matches!(
            registry.resolve(Environment::Evm, "999999"),
            Err(ResolveError::UnknownNetwork { .. })
        ));
        // prefix of a registered id is not a match
        assert!(registry.resolve(Environment::Cosmos, "pacific").is_err());
        // case-sensitive for Cosmos ids
        assert!(registry.resolve(Environment::Cosmos, "Pacific-1").is_err());
    }

    #[test]
    fn mainnet_evm_entry_matches_published_configuration() {
        let registry = NetworkRegistry::builtin();
        let entry = registry.resolve(Environment::Evm, "1329").unwrap();
        assert_eq!(entry.rpc_url, "https://evm-rpc.she-apis.com");
        assert_eq!(entry.hex_chain_id.as_deref(), Some("0x531"));
        assert_eq!(entry.name, "Mainnet");
    }

    #[test]
    fn counterpart_links_environments_by_name() {
        let registry = NetworkRegistry::builtin();
        let evm_mainnet = registry.resolve(Environment::Evm, "1329").unwrap();
        let cosmos = registry.counterpart(evm_mainnet).unwrap();
        assert_eq!(cosmos.environment, Environment::Cosmos);
        assert_eq!(cosmos.chain_id, "pacific-1");
    }

    #[test]
    fn chain_configs_project_cosmos_entries_only() {
        let registry = NetworkRegistry::builtin();
        let configs = registry.chain_configs();
        assert_eq!(configs.len(), 3);
        let mainnet = &configs["pacific-1"];
        assert_eq!(mainnet.rest_url, "https://rest.pacific-1.she.io");
        assert_eq!(mainnet.explorer_url.as_deref(), Some("https://shetrace.com"));
    }
}
