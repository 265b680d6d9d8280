use std::sync::Arc;

use anyhow::Result;

use crate::address::{validate_address, AddressKind};
use crate::client::RpcClient;
use crate::coordinator::{FetchCoordinator, Subscription, SubscriptionKey};
use crate::error::{ResolveError, ServiceError, ValidationError};
use crate::registry::{Environment, NetworkEntry, NetworkRegistry};

/// Read-only facade the presentation layer talks to: registry lookups plus
/// version and linked-address subscriptions. Holds no mutable state beyond
/// the coordinators' subscription tables.
pub struct NetworkService {
    registry: NetworkRegistry,
    client: Arc<RpcClient>,
    versions: FetchCoordinator<String>,
    linked_addresses: FetchCoordinator<String>,
}

impl NetworkService {
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(NetworkRegistry::builtin(), RpcClient::new()?))
    }

    pub fn with_parts(registry: NetworkRegistry, client: RpcClient) -> Self {
        Self {
            registry,
            client: Arc::new(client),
            versions: FetchCoordinator::new(),
            linked_addresses: FetchCoordinator::new(),
        }
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    pub fn list_networks(&self) -> &[NetworkEntry] {
        self.registry.entries()
    }

    pub fn resolve(
        &self,
        environment: Environment,
        chain_id: &str,
    ) -> Result<&NetworkEntry, ResolveError> {
        self.registry.resolve(environment, chain_id)
    }

    /// Subscribes to the node version of a Cosmos network. A node reporting
    /// an empty version string counts as "not there yet" and keeps polling.
    pub fn subscribe_version(&self, chain_id: &str) -> Result<Subscription<String>, ResolveError> {
        let entry = self.registry.resolve(Environment::Cosmos, chain_id)?;
        let rpc_url = entry.rpc_url.clone();
        let client = Arc::clone(&self.client);
        let key = SubscriptionKey::new("version", &entry.chain_id);

        Ok(self.versions.subscribe(key, move || {
            let client = Arc::clone(&client);
            let rpc_url = rpc_url.clone();
            async move {
                let version = client.get_version(&rpc_url).await?;
                Ok((!version.is_empty()).then_some(version))
            }
        }))
    }

    /// Subscribes to the SHE address linked to an EVM account on the given
    /// EVM chain. With no account connected the subscription is skipped
    /// outright and stays `Inactive`. A present account is validated before
    /// any I/O happens.
    pub fn subscribe_linked_address(
        &self,
        chain_id: &str,
        account: Option<&str>,
    ) -> Result<Subscription<String>, ServiceError> {
        let entry = self.registry.resolve(Environment::Evm, chain_id)?;

        let Some(account) = account else {
            return Ok(Subscription::inactive());
        };

        match validate_address(account)? {
            AddressKind::Evm => {}
            AddressKind::She => {
                return Err(ValidationError::NotEvmAddress(account.to_string()).into())
            }
        }

        let rpc_url = entry.rpc_url.clone();
        let client = Arc::clone(&self.client);
        let account = account.to_string();
        let key = SubscriptionKey::new("linked-address", &entry.chain_id).with_account(&account);

        Ok(self.linked_addresses.subscribe(key, move || {
            let client = Arc::clone(&client);
            let rpc_url = rpc_url.clone();
            let account = account.clone();
            async move {
                let derived = client.derive_linked_address(&rpc_url, &account).await?;
                Ok(Some(derived))
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::FetchState;

    #[tokio::test]
    async fn missing_account_yields_inactive_subscription() {
        let service = NetworkService::new().unwrap();
        let sub = service.subscribe_linked_address("1329", None).unwrap();
        assert_eq!(sub.state(), FetchState::Inactive);
    }

    #[tokio::test]
    async fn malformed_account_is_rejected_before_any_io() {
        let service = NetworkService::new().unwrap();
        let err = service
            .subscribe_linked_address("1329", Some("0x12345"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn she_address_is_rejected_for_derivation() {
        let service = NetworkService::new().unwrap();
        let err = service
            .subscribe_linked_address("1329", Some("she1v9kxjemgpv4hs9q0zymr8vd4x"))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::NotEvmAddress(_))
        ));
    }

    #[tokio::test]
    async fn unknown_chain_blocks_subscription() {
        let service = NetworkService::new().unwrap();
        assert!(service.subscribe_version("nonexistent-id").is_err());
        assert!(service
            .subscribe_linked_address("999999", Some("0x1234567890abcdefABCDEF1234567890abcdefAB"))
            .is_err());
    }
}
