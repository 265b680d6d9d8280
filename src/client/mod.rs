use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::RpcError;

pub mod update;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcFailure>,
}

#[derive(Debug, Deserialize)]
struct RpcFailure {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct NodeInfo {
    version: Option<String>,
}

/// Stateless JSON-RPC caller: one outbound request per invocation, no retry
/// and no caching. Polling and de-duplication live in the fetch coordinator.
pub struct RpcClient {
    client: Client,
}

impl RpcClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Sends `{method, params}` to `endpoint` and decodes the `result` field
    /// of the response envelope.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(endpoint, e))?;

        let envelope: RpcEnvelope<T> =
            response
                .json()
                .await
                .map_err(|e| RpcError::MalformedResponse {
                    url: endpoint.to_string(),
                    reason: e.to_string(),
                })?;

        if let Some(failure) = envelope.error {
            return Err(RpcError::MalformedResponse {
                url: endpoint.to_string(),
                reason: format!("rpc error {}: {}", failure.code, failure.message),
            });
        }

        envelope.result.ok_or(RpcError::MissingField {
            url: endpoint.to_string(),
            field: "result",
        })
    }

    /// Node version as reported by the node-info method.
    pub async fn get_version(&self, endpoint: &str) -> Result<String, RpcError> {
        let info: NodeInfo = self.call(endpoint, "abci_info", json!([])).await?;
        info.version.ok_or(RpcError::MissingField {
            url: endpoint.to_string(),
            field: "version",
        })
    }

    /// SHE address linked to an EVM account. The address must already be
    /// validated as `0x` + 40 hex characters; this call only forwards it.
    pub async fn derive_linked_address(
        &self,
        endpoint: &str,
        evm_address: &str,
    ) -> Result<String, RpcError> {
        self.call(endpoint, "she_getSheAddress", json!([evm_address]))
            .await
    }
}

fn classify_transport(url: &str, err: reqwest::Error) -> RpcError {
    if err.is_connect() {
        RpcError::Unreachable {
            url: url.to_string(),
        }
    } else {
        RpcError::Transport {
            url: url.to_string(),
            source: err,
        }
    }
}
