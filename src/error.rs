use thiserror::Error;

use crate::registry::Environment;

/// Resolution failures are always local: an identifier that matches no
/// registry entry is reported as-is, never as a network error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown network '{chain_id}' in the {environment} registry")]
    UnknownNetwork {
        environment: Environment,
        chain_id: String,
    },
}

/// Failures of a single remote call. The client performs exactly one request
/// per invocation, so every variant describes that one exchange.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Endpoint '{url}' is unreachable")]
    Unreachable { url: String },

    #[error("Transport failure calling '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed response from '{url}': {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Response from '{url}' is missing field '{field}'")]
    MissingField { url: String, field: &'static str },
}

/// Caller-supplied input rejected before any I/O was attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{0}' is not a valid SHE or EVM address")]
    InvalidAddress(String),

    #[error("Expected an EVM (0x-prefixed) address, got '{0}'")]
    NotEvmAddress(String),
}

/// Errors surfaced by the service facade before a subscription starts.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
