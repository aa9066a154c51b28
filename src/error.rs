//! Failure taxonomy for the deployment workflow
//!
//! Every error propagates to the top level; the binary logs it and exits
//! non-zero. There is no partial-failure recovery and no idempotency guard:
//! re-running after a failure deploys a fresh controller contract.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unparseable environment variable
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unreachable RPC endpoint or a failed connection-level query
    #[error("connection error: {0}")]
    Connection(String),

    /// Endpoint reports a different chain id than configured
    #[error("chain id mismatch at {url}: endpoint reports {actual}, configured {expected}")]
    ChainIdMismatch {
        url: String,
        expected: u64,
        actual: u64,
    },

    /// On-chain revert surfaced through the receipt status
    #[error("transaction reverted: {0}")]
    TransactionReverted(String),

    /// Expected event missing from a receipt. Indicates contract-level
    /// failure not caught as a revert; fatal, never retried.
    #[error("event {0} not found in transaction receipt")]
    EventNotFound(&'static str),

    /// Wrapped-token registration not observed on the target chain within
    /// the settling window
    #[error("wrapped token not visible on target chain after {timeout_ms} ms")]
    RegistrationTimeout { timeout_ms: u64 },

    /// Controller artifact file missing or malformed
    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    #[error("transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("transaction did not confirm: {0}")]
    Confirmation(#[from] alloy::providers::PendingTransactionError),
}

impl Error {
    /// A single RPC await exceeded the configured per-call timeout.
    pub fn rpc_timeout(what: &str, timeout_ms: u64) -> Self {
        Error::Connection(format!("{what} did not complete within {timeout_ms} ms"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_mismatch_message() {
        let err = Error::ChainIdMismatch {
            url: "http://localhost:8545".to_string(),
            expected: 1073,
            actual: 31337,
        };
        let msg = err.to_string();
        assert!(msg.contains("1073"));
        assert!(msg.contains("31337"));
        assert!(msg.contains("http://localhost:8545"));
    }

    #[test]
    fn test_event_not_found_names_the_event() {
        let err = Error::EventNotFound("FoundryCreated(uint32)");
        assert!(err.to_string().contains("FoundryCreated(uint32)"));
    }

    #[test]
    fn test_rpc_timeout_message() {
        let err = Error::rpc_timeout("deploy receipt", 60_000);
        assert!(err.to_string().contains("deploy receipt"));
        assert!(err.to_string().contains("60000"));
    }
}
