//! EVM connection factory
//!
//! Builds alloy providers for the origin (signing) and target (read-only)
//! chains, and validates that each endpoint reports the configured chain id
//! before any transaction is submitted.

use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::{Client, Http};
use tracing::info;

use crate::error::Error;

/// Parse a 0x-prefixed private key into a local signer.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, Error> {
    private_key
        .parse()
        .map_err(|e| Error::Configuration(format!("invalid private key: {e}")))
}

/// Read-only provider for view calls and chain-id queries.
pub fn read_provider(rpc_url: &str) -> Result<RootProvider<Http<Client>>, Error> {
    let url = rpc_url
        .parse()
        .map_err(|e| Error::Connection(format!("invalid RPC URL {rpc_url}: {e}")))?;
    Ok(ProviderBuilder::new().on_http(url))
}

/// Provider with nonce/gas fillers and a wallet, for submitting transactions.
pub fn write_provider(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> Result<impl Provider<Http<Client>>, Error> {
    let url = rpc_url
        .parse()
        .map_err(|e| Error::Connection(format!("invalid RPC URL {rpc_url}: {e}")))?;
    let wallet = EthereumWallet::from(signer);
    Ok(ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url))
}

/// Query the endpoint's chain id and compare it against the configured one.
pub async fn verify_chain_id<P: Provider<Http<Client>>>(
    provider: &P,
    rpc_url: &str,
    expected: u64,
) -> Result<(), Error> {
    let actual = provider.get_chain_id().await.map_err(|e| {
        Error::Connection(format!("failed to query chain id from {rpc_url}: {e}"))
    })?;

    if actual != expected {
        return Err(Error::ChainIdMismatch {
            url: rpc_url.to_string(),
            expected,
            actual,
        });
    }

    info!(rpc_url = %rpc_url, chain_id = expected, "Chain id verified");
    Ok(())
}
