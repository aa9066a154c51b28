//! Target-chain account derivation
//!
//! A chain's L1 account is its 32-byte chain identifier prefixed with the
//! one-byte alias-address tag `0x08`. The bridge protocol expects exactly
//! this 33-byte form when a controller addresses a remote chain.

use alloy::primitives::B256;

/// Alias-address tag prepended to a chain identifier
pub const CHAIN_ACCOUNT_TAG: u8 = 0x08;

/// Derive the 33-byte L1 account of a chain from its 32-byte identifier.
pub fn target_chain_account(chain_id: B256) -> Vec<u8> {
    let mut account = Vec::with_capacity(33);
    account.push(CHAIN_ACCOUNT_TAG);
    account.extend_from_slice(chain_id.as_slice());
    account
}

/// Hex rendering of a chain account for log lines.
pub fn format_chain_account(account: &[u8]) -> String {
    format!("0x{}", hex::encode(account))
}
