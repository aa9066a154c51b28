//! Typed event extraction from transaction receipts
//!
//! The controller returns its interesting values through emitted events
//! rather than call return data, so every state-changing step scans its
//! receipt for a specific event. Absence is a decode failure, not a
//! null-checked field.

use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;

use crate::contracts::NativeTokenController::{ERC20NativeTokenRegistered, FoundryCreated};
use crate::error::Error;

/// Decode the first log matching the event `E` from a receipt's logs.
///
/// Fails with [`Error::EventNotFound`] when no log decodes as `E`, which
/// indicates the contract did not behave as expected even though the
/// transaction itself did not revert.
pub fn decode_event<E: SolEvent>(logs: &[Log]) -> Result<E, Error> {
    logs.iter()
        .find_map(|log| log.log_decode::<E>().ok())
        .map(|log| log.inner.data)
        .ok_or(Error::EventNotFound(E::SIGNATURE))
}

/// Extract the foundry serial number and origin-chain ERC20 address from a
/// deployment receipt. The serial number is checked first; a receipt without
/// it aborts before the ERC20 lookup.
pub fn extract_deployment_events(logs: &[Log]) -> Result<(u32, alloy::primitives::Address), Error> {
    let foundry: FoundryCreated = decode_event(logs)?;
    let registered: ERC20NativeTokenRegistered = decode_event(logs)?;
    Ok((foundry.serialNum, registered.erc20Token))
}
