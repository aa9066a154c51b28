//! Contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the token
//! controller and the ISC magic precompiles.

pub mod isc;
pub mod token_controller;

pub use isc::{ERC20NativeTokens, ISCSandbox, ISCUtil, ISC_MAGIC_ADDRESS};
pub use token_controller::NativeTokenController;
