//! ISC Native-Token Deployer - Library interface
//!
//! Re-exports internal modules for use in integration tests.

pub mod address_codec;
pub mod artifact;
pub mod config;
pub mod contracts;
pub mod error;
pub mod events;
pub mod evm;
pub mod workflow;

pub use config::Config;
pub use error::Error;
pub use workflow::{Deployer, DeploymentSummary};
