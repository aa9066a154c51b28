//! Deployment orchestrator
//!
//! Runs the five-step workflow in strict order, threading each step's
//! derived values into the next: deploy the controller on the origin chain,
//! register the wrapped ERC20 on the target chain, mint the full supply,
//! then perform a local and a cross-chain transfer.
//!
//! A failure anywhere aborts the whole run. The deploy step in particular is
//! never retried: the workflow is not idempotent and a second attempt would
//! create a duplicate controller and foundry.

use std::fmt;
use std::future::IntoFuture;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolConstructor;
use alloy::transports::http::{Client, Http};
use tokio::time::{sleep, timeout, Instant};
use tracing::info;

use crate::address_codec::{format_chain_account, target_chain_account};
use crate::artifact::ContractArtifact;
use crate::config::Config;
use crate::contracts::isc::{ISCDict, ISCDictItem};
use crate::contracts::NativeTokenController::NativeTokensMinted;
use crate::contracts::{
    ERC20NativeTokens, ISCSandbox, ISCUtil, NativeTokenController, ISC_MAGIC_ADDRESS,
};
use crate::error::Error;
use crate::events::{decode_event, extract_deployment_events};
use crate::evm;

/// Gas budget attached to every controller call that triggers ISC requests
pub const GAS_ALLOWANCE: u64 = 1_000_000;

/// Base-token funding attached to the deployment, in ether units
pub const INITIAL_FUNDING_ETH: &str = "10";

/// Units moved by the intra-chain transfer step
pub const LOCAL_TRANSFER_AMOUNT: u64 = 10;

/// Units approved and moved by the cross-chain transfer step
pub const CROSS_CHAIN_TRANSFER_AMOUNT: u64 = 1;

/// Outputs of the deploy step
#[derive(Debug, Clone)]
pub struct TokenDeployment {
    pub controller: Address,
    pub foundry_serial: u32,
    pub erc20_token: Address,
    pub native_token_id: Bytes,
}

/// Outputs of the remote-registration step
#[derive(Debug, Clone)]
pub struct RemoteRegistration {
    pub target_chain_id: B256,
    pub target_chain_account: Vec<u8>,
    pub wrapped_token: Address,
}

/// Outputs of the mint step
#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub foundry_serial: u32,
    pub amount: U256,
}

/// Final report printed after a successful run
#[derive(Debug, Clone)]
pub struct DeploymentSummary {
    pub foundry_serial: u32,
    pub origin_erc20: Address,
    pub wrapped_erc20: Address,
    pub minted_amount: U256,
    pub controller: Address,
    pub native_token_id: Bytes,
    pub target_chain_id: B256,
    pub target_address: Address,
    pub local_transfer_amount: u64,
    pub cross_chain_transfer_amount: u64,
}

impl fmt::Display for DeploymentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deployment summary")?;
        writeln!(f, "==========================================")?;
        writeln!(f, "Foundry serial number:         {}", self.foundry_serial)?;
        writeln!(f, "ERC20 address on origin chain: {}", self.origin_erc20)?;
        writeln!(f, "ERC20 address on target chain: {}", self.wrapped_erc20)?;
        writeln!(f, "Minted amount:                 {}", self.minted_amount)?;
        writeln!(f, "Controller address:            {}", self.controller)?;
        writeln!(f, "Native token ID:               {}", self.native_token_id)?;
        writeln!(f, "Target chain ID:               {}", self.target_chain_id)?;
        writeln!(
            f,
            "Local transfer:                {} units to {}",
            self.local_transfer_amount, self.target_address
        )?;
        write!(
            f,
            "Cross-chain transfer:          {} unit(s) to {}",
            self.cross_chain_transfer_amount, self.target_address
        )
    }
}

/// Resolve the wrapped-token address out of a sandbox view-call result.
/// Returns None while the registration has not settled on the target chain.
pub fn wrapped_address_from_dict(dict: &ISCDict) -> Option<Address> {
    let item = dict.items.first()?;
    if item.value.len() != Address::len_bytes() {
        return None;
    }
    let address = Address::from_slice(&item.value);
    (!address.is_zero()).then_some(address)
}

/// One-shot deployment workflow over an origin and a target chain
pub struct Deployer {
    config: Config,
    signer: PrivateKeySigner,
    rpc_timeout: Duration,
}

impl Deployer {
    pub fn new(config: Config) -> Result<Self, Error> {
        let signer = evm::parse_signer(&config.origin.private_key)?;
        let rpc_timeout = Duration::from_millis(config.sync.rpc_timeout_ms);
        Ok(Self {
            config,
            signer,
            rpc_timeout,
        })
    }

    /// Run the full workflow and produce the final summary.
    pub async fn run(&self) -> Result<DeploymentSummary, Error> {
        let origin = evm::write_provider(&self.config.origin.rpc_url, self.signer.clone())?;
        let target = evm::read_provider(&self.config.target.rpc_url)?;

        self.bounded(
            "origin chain id query",
            evm::verify_chain_id(&origin, &self.config.origin.rpc_url, self.config.origin.chain_id),
        )
        .await?;
        self.bounded(
            "target chain id query",
            evm::verify_chain_id(&target, &self.config.target.rpc_url, self.config.target.chain_id),
        )
        .await?;

        info!(
            deployer = %self.signer.address(),
            origin = %self.config.origin.rpc_url,
            "Deploying with account"
        );

        let deployment = self.deploy(&origin).await?;
        let registration = self.register_remote(&origin, &target, &deployment).await?;
        let mint = self.mint(&origin, deployment.controller).await?;
        self.transfer_local(&origin, deployment.controller).await?;
        self.transfer_cross_chain(&origin, &deployment, &registration)
            .await?;

        Ok(DeploymentSummary {
            foundry_serial: deployment.foundry_serial,
            origin_erc20: deployment.erc20_token,
            wrapped_erc20: registration.wrapped_token,
            minted_amount: mint.amount,
            controller: deployment.controller,
            native_token_id: deployment.native_token_id,
            target_chain_id: registration.target_chain_id,
            target_address: self.config.target_address,
            local_transfer_amount: LOCAL_TRANSFER_AMOUNT,
            cross_chain_transfer_amount: CROSS_CHAIN_TRANSFER_AMOUNT,
        })
    }

    /// Deploy the controller with its constructor arguments and the attached
    /// funding, then recover the foundry serial and ERC20 address from the
    /// receipt's events.
    async fn deploy<P: Provider<Http<Client>>>(
        &self,
        origin: &P,
    ) -> Result<TokenDeployment, Error> {
        let artifact = ContractArtifact::load(&self.config.artifact_path)?;
        let token = &self.config.token;

        let constructor = NativeTokenController::constructorCall {
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            decimals: token.decimals,
            maximumSupply: token.max_supply,
            gasAllowance: GAS_ALLOWANCE,
        };
        let deploy_code = artifact.deploy_code(&constructor.abi_encode())?;
        let funding = parse_ether(INITIAL_FUNDING_ETH)
            .map_err(|e| Error::Configuration(format!("invalid funding constant: {e}")))?;

        info!(
            name = %token.name,
            symbol = %token.symbol,
            decimals = token.decimals,
            max_supply = %token.max_supply,
            "Deploying token controller"
        );

        let tx = TransactionRequest::default()
            .with_deploy_code(deploy_code)
            .with_value(funding);
        let pending = self
            .bounded("deploy transaction", origin.send_transaction(tx))
            .await?;
        let receipt = self.bounded("deploy receipt", pending.get_receipt()).await?;
        if !receipt.status() {
            return Err(Error::TransactionReverted(
                "controller deployment".to_string(),
            ));
        }
        let controller = receipt.contract_address.ok_or_else(|| {
            Error::TransactionReverted("deployment receipt carries no contract address".to_string())
        })?;

        let (foundry_serial, erc20_token) = extract_deployment_events(receipt.inner.logs())?;

        let sandbox = ISCSandbox::new(ISC_MAGIC_ADDRESS, origin);
        let native_token_id = self
            .bounded(
                "native token id query",
                sandbox.getNativeTokenID(foundry_serial).call(),
            )
            .await?
            ._0
            .data;

        info!(
            controller = %controller,
            serial = foundry_serial,
            erc20 = %erc20_token,
            native_token_id = %native_token_id,
            "Token controller deployed, foundry created"
        );

        Ok(TokenDeployment {
            controller,
            foundry_serial,
            erc20_token,
            native_token_id,
        })
    }

    /// Register the wrapped ERC20 on the target chain and poll the target
    /// sandbox until the wrapped-token address is visible.
    async fn register_remote<P1, P2>(
        &self,
        origin: &P1,
        target: &P2,
        deployment: &TokenDeployment,
    ) -> Result<RemoteRegistration, Error>
    where
        P1: Provider<Http<Client>>,
        P2: Provider<Http<Client>>,
    {
        let token = &self.config.token;
        let target_sandbox = ISCSandbox::new(ISC_MAGIC_ADDRESS, target);
        let target_util = ISCUtil::new(ISC_MAGIC_ADDRESS, target);

        let target_chain_id = self
            .bounded("target chain id view", target_sandbox.getChainID().call())
            .await?
            ._0;
        let account = target_chain_account(target_chain_id);

        let wrapped_name = format!("Wrapped{}", token.name);
        let wrapped_symbol = format!("w{}", token.symbol);
        info!(
            target_chain_id = %target_chain_id,
            account = %format_chain_account(&account),
            name = %wrapped_name,
            symbol = %wrapped_symbol,
            "Registering wrapped ERC20 on target chain"
        );

        let controller = NativeTokenController::new(deployment.controller, origin);
        let call = controller.registerERC20NativeTokenOnRemoteChain(
            wrapped_name,
            wrapped_symbol,
            token.decimals,
            account.clone().into(),
            GAS_ALLOWANCE,
        );
        let pending = self.bounded("registration transaction", call.send()).await?;
        let receipt = self
            .bounded("registration receipt", pending.get_receipt())
            .await?;
        if !receipt.status() {
            return Err(Error::TransactionReverted(
                "remote ERC20 registration".to_string(),
            ));
        }

        // The registration settles asynchronously between the chains; poll
        // the view call until the wrapped address shows up instead of
        // trusting a fixed delay.
        let evm_hname = self
            .bounded("evm hname query", target_util.hn("evm".to_string()).call())
            .await?
            ._0;
        let view_hname = self
            .bounded(
                "view hname query",
                target_util
                    .hn("getERC20ExternalNativeTokenAddress".to_string())
                    .call(),
            )
            .await?
            ._0;

        let poll = Duration::from_millis(self.config.sync.settle_poll_interval_ms);
        let deadline = Instant::now() + Duration::from_millis(self.config.sync.settle_timeout_ms);
        let wrapped_token = loop {
            let params = ISCDict {
                items: vec![ISCDictItem {
                    key: Bytes::from_static(b"N"),
                    value: deployment.native_token_id.clone(),
                }],
            };
            let dict = self
                .bounded(
                    "wrapped token view",
                    target_sandbox.callView(evm_hname, view_hname, params).call(),
                )
                .await?
                ._0;
            if let Some(address) = wrapped_address_from_dict(&dict) {
                break address;
            }
            if Instant::now() >= deadline {
                return Err(Error::RegistrationTimeout {
                    timeout_ms: self.config.sync.settle_timeout_ms,
                });
            }
            sleep(poll).await;
        };

        info!(wrapped_token = %wrapped_token, "Wrapped ERC20 visible on target chain");

        Ok(RemoteRegistration {
            target_chain_id,
            target_chain_account: account,
            wrapped_token,
        })
    }

    /// Mint the configured max supply in the controller's foundry.
    async fn mint<P: Provider<Http<Client>>>(
        &self,
        origin: &P,
        controller_address: Address,
    ) -> Result<MintOutcome, Error> {
        let controller = NativeTokenController::new(controller_address, origin);
        let supply = self.config.token.max_supply;

        info!(amount = %supply, "Minting full max supply");
        let pending = self
            .bounded(
                "mint transaction",
                controller.mintTokens(supply, GAS_ALLOWANCE).send(),
            )
            .await?;
        let receipt = self.bounded("mint receipt", pending.get_receipt()).await?;
        if !receipt.status() {
            return Err(Error::TransactionReverted("token mint".to_string()));
        }

        let minted: NativeTokensMinted = decode_event(receipt.inner.logs())?;
        info!(
            amount = %minted.amount,
            foundry = minted.foundrySN,
            "Minted native tokens"
        );

        Ok(MintOutcome {
            foundry_serial: minted.foundrySN,
            amount: minted.amount,
        })
    }

    /// Move a small fixed amount to the target address on the origin chain.
    async fn transfer_local<P: Provider<Http<Client>>>(
        &self,
        origin: &P,
        controller_address: Address,
    ) -> Result<(), Error> {
        let controller = NativeTokenController::new(controller_address, origin);
        let origin_sandbox = ISCSandbox::new(ISC_MAGIC_ADDRESS, origin);
        let origin_chain_id = self
            .bounded("origin chain id view", origin_sandbox.getChainID().call())
            .await?
            ._0;

        let pending = self
            .bounded(
                "local transfer transaction",
                controller
                    .transfer(U256::from(LOCAL_TRANSFER_AMOUNT), self.config.target_address)
                    .send(),
            )
            .await?;
        let receipt = self
            .bounded("local transfer receipt", pending.get_receipt())
            .await?;
        if !receipt.status() {
            return Err(Error::TransactionReverted("local transfer".to_string()));
        }

        info!(
            amount = LOCAL_TRANSFER_AMOUNT,
            symbol = %self.config.token.symbol,
            receiver = %self.config.target_address,
            origin_chain_id = %origin_chain_id,
            "Transferred tokens within origin chain"
        );
        Ok(())
    }

    /// Approve the controller for the cross-chain amount, then send it to
    /// the target chain. Approve and send share the same constant, so the
    /// two amounts cannot drift apart.
    async fn transfer_cross_chain<P: Provider<Http<Client>>>(
        &self,
        origin: &P,
        deployment: &TokenDeployment,
        registration: &RemoteRegistration,
    ) -> Result<(), Error> {
        let amount = U256::from(CROSS_CHAIN_TRANSFER_AMOUNT);

        let erc20 = ERC20NativeTokens::new(deployment.erc20_token, origin);
        let pending = self
            .bounded(
                "approve transaction",
                erc20.approve(deployment.controller, amount).send(),
            )
            .await?;
        let receipt = self
            .bounded("approve receipt", pending.get_receipt())
            .await?;
        if !receipt.status() {
            return Err(Error::TransactionReverted("ERC20 approve".to_string()));
        }

        let controller = NativeTokenController::new(deployment.controller, origin);
        let call = controller.sendCrossChain(
            registration.target_chain_account.clone().into(),
            self.config.target_address,
            registration.target_chain_id,
            amount,
            GAS_ALLOWANCE,
        );
        let pending = self.bounded("cross-chain transaction", call.send()).await?;
        let receipt = self
            .bounded("cross-chain receipt", pending.get_receipt())
            .await?;
        if !receipt.status() {
            return Err(Error::TransactionReverted(
                "cross-chain transfer".to_string(),
            ));
        }

        info!(
            amount = CROSS_CHAIN_TRANSFER_AMOUNT,
            symbol = %self.config.token.symbol,
            receiver = %self.config.target_address,
            target_chain_id = %registration.target_chain_id,
            "Transferred tokens to target chain"
        );
        Ok(())
    }

    /// Wrap a single RPC await in the configured per-call timeout.
    async fn bounded<T, E, F>(&self, what: &'static str, fut: F) -> Result<T, Error>
    where
        F: IntoFuture<Output = Result<T, E>>,
        Error: From<E>,
    {
        match timeout(self.rpc_timeout, fut.into_future()).await {
            Ok(result) => result.map_err(Error::from),
            Err(_) => Err(Error::rpc_timeout(what, self.config.sync.rpc_timeout_ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::NativeTokenController::{ERC20NativeTokenRegistered, FoundryCreated};
    use alloy::sol_types::SolEvent;

    fn log_for<E: SolEvent>(event: &E) -> alloy::rpc::types::Log {
        alloy::rpc::types::Log {
            inner: alloy::primitives::Log {
                address: Address::ZERO,
                data: event.encode_log_data(),
            },
            ..Default::default()
        }
    }

    fn summary_for_reference_scenario() -> DeploymentSummary {
        DeploymentSummary {
            foundry_serial: 3,
            origin_erc20: "0x0000000000000000000000000000000000000aaa"
                .parse()
                .unwrap(),
            wrapped_erc20: "0x0000000000000000000000000000000000000bbb"
                .parse()
                .unwrap(),
            minted_amount: U256::from(1000u64),
            controller: Address::ZERO,
            native_token_id: Bytes::from(vec![0x08, 0x42]),
            target_chain_id: B256::repeat_byte(0x11),
            target_address: Address::ZERO,
            local_transfer_amount: LOCAL_TRANSFER_AMOUNT,
            cross_chain_transfer_amount: CROSS_CHAIN_TRANSFER_AMOUNT,
        }
    }

    fn value_pos(rendered: &str, label: &str, value: &str) -> usize {
        let label_pos = rendered
            .find(label)
            .unwrap_or_else(|| panic!("label {label:?} missing from summary"));
        label_pos
            + rendered[label_pos..]
                .find(value)
                .unwrap_or_else(|| panic!("value {value:?} missing after {label:?}"))
    }

    #[test]
    fn test_reference_amounts() {
        assert_eq!(LOCAL_TRANSFER_AMOUNT, 10);
        assert_eq!(CROSS_CHAIN_TRANSFER_AMOUNT, 1);
        assert_eq!(GAS_ALLOWANCE, 1_000_000);
    }

    #[test]
    fn test_summary_references_values_in_order() {
        let summary = summary_for_reference_scenario();
        let rendered = summary.to_string();

        let p_serial = value_pos(&rendered, "Foundry serial number", "3");
        let p_origin = value_pos(
            &rendered,
            "ERC20 address on origin chain",
            &summary.origin_erc20.to_string(),
        );
        let p_wrapped = value_pos(
            &rendered,
            "ERC20 address on target chain",
            &summary.wrapped_erc20.to_string(),
        );
        let p_minted = value_pos(&rendered, "Minted amount", "1000");

        assert!(p_serial < p_origin);
        assert!(p_origin < p_wrapped);
        assert!(p_wrapped < p_minted);
    }

    #[test]
    fn test_deployment_extraction_feeds_summary() {
        // Reference scenario: deploy receipt carries serial 3 and the
        // origin ERC20; the composed summary reports exactly those.
        let origin_erc20: Address = "0x0000000000000000000000000000000000000aaa"
            .parse()
            .unwrap();
        let logs = vec![
            log_for(&FoundryCreated { serialNum: 3 }),
            log_for(&ERC20NativeTokenRegistered {
                erc20Token: origin_erc20,
            }),
        ];

        let (serial, erc20) = extract_deployment_events(&logs).unwrap();
        let summary = DeploymentSummary {
            foundry_serial: serial,
            origin_erc20: erc20,
            ..summary_for_reference_scenario()
        };

        assert_eq!(summary.foundry_serial, 3);
        assert_eq!(summary.origin_erc20, origin_erc20);
    }

    #[test]
    fn test_wrapped_address_from_dict_resolves_address() {
        let wrapped: Address = "0x0000000000000000000000000000000000000bbb"
            .parse()
            .unwrap();
        let dict = ISCDict {
            items: vec![ISCDictItem {
                key: Bytes::from_static(b"a"),
                value: Bytes::from(wrapped.to_vec()),
            }],
        };
        assert_eq!(wrapped_address_from_dict(&dict), Some(wrapped));
    }

    #[test]
    fn test_wrapped_address_from_dict_empty_dict() {
        let dict = ISCDict { items: vec![] };
        assert_eq!(wrapped_address_from_dict(&dict), None);
    }

    #[test]
    fn test_wrapped_address_from_dict_empty_value() {
        let dict = ISCDict {
            items: vec![ISCDictItem {
                key: Bytes::from_static(b"a"),
                value: Bytes::new(),
            }],
        };
        assert_eq!(wrapped_address_from_dict(&dict), None);
    }

    #[test]
    fn test_wrapped_address_from_dict_zero_address_not_settled() {
        let dict = ISCDict {
            items: vec![ISCDictItem {
                key: Bytes::from_static(b"a"),
                value: Bytes::from(vec![0u8; 20]),
            }],
        };
        assert_eq!(wrapped_address_from_dict(&dict), None);
    }

    #[test]
    fn test_wrapped_address_from_dict_wrong_length() {
        let dict = ISCDict {
            items: vec![ISCDictItem {
                key: Bytes::from_static(b"a"),
                value: Bytes::from(vec![0x01u8; 32]),
            }],
        };
        assert_eq!(wrapped_address_from_dict(&dict), None);
    }
}
