//! ISC magic precompile ABI definitions
//!
//! The sandbox and util precompiles are both bound at the fixed magic
//! address on every ISC-enabled chain.

use alloy::primitives::{address, Address};
use alloy::sol;

/// Fixed address of the ISC sandbox and util precompiles
pub const ISC_MAGIC_ADDRESS: Address = address!("1074000000000000000000000000000000000000");

sol! {
    /// Key/value parameter passed to a sandbox view call
    #[derive(Debug)]
    struct ISCDictItem {
        bytes key;
        bytes value;
    }

    /// Parameter dictionary for sandbox view calls
    #[derive(Debug)]
    struct ISCDict {
        ISCDictItem[] items;
    }

    /// Chain-native token identifier, derived from a foundry serial number
    #[derive(Debug)]
    struct NativeTokenID {
        bytes data;
    }

    /// ISC sandbox precompile: chain metadata and view-call dispatch
    #[sol(rpc)]
    contract ISCSandbox {
        /// 32-byte identifier of the chain this sandbox runs on
        function getChainID() external view returns (bytes32);

        /// Native token ID for a foundry serial number
        function getNativeTokenID(uint32 foundrySN) external view returns (NativeTokenID);

        /// Dispatch a view call to a core contract by hname
        function callView(
            uint32 contractHname,
            uint32 entryPoint,
            ISCDict params
        ) external view returns (ISCDict);
    }

    /// ISC util precompile
    #[sol(rpc)]
    contract ISCUtil {
        /// Compute the hname of a core contract or entry point
        function hn(string s) external view returns (uint32);
    }

    /// ERC20 facade of a native token
    #[sol(rpc)]
    contract ERC20NativeTokens {
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
}
