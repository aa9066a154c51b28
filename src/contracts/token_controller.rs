//! NativeTokenController contract ABI definition
//!
//! The controller owns a token foundry on the origin chain and exposes the
//! registration, mint and transfer entry points the workflow drives. Its
//! creation bytecode is loaded from a compiler artifact at run time.

use alloy::sol;

sol! {
    /// Token controller managing a native-token foundry
    #[derive(Debug)]
    #[sol(rpc)]
    contract NativeTokenController {
        /// Creates the foundry and registers the origin-chain ERC20 wrapper.
        /// The attached value funds the controller's storage deposits.
        constructor(
            string name,
            string symbol,
            uint8 decimals,
            uint256 maximumSupply,
            uint64 gasAllowance
        ) payable;

        /// Register the native token as a wrapped ERC20 on a remote chain.
        ///
        /// # Arguments
        /// * `name` - Wrapped token name ("Wrapped"-prefixed by convention)
        /// * `symbol` - Wrapped token symbol ("w"-prefixed by convention)
        /// * `decimals` - Same decimals as the origin token
        /// * `chainAddress` - Tagged 33-byte account of the remote chain
        /// * `gasAllowance` - Gas budget for the cross-chain request
        function registerERC20NativeTokenOnRemoteChain(
            string name,
            string symbol,
            uint8 decimals,
            bytes chainAddress,
            uint64 gasAllowance
        ) external;

        /// Mint native tokens in the controller's foundry
        function mintTokens(uint256 amount, uint64 gasAllowance) external;

        /// Transfer native tokens to an account on the same chain
        function transfer(uint256 amount, address receiver) external;

        /// Send native tokens to an account on a remote chain
        function sendCrossChain(
            bytes chainAddress,
            address receiver,
            bytes32 chainID,
            uint256 amount,
            uint64 gasAllowance
        ) external;

        /// Events
        event FoundryCreated(uint32 serialNum);
        event ERC20NativeTokenRegistered(address erc20Token);
        event NativeTokensMinted(uint32 foundrySN, uint256 amount);
    }
}
