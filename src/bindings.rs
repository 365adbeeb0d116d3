use alloy::sol;

// Only the surface this tool calls. Deployment bytecode comes from the
// compiled artifact at runtime, see `artifact`.
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract SendReceive {
        constructor(address gateway_, address gasService_);

        function gateway() external view returns (address);

        function multiSend(
            string memory destinationChain,
            string memory destinationAddress,
            address[] calldata receivers,
            string memory symbol,
            uint256 amount
        ) external payable;
    }
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
);
