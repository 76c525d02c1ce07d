//! Solidity bindings for the calls the top-up flow makes.

use alloy::sol;

sol! {
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    struct StreamReceiver {
        uint256 accountId;
        uint256 config;
    }

    interface IAddressDriver {
        function setStreams(
            address erc20,
            StreamReceiver[] currReceivers,
            int128 balanceDelta,
            StreamReceiver[] newReceivers,
            uint32 maxEndHint1,
            uint32 maxEndHint2,
            address transferTo
        ) external returns (int128 realBalanceDelta);
    }
}
