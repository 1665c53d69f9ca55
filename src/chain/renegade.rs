//! The Renegade Testnet chain definition.

use crate::chain::descriptor::{
    BlockExplorer, BlockExplorers, ChainDescriptor, ChainRpcUrls, NativeCurrency, RpcUrls,
};

/// EIP-155 chain id of the Renegade Testnet.
pub const RENEGADE_TESTNET_CHAIN_ID: u64 = 473474;

const NAME: &str = "Renegade Testnet";
const RPC_URL: &str = "http://35.183.100.90:8547/";
const EXPLORER_URL: &str = "https://explorer.renegade.fi/";

/// Descriptor for the Renegade Testnet.
pub fn renegade_testnet() -> ChainDescriptor {
    ChainDescriptor {
        id: RENEGADE_TESTNET_CHAIN_ID,
        name: NAME.to_string(),
        network: NAME.to_string(),
        native_currency: NativeCurrency {
            name: "Ether".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        },
        rpc_urls: ChainRpcUrls {
            default: RpcUrls::http(&[RPC_URL]),
            public: Some(RpcUrls::http(&[RPC_URL])),
        },
        block_explorers: Some(BlockExplorers {
            default: BlockExplorer {
                name: "Explorer".to_string(),
                url: EXPLORER_URL.to_string(),
            },
        }),
        testnet: true,
    }
}
