//! Darkpool contract event queries.
//!
//! A wallet exists on-chain once the darkpool has emitted `WalletUpdated` with
//! the wallet's public blinder share as the indexed topic. The share can be
//! passed directly or derived from the wallet's secret key root, see
//! [`blinder_share_from_sk_root`].

pub mod hash;

use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::rpc::types::Filter;
use alloy::sol;
use alloy::sol_types::SolEvent;

use crate::client::{ClientError, ClientResult, PublicClient};
use crate::config::DarkpoolConfig;
use self::hash::{evaluate_hash_chain, scalar_from_u256, scalar_to_u256, ScalarField};

sol! {
    /// Emitted by the darkpool whenever a wallet is created or updated.
    #[derive(Debug)]
    event WalletUpdated(uint256 indexed wallet_blinder_share);
}

/// Darkpool contract deployed on the Renegade Testnet.
pub const DEFAULT_DARKPOOL_ADDRESS: &str = "0xde1eef14801cd14045b645755a5682dd188256b8";

/// Blinder of a wallet split into its private and public shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletBlinders {
    pub blinder: U256,
    pub private_share: U256,
    pub public_share: U256,
}

/// Derive a wallet's blinder and its shares from the secret key root.
///
/// The seed is `sk_root + 1` in the BN254 scalar field. The first two links
/// of the Poseidon2 hash chain over it are the blinder and its private share;
/// the public share is their difference.
pub fn derive_blinders(sk_root: U256) -> WalletBlinders {
    let seed = scalar_from_u256(sk_root) + ScalarField::from(1u64);
    let chain = evaluate_hash_chain(seed, 2);
    let (blinder, private_share) = (chain[0], chain[1]);

    WalletBlinders {
        blinder: scalar_to_u256(blinder),
        private_share: scalar_to_u256(private_share),
        public_share: scalar_to_u256(blinder - private_share),
    }
}

/// Public blinder share the darkpool indexes a wallet's updates by.
pub fn blinder_share_from_sk_root(sk_root: U256) -> U256 {
    derive_blinders(sk_root).public_share
}

/// A decoded `WalletUpdated` log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletUpdate {
    pub blinder_share: U256,
    pub block_number: Option<u64>,
    pub tx_hash: Option<TxHash>,
}

/// Queries against one darkpool deployment.
#[derive(Debug, Clone)]
pub struct DarkpoolClient {
    client: PublicClient,
    address: Address,
    from_block: u64,
}

impl DarkpoolClient {
    pub fn new(client: PublicClient, config: &DarkpoolConfig) -> ClientResult<Self> {
        let address: Address = config
            .address
            .parse()
            .map_err(|_| ClientError::InvalidAddress(config.address.clone()))?;

        Ok(Self {
            client,
            address,
            from_block: config.from_block,
        })
    }

    /// Darkpool contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Log filter matching updates for one blinder share.
    pub fn wallet_updated_filter(&self, blinder_share: U256) -> Filter {
        Filter::new()
            .address(self.address)
            .event(WalletUpdated::SIGNATURE)
            .topic1(B256::from(blinder_share.to_be_bytes::<32>()))
            .from_block(self.from_block)
    }

    /// Whether any wallet update was emitted for the blinder share.
    pub async fn lookup_wallet(&self, blinder_share: U256) -> ClientResult<bool> {
        let logs = self
            .client
            .get_logs(&self.wallet_updated_filter(blinder_share))
            .await?;
        let found = !logs.is_empty();
        tracing::debug!(
            darkpool = %self.address,
            %blinder_share,
            logs = logs.len(),
            found,
            "Wallet lookup"
        );
        Ok(found)
    }

    /// Whether the wallet owning `sk_root` has been created on-chain.
    pub async fn lookup_wallet_by_sk_root(&self, sk_root: U256) -> ClientResult<bool> {
        self.lookup_wallet(blinder_share_from_sk_root(sk_root)).await
    }

    /// All decoded wallet updates for the blinder share, in log order.
    pub async fn wallet_updates(&self, blinder_share: U256) -> ClientResult<Vec<WalletUpdate>> {
        let logs = self
            .client
            .get_logs(&self.wallet_updated_filter(blinder_share))
            .await?;

        let mut updates = Vec::with_capacity(logs.len());
        for log in logs {
            match log.log_decode::<WalletUpdated>() {
                Ok(decoded) => updates.push(WalletUpdate {
                    blinder_share: decoded.inner.data.wallet_blinder_share,
                    block_number: log.block_number,
                    tx_hash: log.transaction_hash,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, tx_hash = ?log.transaction_hash, "Skipping undecodable log");
                }
            }
        }
        Ok(updates)
    }
}

/// Look up a wallet on the default darkpool deployment.
pub async fn lookup_wallet(client: &PublicClient, blinder_share: U256) -> ClientResult<bool> {
    DarkpoolClient::new(client.clone(), &DarkpoolConfig::default())?
        .lookup_wallet(blinder_share)
        .await
}

/// Look up the wallet owning `sk_root` on the default darkpool deployment.
pub async fn lookup_wallet_by_sk_root(client: &PublicClient, sk_root: U256) -> ClientResult<bool> {
    lookup_wallet(client, blinder_share_from_sk_root(sk_root)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::renegade_testnet;

    fn darkpool() -> DarkpoolClient {
        let client = PublicClient::with_defaults(renegade_testnet()).unwrap();
        DarkpoolClient::new(client, &DarkpoolConfig::default()).unwrap()
    }

    #[test]
    fn test_default_address() {
        let expected: Address = DEFAULT_DARKPOOL_ADDRESS.parse().unwrap();
        assert_eq!(darkpool().address(), expected);
    }

    #[test]
    fn test_invalid_address() {
        let client = PublicClient::with_defaults(renegade_testnet()).unwrap();
        let config = DarkpoolConfig {
            address: "0xnothex".to_string(),
            from_block: 0,
        };
        assert!(matches!(
            DarkpoolClient::new(client, &config),
            Err(ClientError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_event_signature() {
        assert_eq!(
            WalletUpdated::SIGNATURE,
            "WalletUpdated(uint256)"
        );
    }

    fn hex(s: &str) -> U256 {
        s.parse().unwrap()
    }

    #[test]
    fn test_blinder_share_vectors() {
        assert_eq!(
            blinder_share_from_sk_root(U256::from(0x1234u64)),
            hex("0x040e1c904f55843e1caaf3737a0f94e17f961e280566fee7598dcc0cd779fa84")
        );
        assert_eq!(
            blinder_share_from_sk_root(U256::from(0xdeadbeefu64)),
            hex("0x2eca5139389ee9dafb4fac96be0dbc2ae7100721167f352130fa0dac0ee0dbbc")
        );
        // Seed reduction wraps instead of overflowing
        assert_eq!(
            blinder_share_from_sk_root(U256::MAX),
            hex("0x2882235e7f8c828a877059de19b7ad7bfbf64850de21bc1261901cc8b5d9bb56")
        );
    }

    #[test]
    fn test_blinders_from_zero_root() {
        let blinders = derive_blinders(U256::ZERO);
        assert_eq!(
            blinders.blinder,
            hex("0x23ce3237512e418e32c63d445d45f573de243bcf5fca0250a8c8f9c31fc65c7f")
        );
        assert_eq!(
            blinders.private_share,
            hex("0x0eb6887807b950b2d1fb253d140af8f1c1386ac3488fa57dc3e9a43c3d463910")
        );
        assert_eq!(
            blinders.public_share,
            hex("0x1517a9bf4974f0db60cb1807493afc821cebd10c173a5cd2e4df5586e280236f")
        );

        // Shares recombine to the blinder
        let sum = scalar_from_u256(blinders.private_share) + scalar_from_u256(blinders.public_share);
        assert_eq!(scalar_to_u256(sum), blinders.blinder);
    }

    #[test]
    fn test_filter_topics() {
        let share = U256::from(0xabcdefu64);
        let filter = darkpool().wallet_updated_filter(share);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["fromBlock"], "0x0");
        let topics = json["topics"].to_string();
        assert!(topics.contains(&WalletUpdated::SIGNATURE_HASH.to_string()));
        assert!(topics.contains(&B256::from(share.to_be_bytes::<32>()).to_string()));
    }
}
