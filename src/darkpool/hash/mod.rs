//! Poseidon2 hashing over the BN254 scalar field.
//!
//! Wallet blinders are derived off-chain with a Poseidon2 hash chain; the
//! darkpool only ever sees the resulting public share.

mod constants;
mod poseidon2;

pub use poseidon2::Poseidon2Sponge;

use alloy::primitives::U256;
use ark_ff::PrimeField;

use constants::{FULL_ROUND_CONSTANTS, PARTIAL_ROUND_CONSTANTS};

/// Scalar field of the BN254 curve.
pub type ScalarField = ark_bn254::Fr;

/// Permutation state width
pub const WIDTH: usize = 3;
/// Elements absorbed or squeezed per permutation
pub const RATE: usize = 2;
/// Elements reserved for the sponge capacity
pub const CAPACITY: usize = 1;
/// Number of full rounds
pub const R_F: usize = 8;
/// Number of partial rounds
pub const R_P: usize = 56;

/// Hash a sequence of field elements with a fresh sponge.
pub fn poseidon2_hash(values: &[ScalarField]) -> ScalarField {
    Poseidon2Sponge::new().hash(values)
}

/// Evaluate a hash chain of `length` links starting from `seed`.
///
/// Each link is the hash of the previous one; the seed itself is not
/// included in the output.
pub fn evaluate_hash_chain(seed: ScalarField, length: usize) -> Vec<ScalarField> {
    let mut seed = seed;
    let mut res = Vec::with_capacity(length);

    for _ in 0..length {
        // Fresh sponge per link
        seed = poseidon2_hash(&[seed]);
        res.push(seed);
    }

    res
}

/// Reduce a 256-bit integer into the scalar field.
pub fn scalar_from_u256(value: U256) -> ScalarField {
    ScalarField::from_le_bytes_mod_order(&value.to_le_bytes::<32>())
}

/// Canonical integer representation of a field element.
pub fn scalar_to_u256(value: ScalarField) -> U256 {
    U256::from_limbs(value.into_bigint().0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> U256 {
        s.parse().unwrap()
    }

    #[test]
    fn test_modulus_wraps() {
        let modulus = U256::from_limbs(<ScalarField as PrimeField>::MODULUS.0);
        assert_eq!(scalar_from_u256(modulus), ScalarField::from(0u64));
        assert_eq!(scalar_to_u256(scalar_from_u256(modulus + U256::from(5u64))), U256::from(5u64));
    }

    #[test]
    fn test_hash_chain_links() {
        let seed = ScalarField::from(1u64);
        let chain = evaluate_hash_chain(seed, 3);

        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0], poseidon2_hash(&[seed]));
        assert_eq!(chain[1], poseidon2_hash(&[chain[0]]));
        assert_eq!(chain[2], poseidon2_hash(&[chain[1]]));
        assert!(evaluate_hash_chain(seed, 0).is_empty());
    }

    #[test]
    fn test_hash_of_one() {
        let res = scalar_to_u256(poseidon2_hash(&[ScalarField::from(1u64)]));
        assert_eq!(
            res,
            hex("0x23ce3237512e418e32c63d445d45f573de243bcf5fca0250a8c8f9c31fc65c7f")
        );
    }
}
