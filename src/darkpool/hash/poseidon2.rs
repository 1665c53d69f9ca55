//! The Poseidon2 permutation and a sponge on top of it.
//!
//! See <https://eprint.iacr.org/2023/323.pdf>. The state is `[capacity, rate..]`
//! and the sbox is fixed to `x^5`.

use ark_ff::{Field, Zero};

use super::{
    ScalarField, CAPACITY, FULL_ROUND_CONSTANTS, PARTIAL_ROUND_CONSTANTS, RATE, R_F, R_P, WIDTH,
};

/// A sponge construction on top of the Poseidon2 permutation
#[derive(Debug, Clone, Default)]
pub struct Poseidon2Sponge {
    state: [ScalarField; WIDTH],
    /// Next rate index to absorb into or squeeze from
    next_index: usize,
    /// Once squeezing the sponge does not go back to absorbing
    squeezing: bool,
}

impl Poseidon2Sponge {
    pub fn new() -> Self {
        Self {
            state: [ScalarField::zero(); WIDTH],
            next_index: 0,
            squeezing: false,
        }
    }

    /// Absorb `seq` and squeeze a single element.
    pub fn hash(&mut self, seq: &[ScalarField]) -> ScalarField {
        self.absorb_batch(seq);
        self.squeeze()
    }

    /// Absorb a single element.
    ///
    /// # Panics
    /// If the sponge is already squeezing.
    pub fn absorb(&mut self, x: &ScalarField) {
        assert!(!self.squeezing, "cannot absorb while squeezing");

        if self.next_index == RATE {
            self.permute();
            self.next_index = 0;
        }

        self.state[self.next_index + CAPACITY] += x;
        self.next_index += 1;
    }

    pub fn absorb_batch(&mut self, x: &[ScalarField]) {
        x.iter().for_each(|x| self.absorb(x));
    }

    /// Squeeze a single element, permuting on the first squeeze and every
    /// `RATE` squeezes after that.
    pub fn squeeze(&mut self) -> ScalarField {
        if !self.squeezing || self.next_index == RATE {
            self.permute();
            self.next_index = 0;
            self.squeezing = true;
        }

        let out = self.state[self.next_index + CAPACITY];
        self.next_index += 1;
        out
    }

    pub fn squeeze_batch(&mut self, n: usize) -> Vec<ScalarField> {
        (0..n).map(|_| self.squeeze()).collect()
    }

    /// Apply the permutation to the inner state.
    pub(crate) fn permute(&mut self) {
        self.external_mds();

        const HALF: usize = R_F / 2;
        for i in 0..HALF {
            self.external_round(i);
        }
        for i in 0..R_P {
            self.internal_round(i);
        }
        for i in HALF..R_F {
            self.external_round(i);
        }
    }

    fn external_round(&mut self, round: usize) {
        for (elem, rc) in self.state.iter_mut().zip(FULL_ROUND_CONSTANTS[round].iter()) {
            *elem += rc;
            apply_sbox(elem);
        }
        self.external_mds();
    }

    /// Multiply by `circ(2, 1, 1)`: add the state sum to every element.
    fn external_mds(&mut self) {
        let sum = self.sum();
        for elem in self.state.iter_mut() {
            *elem += sum;
        }
    }

    /// `round` counts from the first partial round.
    fn internal_round(&mut self, round: usize) {
        self.state[0] += PARTIAL_ROUND_CONSTANTS[round];
        apply_sbox(&mut self.state[0]);
        self.internal_mds();
    }

    /// Multiply by `[[2, 1, 1], [1, 2, 1], [1, 1, 3]]`.
    fn internal_mds(&mut self) {
        let sum = self.sum();
        self.state[WIDTH - 1].double_in_place();
        for elem in self.state.iter_mut() {
            *elem += sum;
        }
    }

    fn sum(&self) -> ScalarField {
        self.state.iter().fold(ScalarField::zero(), |acc, x| acc + x)
    }
}

fn apply_sbox(val: &mut ScalarField) {
    let base = *val;
    val.square_in_place();
    val.square_in_place();
    *val *= base;
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::*;
    use crate::darkpool::hash::scalar_to_u256;

    /// Known answer for the BN254 `t = 3` instance
    #[test]
    fn test_permutation_known_answer() {
        let mut sponge = Poseidon2Sponge::new();
        sponge.state = [0u64.into(), 1u64.into(), 2u64.into()];
        sponge.permute();

        let expected: Vec<U256> = [
            "0x0bb61d24daca55eebcb1929a82650f328134334da98ea4f847f760054f4a3033",
            "0x303b6f7c86d043bfcbcc80214f26a30277a15d3f74ca654992defe7ff8d03570",
            "0x1ed25194542b12eef8617361c3ba7c52e660b145994427cc86296242cf766ec8",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
        let res: Vec<U256> = sponge.state.iter().copied().map(scalar_to_u256).collect();
        assert_eq!(res, expected);
    }

    #[test]
    fn test_hash_is_first_rate_element() {
        let inputs = [ScalarField::from(7u64), ScalarField::from(11u64)];

        let mut expected = Poseidon2Sponge::new();
        expected.state = [ScalarField::zero(), inputs[0], inputs[1]];
        expected.permute();

        let res = Poseidon2Sponge::new().hash(&inputs);
        assert_eq!(res, expected.state[1]);
    }

    #[test]
    fn test_squeeze_batch_permutes_every_rate() {
        let mut sponge = Poseidon2Sponge::new();
        sponge.absorb(&ScalarField::from(3u64));
        let out = sponge.squeeze_batch(3);

        let mut reference = Poseidon2Sponge::new();
        reference.state[1] = ScalarField::from(3u64);
        reference.permute();
        assert_eq!(out[0], reference.state[1]);
        assert_eq!(out[1], reference.state[2]);
        reference.permute();
        assert_eq!(out[2], reference.state[1]);
    }

    #[test]
    #[should_panic(expected = "cannot absorb while squeezing")]
    fn test_absorb_after_squeeze_panics() {
        let mut sponge = Poseidon2Sponge::new();
        sponge.squeeze();
        sponge.absorb(&ScalarField::from(1u64));
    }
}
