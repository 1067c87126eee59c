use std::collections::HashSet;

use normalize::{kgrams, NormalizedText};

use crate::hash::{h64, h_p, P};

/// A fixed-length MinHash signature. Always exactly `numPerm` entries long,
/// even for empty input, where every entry is the sentinel `P`.
pub type MinHashSignature = Vec<u64>;

const DEFAULT_NUM_PERM: usize = 100;

/// Default number of permutations used when the caller does not override it.
pub fn default_num_perm() -> usize {
    DEFAULT_NUM_PERM
}

/// Compute a MinHash signature of `text`'s distinct k-gram hash set.
///
/// The permutation family is fixed and part of the wire contract: two
/// independent implementations of this pipeline must produce byte-identical
/// signatures for the same input, so the multipliers below are not
/// configurable:
///
/// - `a_i = 1 + (i * 7919) mod 100000`
/// - `b_i = 1 + (i * 104729) mod 100000`
/// - `sig[i] = min over x in S of ((a_i * x + b_i) mod P)`
///
/// `a*x + b` can exceed `u64::MAX` for `x` close to `P`, so the reduction
/// uses a 128-bit intermediate product.
pub fn minhash_signature(text: &NormalizedText, k: usize, num_perm: usize) -> MinHashSignature {
    let shingle_set: HashSet<u64> = kgrams(text, k)
        .iter()
        .map(|g| h_p(h64(&g.gram)))
        .collect();

    if shingle_set.is_empty() {
        return vec![P; num_perm];
    }

    let shingles: Vec<u64> = shingle_set.into_iter().collect();
    (0..num_perm)
        .map(|i| {
            let a = 1 + ((i as u64).wrapping_mul(7919)) % 100_000;
            let b = 1 + ((i as u64).wrapping_mul(104_729)) % 100_000;
            shingles
                .iter()
                .map(|&x| permute(a, b, x))
                .min()
                .expect("shingles is non-empty")
        })
        .collect()
}

#[inline]
fn permute(a: u64, b: u64, x: u64) -> u64 {
    let product = (a as u128) * (x as u128) + (b as u128);
    (product % P as u128) as u64
}
