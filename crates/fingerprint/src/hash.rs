//! The two hash functions the wire contract is built on.
//!
//! Both are pure functions of their input bytes: no process-local seed, so
//! signatures produced on one machine are byte-for-byte reproducible on
//! another. `h64` feeds the Winnower; `hP` feeds the MinHash permutation
//! family, which needs a residue strictly below the Mersenne prime `P`.

use sha1::{Digest, Sha1};

/// `2^61 - 1`, the Mersenne prime the MinHash permutation family operates
/// over. Declared `pub` because the LSH and similarity crates and the
/// MinHash sentinel both need it.
pub const P: u64 = (1u64 << 61) - 1;

/// SHA-1 of the UTF-8 bytes of `s`, truncated to the first 8 bytes and
/// interpreted as a big-endian `u64`.
///
/// Cryptographic strength is not the point here. It is used because the
/// LSH bucket-key format embeds its hex digest directly (see
/// `simtext-lsh`), so every implementation of this pipeline must agree on
/// the exact digest bytes, not just "a good hash".
pub fn h64(s: &str) -> u64 {
    let digest = Sha1::digest(s.as_bytes());
    u64::from_be_bytes(digest[..8].try_into().expect("sha1 digest is 20 bytes"))
}

/// Reduce a 64-bit hash modulo `P` using a 128-bit intermediate product.
///
/// `x` is not itself a valid residue mod `P` in general (it can exceed
/// `P`), so a plain cast would be wrong; widen to `u128` before reducing.
pub fn h_p(x: u64) -> u64 {
    (x as u128 % P as u128) as u64
}

/// SHA-1 hex digest of `s`, used verbatim by the LSH bucket-key format.
pub fn sha1_hex(s: &str) -> String {
    let digest = Sha1::digest(s.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h64_is_deterministic() {
        assert_eq!(h64("hello"), h64("hello"));
    }

    #[test]
    fn h64_differs_for_different_input() {
        assert_ne!(h64("hello"), h64("world"));
    }

    #[test]
    fn h_p_is_below_p() {
        assert!(h_p(u64::MAX) < P);
        assert!(h_p(0) == 0);
    }

    #[test]
    fn sha1_hex_matches_known_vector() {
        // echo -n "abc" | sha1sum
        assert_eq!(sha1_hex("abc"), "a9993e364706816aba3e25717850c26c9cd0d89");
    }
}
