//! Hashing, Winnowing, and MinHash: the algorithmic core of the similarity
//! pipeline.
//!
//! Every function here is a pure function of its inputs: no process-local
//! seed, no I/O, no shared mutable state. The same `(text, k, w)` or
//! `(text, k, numPerm)` always produces the same output, on any machine.

pub mod hash;
pub mod minhash;
pub mod winnow;

pub use hash::{h64, h_p, sha1_hex, P};
pub use minhash::{default_num_perm, minhash_signature, MinHashSignature};
pub use winnow::{winnow, Fingerprint};
