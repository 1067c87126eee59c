//! Similarity estimators: exact Jaccard over fingerprint hash sets, and the
//! cheaper MinHash collision-rate estimate used for candidate ranking
//! before the exact (and more expensive) Jaccard pass.

use std::collections::HashSet;

use fingerprint::Fingerprint;

/// Exact Jaccard similarity over two fingerprint sets, compared by hash
/// value only (position is not part of set membership).
///
/// Returns `0.0` if either set is empty.
pub fn jaccard(a: &[Fingerprint], b: &[Fingerprint]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_a: HashSet<u64> = a.iter().map(|f| f.hash).collect();
    let set_b: HashSet<u64> = b.iter().map(|f| f.hash).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// Fraction of slots at which two equal-length MinHash signatures agree,
/// an unbiased estimator of the Jaccard similarity of the underlying sets.
///
/// Returns `0.0` if either signature is empty. Compares element-wise up to
/// `min(len(a), len(b))` without requiring equal lengths, though in
/// practice both sides of a comparison always use the same `numPerm`.
pub fn minhash_estimate(a: &[u64], b: &[u64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let n = a.len().min(b.len());
    let matches = a.iter().zip(b.iter()).take(n).filter(|(x, y)| x == y).count();
    matches as f64 / n as f64
}
