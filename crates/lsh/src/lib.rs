//! Locality-sensitive hashing over MinHash signatures.
//!
//! Banding a signature into `bands` contiguous slices and hashing each slice
//! to a bucket key gives a collision probability monotone in the true
//! Jaccard similarity of the underlying sets: the more similar two
//! documents are, the more likely they share at least one bucket key,
//! letting the checker prune the corpus scan to LSH-candidates instead of
//! scanning every document pairwise.

use fingerprint::sha1_hex;

/// Default number of bands used when the caller does not override it.
pub const DEFAULT_BANDS: usize = 20;

/// Derive `bands` LSH bucket keys from a MinHash signature.
///
/// Each key has the form `"<band-index>:<hex(sha1(band-index ++ ":" ++
/// joined-signature-slice))>"`. If `numPerm` is not evenly divisible by
/// `bands`, the trailing remainder of the signature is silently dropped.
/// This is a documented property of the bucket format, not a bug: both
/// sides of a comparison drop the same remainder, so the banding stays
/// consistent between any two documents processed with the same
/// `(numPerm, bands)` pair.
///
/// Returns an empty vector if `bands` is zero or larger than the signature,
/// since there would be no non-empty row per band.
pub fn lsh_buckets(signature: &[u64], bands: usize) -> Vec<String> {
    if bands == 0 {
        return Vec::new();
    }
    let rows_per_band = signature.len() / bands;
    if rows_per_band == 0 {
        return Vec::new();
    }

    (0..bands)
        .map(|b| {
            let start = b * rows_per_band;
            let end = start + rows_per_band;
            let joined = signature[start..end]
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join("-");
            let payload = format!("{b}:{joined}");
            format!("{b}:{}", sha1_hex(&payload))
        })
        .collect()
}

/// `true` if two bucket-key sets share at least one key: the definition of
/// "LSH-candidate" between two documents.
pub fn share_bucket(a: &[String], b: &[String]) -> bool {
    a.iter().any(|key| b.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerprint::P;

    #[test]
    fn produces_exactly_bands_keys_when_divisible() {
        let sig: Vec<u64> = (0..100).collect();
        let keys = lsh_buckets(&sig, 20);
        assert_eq!(keys.len(), 20);
    }

    #[test]
    fn drops_trailing_remainder_when_not_divisible() {
        let sig: Vec<u64> = (0..101).collect();
        let keys_full = lsh_buckets(&(0..100).collect::<Vec<_>>(), 20);
        let keys_with_remainder = lsh_buckets(&sig, 20);
        assert_eq!(keys_full, keys_with_remainder);
    }

    #[test]
    fn zero_bands_or_more_bands_than_rows_yields_empty() {
        let sig: Vec<u64> = (0..5).collect();
        assert!(lsh_buckets(&sig, 0).is_empty());
        assert!(lsh_buckets(&sig, 10).is_empty());
    }

    #[test]
    fn identical_signatures_share_every_bucket() {
        let sig: Vec<u64> = (0..100).map(|i| i * 7 % P).collect();
        let a = lsh_buckets(&sig, 20);
        let b = lsh_buckets(&sig, 20);
        assert_eq!(a, b);
        assert!(share_bucket(&a, &b));
    }

    #[test]
    fn disjoint_signatures_share_no_bucket_with_high_probability() {
        let sig_a: Vec<u64> = (0..100).collect();
        let sig_b: Vec<u64> = (1000..1100).collect();
        let a = lsh_buckets(&sig_a, 20);
        let b = lsh_buckets(&sig_b, 20);
        assert!(!share_bucket(&a, &b));
    }
}
