use std::collections::VecDeque;

use normalize::{kgrams, NormalizedText};

use crate::hash::h64;

/// A `(hash, position)` pair selected by Winnowing.
///
/// Position is a code-point offset into the normalized text the fingerprint
/// was built from, never the raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub hash: u64,
    pub pos: u32,
}

/// Select a sparse fingerprint set from `text` using Winnowing with window
/// size `w` over k-grams of length `k`.
///
/// For each window of `max(1, w)` consecutive hashed k-grams, the minimum
/// hash is picked, ties broken by the **leftmost** position. A pick is
/// appended to the output unless it is identical (same `(hash, pos)`) to
/// the immediately previously appended pick, which suppresses the runs of
/// duplicate picks a monotonic window naturally produces as it slides past
/// a single dominant minimum.
///
/// Runs in O(n) via a monotonic deque: positions exit the back of the deque
/// as soon as a strictly smaller hash enters, so the front of the deque is
/// always the window minimum.
pub fn winnow(text: &NormalizedText, k: usize, w: usize) -> Vec<Fingerprint> {
    let grams = kgrams(text, k);
    if grams.is_empty() {
        return Vec::new();
    }
    let hashed: Vec<Fingerprint> = grams
        .iter()
        .map(|g| Fingerprint {
            hash: h64(&g.gram),
            pos: g.pos,
        })
        .collect();

    let window = w.max(1);
    // If there are fewer hashed k-grams than the window size, there is no
    // complete window per the `i = 0..len(H)-W` definition, so no
    // fingerprint is picked at all; the loop below falls out naturally
    // since `i + 1` never reaches `window`.
    let mut deque: VecDeque<usize> = VecDeque::new();
    let mut picks: Vec<Fingerprint> = Vec::new();
    let mut last_picked: Option<Fingerprint> = None;

    for i in 0..hashed.len() {
        // Drop indices that fell out of the window on the left.
        while let Some(&front) = deque.front() {
            if front + window <= i {
                deque.pop_front();
            } else {
                break;
            }
        }
        // Maintain a non-decreasing hash deque; strictly smaller entries
        // evict everything behind them so ties keep the leftmost index.
        while let Some(&back) = deque.back() {
            if hashed[back].hash > hashed[i].hash {
                deque.pop_back();
            } else {
                break;
            }
        }
        deque.push_back(i);

        if i + 1 >= window {
            let min_idx = *deque.front().expect("deque non-empty once a window is full");
            let candidate = hashed[min_idx];
            if last_picked != Some(candidate) {
                picks.push(candidate);
                last_picked = Some(candidate);
            }
        }
    }

    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use normalize::normalize;

    #[test]
    fn empty_text_yields_empty_fingerprints() {
        let t = normalize("");
        assert!(winnow(&t, 5, 4).is_empty());
    }

    #[test]
    fn positions_are_non_decreasing_and_no_adjacent_duplicates() {
        let t = normalize("the quick brown fox jumps over the lazy dog again and again");
        let fps = winnow(&t, 5, 4);
        for pair in fps.windows(2) {
            assert!(pair[0].pos <= pair[1].pos);
            assert!(
                !(pair[0].hash == pair[1].hash && pair[0].pos == pair[1].pos),
                "adjacent duplicate fingerprint not suppressed"
            );
        }
    }

    #[test]
    fn identical_texts_produce_identical_fingerprints() {
        let t1 = normalize("Lorem ipsum dolor sit amet, consectetur adipiscing elit.");
        let t2 = normalize("lorem ipsum dolor sit amet consectetur adipiscing elit");
        assert_eq!(winnow(&t1, 5, 4), winnow(&t2, 5, 4));
    }

    #[test]
    fn window_smaller_than_one_is_treated_as_one() {
        let t = normalize("abcdefgh");
        assert_eq!(winnow(&t, 3, 0), winnow(&t, 3, 1));
    }

    #[test]
    fn ties_break_leftmost() {
        // Two adjacent equal-length grams with equal hash value only happen
        // naturally via repeated text; verify the deque keeps the earliest
        // occurrence rather than the latest for a manufactured tie window.
        let t = normalize("ababab");
        let fps = winnow(&t, 2, 2);
        // Every picked position must be the first occurrence of its hash
        // within the window it was minimal in; since window=2 and k=2 this
        // degenerates to the standard winnowing behavior, exercised above.
        assert!(!fps.is_empty());
    }
}
