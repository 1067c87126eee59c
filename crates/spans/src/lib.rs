//! Match-span reconstruction.
//!
//! Aligns two fingerprint sequences (the submitted document's and a
//! candidate source's) into contiguous [`MatchSpan`]s by merging nearby
//! raw position matches. This is the MVP alignment described by the wire
//! contract: it takes the first recorded source position for each matching
//! hash rather than solving an optimal alignment, and its score normalizer
//! mixes a character-offset span length with a fingerprint-count
//! denominator. Both choices are part of the contract, not bugs.

use std::collections::HashMap;

use fingerprint::Fingerprint;

/// A contiguous matching range between the submitted document and a source
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSpan {
    pub doc_start: u32,
    pub doc_end: u32,
    pub src_start: u32,
    pub src_end: u32,
    /// Length-ratio heuristic in `[0, 1]`, not a Jaccard similarity:
    /// `min(1, (doc_end - doc_start) / (fp_doc.len() * k))`.
    pub match_score: f64,
    pub snippet_hash: String,
}

struct RawMatch {
    hash: u64,
    a_pos: u32,
    b_pos: u32,
}

/// Build match spans between the document's fingerprints `fp_doc` and a
/// candidate source's fingerprints `fp_src`, using k-gram length `k` to
/// size each raw match's extent.
pub fn build_spans(fp_doc: &[Fingerprint], fp_src: &[Fingerprint], k: usize) -> Vec<MatchSpan> {
    if fp_doc.is_empty() || fp_src.is_empty() {
        return Vec::new();
    }

    let mut pos_map_src: HashMap<u64, u32> = HashMap::new();
    for f in fp_src {
        pos_map_src
            .entry(f.hash)
            .and_modify(|p| *p = (*p).min(f.pos))
            .or_insert(f.pos);
    }

    let mut raw: Vec<RawMatch> = fp_doc
        .iter()
        .filter_map(|a| {
            pos_map_src.get(&a.hash).map(|&b_pos| RawMatch {
                hash: a.hash,
                a_pos: a.pos,
                b_pos,
            })
        })
        .collect();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.sort_by_key(|m| m.a_pos);

    let k = k as u32;
    let mut spans = Vec::new();
    let mut iter = raw.into_iter();
    let first = iter.next().expect("raw is non-empty");

    let mut doc_start = first.a_pos;
    let mut doc_end = first.a_pos + k;
    let mut src_start = first.b_pos;
    let mut src_end = first.b_pos + k;
    let mut snippet_hash = first.hash.to_string();

    for m in iter {
        if m.a_pos <= doc_end + k {
            doc_end = m.a_pos + k;
            src_end = m.b_pos + k;
        } else {
            spans.push(finalize_span(
                doc_start,
                doc_end,
                src_start,
                src_end,
                snippet_hash.clone(),
                fp_doc.len(),
                k,
            ));
            doc_start = m.a_pos;
            doc_end = m.a_pos + k;
            src_start = m.b_pos;
            src_end = m.b_pos + k;
            snippet_hash = m.hash.to_string();
        }
    }
    spans.push(finalize_span(
        doc_start,
        doc_end,
        src_start,
        src_end,
        snippet_hash,
        fp_doc.len(),
        k,
    ));

    spans
}

#[allow(clippy::too_many_arguments)]
fn finalize_span(
    doc_start: u32,
    doc_end: u32,
    src_start: u32,
    src_end: u32,
    snippet_hash: String,
    fp_doc_len: usize,
    k: u32,
) -> MatchSpan {
    let denom = (fp_doc_len as u64) * (k as u64);
    let match_score = if denom == 0 {
        0.0
    } else {
        ((doc_end - doc_start) as f64 / denom as f64).min(1.0)
    };
    MatchSpan {
        doc_start,
        doc_end,
        src_start,
        src_end,
        match_score,
        snippet_hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(hash: u64, pos: u32) -> Fingerprint {
        Fingerprint { hash, pos }
    }

    #[test]
    fn no_overlap_yields_no_spans() {
        let doc = vec![fp(1, 0), fp(2, 10)];
        let src = vec![fp(3, 0), fp(4, 10)];
        assert!(build_spans(&doc, &src, 5).is_empty());
    }

    #[test]
    fn either_side_empty_yields_no_spans() {
        let doc = vec![fp(1, 0)];
        assert!(build_spans(&doc, &[], 5).is_empty());
        assert!(build_spans(&[], &doc, 5).is_empty());
    }

    #[test]
    fn adjacent_matches_merge_into_one_span() {
        let doc = vec![fp(1, 0), fp(2, 5), fp(3, 10)];
        let src = vec![fp(1, 0), fp(2, 5), fp(3, 10)];
        let spans = build_spans(&doc, &src, 5);
        assert_eq!(spans.len(), 1);
        let s = &spans[0];
        assert_eq!(s.doc_start, 0);
        assert_eq!(s.doc_end, 15);
        assert_eq!(s.src_start, 0);
        assert_eq!(s.src_end, 15);
    }

    #[test]
    fn far_apart_matches_produce_separate_spans() {
        let doc = vec![fp(1, 0), fp(2, 1000)];
        let src = vec![fp(1, 0), fp(2, 1000)];
        let spans = build_spans(&doc, &src, 5);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn every_span_has_valid_bounds_and_score_in_range() {
        let doc = vec![fp(1, 0), fp(2, 5), fp(3, 50)];
        let src = vec![fp(1, 0), fp(2, 5), fp(3, 50)];
        let spans = build_spans(&doc, &src, 5);
        for s in &spans {
            assert!(s.doc_start < s.doc_end);
            assert!(s.src_start < s.src_end);
            assert!((0.0..=1.0).contains(&s.match_score));
        }
    }

    #[test]
    fn spans_are_ordered_by_doc_start() {
        let doc = vec![fp(1, 100), fp(2, 0)];
        let src = vec![fp(1, 100), fp(2, 0)];
        let spans = build_spans(&doc, &src, 5);
        for pair in spans.windows(2) {
            assert!(pair[0].doc_start <= pair[1].doc_start);
        }
    }
}
