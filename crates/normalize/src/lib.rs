//! Text normalization and k-gram generation.
//!
//! This crate implements the first two stages of the similarity pipeline:
//! folding raw text into a canonical [`NormalizedText`] and slicing it into
//! overlapping k-grams. Every downstream fingerprint position is an offset
//! into the *normalized* string, never the raw input. Callers that need to
//! highlight the original document are responsible for their own remapping.

mod kgram;

pub use kgram::{kgrams, KGram};

/// A document's text after normalization.
///
/// Normalization is idempotent: `normalize(normalize(x).as_str()) ==
/// normalize(x)`. The inner string is the offset domain for every
/// fingerprint position produced downstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Number of code points in the normalized text.
    ///
    /// This is the unit k-gram offsets and windows are measured in, not
    /// bytes; non-ASCII text must not skew offsets.
    pub fn len_chars(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Code-point view used by the k-gram generator and by callers that
    /// need random access by offset.
    pub fn chars_vec(&self) -> Vec<char> {
        self.0.chars().collect()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize raw text into a comparable canonical form.
///
/// Transformations are applied in order and are not individually
/// configurable: the pipeline's determinism guarantee depends on every
/// caller running the exact same sequence:
///
/// 1. Fold case to lower.
/// 2. Replace `CRLF` with `LF`.
/// 3. Replace every maximal run of characters that are neither letters nor
///    digits (Unicode categories L*, N*) with a single space.
/// 4. Collapse every run of whitespace to a single space.
/// 5. Trim leading/trailing whitespace.
///
/// Steps 3 and 4 are not length-preserving, so the result does not admit a
/// 1:1 offset mapping back to the raw input.
pub fn normalize(input: &str) -> NormalizedText {
    let folded = input.to_lowercase();
    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    let mut chars = folded.chars().peekable();

    while let Some(ch) = chars.next() {
        // CRLF -> LF: a bare CR not followed by LF is treated as its own
        // non-letter/digit run below, same as any other punctuation.
        if ch == '\r' && chars.peek() == Some(&'\n') {
            continue;
        }
        let normalized_ch = if ch == '\r' { '\n' } else { ch };

        if is_letter_or_digit(normalized_ch) {
            if pending_space {
                if !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
            }
            out.push(normalized_ch);
        } else {
            // Any run of non-letter/digit characters, including whitespace,
            // collapses to a single pending space so step 3 and step 4
            // compose into one pass.
            pending_space = true;
        }
    }

    NormalizedText(out.trim().to_string())
}

fn is_letter_or_digit(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric()
}
