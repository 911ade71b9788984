//! Internal helpers for name normalization.
//!
//! Modality and unit names arrive as user-entered text ("Pré-Escola",
//! "PRE ESCOLA"). Lookups go through a normalized key so that accents,
//! case, and stray punctuation never decide whether a row matches.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalizes a user-entered name into a lookup key: NFKD with combining
/// marks stripped, lowercased, non-alphanumeric runs collapsed to single
/// spaces.
pub(crate) fn norm_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim().to_string()
}
