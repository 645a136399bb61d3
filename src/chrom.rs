//! # Chromosome Ordering
//!
//! Total order over heterogeneous chromosome labels. Integer-labelled
//! chromosomes compare by value and sort before everything else; remaining
//! labels (X, Y, MT, contigs) compare lexicographically among themselves.

use std::cmp::Ordering;

/// Comparison key derived from a chromosome label.
///
/// A label that parses as an integer after an optional case-insensitive
/// `chr` prefix ("1", "chr10", "CHR22") becomes `Numeric`; anything else
/// ("chrX", "MT", "HLA-A") stays `Named` and carries the original label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChromKey {
    /// Integer-labelled chromosome, ordered by value
    Numeric(u64),
    /// Non-numeric label, ordered lexicographically after all numerics
    Named(String),
}

impl ChromKey {
    /// Derive the key from a raw chromosome label.
    pub fn from_label(label: &str) -> Self {
        match strip_chr_prefix(label).parse::<u64>() {
            Ok(n) => ChromKey::Numeric(n),
            Err(_) => ChromKey::Named(label.to_string()),
        }
    }
}

impl Ord for ChromKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ChromKey::Numeric(a), ChromKey::Numeric(b)) => a.cmp(b),
            (ChromKey::Named(a), ChromKey::Named(b)) => a.cmp(b),
            (ChromKey::Numeric(_), ChromKey::Named(_)) => Ordering::Less,
            (ChromKey::Named(_), ChromKey::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for ChromKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Remove a leading case-insensitive `chr` prefix, if present.
///
/// Strictly a prefix match: labels that merely start or end with letters
/// from "chr" (e.g. "hr3") are left untouched.
fn strip_chr_prefix(label: &str) -> &str {
    let bytes = label.as_bytes();
    if bytes.len() > 3 && bytes[..3].eq_ignore_ascii_case(b"chr") {
        &label[3..]
    } else {
        label
    }
}
