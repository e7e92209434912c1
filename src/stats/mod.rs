use std::ops::Range;

use crate::error::{Result, SeqmarkError};
use crate::seq::{Nucleotide, NUCLEOTIDES};

/// Base composition of a cleaned sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    counts: [usize; 4],
    other: usize,
    length: usize,
}

impl Composition {
    /// Characters the percentages are taken over.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn count(&self, base: Nucleotide) -> usize {
        self.counts[index(base)]
    }

    /// Characters outside the alphabet, e.g. token residue left by an
    /// overlapping match. They count towards `length` but no base.
    pub fn other(&self) -> usize {
        self.other
    }

    pub fn percent(&self, base: Nucleotide) -> f64 {
        ratio(self.count(base), self.length)
    }

    pub fn cg_percent(&self) -> f64 {
        ratio(self.count(Nucleotide::C) + self.count(Nucleotide::G), self.length)
    }

    pub fn at_percent(&self) -> f64 {
        ratio(self.count(Nucleotide::A) + self.count(Nucleotide::T), self.length)
    }
}

fn index(base: Nucleotide) -> usize {
    match base {
        Nucleotide::A => 0,
        Nucleotide::C => 1,
        Nucleotide::G => 2,
        Nucleotide::T => 3,
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    (count as f64 / total as f64) * 100.0
}

/// Composition of a sequence that has already been cleaned.
pub fn composition(cleaned: &str) -> Result<Composition> {
    let mut counts = [0usize; 4];
    let mut other = 0;
    let mut length = 0;

    for c in cleaned.chars() {
        length += 1;
        match Nucleotide::from_char(c) {
            Some(base) => counts[index(base)] += 1,
            None => other += 1,
        }
    }

    if length == 0 {
        return Err(SeqmarkError::EmptySequence);
    }

    Ok(Composition { counts, other, length })
}

/// Deletes every non-overlapping occurrence of `token`, scanning left to
/// right. An empty token removes nothing.
pub fn remove_all(composite: &str, token: &str) -> String {
    if token.is_empty() {
        return composite.to_owned();
    }
    composite.replace(token, "")
}

/// Removes every occurrence of `token` before counting, including any that
/// the generator produced by chance.
pub fn composition_excluding_token(composite: &str, token: &str) -> Result<Composition> {
    composition(&remove_all(composite, token))
}

/// Removes only the byte range the token was inserted at.
pub fn composition_excluding_span(composite: &str, span: Range<usize>) -> Result<Composition> {
    let len = composite.len();
    if span.start > span.end
        || span.end > len
        || !composite.is_char_boundary(span.start)
        || !composite.is_char_boundary(span.end)
    {
        return Err(SeqmarkError::InvalidOffset {
            offset: span.start,
            len,
        });
    }
    let cleaned = [&composite[..span.start], &composite[span.end..]].concat();
    composition(&cleaned)
}

/// Percentages in reporting order (A, C, G, T).
pub fn percentages(report: &Composition) -> [(Nucleotide, f64); 4] {
    NUCLEOTIDES.map(|base| (base, report.percent(base)))
}
