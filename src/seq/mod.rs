use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SeqmarkError};

/// Symbols drawn by the generator, in reporting order.
pub const NUCLEOTIDES: [Nucleotide; 4] =
    [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }

    /// Upper-case bases only; the generator never emits anything else.
    pub fn from_char(value: char) -> Option<Self> {
        match value {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'T' => Some(Nucleotide::T),
            _ => None,
        }
    }
}

/// Source of uniform indices used by generation and insertion.
pub trait RandomSource {
    /// Returns an index in `0..bound`. Callers never pass a zero bound.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// `RandomSource` backed by any `rand` generator.
pub struct RngSource<R>(R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Each replayed value is reduced modulo the requested bound, so a script
/// written for one alphabet size never yields an out-of-range index.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    indices: Vec<usize>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(indices: Vec<usize>) -> Self {
        ScriptedSource { indices, pos: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let value = self.indices[self.pos % self.indices.len()];
        self.pos += 1;
        value % bound
    }
}

/// Draws `length` bases uniformly, with replacement.
pub fn generate_sequence<S: RandomSource + ?Sized>(length: usize, source: &mut S) -> String {
    (0..length)
        .map(|_| NUCLEOTIDES[source.next_index(NUCLEOTIDES.len())].as_char())
        .collect()
}

/// A sequence with a token spliced in, and where it went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Insertion {
    pub composite: String,
    /// Byte offset of the token inside `composite`.
    pub offset: usize,
    pub token_len: usize,
}

impl Insertion {
    /// Byte range the token occupies in `composite`.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.token_len
    }
}

/// Inserts `token` at an offset drawn uniformly from `0..=len`, so the
/// token may be prepended or appended.
pub fn insert_token<S: RandomSource + ?Sized>(
    sequence: &str,
    token: &str,
    source: &mut S,
) -> Insertion {
    let positions = sequence.chars().count() + 1;
    let nth = source.next_index(positions);
    let offset = sequence
        .char_indices()
        .nth(nth)
        .map(|(i, _)| i)
        .unwrap_or(sequence.len());

    let mut composite = String::with_capacity(sequence.len() + token.len());
    composite.push_str(&sequence[..offset]);
    composite.push_str(token);
    composite.push_str(&sequence[offset..]);

    Insertion {
        composite,
        offset,
        token_len: token.len(),
    }
}

/// `sequence[..offset] + token + sequence[offset..]` for a caller-chosen offset.
pub fn insert_token_at(sequence: &str, token: &str, offset: usize) -> Result<String> {
    if offset > sequence.len() || !sequence.is_char_boundary(offset) {
        return Err(SeqmarkError::InvalidOffset {
            offset,
            len: sequence.len(),
        });
    }
    let (head, tail) = sequence.split_at(offset);
    Ok([head, token, tail].concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_length_and_alphabet() {
        let mut source = RngSource::seeded(7);
        for length in [0, 1, 17, 1000] {
            let seq = generate_sequence(length, &mut source);
            assert_eq!(seq.len(), length);
            assert!(seq.chars().all(|c| Nucleotide::from_char(c).is_some()));
        }
    }

    #[test]
    fn zero_length_is_empty() {
        let mut source = RngSource::seeded(1);
        assert_eq!(generate_sequence(0, &mut source), "");
    }

    #[test]
    fn seeded_sources_repeat() {
        let a = generate_sequence(64, &mut RngSource::seeded(42));
        let b = generate_sequence(64, &mut RngSource::seeded(42));
        assert_eq!(a, b);
    }

    #[test]
    fn all_bases_appear_in_long_sequence() {
        let seq = generate_sequence(4000, &mut RngSource::seeded(3));
        for base in NUCLEOTIDES {
            assert!(seq.contains(base.as_char()), "missing {:?}", base);
        }
    }

    #[test]
    fn scripted_generation() {
        let mut source = ScriptedSource::new(vec![0, 1, 2, 3]);
        assert_eq!(generate_sequence(10, &mut source), "ACGTACGTAC");
    }

    #[test]
    fn insert_at_every_offset() {
        let seq = "ACGTACGTAC";
        let token = "AB";
        for k in 0..=seq.len() {
            let composite = insert_token_at(seq, token, k).unwrap();
            assert_eq!(composite.len(), seq.len() + token.len());
            assert_eq!(&composite[..k], &seq[..k]);
            assert_eq!(&composite[k..k + token.len()], token);
            assert_eq!(&composite[k + token.len()..], &seq[k..]);
        }
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let err = insert_token_at("ACGT", "X", 5).unwrap_err();
        assert!(matches!(err, SeqmarkError::InvalidOffset { offset: 5, len: 4 }));
    }

    #[test]
    fn random_insertion_can_prepend_and_append() {
        let first = insert_token("ACGT", "name", &mut ScriptedSource::new(vec![0]));
        assert_eq!(first.composite, "nameACGT");
        assert_eq!(first.offset, 0);

        let last = insert_token("ACGT", "name", &mut ScriptedSource::new(vec![4]));
        assert_eq!(last.composite, "ACGTname");
        assert_eq!(last.span(), 4..8);
    }

    #[test]
    fn random_insertion_matches_deterministic_splice() {
        let mut source = RngSource::seeded(11);
        let seq = generate_sequence(50, &mut source);
        for _ in 0..20 {
            let ins = insert_token(&seq, "Ola", &mut source);
            assert!(ins.offset <= seq.len());
            assert_eq!(ins.composite, insert_token_at(&seq, "Ola", ins.offset).unwrap());
            assert_eq!(&ins.composite[ins.span()], "Ola");
        }
    }

    #[test]
    fn empty_token_leaves_sequence_unchanged() {
        let ins = insert_token("GATTACA", "", &mut ScriptedSource::new(vec![3]));
        assert_eq!(ins.composite, "GATTACA");
        assert_eq!(ins.token_len, 0);
    }
}
