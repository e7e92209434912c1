//! Error type shared by every stage of a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeqmarkError {
    /// Length input that is not a non-negative integer.
    #[error("invalid sequence length {input:?}: {reason}")]
    InvalidLength { input: String, reason: String },

    #[error("insertion offset {offset} is not a valid position in a sequence of length {len}")]
    InvalidOffset { offset: usize, len: usize },

    /// Nothing left to compute percentages over once the token is removed.
    #[error("cleaned sequence is empty, composition is undefined")]
    EmptySequence,

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed FASTA: {0}")]
    MalformedFasta(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SeqmarkError>;
