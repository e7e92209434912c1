pub mod error;
pub mod fasta;
pub mod logger;
pub mod pipeline;
pub mod seq;
pub mod stats;

pub use error::{Result, SeqmarkError};
