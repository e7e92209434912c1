//! One run: validate, generate, insert, persist, then compute statistics.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Result, SeqmarkError};
use crate::fasta::{self, FastaRecord};
use crate::seq::{self, RandomSource};
use crate::stats::{self, Composition};

/// How the token is taken out again before counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// Every occurrence of the token text, inserted or coincidental.
    AllOccurrences,
    /// Only the span the token was inserted at.
    InsertedSpan,
}

#[derive(Clone, Debug)]
pub struct Request {
    pub length: usize,
    pub id: String,
    pub description: String,
    pub token: String,
}

#[derive(Clone, Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub record: FastaRecord,
    pub offset: usize,
    pub composition: Composition,
    /// Characters taken out of the composite before counting.
    pub removed: usize,
    /// Characters of the token that was inserted.
    pub inserted: usize,
}

impl Outcome {
    /// Characters removed beyond the inserted token itself.
    pub fn coincidental(&self) -> usize {
        self.removed.saturating_sub(self.inserted)
    }
}

/// Parses a sequence length typed by a user.
pub fn parse_length(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    let invalid = |reason: &str| SeqmarkError::InvalidLength {
        input: input.to_owned(),
        reason: reason.to_owned(),
    };

    let value: i64 = trimmed.parse().map_err(|_| invalid("not an integer"))?;
    if value < 0 {
        return Err(invalid("must not be negative"));
    }
    usize::try_from(value).map_err(|_| invalid("too large for this platform"))
}

pub fn run<S: RandomSource + ?Sized>(
    request: &Request,
    out_dir: &Path,
    removal: Removal,
    source: &mut S,
) -> Result<Outcome> {
    let original = seq::generate_sequence(request.length, source);
    info!("generated {} bases", original.len());

    let insertion = seq::insert_token(&original, &request.token, source);
    info!("inserted {:?} at offset {}", request.token, insertion.offset);

    let path = fasta::output_path(out_dir, &request.id);
    let record = FastaRecord {
        id: request.id.clone(),
        description: request.description.clone(),
        sequence: insertion.composite.clone(),
    };
    fasta::write_record(&path, &record)?;
    info!("sequence saved to {}", path.display());

    let composition = match removal {
        Removal::AllOccurrences => {
            stats::composition_excluding_token(&record.sequence, &request.token)
        }
        Removal::InsertedSpan => {
            stats::composition_excluding_span(&record.sequence, insertion.span())
        }
    }?;

    let removed = record.sequence.chars().count() - composition.length();
    let inserted = request.token.chars().count();
    debug!("cleaning removed {} characters", removed);
    if removed > inserted {
        warn!(
            "token {:?} also occurs in the generated sequence, {} extra characters excluded",
            request.token,
            removed - inserted
        );
    }
    debug!("%AT: {:.1}%", composition.at_percent());

    Ok(Outcome {
        path,
        record,
        offset: insertion.offset,
        composition,
        removed,
        inserted,
    })
}

/// Console report: saved file, one line per base, then %CG.
pub fn render_report(path: &Path, composition: &Composition) -> String {
    let mut out = format!(
        "\nThe sequence was saved to the file {}\nSequence statistics:\n",
        path.display()
    );
    for (base, percent) in stats::percentages(composition) {
        out.push_str(&format!("{}: {:.1}%\n", base.as_char(), percent));
    }
    out.push_str(&format!("%CG: {:.1}%\n", composition.cg_percent()));
    out
}
