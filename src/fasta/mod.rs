//! Single-record FASTA output and read-back.
//!
//! Records are written as exactly two lines, header then sequence, with no
//! line wrapping regardless of sequence length.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, SeqmarkError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

/// `<dir>/<id>.fasta`. The id is used verbatim.
pub fn output_path<P: AsRef<Path>>(dir: P, id: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.fasta", id))
}

/// Writes `>id description` and the sequence to `path`.
///
/// The file is created (or truncated) with the process's default mode, and
/// an existing file or symlink at `path` is written through.
pub fn write_record<P: AsRef<Path>>(path: P, record: &FastaRecord) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| SeqmarkError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
    writeln!(out, ">{} {}", record.id, record.description).map_err(write_err)?;
    writeln!(out, "{}", record.sequence).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    debug!("wrote {} bytes of sequence to {}", record.sequence.len(), path.display());
    Ok(())
}

/// Reads the first record of a FASTA file.
///
/// The line after the header is always taken as sequence, so a sequence
/// that itself begins with `>` still reads back. Later lines are appended
/// until the next header.
pub fn read_record<P: AsRef<Path>>(path: P) -> Result<FastaRecord> {
    let path = path.as_ref();
    let read_err = |source| SeqmarkError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line.map_err(read_err)?,
        None => return Err(SeqmarkError::MalformedFasta(format!("{} is empty", path.display()))),
    };
    let header = header
        .strip_prefix('>')
        .ok_or_else(|| {
            SeqmarkError::MalformedFasta(format!("header does not start with '>': {:?}", header))
        })?;
    let (id, description) = header.split_once(' ').unwrap_or((header, ""));

    let mut sequence = match lines.next() {
        Some(line) => line.map_err(read_err)?,
        None => {
            let msg = format!("record {:?} has no sequence line", id);
            return Err(SeqmarkError::MalformedFasta(msg));
        }
    };
    for line in lines {
        let line = line.map_err(read_err)?;
        if line.starts_with('>') {
            break;
        }
        sequence.push_str(&line);
    }

    Ok(FastaRecord {
        id: id.to_owned(),
        description: description.to_owned(),
        sequence,
    })
}
