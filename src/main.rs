use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use seqmark::logger;
use seqmark::pipeline::{self, Removal, Request};
use seqmark::seq::RngSource;
use seqmark::Result;

use log::error;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "seqmark",
    about = "Random DNA sequence with an embedded token, written as FASTA with base composition"
)]
struct Opt {
    /// Sequence length (prompted for when omitted)
    #[structopt(short, long)]
    length: Option<String>,

    /// Sequence ID, also the output file stem
    #[structopt(short, long)]
    id: Option<String>,

    /// Free-text description for the FASTA header
    #[structopt(short, long)]
    description: Option<String>,

    /// Token (name) to embed in the sequence
    #[structopt(short, long)]
    token: Option<String>,

    /// Directory the FASTA file is written to
    #[structopt(short, long, parse(from_os_str))]
    out_dir: Option<PathBuf>,

    /// Seed for a reproducible run
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Exclude only the inserted token from statistics, not every occurrence of it
    #[structopt(long)]
    excise_inserted: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u64,
}

/// Returns the flag value, or asks for it on the console.
fn value_or_prompt<R: BufRead, W: Write>(
    value: Option<String>,
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_owned())
}

/// Gathers length, ID, description and token in that order. The length is
/// validated before anything else is asked for.
fn collect_request<R: BufRead, W: Write>(
    opt: &Opt,
    input: &mut R,
    output: &mut W,
) -> Result<Request> {
    let length = value_or_prompt(opt.length.clone(), "Enter the sequence length: ", input, output)?;
    let length = pipeline::parse_length(&length)?;
    let id = value_or_prompt(opt.id.clone(), "Enter the sequence ID: ", input, output)?;
    let description = value_or_prompt(
        opt.description.clone(),
        "Provide a description of the sequence: ",
        input,
        output,
    )?;
    let token = value_or_prompt(opt.token.clone(), "Enter your name: ", input, output)?;

    Ok(Request { length, id, description, token })
}

fn run(opt: &Opt) -> Result<()> {
    let stdin = io::stdin();
    let request = collect_request(opt, &mut stdin.lock(), &mut io::stdout())?;
    let removal = if opt.excise_inserted {
        Removal::InsertedSpan
    } else {
        Removal::AllOccurrences
    };
    let out_dir = opt.out_dir.clone().unwrap_or_default();

    let mut source = match opt.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let outcome = pipeline::run(&request, &out_dir, removal, &mut source)?;
    print!("{}", pipeline::render_report(&outcome.path, &outcome.composition));
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    if let Err(e) = logger::init_logger(logger::level_for_verbosity(opt.verbose)) {
        eprintln!("logger unavailable: {}", e);
    }

    if let Err(e) = run(&opt) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqmark::SeqmarkError;
    use std::io::Cursor;

    fn opt(args: &[&str]) -> Opt {
        let mut argv = vec!["seqmark"];
        argv.extend_from_slice(args);
        Opt::from_iter(argv)
    }

    #[test]
    fn flag_value_skips_prompt() {
        let mut input = Cursor::new("ignored\n");
        let mut output = Vec::new();
        let flag = Some("seq7".to_owned());
        let v = value_or_prompt(flag, "Enter the sequence ID: ", &mut input, &mut output).unwrap();
        assert_eq!(v, "seq7");
        assert!(output.is_empty());
    }

    #[test]
    fn prompt_reads_one_line_keeping_spaces() {
        let mut input = Cursor::new("  a short description \r\nnext\n");
        let mut output = Vec::new();
        let prompt = "Provide a description of the sequence: ";
        let v = value_or_prompt(None, prompt, &mut input, &mut output).unwrap();
        assert_eq!(v, "  a short description ");
    }

    #[test]
    fn prompts_in_fixed_order() {
        let mut input = Cursor::new("10\ns1\ndesc\nAnna\n");
        let mut output = Vec::new();
        let request = collect_request(&opt(&[]), &mut input, &mut output).unwrap();

        assert_eq!(request.length, 10);
        assert_eq!(request.id, "s1");
        assert_eq!(request.description, "desc");
        assert_eq!(request.token, "Anna");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Enter the sequence length: Enter the sequence ID: \
             Provide a description of the sequence: Enter your name: "
        );
    }

    #[test]
    fn bad_length_stops_before_other_prompts() {
        let mut input = Cursor::new("-3\ns1\ndesc\nAnna\n");
        let mut output = Vec::new();
        let err = collect_request(&opt(&[]), &mut input, &mut output).unwrap_err();

        assert!(matches!(err, SeqmarkError::InvalidLength { .. }));
        assert_eq!(String::from_utf8(output).unwrap(), "Enter the sequence length: ");
    }

    #[test]
    fn flags_and_prompts_mix() {
        let mut input = Cursor::new("a description\n");
        let mut output = Vec::new();
        let opt = opt(&["-l", "25", "-i", "chr1", "-t", "Kim"]);
        let request = collect_request(&opt, &mut input, &mut output).unwrap();

        assert_eq!(request.length, 25);
        assert_eq!(request.id, "chr1");
        assert_eq!(request.description, "a description");
        assert_eq!(request.token, "Kim");
        assert_eq!(String::from_utf8(output).unwrap(), "Provide a description of the sequence: ");
    }

    #[test]
    fn options_parse() {
        let opt = opt(&["-l", "12", "-i", "x", "-t", "Kim", "--excise-inserted", "-vv"]);
        assert_eq!(opt.length.as_deref(), Some("12"));
        assert!(opt.excise_inserted);
        assert_eq!(opt.verbose, 2);
        assert!(opt.seed.is_none());
    }
}
