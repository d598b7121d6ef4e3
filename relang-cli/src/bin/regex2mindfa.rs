use std::path::PathBuf;
use std::process::exit;

use anyhow::{bail, Context, Result};
use clap::Parser;

use relang::alphabet::Alphabet;
use relang::{regex, table};

/// Compile a regex over a declared alphabet into a minimized DFA table.
#[derive(Parser)]
#[command(name = "regex2mindfa")]
struct Args {
    /// Input file: line 1 is the regex, line 2 the alphabet
    input: PathBuf,
    /// Output path for the DFA table
    output: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let text = std::fs::read_to_string(&args.input).context("cannot open input file")?;
    let mut lines = text.lines();
    let (Some(regex_line), Some(alphabet_line)) = (lines.next(), lines.next()) else {
        bail!("input must have 2 lines: regex then alphabet");
    };

    let alphabet = Alphabet::parse_line(alphabet_line)?;
    let dfa = regex::compile(regex_line, &alphabet)?;
    table::write_file(&dfa, &args.output).context("cannot open output file for writing")?;
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            exit(1);
        }
    };
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        exit(1);
    }
}
