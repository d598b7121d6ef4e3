use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;

use relang::alphabet::Alphabet;
use relang::{dfa_spec, table};

/// Compile a transition-function DFA spec into the canonical table format.
#[derive(Parser)]
#[command(name = "dfa2table")]
struct Args {
    /// The alphabet symbols with no separators, e.g. "ab01"
    alphabet: String,
    /// The DFA spec file (Start/Accept lines plus transitions)
    spec: PathBuf,
    /// Output path for the DFA table
    output: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let alphabet = Alphabet::from_symbols(&args.alphabet)?;
    let text = std::fs::read_to_string(&args.spec).context("cannot open spec file")?;
    let dfa = dfa_spec::compile(&alphabet, &text)?;
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
