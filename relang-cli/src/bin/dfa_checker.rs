use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;

use relang::checker::{self, Verdict};
use relang::fa::dfa::Dfa;
use relang::table;

/// Compare two DFA tables by simulating both on every test string.
///
/// Exit codes: 0 all tests matched, 2 mismatch or alphabet disagreement,
/// 1 parse/usage error.
#[derive(Parser)]
#[command(name = "dfa_checker")]
struct Args {
    /// Reference DFA table
    reference: PathBuf,
    /// User DFA table
    user: PathBuf,
    /// Tests file: one `<label> <string>` per line, `<eps>` for empty
    tests: PathBuf,
}

fn read_dfa(path: &Path) -> Option<Dfa> {
    match table::read_file(path) {
        Ok(dfa) => Some(dfa),
        Err(e) => {
            eprintln!("Error: {e}");
            None
        }
    }
}

fn run(args: &Args) -> i32 {
    let Some(reference) = read_dfa(&args.reference) else {
        return 1;
    };
    let Some(user) = read_dfa(&args.user) else {
        return 1;
    };
    let tests = match std::fs::read_to_string(&args.tests) {
        Ok(text) => text,
        Err(_) => {
            eprintln!("Error: cannot open tests file");
            return 1;
        }
    };

    let report = match checker::check(&reference, &user, &tests) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    for w in &report.warnings {
        eprintln!(
            "WARNING: test label mismatch vs reference at line {} (label={}, ref={})",
            w.line, w.label as i32, w.reference as i32
        );
    }

    match report.verdict {
        Verdict::Pass { total } => {
            println!("PASS: {total} tests matched (user DFA behavior == reference DFA behavior).");
            0
        }
        Verdict::AlphabetMismatch { reference, user } => {
            eprintln!("FAIL: alphabets differ between reference and user DFA.");
            eprintln!("ref: {reference}");
            eprintln!("user:{user}");
            2
        }
        Verdict::Mismatch {
            line,
            word,
            reference,
            user,
            label,
        } => {
            eprintln!("FAIL at test line {line}");
            eprintln!("  w = {word}");
            eprintln!(
                "  ref_accept = {}, user_accept = {}",
                reference as i32, user as i32
            );
            eprintln!("  label = {}", label as i32);
            2
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            exit(1);
        }
    };
    exit(run(&args));
}
