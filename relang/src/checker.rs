//! Behavioral comparison of two DFA tables over a labeled test set.
//!
//! Equivalence is witnessed only by the supplied tests; there is no
//! product-automaton exploration. Labels are advisory: the reference DFA is
//! ground truth, and a label that disagrees with it produces a warning, not
//! a failure.

use crate::error::{Error, Result};
use crate::fa::dfa::Dfa;

/// Surface form of the empty test string.
pub const EPSILON_WORD: &str = "<eps>";

/// Outcome of a checker run. Parse failures are `Err` at the `check` level;
/// everything here is a well-formed comparison result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every test line agreed between the two DFAs.
    Pass { total: usize },
    /// The two tables are not over the same alphabet, byte for byte.
    AlphabetMismatch { reference: String, user: String },
    /// First diverging test line.
    Mismatch {
        line: usize,
        word: String,
        reference: bool,
        user: bool,
        label: bool,
    },
}

/// A test whose label disagrees with the reference DFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelWarning {
    pub line: usize,
    pub label: bool,
    pub reference: bool,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub verdict: Verdict,
    /// Warnings accumulated before the stopping point, in line order.
    pub warnings: Vec<LabelWarning>,
}

/// Runs every test string through both DFAs.
///
/// Test lines are `<label> <string>` with label `0` or `1` and `<eps>`
/// standing for the empty string; blank lines and `#` comments are skipped,
/// trailing tokens on a line are ignored. A string byte outside the shared
/// alphabet is a parse error.
pub fn check(reference: &Dfa, user: &Dfa, tests: &str) -> Result<Report> {
    if reference.alphabet() != user.alphabet() {
        return Ok(Report {
            verdict: Verdict::AlphabetMismatch {
                reference: reference.alphabet().as_str().into_owned(),
                user: user.alphabet().as_str().into_owned(),
            },
            warnings: Vec::new(),
        });
    }

    let mut warnings = Vec::new();
    let mut total = 0usize;

    for (idx, raw) in tests.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let first = line.as_bytes()[0];
        if first != b'0' && first != b'1' {
            return Err(Error::TestsLine {
                line: line_no,
                msg: "label must be 0 or 1",
            });
        }
        let label = first == b'1';

        let rest = line[1..].trim_start();
        let Some(word_tok) = rest.split_whitespace().next() else {
            return Err(Error::TestsLine {
                line: line_no,
                msg: "missing string token (use <eps> for empty)",
            });
        };
        let word: &[u8] = if word_tok == EPSILON_WORD {
            b""
        } else {
            word_tok.as_bytes()
        };

        let (Some(r_ref), Some(r_user)) = (reference.run(word), user.run(word)) else {
            return Err(Error::TestsLine {
                line: line_no,
                msg: "string contains symbol not in alphabet",
            });
        };
        total += 1;

        if r_ref != r_user {
            return Ok(Report {
                verdict: Verdict::Mismatch {
                    line: line_no,
                    word: word_tok.to_string(),
                    reference: r_ref,
                    user: r_user,
                    label,
                },
                warnings,
            });
        }
        if r_ref != label {
            warnings.push(LabelWarning {
                line: line_no,
                label,
                reference: r_ref,
            });
        }
    }

    Ok(Report {
        verdict: Verdict::Pass { total },
        warnings,
    })
}
