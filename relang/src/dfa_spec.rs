//! Compiler for the human-written DFA transition-function spec:
//!
//! ```text
//! # comment
//! Start: q0
//! Accept: {q0, q2}
//! (q0, a) -> q1
//! (q1, b) -> q2
//! ```
//!
//! States are `q<n>` tokens; the emitted table uses `n` directly as the
//! state index, materializing every index up to the largest one mentioned.
//! Missing transitions are completed to a dead state. The result is not
//! minimized; equivalence to a reference is established by simulation, so
//! a redundant user DFA is perfectly legal.

use rustc_hash::FxHashMap;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::fa::dfa::Dfa;
use crate::fa::subset::MAX_DFA_STATES;

/// Largest `n` a `q<n>` token may carry.
const MAX_STATE_NUMBER: usize = 1_000_000;

/// Compiles a spec against `alphabet` into a complete canonical DFA.
pub fn compile(alphabet: &Alphabet, text: &str) -> Result<Dfa> {
    let k = alphabet.len();
    let mut start: Option<usize> = None;
    let mut accept_seen = false;
    let mut accepting_set: Vec<usize> = Vec::new();
    let mut n_states = 0usize;
    let mut transitions: FxHashMap<(usize, usize), usize> = FxHashMap::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let lowered = line.to_ascii_lowercase();
        if lowered.starts_with("start:") {
            let tok = line[6..]
                .split_whitespace()
                .next()
                .map(strip_trailing_punct)
                .ok_or(Error::BadStartLine)?;
            let q = parse_q_state(tok).ok_or(Error::BadStartLine)?;
            grow_states(q, line_no, &mut n_states)?;
            start = Some(q);
            continue;
        }

        if lowered.starts_with("accept:") {
            accept_seen = true;
            // Braces and commas become separators; anything that is not a
            // q<n> token is dropped without complaint.
            let set = line[7..].replace(['{', '}', ','], " ");
            for tok in set.split_whitespace() {
                if let Some(q) = parse_q_state(strip_trailing_punct(tok)) {
                    grow_states(q, line_no, &mut n_states)?;
                    if !accepting_set.contains(&q) {
                        accepting_set.push(q);
                    }
                }
            }
            continue;
        }

        // Transition line; lines without a '(' are not ours and are skipped.
        let Some((from, col, to)) = parse_transition(line, line_no, alphabet)? else {
            continue;
        };
        grow_states(from, line_no, &mut n_states)?;
        grow_states(to, line_no, &mut n_states)?;
        match transitions.get(&(from, col)) {
            Some(&existing) if existing != to => {
                return Err(Error::Nondeterministic {
                    line: line_no,
                    state: from,
                    symbol: alphabet.symbols()[col] as char,
                });
            }
            _ => {
                transitions.insert((from, col), to);
            }
        }
    }

    let start = start.ok_or(Error::MissingStart)?;
    if !accept_seen {
        return Err(Error::MissingAccept);
    }

    let mut rows = vec![vec![None; k]; n_states];
    for ((from, col), to) in transitions {
        rows[from][col] = Some(to);
    }
    let mut accepting = vec![false; n_states];
    for q in accepting_set {
        accepting[q] = true;
    }

    Ok(Dfa::from_partial(alphabet.clone(), rows, start, accepting))
}

fn grow_states(q: usize, line: usize, n_states: &mut usize) -> Result<()> {
    if q >= MAX_DFA_STATES {
        return Err(Error::StateIndexTooLarge { line });
    }
    *n_states = (*n_states).max(q + 1);
    Ok(())
}

fn strip_trailing_punct(tok: &str) -> &str {
    tok.trim_end_matches([',', '}', ')'])
}

/// `q<digits>` with a value bound; anything else is `None`.
fn parse_q_state(tok: &str) -> Option<usize> {
    let digits = tok.strip_prefix('q')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: usize = digits.parse().ok()?;
    if value > MAX_STATE_NUMBER {
        return None;
    }
    Some(value)
}

/// Scans `( q<i> , c ) -> q<j>` tolerantly: arbitrary junk between the
/// from-state digits and the comma, no required closing parenthesis,
/// whitespace anywhere between tokens.
fn parse_transition(
    line: &str,
    line_no: usize,
    alphabet: &Alphabet,
) -> Result<Option<(usize, usize, usize)>> {
    let bytes = line.as_bytes();
    let mut p = 0;

    while p < bytes.len() && bytes[p] != b'(' {
        p += 1;
    }
    if p == bytes.len() {
        return Ok(None);
    }
    p += 1;
    p = skip_space(bytes, p);
    if p == bytes.len() || bytes[p] != b'q' {
        return Err(Error::SpecLine {
            line: line_no,
            msg: "bad transition (missing q)",
        });
    }
    p += 1;
    let from = match scan_number(bytes, &mut p, line_no)? {
        Some(v) => v,
        None => {
            return Err(Error::SpecLine {
                line: line_no,
                msg: "bad from-state",
            })
        }
    };

    while p < bytes.len() && bytes[p] != b',' {
        p += 1;
    }
    if p == bytes.len() {
        return Err(Error::SpecLine {
            line: line_no,
            msg: "bad transition (missing comma)",
        });
    }
    p += 1;
    p = skip_space(bytes, p);
    if p == bytes.len() {
        return Err(Error::SpecLine {
            line: line_no,
            msg: "missing symbol",
        });
    }
    let symbol = bytes[p];
    p += 1;
    let col = alphabet
        .index_of(symbol)
        .ok_or(Error::SymbolNotInAlphabet {
            line: line_no,
            symbol: symbol as char,
        })?;

    let arrow = bytes[p..]
        .windows(2)
        .position(|w| w == b"->")
        .ok_or(Error::SpecLine {
            line: line_no,
            msg: "missing ->",
        })?;
    p += arrow + 2;
    p = skip_space(bytes, p);
    if p == bytes.len() || bytes[p] != b'q' {
        return Err(Error::SpecLine {
            line: line_no,
            msg: "bad to-state (missing q)",
        });
    }
    p += 1;
    let to = match scan_number(bytes, &mut p, line_no)? {
        Some(v) => v,
        None => {
            return Err(Error::SpecLine {
                line: line_no,
                msg: "bad to-state digits",
            })
        }
    };

    Ok(Some((from, col, to)))
}

fn skip_space(bytes: &[u8], mut p: usize) -> usize {
    while p < bytes.len() && bytes[p].is_ascii_whitespace() {
        p += 1;
    }
    p
}

/// Reads a digit run at `*p`; `Ok(None)` if the first byte is not a digit,
/// an error if the value overflows the state-number bound.
fn scan_number(bytes: &[u8], p: &mut usize, line_no: usize) -> Result<Option<usize>> {
    if *p == bytes.len() || !bytes[*p].is_ascii_digit() {
        return Ok(None);
    }
    let mut value = 0usize;
    while *p < bytes.len() && bytes[*p].is_ascii_digit() {
        value = value * 10 + usize::from(bytes[*p] - b'0');
        if value > MAX_STATE_NUMBER {
            return Err(Error::StateIndexTooLarge { line: line_no });
        }
        *p += 1;
    }
    Ok(Some(value))
}
