//! The canonical DFA table, the interchange artifact all three tools agree
//! on:
//!
//! ```text
//! ALPHABET <k> <k-byte-string>
//! STATES <n>
//! START <s>
//! ACCEPT <m> <a0> ... <a(m-1)>
//! TRANS
//! <n rows of k integers>
//! END
//! ```
//!
//! Parsing is a whitespace-token scan, so the trailing newline after `END`
//! is optional and spacing inside rows is tolerated on the way in; rendering
//! is byte-exact.

use std::path::Path;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::fa::dfa::Dfa;

/// Renders the canonical table text for a DFA.
pub fn render(dfa: &Dfa) -> String {
    let k = dfa.alphabet().len();
    let mut out = String::new();
    out.push_str(&format!("ALPHABET {} {}\n", k, dfa.alphabet().as_str()));
    out.push_str(&format!("STATES {}\n", dfa.n_states()));
    out.push_str(&format!("START {}\n", dfa.start()));
    let accept = dfa.accept_indices();
    out.push_str(&format!("ACCEPT {}", accept.len()));
    for a in accept {
        out.push_str(&format!(" {}", a));
    }
    out.push('\n');
    out.push_str("TRANS\n");
    for s in 0..dfa.n_states() {
        for col in 0..k {
            out.push_str(&format!("{}", dfa.step(s, col)));
            out.push(if col == k - 1 { '\n' } else { ' ' });
        }
    }
    out.push_str("END\n");
    out
}

/// Parses a canonical table, enforcing every range invariant the format
/// promises: alphabet length and distinctness, start and accept indices in
/// range, and all `n·k` cells in `[0, n)`.
pub fn parse(text: &str) -> Result<Dfa> {
    let mut tokens = text.split_whitespace();

    expect(&mut tokens, "ALPHABET")?;
    let k: usize = integer(&mut tokens, "alphabet size")?;
    if k == 0 || k > crate::alphabet::MAX_ALPHABET {
        return Err(Error::BadTable("alphabet size range"));
    }
    let alpha_tok = tokens.next().ok_or(Error::BadTable("alphabet string"))?;
    if alpha_tok.len() != k {
        return Err(Error::BadTable("alphabet string length mismatch"));
    }
    let alphabet = Alphabet::from_table_bytes(alpha_tok.as_bytes())?;

    expect(&mut tokens, "STATES")?;
    let n: usize = integer(&mut tokens, "states")?;
    if n == 0 {
        return Err(Error::BadTable("states must be positive"));
    }

    expect(&mut tokens, "START")?;
    let start: usize = integer(&mut tokens, "start")?;
    if start >= n {
        return Err(Error::BadTable("start out of range"));
    }

    expect(&mut tokens, "ACCEPT")?;
    let m: usize = integer(&mut tokens, "accept count")?;
    if m > n {
        return Err(Error::BadTable("accept count range"));
    }
    let mut accepting = vec![false; n];
    for _ in 0..m {
        let a: usize = integer(&mut tokens, "accept list")?;
        if a >= n {
            return Err(Error::BadTable("accepting state out of range"));
        }
        accepting[a] = true;
    }

    expect(&mut tokens, "TRANS")?;
    let mut trans = Vec::with_capacity(n * k);
    for _ in 0..n * k {
        let t: usize = integer(&mut tokens, "transition table")?;
        if t >= n {
            return Err(Error::BadTable("transition out of range"));
        }
        trans.push(t);
    }

    expect(&mut tokens, "END")?;

    Ok(Dfa::from_total(alphabet, trans, start, accepting))
}

pub fn read_file(path: &Path) -> Result<Dfa> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

pub fn write_file(dfa: &Dfa, path: &Path) -> Result<()> {
    std::fs::write(path, render(dfa))?;
    Ok(())
}

fn expect<'a>(tokens: &mut impl Iterator<Item = &'a str>, keyword: &str) -> Result<()> {
    let tok = tokens
        .next()
        .ok_or(Error::BadTable("unexpected EOF while reading DFA"))?;
    if tok != keyword {
        return Err(Error::BadTable("unexpected header token"));
    }
    Ok(())
}

fn integer<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<usize> {
    tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(Error::BadTable(what))
}
