pub mod parser;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::fa::dfa::Dfa;
use crate::fa::enfa::Enfa;
use crate::fa::subset;

/// Parses a regex line into its Thompson ε-NFA.
pub fn to_enfa(regex_line: &str, alphabet: &Alphabet) -> Result<Enfa> {
    let preprocessed = parser::preprocess(regex_line);
    if preprocessed.is_empty() {
        return Err(Error::EmptyRegex);
    }
    parser::validate(&preprocessed, alphabet)?;
    let explicit = parser::insert_concat(&preprocessed, alphabet);
    let postfix = parser::to_postfix(&explicit, alphabet)?;
    Enfa::from_postfix(&postfix, alphabet)
}

/// The full front half of the pipeline: regex text to minimized DFA.
///
/// Thompson construction, ε-closure subset construction, dead-state
/// completion, Hopcroft minimization, in that order, with each stage's
/// compile-time bounds enforced where the states are created.
pub fn compile(regex_line: &str, alphabet: &Alphabet) -> Result<Dfa> {
    let enfa = to_enfa(regex_line, alphabet)?;
    let dfa = subset::determinize(&enfa, alphabet)?;
    Ok(dfa.minimize())
}
