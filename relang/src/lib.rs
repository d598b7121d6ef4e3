//! Regular-language equivalence core: compile a regex or a hand-written DFA
//! spec into a canonical complete DFA table, and decide behavioral equality
//! of two tables on a test set.

pub mod alphabet;
pub mod checker;
pub mod dfa_spec;
pub mod error;
pub mod fa;
pub mod language;
pub mod regex;
pub mod table;

pub use error::{Error, Result};
