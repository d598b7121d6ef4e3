use thiserror::Error;

/// Errors surfaced by the equivalence pipeline.
///
/// Every failure is fatal for the invoking tool: nothing is retried and no
/// error is recovered below the process boundary. Display texts double as
/// the user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // Alphabet validation
    #[error("alphabet is empty")]
    EmptyAlphabet,
    #[error("alphabet too large")]
    AlphabetTooLarge,
    #[error("alphabet contains non-printable byte")]
    NonPrintableSymbol,
    #[error("alphabet contains non-ASCII byte")]
    NonAsciiSymbol,
    #[error("alphabet contains meta-operator (| + * ( ) .)")]
    RegexMetaInAlphabet,
    #[error("alphabet contains forbidden punctuation")]
    SpecMetaInAlphabet,
    #[error("alphabet contains duplicate symbol")]
    DuplicateSymbol,

    // Regex compilation
    #[error("empty regex")]
    EmptyRegex,
    #[error("regex must not contain explicit '.'")]
    ExplicitDot,
    #[error("regex contains non-ASCII byte; use 'ε' or <eps> for epsilon, other symbols must be single-byte")]
    NonAsciiInRegex,
    #[error("regex contains invalid character: '{0}'")]
    InvalidRegexChar(char),
    #[error("mismatched parentheses: extra ')'")]
    ExtraCloseParen,
    #[error("mismatched parentheses: unclosed '('")]
    UnclosedParen,
    #[error("{0}")]
    Syntax(&'static str),

    // Compile-time bounds
    #[error("too many NFA states")]
    TooManyNfaStates,
    #[error("too many DFA states")]
    TooManyDfaStates,

    // DFA-spec compilation
    #[error("missing Start line")]
    MissingStart,
    #[error("missing Accept line")]
    MissingAccept,
    #[error("Start line must be: Start: q<number>")]
    BadStartLine,
    #[error("line {line}: {msg}")]
    SpecLine { line: usize, msg: &'static str },
    #[error("line {line}: symbol '{symbol}' not in alphabet")]
    SymbolNotInAlphabet { line: usize, symbol: char },
    #[error("line {line}: nondeterministic transition for (q{state},{symbol})")]
    Nondeterministic {
        line: usize,
        state: usize,
        symbol: char,
    },
    #[error("line {line}: state index too large")]
    StateIndexTooLarge { line: usize },

    // Canonical table parsing
    #[error("bad DFA format: {0}")]
    BadTable(&'static str),
    #[error("bad DFA: duplicate symbol in alphabet")]
    TableDuplicateSymbol,

    // Tests file parsing
    #[error("tests line {line}: {msg}")]
    TestsLine { line: usize, msg: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
