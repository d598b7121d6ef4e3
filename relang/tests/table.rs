use relang::alphabet::Alphabet;
use relang::language::Language;
use relang::{regex, table, Error};

fn compile(pattern: &str, alphabet: &str) -> relang::fa::dfa::Dfa {
    regex::compile(pattern, &Alphabet::parse_line(alphabet).unwrap()).unwrap()
}

#[test]
fn render_parse_round_trip() {
    for pattern in ["(ab)*", "a*b*", "(a|b)*abb", "<eps>"] {
        let dfa = compile(pattern, "ab");
        let text = table::render(&dfa);
        let reparsed = table::parse(&text).unwrap();
        assert_eq!(
            table::render(&reparsed),
            text,
            "round trip must be identity for {pattern:?}"
        );
    }
}

#[test]
fn parse_is_whitespace_tolerant() {
    let text = "ALPHABET 2 ab\n  STATES   3\nSTART 0\nACCEPT 1 0\nTRANS\n1 2   2 0\n2 2\nEND";
    let dfa = table::parse(text).unwrap();
    assert_eq!(dfa.n_states(), 3);
    assert!(dfa.accepts_str("abab"));
    assert!(!dfa.accepts_str("aab"));
}

#[test]
fn trailing_newline_is_optional() {
    let dfa = compile("(ab)*", "ab");
    let text = table::render(&dfa);
    assert!(table::parse(text.trim_end()).is_ok());
}

#[test]
fn simulation_follows_the_table() {
    let text = "ALPHABET 2 ab\nSTATES 3\nSTART 0\nACCEPT 1 0\nTRANS\n1 2\n2 0\n2 2\nEND\n";
    let dfa = table::parse(text).unwrap();
    assert_eq!(dfa.run(b""), Some(true));
    assert_eq!(dfa.run(b"ab"), Some(true));
    assert_eq!(dfa.run(b"aba"), Some(false));
    assert_eq!(dfa.run(b"xy"), None, "foreign bytes are not a rejection");
}

#[test]
fn zero_accept_states_render_bare() {
    let text = "ALPHABET 1 a\nSTATES 1\nSTART 0\nACCEPT 0\nTRANS\n0\nEND\n";
    let dfa = table::parse(text).unwrap();
    assert_eq!(dfa.accept_indices(), Vec::<usize>::new());
    assert_eq!(table::render(&dfa), text);
}

#[test]
fn malformed_tables_are_rejected() {
    let cases = [
        ("", "unexpected EOF while reading DFA"),
        ("BANANA 2 ab", "unexpected header token"),
        ("ALPHABET x ab", "alphabet size"),
        ("ALPHABET 0 ", "alphabet size range"),
        ("ALPHABET 3 ab\nSTATES 1", "alphabet string length mismatch"),
        ("ALPHABET 2 ab\nSTATES 0", "states must be positive"),
        (
            "ALPHABET 2 ab\nSTATES 1\nSTART 5",
            "start out of range",
        ),
        (
            "ALPHABET 2 ab\nSTATES 1\nSTART 0\nACCEPT 2 0 0",
            "accept count range",
        ),
        (
            "ALPHABET 2 ab\nSTATES 1\nSTART 0\nACCEPT 1 3",
            "accepting state out of range",
        ),
        (
            "ALPHABET 2 ab\nSTATES 1\nSTART 0\nACCEPT 1 0\nTRANS\n0 7\nEND",
            "transition out of range",
        ),
        (
            "ALPHABET 2 ab\nSTATES 2\nSTART 0\nACCEPT 1 0\nTRANS\n0 1\nEND",
            "transition table",
        ),
    ];
    for (text, expected) in cases {
        match table::parse(text) {
            Err(Error::BadTable(msg)) => {
                assert_eq!(msg, expected, "wrong diagnostic for {text:?}")
            }
            other => panic!("expected rejection of {text:?}, got {other:?}"),
        }
    }

    assert!(matches!(
        table::parse("ALPHABET 2 aa\nSTATES 1\nSTART 0\nACCEPT 0\nTRANS\n0 0\nEND"),
        Err(Error::TableDuplicateSymbol)
    ));
}

#[test]
fn file_round_trip() {
    let dfa = compile("a*b*", "ab");
    let path = std::env::temp_dir().join("relang_table_round_trip.dfa");
    table::write_file(&dfa, &path).unwrap();
    let reread = table::read_file(&path).unwrap();
    assert_eq!(table::render(&reread), table::render(&dfa));
    std::fs::remove_file(&path).unwrap();
}
