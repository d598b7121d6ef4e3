use std::collections::VecDeque;

use proptest::prelude::*;

use relang::alphabet::Alphabet;
use relang::fa::dfa::Dfa;
use relang::language::Language;
use relang::{regex, table, Error};

fn ab() -> Alphabet {
    Alphabet::parse_line("ab").unwrap()
}

/// Structural DFA equality up to state renaming: parallel BFS from the two
/// start states must build a consistent bijection.
fn isomorphic(a: &Dfa, b: &Dfa) -> bool {
    if a.n_states() != b.n_states() || a.alphabet() != b.alphabet() {
        return false;
    }
    let k = a.alphabet().len();
    let mut map_ab = vec![usize::MAX; a.n_states()];
    let mut map_ba = vec![usize::MAX; b.n_states()];
    map_ab[a.start()] = b.start();
    map_ba[b.start()] = a.start();
    let mut queue = VecDeque::from([(a.start(), b.start())]);
    while let Some((sa, sb)) = queue.pop_front() {
        if a.is_accepting(sa) != b.is_accepting(sb) {
            return false;
        }
        for col in 0..k {
            let (ta, tb) = (a.step(sa, col), b.step(sb, col));
            match (map_ab[ta], map_ba[tb]) {
                (usize::MAX, usize::MAX) => {
                    map_ab[ta] = tb;
                    map_ba[tb] = ta;
                    queue.push_back((ta, tb));
                }
                (mapped_a, mapped_b) if mapped_a == tb && mapped_b == ta => {}
                _ => return false,
            }
        }
    }
    true
}

#[test]
fn ab_star_emits_the_exact_table() {
    let dfa = regex::compile("(ab)*", &ab()).unwrap();
    assert_eq!(
        table::render(&dfa),
        "ALPHABET 2 ab\nSTATES 3\nSTART 0\nACCEPT 1 0\nTRANS\n1 2\n2 0\n2 2\nEND\n",
        "minimized (ab)* must be the canonical 3-state automaton"
    );
}

#[test]
fn a_star_minimizes_to_two_states() {
    let dfa = regex::compile("a*", &ab()).unwrap();
    assert_eq!(dfa.n_states(), 2, "a* over {{a,b}} is accept + dead");
    assert_eq!(
        table::render(&dfa),
        "ALPHABET 2 ab\nSTATES 2\nSTART 0\nACCEPT 1 0\nTRANS\n0 1\n1 1\nEND\n"
    );
    assert!(dfa.accepts_str(""));
    assert!(dfa.accepts_str("aaa"));
    assert!(!dfa.accepts_str("ab"));
}

#[test]
fn bare_epsilon_accepts_only_the_empty_string() {
    let dfa = regex::compile("<eps>", &ab()).unwrap();
    assert_eq!(dfa.n_states(), 2, "one accepting state plus the dead state");
    assert!(dfa.accepts_str(""));
    assert!(!dfa.accepts_str("a"));
    assert!(!dfa.accepts_str("b"));

    let utf8 = regex::compile("ε", &ab()).unwrap();
    assert_eq!(
        table::render(&dfa),
        table::render(&utf8),
        "both epsilon surface forms compile identically"
    );
}

#[test]
fn universal_language_is_one_state() {
    let dfa = regex::compile("(a|b)*", &ab()).unwrap();
    assert_eq!(
        table::render(&dfa),
        "ALPHABET 2 ab\nSTATES 1\nSTART 0\nACCEPT 1 0\nTRANS\n0 0\nEND\n"
    );
}

#[test]
fn classic_abb_suffix_automaton() {
    let dfa = regex::compile("(a|b)*abb", &ab()).unwrap();
    assert_eq!(dfa.n_states(), 4);
    for accepted in ["abb", "aabb", "babb", "abababb"] {
        assert!(dfa.accepts_str(accepted), "should accept {accepted:?}");
    }
    for rejected in ["", "a", "ab", "abba", "bb"] {
        assert!(!dfa.accepts_str(rejected), "should reject {rejected:?}");
    }
}

#[test]
fn union_spellings_agree() {
    let pipe = regex::compile("ε|a", &Alphabet::parse_line("a").unwrap()).unwrap();
    let plus = regex::compile("<eps>+a", &Alphabet::parse_line("a").unwrap()).unwrap();
    assert_eq!(
        table::render(&pipe),
        table::render(&plus),
        "| and + are the same operator"
    );
    assert_eq!(pipe.n_states(), 3);
}

#[test]
fn single_symbol_alphabet_still_works() {
    let dfa = regex::compile("a*", &Alphabet::parse_line("a").unwrap()).unwrap();
    assert_eq!(
        table::render(&dfa),
        "ALPHABET 1 a\nSTATES 1\nSTART 0\nACCEPT 1 0\nTRANS\n0\nEND\n"
    );
}

#[test]
fn alphabet_order_is_first_seen() {
    let alphabet = Alphabet::parse_line("b, a 0").unwrap();
    let dfa = regex::compile("a", &alphabet).unwrap();
    assert!(
        table::render(&dfa).starts_with("ALPHABET 3 ba0\n"),
        "emitted alphabet keeps input order"
    );
}

#[test]
fn minimization_is_idempotent() {
    for pattern in ["(ab)*", "a*b*", "(a|b)*abb", "<eps>|ab", "a(a|b)*b"] {
        let dfa = regex::compile(pattern, &ab()).unwrap();
        let again = dfa.minimize();
        assert!(
            isomorphic(&dfa, &again),
            "re-minimizing the output of {pattern:?} must change nothing observable"
        );
    }
}

#[test]
fn graphviz_render_names_states_by_index() {
    let dfa = regex::compile("(ab)*", &ab()).unwrap();
    let dot = dfa.to_graphviz();
    assert!(dot.starts_with("digraph finite_state_machine {"));
    assert!(dot.contains("node [shape = doublecircle]; 0 ;"));
    assert!(dot.contains("0 -> 1 [label = \"a\"];"));
    assert!(dot.contains("null -> 0;"));
}

#[test]
fn malformed_regexes_are_rejected() {
    let a = ab();
    assert!(matches!(regex::compile("", &a), Err(Error::EmptyRegex)));
    assert!(matches!(regex::compile("  ", &a), Err(Error::EmptyRegex)));
    assert!(matches!(
        regex::compile("a.b", &a),
        Err(Error::ExplicitDot)
    ));
    assert!(matches!(
        regex::compile("(ab", &a),
        Err(Error::UnclosedParen)
    ));
    assert!(matches!(
        regex::compile("ab)", &a),
        Err(Error::ExtraCloseParen)
    ));
    assert!(matches!(
        regex::compile("axb", &a),
        Err(Error::InvalidRegexChar('x'))
    ));
    assert!(matches!(regex::compile("a|", &a), Err(Error::Syntax(_))));
    assert!(matches!(regex::compile("|a", &a), Err(Error::Syntax(_))));
}

#[derive(Debug, Clone)]
enum Re {
    Sym(char),
    Eps,
    Cat(Box<Re>, Box<Re>),
    Alt(Box<Re>, Box<Re>),
    Star(Box<Re>),
}

fn render_re(re: &Re) -> String {
    match re {
        Re::Sym(c) => c.to_string(),
        Re::Eps => "<eps>".to_string(),
        Re::Cat(a, b) => format!("({}{})", render_re(a), render_re(b)),
        Re::Alt(a, b) => format!("({}|{})", render_re(a), render_re(b)),
        Re::Star(a) => format!("({})*", render_re(a)),
    }
}

fn arb_regex(max_depth: u32) -> impl Strategy<Value = Re> {
    let leaf = prop_oneof![
        Just(Re::Sym('a')),
        Just(Re::Sym('b')),
        Just(Re::Eps),
    ];
    leaf.prop_recursive(max_depth, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Re::Cat(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Re::Alt(Box::new(a), Box::new(b))),
            inner.prop_map(|a| Re::Star(Box::new(a))),
        ]
    })
}

/// Every string over {a, b} of length at most `max_len`.
fn short_strings(max_len: usize) -> Vec<Vec<u8>> {
    let mut out = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for &c in b"ab" {
                let mut extended = word.clone();
                extended.push(c);
                out.push(extended.clone());
                next.push(extended);
            }
        }
        frontier = next;
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// The minimized DFA and the raw Thompson ε-NFA must agree on every
    /// short string, for random regexes of bounded depth.
    #[test]
    fn compiled_dfa_matches_direct_nfa_simulation(re in arb_regex(4)) {
        let alphabet = ab();
        let source = render_re(&re);
        let enfa = regex::to_enfa(&source, &alphabet).unwrap();
        let dfa = regex::compile(&source, &alphabet).unwrap();
        for word in short_strings(5) {
            prop_assert_eq!(
                dfa.accepts(&word),
                enfa.accepts(&word),
                "divergence on {:?} for regex {}",
                String::from_utf8_lossy(&word),
                source
            );
        }
    }
}
