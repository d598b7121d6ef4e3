/// Anything that decides membership of a byte string in a regular language.
///
/// Both ends of the pipeline implement this: the Thompson ε-NFA by closed-set
/// simulation and the compiled DFA by table walking, so tests can play one
/// against the other.
pub trait Language {
    fn accepts(&self, input: &[u8]) -> bool;

    fn accepts_str(&self, input: &str) -> bool {
        self.accepts(input.as_bytes())
    }
}
