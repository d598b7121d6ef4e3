use smallvec::SmallVec;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::fa::state_set::StateSet;
use crate::language::Language;
use crate::regex::parser::{CONCAT_OP, EPSILON_TOKEN};

/// Hard cap on ε-NFA arena size.
pub const MAX_NFA_STATES: usize = 4096;

/// An edge owned by its source state; `label == None` is an ε-edge.
#[derive(Debug, Clone, Copy)]
struct Edge {
    to: usize,
    label: Option<u8>,
}

#[derive(Debug, Clone, Default)]
struct NfaState {
    edges: SmallVec<[Edge; 4]>,
}

/// A Thompson ε-NFA: an arena of states indexed by dense ids, one entry
/// state and one accepting state.
///
/// Every sub-automaton built during construction keeps the same invariant
/// (unique start, unique accept), which is what makes the fragment fold
/// below compositional.
#[derive(Debug, Clone)]
pub struct Enfa {
    states: Vec<NfaState>,
    start: usize,
    accept: usize,
}

#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: usize,
    accept: usize,
}

fn pop(stack: &mut Vec<Fragment>) -> Result<Fragment> {
    stack
        .pop()
        .ok_or(Error::Syntax("invalid postfix (stack underflow)"))
}

impl Enfa {
    /// Builds the ε-NFA for a postfix regex over `alphabet`.
    ///
    /// The postfix alphabet is: alphabet symbols, the internal epsilon
    /// token, and the three operators (concatenation, union as `|` or `+`,
    /// star). Anything else is a construction bug upstream.
    pub fn from_postfix(postfix: &[u8], alphabet: &Alphabet) -> Result<Self> {
        let mut enfa = Enfa {
            states: Vec::new(),
            start: 0,
            accept: 0,
        };
        let mut stack: Vec<Fragment> = Vec::new();

        for &tok in postfix {
            match tok {
                _ if alphabet.contains(tok) => {
                    let frag = enfa.leaf(Some(tok))?;
                    stack.push(frag);
                }
                EPSILON_TOKEN => {
                    let frag = enfa.leaf(None)?;
                    stack.push(frag);
                }
                CONCAT_OP => {
                    let second = pop(&mut stack)?;
                    let first = pop(&mut stack)?;
                    enfa.add_edge(first.accept, second.start, None);
                    stack.push(Fragment {
                        start: first.start,
                        accept: second.accept,
                    });
                }
                b'|' | b'+' => {
                    let second = pop(&mut stack)?;
                    let first = pop(&mut stack)?;
                    let start = enfa.new_state()?;
                    let accept = enfa.new_state()?;
                    enfa.add_edge(start, first.start, None);
                    enfa.add_edge(start, second.start, None);
                    enfa.add_edge(first.accept, accept, None);
                    enfa.add_edge(second.accept, accept, None);
                    stack.push(Fragment { start, accept });
                }
                b'*' => {
                    let inner = pop(&mut stack)?;
                    let start = enfa.new_state()?;
                    let accept = enfa.new_state()?;
                    enfa.add_edge(start, inner.start, None);
                    enfa.add_edge(start, accept, None);
                    enfa.add_edge(inner.accept, inner.start, None);
                    enfa.add_edge(inner.accept, accept, None);
                    stack.push(Fragment { start, accept });
                }
                _ => return Err(Error::Syntax("invalid postfix token")),
            }
        }

        if stack.len() != 1 {
            return Err(Error::Syntax("invalid postfix (stack not singleton)"));
        }
        let frag = stack.pop().unwrap();
        enfa.start = frag.start;
        enfa.accept = frag.accept;
        Ok(enfa)
    }

    fn leaf(&mut self, label: Option<u8>) -> Result<Fragment> {
        let start = self.new_state()?;
        let accept = self.new_state()?;
        self.add_edge(start, accept, label);
        Ok(Fragment { start, accept })
    }

    fn new_state(&mut self) -> Result<usize> {
        if self.states.len() >= MAX_NFA_STATES {
            return Err(Error::TooManyNfaStates);
        }
        self.states.push(NfaState::default());
        Ok(self.states.len() - 1)
    }

    fn add_edge(&mut self, from: usize, to: usize, label: Option<u8>) {
        self.states[from].edges.push(Edge { to, label });
    }

    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn accept(&self) -> usize {
        self.accept
    }

    /// The least superset of `set` closed under ε-edges (BFS worklist).
    pub fn epsilon_closure(&self, set: &StateSet) -> StateSet {
        let mut closure = set.clone();
        let mut queue: Vec<usize> = set.iter().collect();
        while let Some(state) = queue.pop() {
            for edge in &self.states[state].edges {
                if edge.label.is_none() && closure.insert(edge.to) {
                    queue.push(edge.to);
                }
            }
        }
        closure
    }

    /// All states reachable from `set` by one edge labeled `symbol`.
    pub fn move_on(&self, set: &StateSet, symbol: u8) -> StateSet {
        let mut out = StateSet::new(self.states.len());
        for state in set.iter() {
            for edge in &self.states[state].edges {
                if edge.label == Some(symbol) {
                    out.insert(edge.to);
                }
            }
        }
        out
    }
}

impl Language for Enfa {
    fn accepts(&self, input: &[u8]) -> bool {
        let start = StateSet::singleton(self.states.len(), self.start);
        let mut current = self.epsilon_closure(&start);
        for &b in input {
            current = self.epsilon_closure(&self.move_on(&current, b));
            if current.is_empty() {
                return false;
            }
        }
        current.contains(self.accept)
    }
}
