use hashbrown::HashMap;
use std::collections::VecDeque;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::fa::dfa::Dfa;
use crate::fa::enfa::Enfa;
use crate::fa::state_set::StateSet;

/// Hard cap on DFA states discovered during determinization.
pub const MAX_DFA_STATES: usize = 4096;

/// ε-closure subset construction.
///
/// DFA state 0 is the ε-closure of the NFA start; further states are
/// discovered breadth-first, per state in alphabet order. Each ε-closed set
/// is looked up by content (the bitset keys the map directly), so ids are
/// assigned in discovery order. An empty move leaves the cell undefined and
/// completion adjoins the dead state at the end.
pub fn determinize(enfa: &Enfa, alphabet: &Alphabet) -> Result<Dfa> {
    let n_nfa = enfa.n_states();
    let k = alphabet.len();

    let initial = enfa.epsilon_closure(&StateSet::singleton(n_nfa, enfa.start()));

    let mut sets: Vec<StateSet> = Vec::new();
    let mut lookup: HashMap<StateSet, usize> = HashMap::new();
    let mut accepting: Vec<bool> = Vec::new();
    let mut rows: Vec<Vec<Option<usize>>> = Vec::new();

    accepting.push(initial.contains(enfa.accept()));
    lookup.insert(initial.clone(), 0);
    sets.push(initial);
    rows.push(vec![None; k]);

    let mut queue = VecDeque::from([0usize]);
    while let Some(id) = queue.pop_front() {
        let current = sets[id].clone();
        for (col, &sym) in alphabet.symbols().iter().enumerate() {
            let moved = enfa.move_on(&current, sym);
            if moved.is_empty() {
                continue;
            }
            let closure = enfa.epsilon_closure(&moved);
            let next = match lookup.get(&closure) {
                Some(&existing) => existing,
                None => {
                    if sets.len() >= MAX_DFA_STATES {
                        return Err(Error::TooManyDfaStates);
                    }
                    let fresh = sets.len();
                    accepting.push(closure.contains(enfa.accept()));
                    lookup.insert(closure.clone(), fresh);
                    sets.push(closure);
                    rows.push(vec![None; k]);
                    queue.push_back(fresh);
                    fresh
                }
            };
            rows[id][col] = Some(next);
        }
    }

    Ok(Dfa::from_partial(alphabet.clone(), rows, 0, accepting))
}
