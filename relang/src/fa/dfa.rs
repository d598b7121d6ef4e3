use crate::alphabet::Alphabet;
use crate::language::Language;

/// A complete deterministic finite automaton over a fixed alphabet.
///
/// States are dense integers `0..n_states`; the transition table is flat
/// row-major (`n_states × k`) and total by construction: no cell is ever
/// unset past this module's boundary. Partial automata coming out of subset
/// construction or the spec parser go through [`Dfa::from_partial`], which
/// adjoins the dead state when needed.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Alphabet,
    n_states: usize,
    start: usize,
    accepting: Vec<bool>,
    trans: Vec<usize>,
}

impl Dfa {
    /// Completes a partial transition table.
    ///
    /// If any cell is undefined, a dead state is appended at index
    /// `rows.len()`: non-accepting, self-looping on every symbol, and the
    /// target of every undefined cell. If the table is already total no
    /// state is adjoined.
    pub fn from_partial(
        alphabet: Alphabet,
        rows: Vec<Vec<Option<usize>>>,
        start: usize,
        mut accepting: Vec<bool>,
    ) -> Self {
        let k = alphabet.len();
        let need_dead = rows.iter().any(|row| row.iter().any(|c| c.is_none()));
        let dead = rows.len();
        let n_states = rows.len() + usize::from(need_dead);

        let mut trans = Vec::with_capacity(n_states * k);
        for row in &rows {
            for cell in row {
                trans.push(cell.unwrap_or(dead));
            }
        }
        if need_dead {
            trans.extend(std::iter::repeat(dead).take(k));
            accepting.push(false);
        }

        Dfa {
            alphabet,
            n_states,
            start,
            accepting,
            trans,
        }
    }

    /// Assembles a DFA from an already-total table. The caller vouches for
    /// the range invariants (every cell in range, lengths consistent).
    pub(crate) fn from_total(
        alphabet: Alphabet,
        trans: Vec<usize>,
        start: usize,
        accepting: Vec<bool>,
    ) -> Self {
        let n_states = accepting.len();
        debug_assert_eq!(trans.len(), n_states * alphabet.len());
        Dfa {
            alphabet,
            n_states,
            start,
            accepting,
            trans,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting[state]
    }

    /// Accepting state indices in strictly ascending order.
    pub fn accept_indices(&self) -> Vec<usize> {
        (0..self.n_states).filter(|&s| self.accepting[s]).collect()
    }

    /// Successor of `state` on the symbol in column `col`.
    pub fn step(&self, state: usize, col: usize) -> usize {
        self.trans[state * self.alphabet.len() + col]
    }

    /// Simulates the DFA from its start state.
    ///
    /// Returns `None` if the input contains a byte outside the alphabet;
    /// callers that must distinguish "rejected" from "not even a word over
    /// Σ" (the checker) use this instead of [`Language::accepts`].
    pub fn run(&self, input: &[u8]) -> Option<bool> {
        let mut state = self.start;
        for &b in input {
            let col = self.alphabet.index_of(b)?;
            state = self.step(state, col);
        }
        Some(self.accepting[state])
    }

    /// The minimal DFA for the same language, renamed by equivalence class.
    ///
    /// Class ids come from Hopcroft partition refinement and are the only
    /// stable state identity the canonical table exposes; START is the class
    /// of the original start state and each class's row is read off its
    /// smallest original member.
    pub fn minimize(&self) -> Dfa {
        let (cls, n_classes) = self.refine_partition();
        let k = self.alphabet.len();

        // representative = smallest original state in each class
        let mut rep = vec![usize::MAX; n_classes];
        for s in 0..self.n_states {
            if rep[cls[s]] == usize::MAX {
                rep[cls[s]] = s;
            }
        }

        let mut accepting = vec![false; n_classes];
        for s in 0..self.n_states {
            if self.accepting[s] {
                accepting[cls[s]] = true;
            }
        }

        let mut trans = Vec::with_capacity(n_classes * k);
        for c in 0..n_classes {
            for a in 0..k {
                trans.push(cls[self.step(rep[c], a)]);
            }
        }

        Dfa {
            alphabet: self.alphabet.clone(),
            n_states: n_classes,
            start: cls[self.start],
            accepting,
            trans,
        }
    }

    /// Hopcroft refinement; returns the state→class map and the class count.
    fn refine_partition(&self) -> (Vec<usize>, usize) {
        let n = self.n_states;
        let k = self.alphabet.len();

        let n_accepting = self.accepting.iter().filter(|&&a| a).count();
        if n_accepting == 0 || n_accepting == n {
            // {F, Q∖F} degenerates to a single block; nothing to refine.
            return (vec![0; n], 1);
        }

        // Initial partition {F, Q∖F}, members in ascending state order.
        let mut blocks: Vec<Vec<usize>> = vec![
            (0..n).filter(|&s| self.accepting[s]).collect(),
            (0..n).filter(|&s| !self.accepting[s]).collect(),
        ];
        let mut cls = vec![0usize; n];
        for &s in &blocks[1] {
            cls[s] = 1;
        }

        let mut worklist: Vec<usize> = vec![usize::from(blocks[0].len() > blocks[1].len())];

        // inv[a * n + q] = all p with δ(p, a) = q; discarded after refinement.
        let mut inv: Vec<Vec<usize>> = vec![Vec::new(); k * n];
        for p in 0..n {
            for a in 0..k {
                inv[a * n + self.step(p, a)].push(p);
            }
        }

        let mut mark = vec![false; n];
        while let Some(splitter) = worklist.pop() {
            for a in 0..k {
                mark.fill(false);
                let mut any = false;
                for &q in &blocks[splitter] {
                    for &p in &inv[a * n + q] {
                        mark[p] = true;
                        any = true;
                    }
                }
                if !any {
                    continue;
                }

                // Blocks appended during this pass are revisited, but they
                // are uniform w.r.t. the current mark set, so they never
                // split again within the pass.
                let mut yi = 0;
                while yi < blocks.len() {
                    let hits = blocks[yi].iter().filter(|&&s| mark[s]).count();
                    if hits == 0 || hits == blocks[yi].len() {
                        yi += 1;
                        continue;
                    }

                    let (kept, split): (Vec<usize>, Vec<usize>) =
                        blocks[yi].iter().copied().partition(|&s| mark[s]);
                    blocks[yi] = kept;
                    let newi = blocks.len();
                    blocks.push(split);
                    for &s in &blocks[newi] {
                        cls[s] = newi;
                    }

                    // Worklist rule: if the split block was queued, keep both
                    // halves queued; otherwise queue the smaller half.
                    if worklist.contains(&yi) {
                        worklist.push(newi);
                    } else if blocks[yi].len() <= blocks[newi].len() {
                        worklist.push(yi);
                    } else {
                        worklist.push(newi);
                    }
                    yi += 1;
                }
            }
        }

        let n_classes = blocks.len();
        (cls, n_classes)
    }

    /// Graphviz rendering, for eyeballing automata while debugging.
    pub fn to_graphviz(&self) -> String {
        let mut output = String::from("digraph finite_state_machine {\n");
        output.push_str("\trankdir=LR;\n");
        output.push_str("\tnode [shape = doublecircle]; ");
        for s in self.accept_indices() {
            output.push_str(&format!("{} ", s));
        }
        output.push_str(";\n");
        output.push_str("\tnode [shape = circle];\n");
        for s in 0..self.n_states {
            for (a, &sym) in self.alphabet.symbols().iter().enumerate() {
                output.push_str(&format!(
                    "\t{} -> {} [label = \"{}\"];\n",
                    s,
                    self.step(s, a),
                    sym as char
                ));
            }
        }
        output.push_str("\tnull [label= \"\", shape=none,height=.0,width=.0]\n");
        output.push_str(&format!("\tnull -> {};\n", self.start));
        output.push_str("}\n");
        output
    }
}

impl Language for Dfa {
    fn accepts(&self, input: &[u8]) -> bool {
        self.run(input).unwrap_or(false)
    }
}
