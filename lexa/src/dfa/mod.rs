//! # Deterministic finite automata
//! A [`Dfa`] is produced by the subset construction ([`crate::nfa::Nfa::to_dfa`]) and
//! remembers, for each of its states, the set of NFA states that state stands for. The
//! transition function is partial: a symbol with no valid move simply has no entry, and no
//! trap state is ever materialized. The alphabet is fixed at construction and shared via
//! `Rc`, so cloning a DFA is cheap.
//!
//! ## Minimization
//! [`Dfa::minimized`] merges all non-distinguishable states using the table-filling
//! algorithm: every unordered pair of states starts out unmarked, pairs disagreeing on
//! acceptance are marked, and marking propagates backwards through transitions until a
//! fixpoint is reached. A pair where exactly one side has a transition on some symbol is
//! distinguishable by that symbol alone. The unmarked pairs are then collapsed with a
//! union-find, with the smallest state id of a class acting as its representative, which
//! makes the output deterministic. Minimization is idempotent.
//!
//! ```
//! use lexa::regex::Regex;
//!
//! let dfa = Regex::compile("(a|b)*abb")
//!     .to_nfa()
//!     .unwrap()
//!     .to_dfa(&['a', 'b']);
//! let minimized = dfa.minimized();
//! assert_eq!(minimized.states().len(), 4);
//! assert!(minimized.accepts("aabb"));
//! assert!(!minimized.accepts("abab"));
//! ```
//!
//! ## Evaluation
//! [`Dfa::accepts`] checks a whole string; [`Dfa::evaluator`] hands out a [`DfaEvaluator`]
//! for stepping the automaton one character at a time, which is what the tokenizer uses to
//! find the longest match at a position. The evaluator holds a borrow of the DFA and its
//! own cursor, so any number of them can run over the same automaton at once.

use crate::table::Table;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

pub mod eval;

pub use eval::DfaEvaluator;

/// A deterministic finite automaton over an explicit alphabet. Each state keeps the
/// NFA-state subset it was built from, its accepting flag and one optional transition
/// per alphabet symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Rc<[char]>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) initial_state: usize,
}

/// A state in a DFA. `transitions` is parallel to the owning automaton's alphabet;
/// `None` means the symbol has no valid move from this state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) subset: Vec<usize>,
    pub(crate) accepting: bool,
    pub(crate) transitions: Vec<Option<usize>>,
}

impl DfaState {
    /// Checks if this state is accepting
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// The sorted set of NFA state indices this DFA state represents
    pub fn nfa_subset(&self) -> &[usize] {
        self.subset.as_slice()
    }

    /// Gets the transitions of this state, one entry per element of the alphabet,
    /// in the alphabet's ordering
    pub fn transitions(&self) -> &[Option<usize>] {
        self.transitions.as_slice()
    }
}

/// Union-find with path compression and union by rank, used to collapse the
/// unmarked pairs of the distinguishability table into equivalence classes.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        UnionFind {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            current = mem::replace(&mut self.parent[current], root);
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

impl Dfa {
    /// Gets the alphabet of this DFA
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Gets the states of this DFA
    pub fn states(&self) -> &[DfaState] {
        self.states.as_slice()
    }

    /// Gets the initial state of this DFA
    pub fn initial_state(&self) -> &DfaState {
        &self.states[self.initial_state]
    }

    /// Get the index of the initial state of this DFA
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    /// Gets an evaluator, which is a struct that is used to evaluate strings with the
    /// automaton
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Checks if this automaton accepts the given string. Characters outside the
    /// alphabet, or a missing transition, reject immediately.
    pub fn accepts(&self, input: &str) -> bool {
        let mut eval = self.evaluator();
        for symbol in input.chars() {
            if eval.step(symbol).is_none() {
                return false;
            }
        }
        eval.is_accepting()
    }

    /// Builds an equivalent DFA with the minimum number of states for the recognized
    /// language, using the table-filling algorithm. Pairs are canonicalized with the
    /// lower state id first; a pair is marked when the states disagree on acceptance,
    /// when exactly one of them lacks a transition on some symbol, or when some symbol
    /// leads it into an already-marked pair. Unmarked pairs are merged via union-find,
    /// and each class is represented by its smallest state id, so repeated calls
    /// produce identical automata.
    pub fn minimized(&self) -> Dfa {
        let n = self.states.len();
        if n <= 1 {
            return self.clone();
        }

        let pair = |p: usize, q: usize| if p < q { p * n + q } else { q * n + p };
        let mut marked = vec![false; n * n];

        for p in 0..n {
            for q in (p + 1)..n {
                if self.states[p].accepting != self.states[q].accepting {
                    marked[pair(p, q)] = true;
                }
            }
        }

        let mut changed = true;
        while changed {
            changed = false;
            for p in 0..n {
                for q in (p + 1)..n {
                    if marked[pair(p, q)] {
                        continue;
                    }
                    let distinguishable = (0..self.alphabet.len()).any(|c| {
                        match (self.states[p].transitions[c], self.states[q].transitions[c]) {
                            (None, None) => false,
                            (Some(_), None) | (None, Some(_)) => true,
                            (Some(pt), Some(qt)) => pt != qt && marked[pair(pt, qt)],
                        }
                    });
                    if distinguishable {
                        marked[pair(p, q)] = true;
                        changed = true;
                    }
                }
            }
        }

        let mut partition = UnionFind::new(n);
        for p in 0..n {
            for q in (p + 1)..n {
                if !marked[pair(p, q)] {
                    partition.union(p, q);
                }
            }
        }

        // Iterating states in ascending order makes the first member of each class its
        // representative, i.e. the smallest id
        let mut class_of = vec![0usize; n];
        let mut representatives: Vec<usize> = Vec::new();
        let mut class_index: HashMap<usize, usize> = HashMap::new();
        for state in 0..n {
            let root = partition.find(state);
            let class = *class_index.entry(root).or_insert_with(|| {
                representatives.push(state);
                representatives.len() - 1
            });
            class_of[state] = class;
        }

        let mut subsets: Vec<Vec<usize>> = vec![Vec::new(); representatives.len()];
        for state in 0..n {
            subsets[class_of[state]].extend(self.states[state].subset.iter().copied());
        }

        let states = representatives
            .iter()
            .enumerate()
            .map(|(class, &rep)| {
                let mut subset = mem::take(&mut subsets[class]);
                subset.sort_unstable();
                subset.dedup();
                DfaState {
                    subset,
                    accepting: self.states[rep].accepting,
                    transitions: self.states[rep]
                        .transitions
                        .iter()
                        .map(|transition| transition.map(|target| class_of[target]))
                        .collect(),
                }
            })
            .collect();

        Dfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state: class_of[self.initial_state],
        }
    }

    /// Generates a transition table of this DFA suitable for printing. States are shown
    /// by their index, the initial state is marked with `→`, accepting states with `*`,
    /// and a missing transition with `-`.
    pub fn to_table(&self) -> String {
        let mut table = Table::default();

        let mut header = vec![String::new(), String::new(), String::new()];
        header.extend(self.alphabet.iter().map(|c| c.to_string()));
        table.push_row(header);

        for (idx, state) in self.states.iter().enumerate() {
            let mut row = vec![
                if idx == self.initial_state {
                    "→".to_string()
                } else {
                    String::new()
                },
                if state.accepting {
                    "*".to_string()
                } else {
                    String::new()
                },
                idx.to_string(),
            ];
            row.extend(state.transitions.iter().map(|transition| {
                transition.map_or_else(|| "-".to_string(), |target| target.to_string())
            }));
            table.push_row(row);
        }
        table.render(" ")
    }
}
