//! # Nondeterministic finite automata
//! The [`Nfa`] produced by Thompson's construction ([`crate::regex::Regex::to_nfa`]) has
//! exactly one start and one accept state. States live in an arena `Vec` owned by the
//! automaton and are identified by their index; transitions store the target index together
//! with an optional symbol, where `None` marks an ε-transition taken without consuming
//! input. The graphs are inherently cyclic (`*` and `+` loop back), so all traversals here
//! use explicit worklists rather than recursion.
//!
//! The only operation beyond inspection is [`Nfa::to_dfa`], the subset construction: every
//! DFA state stands for the set of NFA states the automaton could be in, and two DFA states
//! are the same exactly when their underlying subsets are equal. Only subsets reachable from
//! the ε-closure of the start state are materialized, and a symbol with an empty move set
//! yields no transition at all rather than a trap state.
//!
//! ```
//! use lexa::regex::Regex;
//!
//! let nfa = Regex::compile("a*").to_nfa().unwrap();
//! // a* matches the empty string: the accept state is in the start state's ε-closure
//! let closure = nfa.epsilon_closure([nfa.start_index()]);
//! assert!(closure.contains(&nfa.accept_index()));
//!
//! let dfa = nfa.to_dfa(&['a']);
//! assert!(dfa.accepts(""));
//! assert!(dfa.accepts("aaa"));
//! ```

use crate::dfa::{Dfa, DfaState};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A nondeterministic finite automaton with a single start and a single accept state.
/// States are owned by the automaton and addressed by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: usize,
    pub(crate) accept: usize,
}

/// A state in an NFA: its outgoing transitions in insertion order, and whether it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) transitions: Vec<Transition>,
    pub(crate) accepting: bool,
}

/// An edge of the automaton graph. `symbol` is `None` for an ε-transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub(crate) symbol: Option<char>,
    pub(crate) target: usize,
}

impl NfaState {
    /// Checks if this state is accepting
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Gets the outgoing transitions of this state
    pub fn transitions(&self) -> &[Transition] {
        self.transitions.as_slice()
    }
}

impl Transition {
    /// The symbol consumed by this transition, or `None` for an ε-transition
    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }

    /// The index of the target state
    pub fn target(&self) -> usize {
        self.target
    }
}

impl Nfa {
    /// Gets the states of this NFA
    pub fn states(&self) -> &[NfaState] {
        self.states.as_slice()
    }

    /// Gets the index of the start state
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Gets the index of the accept state
    pub fn accept_index(&self) -> usize {
        self.accept
    }

    /// Computes the ε-closure of a set of states: the smallest superset closed under
    /// ε-transitions. Uses a worklist since ε-cycles are common in Thompson automata.
    pub fn epsilon_closure(&self, seed: impl IntoIterator<Item = usize>) -> HashSet<usize> {
        let mut all: HashSet<usize> = seed.into_iter().collect();
        let mut work: Vec<usize> = all.iter().copied().collect();
        while let Some(state) = work.pop() {
            for transition in &self.states[state].transitions {
                if transition.symbol.is_none() && all.insert(transition.target) {
                    work.push(transition.target);
                }
            }
        }
        all
    }

    /// The union of all targets reachable from `from` by consuming `symbol` (ε-transitions
    /// excluded).
    fn moves(&self, from: &[usize], symbol: char) -> HashSet<usize> {
        from.iter()
            .flat_map(|&state| &self.states[state].transitions)
            .filter(|transition| transition.symbol == Some(symbol))
            .map(|transition| transition.target)
            .collect()
    }

    /// Converts this NFA to a DFA over the given alphabet using the subset construction.
    /// Each DFA state corresponds to one set of NFA states; the sets are kept in sorted
    /// order so that set equality (not creation order) decides state identity. The start
    /// state of the result is always index 0, and a DFA state accepts exactly when its
    /// subset contains an accepting NFA state. Symbols whose move set is empty get no
    /// transition; no trap state is materialized.
    pub fn to_dfa(&self, alphabet: &[char]) -> Dfa {
        let alphabet: Rc<[char]> = alphabet.into();
        let start_subset = set_to_vec(&self.epsilon_closure([self.start]));

        // Mapping from canonical subset to DFA state index
        let mut subset_ids: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut subsets: Vec<Vec<usize>> = Vec::new();
        let mut transition_rows: Vec<Vec<Option<usize>>> = Vec::new();

        subset_ids.insert(start_subset.clone(), 0);
        subsets.push(start_subset);
        transition_rows.push(Vec::new());

        let mut to_explore = vec![0usize];
        while let Some(id) = to_explore.pop() {
            let mut row = Vec::with_capacity(alphabet.len());
            for &symbol in alphabet.iter() {
                let moved = self.moves(&subsets[id], symbol);
                if moved.is_empty() {
                    row.push(None);
                    continue;
                }
                let target_subset = set_to_vec(&self.epsilon_closure(moved));
                let target = match subset_ids.get(&target_subset) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = subsets.len();
                        subset_ids.insert(target_subset.clone(), fresh);
                        subsets.push(target_subset);
                        transition_rows.push(Vec::new());
                        to_explore.push(fresh);
                        fresh
                    }
                };
                row.push(Some(target));
            }
            transition_rows[id] = row;
        }

        let states = subsets
            .into_iter()
            .zip(transition_rows)
            .map(|(subset, transitions)| {
                let accepting = subset.iter().any(|&state| self.states[state].accepting);
                DfaState {
                    subset,
                    accepting,
                    transitions,
                }
            })
            .collect();

        Dfa {
            alphabet,
            states,
            initial_state: 0,
        }
    }
}

/// Converts a HashSet to a sorted Vec, the canonical form used to key subsets
fn set_to_vec(set: &HashSet<usize>) -> Vec<usize> {
    let mut vec: Vec<usize> = set.iter().copied().collect();
    vec.sort_unstable();
    vec
}

#[cfg(test)]
mod tests {
    use crate::regex::Regex;

    #[test]
    fn closure_follows_epsilon_chains() {
        // a|b starts with ε-branches to both literal fragments
        let nfa = Regex::compile("a|b").to_nfa().unwrap();
        let closure = nfa.epsilon_closure([nfa.start_index()]);
        assert!(closure.len() >= 3);
        assert!(closure.contains(&nfa.start_index()));
    }

    #[test]
    fn subset_construction_reuses_equal_subsets() {
        // (a|b)* keeps returning to the same subset on both symbols
        let dfa = Regex::compile("(a|b)*")
            .to_nfa()
            .unwrap()
            .to_dfa(&['a', 'b']);
        assert!(dfa.states().len() <= 3);
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("abba"));
    }

    #[test]
    fn missing_moves_yield_no_transition() {
        let dfa = Regex::compile("ab").to_nfa().unwrap().to_dfa(&['a', 'b']);
        // after consuming "ab" there is nowhere to go on either symbol
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("abb"));
        assert!(!dfa.accepts("aba"));
    }

    #[test]
    fn accepting_iff_subset_contains_accepting_state() {
        let nfa = Regex::compile("a*").to_nfa().unwrap();
        let dfa = nfa.to_dfa(&['a']);
        for state in dfa.states() {
            let expected = state
                .nfa_subset()
                .iter()
                .any(|&idx| nfa.states()[idx].is_accepting());
            assert_eq!(state.is_accepting(), expected);
        }
    }

    #[test]
    fn symbols_outside_alphabet_never_match() {
        // 'c' is legal in the pattern but absent from the alphabet
        let dfa = Regex::compile("a|c").to_nfa().unwrap().to_dfa(&['a', 'b']);
        assert!(dfa.accepts("a"));
        assert!(!dfa.accepts("c"));
    }
}
