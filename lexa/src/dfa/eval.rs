use crate::dfa::{Dfa, DfaState};
use std::collections::HashMap;

/// Steps a DFA over one character at a time. The evaluator owns its cursor and borrows
/// the automaton read-only, so several evaluators may run over the same DFA at once.
/// Once a character outside the alphabet is seen, or a state has no transition on the
/// character, the evaluator is stuck until [`DfaEvaluator::reset`] is called.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    symbol_map: HashMap<char, usize>,
    current: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    /// Checks if the current state is accepting. A stuck evaluator accepts nothing.
    pub fn is_accepting(&self) -> bool {
        self.current_state().map_or(false, DfaState::is_accepting)
    }

    /// The state the evaluator is in, or `None` if it is stuck
    pub fn current_state(&self) -> Option<&'a DfaState> {
        self.current.map(|idx| &self.dfa.states[idx])
    }

    /// Returns to the initial state, forgetting any dead end reached
    pub fn reset(&mut self) {
        self.current = Some(self.dfa.initial_state);
    }

    /// Steps on one character and returns the state stepped into, if any
    pub fn step(&mut self, symbol: char) -> Option<&'a DfaState> {
        let state = self.current?;
        self.current = self
            .symbol_map
            .get(&symbol)
            .and_then(|&idx| self.dfa.states[state].transitions[idx]);
        self.current_state()
    }

    /// The length of the longest prefix of `input` the automaton accepts, measured in
    /// characters from the initial state. Zero means no non-empty prefix is accepted;
    /// an accepting initial state alone never counts as a match.
    pub fn longest_match(&mut self, input: &[char]) -> usize {
        self.reset();
        let mut matched = 0;
        for (offset, &symbol) in input.iter().enumerate() {
            if self.step(symbol).is_none() {
                break;
            }
            if self.is_accepting() {
                matched = offset + 1;
            }
        }
        matched
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        let symbol_map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, &c)| (c, idx))
            .collect();
        Self {
            dfa: value,
            symbol_map,
            current: Some(value.initial_state),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::regex::Regex;

    #[test]
    fn stepping_tracks_acceptance() {
        let dfa = Regex::compile("ab").to_nfa().unwrap().to_dfa(&['a', 'b']);
        let mut eval = dfa.evaluator();
        assert!(!eval.is_accepting());
        assert!(eval.step('a').is_some());
        assert!(!eval.is_accepting());
        assert!(eval.step('b').is_some());
        assert!(eval.is_accepting());
    }

    #[test]
    fn stuck_after_unknown_symbol() {
        let dfa = Regex::compile("a").to_nfa().unwrap().to_dfa(&['a']);
        let mut eval = dfa.evaluator();
        assert!(eval.step('x').is_none());
        assert!(eval.step('a').is_none());
        eval.reset();
        assert!(eval.step('a').is_some());
        assert!(eval.is_accepting());
    }

    #[test]
    fn longest_match_records_last_accept() {
        let dfa = Regex::compile("a+").to_nfa().unwrap().to_dfa(&['a', 'b']);
        let mut eval = dfa.evaluator();
        let input: Vec<char> = "aaab".chars().collect();
        assert_eq!(eval.longest_match(&input), 3);
        assert_eq!(eval.longest_match(&input[3..]), 0);
    }
}
