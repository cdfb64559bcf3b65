//! # FIRST and FOLLOW sets
//! Both computations are fixed points over the productions: the sets only ever grow and
//! the universe of terminals is finite, so iterating until nothing changes terminates.
//!
//! FIRST(A) collects the terminals that can begin a string derived from A, plus ε when
//! A can derive the empty string. FOLLOW(A) collects the terminals that can appear
//! immediately after A in some sentential form, with [`Symbol::End`] added for the start
//! symbol and propagated to every non-terminal that can end a derivation. A non-terminal
//! without productions is no error; its sets simply stay empty.
//!
//! ```
//! use lexa::grammar::{Grammar, Symbol};
//!
//! let grammar: Grammar = lexa::parser::grammar("
//!     S -> A b
//!     A -> a | ε
//! ").unwrap().try_into().unwrap();
//!
//! let first = grammar.first_sets();
//! // A derives ε, so FIRST(S) starts with both a and b
//! assert!(first[&Symbol::non_terminal("S")].contains(&Symbol::terminal("a")));
//! assert!(first[&Symbol::non_terminal("S")].contains(&Symbol::terminal("b")));
//!
//! let follow = grammar.follow_sets();
//! assert!(follow[&Symbol::non_terminal("A")].contains(&Symbol::terminal("b")));
//! ```

use crate::grammar::{Grammar, Symbol};
use std::collections::{HashMap, HashSet};

impl Grammar {
    /// Computes the FIRST set of every symbol: for each terminal the singleton set of
    /// itself, `{ε}` for ε, and for each non-terminal the fixed point over its
    /// productions, where a production contributes the FIRST sets of its right-hand-side
    /// prefix up to (and including) the first non-nullable symbol.
    pub fn first_sets(&self) -> HashMap<Symbol, HashSet<Symbol>> {
        let mut first: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();
        for terminal in self.terminals() {
            first.insert(terminal.clone(), HashSet::from([terminal.clone()]));
        }
        first.insert(Symbol::Epsilon, HashSet::from([Symbol::Epsilon]));
        for non_terminal in self.non_terminals() {
            first.entry(non_terminal.clone()).or_default();
        }

        let mut changed = true;
        while changed {
            changed = false;
            for production in self.productions() {
                let addition = first_of_sequence(production.rhs(), &first);
                let set = first
                    .get_mut(production.lhs())
                    .expect("every left-hand side has a FIRST entry");
                for symbol in addition {
                    changed |= set.insert(symbol);
                }
            }
        }
        first
    }

    /// Computes the FOLLOW set of every non-terminal. `$` seeds FOLLOW of the start
    /// symbol; for every occurrence of a non-terminal in a right-hand side, the FIRST
    /// sets of the symbols after it contribute (ε stripped), and when that tail can
    /// derive ε (or is empty), the FOLLOW set of the producing non-terminal does too.
    pub fn follow_sets(&self) -> HashMap<Symbol, HashSet<Symbol>> {
        let first = self.first_sets();
        let mut follow: HashMap<Symbol, HashSet<Symbol>> = self
            .non_terminals()
            .iter()
            .map(|non_terminal| (non_terminal.clone(), HashSet::new()))
            .collect();
        if let Some(start_follow) = follow.get_mut(self.start_symbol()) {
            start_follow.insert(Symbol::End);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for production in self.productions() {
                let rhs = production.rhs();
                for (i, symbol) in rhs.iter().enumerate() {
                    if !symbol.is_non_terminal() {
                        continue;
                    }

                    let mut addition = HashSet::new();
                    let mut tail_nullable = true;
                    for later in &rhs[i + 1..] {
                        let later_first = first
                            .get(later)
                            .expect("every right-hand side symbol has a FIRST entry");
                        addition.extend(
                            later_first
                                .iter()
                                .filter(|s| !s.is_epsilon())
                                .cloned(),
                        );
                        if !later_first.contains(&Symbol::Epsilon) {
                            tail_nullable = false;
                            break;
                        }
                    }
                    if tail_nullable {
                        if let Some(lhs_follow) = follow.get(production.lhs()) {
                            addition.extend(lhs_follow.iter().cloned());
                        }
                    }

                    let set = follow
                        .get_mut(symbol)
                        .expect("every non-terminal has a FOLLOW entry");
                    for s in addition {
                        changed |= set.insert(s);
                    }
                }
            }
        }
        follow
    }
}

/// FIRST of a symbol sequence: the union of the member FIRST sets (ε stripped) up to the
/// first symbol that cannot derive ε, plus ε when every member can.
fn first_of_sequence(
    sequence: &[Symbol],
    first: &HashMap<Symbol, HashSet<Symbol>>,
) -> HashSet<Symbol> {
    let mut result = HashSet::new();
    let mut all_nullable = true;
    for symbol in sequence {
        let symbol_first = first
            .get(symbol)
            .expect("every right-hand side symbol has a FIRST entry");
        result.extend(symbol_first.iter().filter(|s| !s.is_epsilon()).cloned());
        if !symbol_first.contains(&Symbol::Epsilon) {
            all_nullable = false;
            break;
        }
    }
    if all_nullable {
        result.insert(Symbol::Epsilon);
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Grammar, Production, Symbol};
    use std::collections::HashSet;

    fn terminals(names: &[&str]) -> HashSet<Symbol> {
        names.iter().map(|name| Symbol::terminal(name)).collect()
    }

    fn expression_grammar() -> Grammar {
        crate::parser::grammar(
            "
            E  -> T E'
            E' -> + T E' | ε
            T  -> F T'
            T' -> * F T' | ε
            F  -> ( E ) | id
            ",
        )
        .unwrap()
        .try_into()
        .unwrap()
    }

    #[test]
    fn first_sets_of_the_expression_grammar() {
        let grammar = expression_grammar();
        let first = grammar.first_sets();

        let open_and_id = terminals(&["(", "id"]);
        assert_eq!(first[&Symbol::non_terminal("E")], open_and_id);
        assert_eq!(first[&Symbol::non_terminal("T")], open_and_id);
        assert_eq!(first[&Symbol::non_terminal("F")], open_and_id);

        let mut plus_eps = terminals(&["+"]);
        plus_eps.insert(Symbol::Epsilon);
        assert_eq!(first[&Symbol::non_terminal("E'")], plus_eps);

        let mut star_eps = terminals(&["*"]);
        star_eps.insert(Symbol::Epsilon);
        assert_eq!(first[&Symbol::non_terminal("T'")], star_eps);
    }

    #[test]
    fn follow_sets_of_the_expression_grammar() {
        let grammar = expression_grammar();
        let follow = grammar.follow_sets();

        let mut close_end = terminals(&[")"]);
        close_end.insert(Symbol::End);
        assert_eq!(follow[&Symbol::non_terminal("E")], close_end);
        assert_eq!(follow[&Symbol::non_terminal("E'")], close_end);

        let mut plus_close_end = terminals(&["+", ")"]);
        plus_close_end.insert(Symbol::End);
        assert_eq!(follow[&Symbol::non_terminal("T")], plus_close_end);
        assert_eq!(follow[&Symbol::non_terminal("T'")], plus_close_end);

        let mut star_plus_close_end = terminals(&["*", "+", ")"]);
        star_plus_close_end.insert(Symbol::End);
        assert_eq!(follow[&Symbol::non_terminal("F")], star_plus_close_end);
    }

    #[test]
    fn first_of_terminal_is_itself() {
        let grammar = expression_grammar();
        let first = grammar.first_sets();
        assert_eq!(first[&Symbol::terminal("id")], terminals(&["id"]));
        assert_eq!(first[&Symbol::Epsilon], HashSet::from([Symbol::Epsilon]));
    }

    #[test]
    fn epsilon_in_first_iff_nullable() {
        let grammar: Grammar = crate::parser::grammar(
            "
            S -> A B
            A -> a | ε
            B -> b | ε
            ",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let first = grammar.first_sets();
        // S derives ε through A and B
        assert!(first[&Symbol::non_terminal("S")].contains(&Symbol::Epsilon));

        let grammar: Grammar = crate::parser::grammar(
            "
            S -> A b
            A -> a | ε
            ",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let first = grammar.first_sets();
        // the b after A keeps S from deriving ε
        assert!(!first[&Symbol::non_terminal("S")].contains(&Symbol::Epsilon));
    }

    #[test]
    fn nullable_tail_propagates_follow_of_the_producer() {
        let grammar: Grammar = crate::parser::grammar(
            "
            S -> a A B c
            A -> x
            B -> ε
            ",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let follow = grammar.follow_sets();
        // B can vanish, so c follows A as well
        assert!(follow[&Symbol::non_terminal("A")].contains(&Symbol::terminal("c")));
        assert!(follow[&Symbol::non_terminal("B")].contains(&Symbol::terminal("c")));
    }

    #[test]
    fn unproductive_non_terminal_gets_empty_first() {
        // X is only reachable through the API: the text format tags a symbol as a
        // non-terminal exactly when it has a production
        let s = Symbol::non_terminal("S");
        let x = Symbol::non_terminal("X");
        let grammar = Grammar::new(
            vec![Production::new(
                s.clone(),
                vec![Symbol::terminal("a"), x.clone(), Symbol::terminal("b")],
            )
            .unwrap()],
            s,
        )
        .unwrap();
        let first = grammar.first_sets();
        let follow = grammar.follow_sets();
        // X has no production: that is an anomaly, not an error
        assert!(first[&x].is_empty());
        assert_eq!(follow[&x], terminals(&["b"]));
    }

    #[test]
    fn end_marker_seeds_follow_of_start() {
        let grammar: Grammar = crate::parser::grammar("S -> a").unwrap().try_into().unwrap();
        let follow = grammar.follow_sets();
        assert_eq!(
            follow[&Symbol::non_terminal("S")],
            HashSet::from([Symbol::End])
        );
    }
}
