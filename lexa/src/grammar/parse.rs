use crate::grammar::{Grammar, GrammarError, Production, Symbol};
use crate::parser::ParsedGrammar;
use std::collections::HashSet;
use thiserror::Error;

/// Error when validating a parsed grammar file into a [`Grammar`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarParseError {
    #[error("grammar has no productions")]
    Empty,
    #[error(transparent)]
    Invalid(#[from] GrammarError),
}

impl<'a> TryFrom<ParsedGrammar<'a>> for Grammar {
    type Error = GrammarParseError;

    /// Converts a parsed grammar file into a validated [`Grammar`]. Every left-hand
    /// side names a non-terminal; any other symbol on a right-hand side is a terminal.
    /// `ε` (or `eps`) becomes [`Symbol::Epsilon`], and `$` is reserved and rejected.
    /// The left-hand side of the first production is the start symbol.
    fn try_from(value: ParsedGrammar<'a>) -> Result<Self, Self::Error> {
        let start = match value.productions.first() {
            Some(line) => Symbol::non_terminal(line.lhs),
            None => return Err(GrammarParseError::Empty),
        };
        let non_terminal_names: HashSet<&str> =
            value.productions.iter().map(|line| line.lhs).collect();

        let mut productions = Vec::new();
        for line in &value.productions {
            for alternative in &line.alternatives {
                let rhs = alternative
                    .iter()
                    .map(|&name| to_symbol(name, &non_terminal_names))
                    .collect();
                productions.push(Production::new(Symbol::non_terminal(line.lhs), rhs)?);
            }
        }
        Ok(Grammar::new(productions, start)?)
    }
}

fn to_symbol(name: &str, non_terminal_names: &HashSet<&str>) -> Symbol {
    match name {
        "ε" | "eps" => Symbol::Epsilon,
        "$" => Symbol::End,
        _ if non_terminal_names.contains(name) => Symbol::non_terminal(name),
        _ => Symbol::terminal(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn lhs_set_decides_symbol_tags() {
        let grammar: Grammar = parser::grammar(
            "
            S -> A b
            A -> a
            ",
        )
        .unwrap()
        .try_into()
        .unwrap();
        assert!(grammar
            .non_terminals()
            .contains(&Symbol::non_terminal("A")));
        assert!(grammar.terminals().contains(&Symbol::terminal("b")));
        assert_eq!(grammar.start_symbol(), &Symbol::non_terminal("S"));
    }

    #[test]
    fn alternatives_expand_to_separate_productions() {
        let grammar: Grammar = parser::grammar("S -> a | b S | eps")
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(grammar.productions().len(), 3);
        assert!(grammar.productions()[2].is_epsilon_production());
    }

    #[test]
    fn end_marker_is_reserved() {
        let parsed = parser::grammar("S -> a $").unwrap();
        let result: Result<Grammar, _> = parsed.try_into();
        assert_eq!(
            result.unwrap_err(),
            GrammarParseError::Invalid(GrammarError::EndInProduction("S".to_string()))
        );
    }

    #[test]
    fn epsilon_must_stand_alone() {
        let parsed = parser::grammar("S -> a ε").unwrap();
        let result: Result<Grammar, _> = parsed.try_into();
        assert_eq!(
            result.unwrap_err(),
            GrammarParseError::Invalid(GrammarError::EpsilonInSequence("S".to_string()))
        );
    }
}
