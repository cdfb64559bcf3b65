//! # Context-free grammars
//! A [`Grammar`] is an ordered list of [`Production`]s together with a distinguished start
//! symbol. [`Symbol`]s are tagged as terminal or non-terminal; the empty string and the
//! end-of-input marker are the dedicated variants [`Symbol::Epsilon`] and [`Symbol::End`]
//! rather than specially-named symbols, so a terminal that happens to be spelled `ε` or `$`
//! in some other notation can never be confused with them.
//!
//! The terminal and non-terminal sets are derived when the grammar is built: every
//! left-hand side (and every `NonTerminal`-tagged symbol on a right-hand side) is a
//! non-terminal, every `Terminal`-tagged right-hand-side symbol a terminal. An
//! ε-production is written with `Epsilon` as the sole right-hand-side symbol.
//!
//! Grammars can be written in a plain text format and parsed with [`crate::parser::grammar`];
//! see [`analysis`](self) for the FIRST/FOLLOW computations.
//!
//! ```
//! use lexa::grammar::{Grammar, Symbol};
//!
//! let grammar: Grammar = lexa::parser::grammar("
//!     E  -> T E'
//!     E' -> + T E' | ε
//!     T  -> ( E ) | id
//! ").unwrap().try_into().unwrap();
//!
//! assert_eq!(grammar.start_symbol(), &Symbol::non_terminal("E"));
//! assert_eq!(grammar.productions().len(), 5);
//!
//! let first = grammar.first_sets();
//! let first_e = &first[&Symbol::non_terminal("E")];
//! assert!(first_e.contains(&Symbol::terminal("(")));
//! assert!(first_e.contains(&Symbol::terminal("id")));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

pub mod analysis;
pub mod parse;

pub use parse::GrammarParseError;

/// A grammar symbol. Equality and hashing consider both the name and the tag, so a
/// terminal and a non-terminal with the same name are different symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A terminal symbol (a token type)
    Terminal(Rc<str>),
    /// A non-terminal symbol
    NonTerminal(Rc<str>),
    /// The empty string ε
    Epsilon,
    /// The end-of-input marker `$`, appearing only in FOLLOW sets
    End,
}

impl Symbol {
    /// Creates a terminal symbol with the given name
    pub fn terminal(name: &str) -> Self {
        Symbol::Terminal(Rc::from(name))
    }

    /// Creates a non-terminal symbol with the given name
    pub fn non_terminal(name: &str) -> Self {
        Symbol::NonTerminal(Rc::from(name))
    }

    /// Checks if this symbol is a terminal (ε and `$` not included)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks if this symbol is a non-terminal
    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    /// Checks if this symbol is ε
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The name of this symbol; ε and `$` render as "ε" and "$"
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name,
            Symbol::Epsilon => "ε",
            Symbol::End => "$",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A production `lhs → rhs`. The left-hand side must be a non-terminal and the
/// right-hand side is never empty; ε-productions carry a single [`Symbol::Epsilon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

impl Production {
    /// Creates a production after checking its invariants: the left-hand side is a
    /// non-terminal, the right-hand side is non-empty, ε only appears alone, and the
    /// end-of-input marker does not appear at all.
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Result<Self, GrammarError> {
        if !lhs.is_non_terminal() {
            return Err(GrammarError::LhsNotNonTerminal(lhs.to_string()));
        }
        if rhs.is_empty() {
            return Err(GrammarError::EmptyRhs(lhs.to_string()));
        }
        if rhs.len() > 1 && rhs.iter().any(Symbol::is_epsilon) {
            return Err(GrammarError::EpsilonInSequence(lhs.to_string()));
        }
        if rhs.iter().any(|symbol| matches!(symbol, Symbol::End)) {
            return Err(GrammarError::EndInProduction(lhs.to_string()));
        }
        Ok(Production { lhs, rhs })
    }

    /// The left-hand side non-terminal
    pub fn lhs(&self) -> &Symbol {
        &self.lhs
    }

    /// The right-hand side sequence
    pub fn rhs(&self) -> &[Symbol] {
        self.rhs.as_slice()
    }

    /// Checks if this is an ε-production
    pub fn is_epsilon_production(&self) -> bool {
        self.rhs.len() == 1 && self.rhs[0].is_epsilon()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

/// Errors detected while assembling productions or a grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("left-hand side '{0}' is not a non-terminal")]
    LhsNotNonTerminal(String),
    #[error("production for '{0}' has an empty right-hand side")]
    EmptyRhs(String),
    #[error("ε may only appear alone on a right-hand side (in a production for '{0}')")]
    EpsilonInSequence(String),
    #[error("'$' may not appear in a production (in a production for '{0}')")]
    EndInProduction(String),
    #[error("start symbol '{0}' is not a non-terminal")]
    StartNotNonTerminal(String),
}

/// A context-free grammar: an ordered list of productions, a start symbol, and the
/// terminal/non-terminal sets derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    productions: Vec<Production>,
    start: Symbol,
    terminals: HashSet<Symbol>,
    non_terminals: HashSet<Symbol>,
}

impl Grammar {
    /// Creates a grammar from its productions and start symbol, deriving the symbol
    /// sets. A non-terminal without any production is allowed (its FIRST and FOLLOW
    /// sets simply stay empty), as is a start symbol no production mentions.
    pub fn new(productions: Vec<Production>, start: Symbol) -> Result<Self, GrammarError> {
        if !start.is_non_terminal() {
            return Err(GrammarError::StartNotNonTerminal(start.to_string()));
        }
        let mut terminals = HashSet::new();
        let mut non_terminals = HashSet::new();
        non_terminals.insert(start.clone());
        for production in &productions {
            non_terminals.insert(production.lhs.clone());
            for symbol in &production.rhs {
                match symbol {
                    Symbol::Terminal(_) => {
                        terminals.insert(symbol.clone());
                    }
                    Symbol::NonTerminal(_) => {
                        non_terminals.insert(symbol.clone());
                    }
                    Symbol::Epsilon | Symbol::End => {}
                }
            }
        }
        Ok(Grammar {
            productions,
            start,
            terminals,
            non_terminals,
        })
    }

    /// The productions, in the order they were given
    pub fn productions(&self) -> &[Production] {
        self.productions.as_slice()
    }

    /// The derived set of terminals
    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    /// The derived set of non-terminals
    pub fn non_terminals(&self) -> &HashSet<Symbol> {
        &self.non_terminals
    }

    /// The start symbol
    pub fn start_symbol(&self) -> &Symbol {
        &self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_identity_includes_the_tag() {
        assert_ne!(Symbol::terminal("x"), Symbol::non_terminal("x"));
        assert_eq!(Symbol::terminal("x"), Symbol::terminal("x"));
    }

    #[test]
    fn epsilon_and_end_are_not_name_collisions() {
        assert_ne!(Symbol::terminal("ε"), Symbol::Epsilon);
        assert_ne!(Symbol::terminal("$"), Symbol::End);
    }

    #[test]
    fn production_invariants() {
        let e = Symbol::non_terminal("E");
        assert!(Production::new(Symbol::terminal("x"), vec![Symbol::Epsilon]).is_err());
        assert!(Production::new(e.clone(), vec![]).is_err());
        assert!(Production::new(
            e.clone(),
            vec![Symbol::Epsilon, Symbol::terminal("x")]
        )
        .is_err());
        assert!(Production::new(e.clone(), vec![Symbol::End]).is_err());
        let eps = Production::new(e, vec![Symbol::Epsilon]).unwrap();
        assert!(eps.is_epsilon_production());
    }

    #[test]
    fn symbol_sets_are_derived() {
        let e = Symbol::non_terminal("E");
        let t = Symbol::non_terminal("T");
        let plus = Symbol::terminal("+");
        let grammar = Grammar::new(
            vec![
                Production::new(e.clone(), vec![t.clone(), plus.clone(), t.clone()]).unwrap(),
                Production::new(t.clone(), vec![Symbol::terminal("id")]).unwrap(),
            ],
            e.clone(),
        )
        .unwrap();
        assert_eq!(grammar.non_terminals(), &HashSet::from([e, t]));
        assert_eq!(
            grammar.terminals(),
            &HashSet::from([plus, Symbol::terminal("id")])
        );
    }

    #[test]
    fn start_must_be_a_non_terminal() {
        let result = Grammar::new(vec![], Symbol::terminal("x"));
        assert_eq!(
            result.unwrap_err(),
            GrammarError::StartNotNonTerminal("x".to_string())
        );
    }
}
