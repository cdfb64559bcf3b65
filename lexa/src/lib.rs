//!# lexa
//!
//! `lexa` is a Rust library for building scanners out of regular-expression token rules and
//! for analyzing context-free grammars with FIRST/FOLLOW sets.
//!
//! ## Usage
//!
//! ```rust
//! use lexa::grammar::{Grammar, Symbol};
//! use lexa::tokenizer::TokenizerBuilder;
//!
//! fn main() {
//!     // Each rule is compiled through the full pipeline: explicit concatenation
//!     // markers, shunting yard to postfix, Thompson construction, subset
//!     // construction, and DFA minimization.
//!     let tokenizer = TokenizerBuilder::new()
//!         .rule("NUMBER", "(0|1)(0|1)*")
//!         .rule("PLUS", "p")
//!         .build(&['0', '1', 'p'])
//!         .unwrap();
//!
//!     let tokens = tokenizer.tokenize("10p11").unwrap();
//!     let types: Vec<&str> = tokens.iter().map(|t| t.token_type()).collect();
//!     assert_eq!(types, vec!["NUMBER", "PLUS", "NUMBER"]);
//!
//!     // Grammars can be written in a plain text format and analyzed
//!     let grammar: Grammar = lexa::parser::grammar("
//!         E  -> T E'
//!         E' -> + T E' | ε
//!         T  -> ( E ) | id
//!     ").unwrap().try_into().unwrap();
//!
//!     let follow = grammar.follow_sets();
//!     assert!(follow[&Symbol::non_terminal("E")].contains(&Symbol::End));
//! }
//! ```
//!
//! ## Token rules
//!
//! A token rule is a name plus a regular expression over single characters, with `|`, `*`,
//! `+`, `?` and parentheses (see [regex]). Rules are registered in order on a
//! [TokenizerBuilder](tokenizer::TokenizerBuilder); the built
//! [Tokenizer](tokenizer::Tokenizer) scans with the longest match, breaking equal-length
//! ties in favour of the rule registered first. Rule sets can also be read from a text
//! file format, one `NAME pattern` pair per line (see [parser]).
//!
//! The alphabet is an explicit, finite set of characters supplied when building. A pattern
//! may mention characters outside the alphabet; they simply never match any input.
//!
//! ## Grammars
//!
//! A [Grammar](grammar::Grammar) is an ordered list of productions over tagged
//! [Symbol](grammar::Symbol)s, with dedicated variants for ε and the end-of-input marker
//! `$`. Grammar files use one `LHS -> alt | alt` production per line, `ε`/`eps` for the
//! empty string (see [parser]).
//!
//! ## Operations
//!
//! This library currently supports:
//!
//! * Rewriting a regex with [explicit concatenation markers](regex::explicit_concat) and
//!   [converting it to postfix](regex::to_postfix)
//! * [Compiling a regex to an NFA](regex::Regex::to_nfa) via Thompson's construction
//! * [Converting NFAs to DFAs](nfa::Nfa::to_dfa) with the subset construction
//! * [Minimizing a DFA](dfa::Dfa::minimized) with the table-filling algorithm
//! * [Step-by-step evaluation of a string](dfa::Dfa::evaluator) and
//!   [whole-string acceptance checks](dfa::Dfa::accepts)
//! * Rendering a DFA [as a transition table](dfa::Dfa::to_table)
//! * [Tokenizing input](tokenizer::Tokenizer::tokenize) with longest-match/priority
//!   resolution
//! * [Parsing token rule files](parser::rules) and [grammar files](parser::grammar)
//! * Computing [FIRST](grammar::Grammar::first_sets) and
//!   [FOLLOW](grammar::Grammar::follow_sets) sets of a grammar

pub mod dfa;
pub mod grammar;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod tokenizer;

mod table;


#[cfg(test)]
mod integration {
    use crate::grammar::{Grammar, Symbol};
    use crate::tokenizer::TokenizerBuilder;

    #[test]
    fn rule_file_to_token_stream() {
        let rules = "
            # binary numbers and identifiers
            NUMBER (0|1)(0|1)*
            ID     (a|b)(a|b|0|1)*
        ";
        let builder: TokenizerBuilder = crate::parser::rules(rules).unwrap().try_into().unwrap();
        let tokenizer = builder.build(&['0', '1', 'a', 'b']).unwrap();
        let tokens = tokenizer.tokenize("a01b10").unwrap();
        let rendered: Vec<(&str, &str)> = tokens
            .iter()
            .map(|t| (t.token_type(), t.value()))
            .collect();
        // identifiers may contain digits, so the scan is a single longest match
        assert_eq!(rendered, vec![("ID", "a01b10")]);
    }

    #[test]
    fn grammar_file_to_analysis() {
        let grammar: Grammar = crate::parser::grammar(
            "
            S -> a S b | ε
            ",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let first = grammar.first_sets();
        let follow = grammar.follow_sets();
        let s = Symbol::non_terminal("S");
        assert!(first[&s].contains(&Symbol::terminal("a")));
        assert!(first[&s].contains(&Symbol::Epsilon));
        assert!(follow[&s].contains(&Symbol::terminal("b")));
        assert!(follow[&s].contains(&Symbol::End));
    }
}
