//! # Tokenizer
//! A [`Tokenizer`] scans an input string left to right with a set of [`TokenRule`]s, each
//! rule owning the minimized DFA compiled from its regular expression. At every position
//! the rule matching the longest prefix wins; among rules matching equally long, the one
//! with the highest priority wins. Since [`TokenizerBuilder::build`] hands out priorities
//! in descending registration order, ties always go to the rule declared first. A rule
//! matching the empty string never produces a token: positions where no rule matches at
//! least one character fail with a [`LexicalError`].
//!
//! A built tokenizer is immutable; [`Tokenizer::tokenize`] keeps all cursor state in
//! locals, so one tokenizer may serve any number of interleaved scans.
//!
//! ```
//! use lexa::tokenizer::TokenizerBuilder;
//!
//! let tokenizer = TokenizerBuilder::new()
//!     .rule("AB", "ab")
//!     .rule("A", "a")
//!     .rule("B", "b")
//!     .build(&['a', 'b'])
//!     .unwrap();
//!
//! let tokens = tokenizer.tokenize("aab").unwrap();
//! let rendered: Vec<(&str, &str, usize)> = tokens
//!     .iter()
//!     .map(|t| (t.token_type(), t.value(), t.position()))
//!     .collect();
//! assert_eq!(rendered, vec![("A", "a", 0), ("AB", "ab", 1)]);
//! ```
//!
//! Building runs the whole per-rule pipeline (explicit concatenation, shunting yard,
//! Thompson construction, subset construction, minimization), and a malformed rule
//! surfaces as a [`BuildError`] naming the token type and pattern:
//!
//! ```
//! use lexa::tokenizer::TokenizerBuilder;
//!
//! let error = TokenizerBuilder::new()
//!     .rule("BAD", "*a")
//!     .build(&['a'])
//!     .unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "error processing token rule BAD with regex *a"
//! );
//! ```

use crate::dfa::{Dfa, DfaEvaluator};
use crate::regex::{Regex, RegexError};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

pub mod parse;

pub use parse::RulesParseError;

/// The priority handed to the first registered rule; every following rule gets one less.
const INITIAL_PRIORITY: u32 = 1000;

/// A scanner built from an ordered set of token rules. See the
/// [module-level documentation](crate::tokenizer) for the matching policy.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    rules: Vec<TokenRule>,
}

/// One token rule: the minimized DFA compiled from the rule's pattern, the label of the
/// tokens it produces, and its tie-breaking priority (higher wins).
#[derive(Debug, Clone)]
pub struct TokenRule {
    token_type: Rc<str>,
    dfa: Dfa,
    priority: u32,
}

impl TokenRule {
    /// The label given to tokens produced by this rule
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// The minimized DFA recognizing this rule's language
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// The priority used to break equal-length matches; higher wins
    pub fn priority(&self) -> u32 {
        self.priority
    }
}

/// A token produced by [`Tokenizer::tokenize`]: its type label, the matched substring,
/// and the 0-based character position where the match started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    token_type: Rc<str>,
    value: String,
    position: usize,
}

impl Token {
    /// The label of the rule that produced this token
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// The matched substring
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The 0-based character offset of the match in the input
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\") at {}", self.token_type, self.value, self.position)
    }
}

/// The error produced when no rule matches at some input position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no valid token at position {position} for character {character}")]
pub struct LexicalError {
    position: usize,
    character: char,
}

impl LexicalError {
    /// The 0-based character position where scanning failed
    pub fn position(&self) -> usize {
        self.position
    }

    /// The character no rule could consume
    pub fn character(&self) -> char {
        self.character
    }
}

/// The error produced when one of the pipeline stages fails for a rule during
/// [`TokenizerBuilder::build`]. The underlying [`RegexError`] is available as the
/// error source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("error processing token rule {token_type} with regex {regex}")]
pub struct BuildError {
    token_type: String,
    regex: String,
    #[source]
    source: RegexError,
}

impl BuildError {
    /// The token type of the offending rule
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// The pattern text of the offending rule
    pub fn regex(&self) -> &str {
        &self.regex
    }
}

impl Tokenizer {
    /// The registered rules, in registration order
    pub fn rules(&self) -> &[TokenRule] {
        self.rules.as_slice()
    }

    /// Scans `input` into a sequence of tokens. Deterministic, left to right and
    /// non-overlapping: at each position every rule's DFA is run as far as it has
    /// transitions, the largest offset at which it was in an accepting state decides
    /// its match length, and the longest match (ties to the highest priority) produces
    /// the token. Empty input yields no tokens; a position where no rule matches at
    /// least one character aborts the scan.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexicalError> {
        let chars: Vec<char> = input.chars().collect();
        let mut evaluators: Vec<DfaEvaluator> =
            self.rules.iter().map(|rule| rule.dfa.evaluator()).collect();

        let mut tokens = Vec::new();
        let mut position = 0;
        while position < chars.len() {
            let mut best: Option<(usize, u32, usize)> = None;
            for (idx, (rule, eval)) in self.rules.iter().zip(&mut evaluators).enumerate() {
                let length = eval.longest_match(&chars[position..]);
                if length == 0 {
                    continue;
                }
                let candidate = (length, rule.priority, idx);
                let better = best.map_or(true, |(best_length, best_priority, _)| {
                    length > best_length || (length == best_length && rule.priority > best_priority)
                });
                if better {
                    best = Some(candidate);
                }
            }

            let Some((length, _, rule_idx)) = best else {
                return Err(LexicalError {
                    position,
                    character: chars[position],
                });
            };
            tokens.push(Token {
                token_type: self.rules[rule_idx].token_type.clone(),
                value: chars[position..position + length].iter().collect(),
                position,
            });
            position += length;
        }
        Ok(tokens)
    }
}

/// Builds a [`Tokenizer`] by running every registered rule through the regex-to-DFA
/// pipeline. Rules are kept in registration order and handed priorities from a
/// descending counter, so earlier rules dominate equal-length matches.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    rules: Vec<(Rc<str>, String)>,
}

impl TokenizerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule. Registration order decides tie-breaking: earlier rules win.
    pub fn rule(mut self, token_type: &str, pattern: &str) -> Self {
        self.rules.push((Rc::from(token_type), pattern.to_string()));
        self
    }

    /// The registered (token type, pattern) pairs, in registration order
    pub fn rules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|(token_type, pattern)| (token_type.as_ref(), pattern.as_str()))
    }

    /// The sorted set of characters appearing as literals in the registered patterns.
    /// Useful as a default alphabet when none is configured explicitly; literals
    /// outside the alphabet the tokenizer is eventually built over never match.
    pub fn literal_characters(&self) -> Vec<char> {
        let mut chars: Vec<char> = self
            .rules
            .iter()
            .flat_map(|(_, pattern)| pattern.chars())
            .filter(|&c| crate::regex::is_literal(c))
            .collect();
        chars.sort_unstable();
        chars.dedup();
        chars
    }

    /// Compiles every rule to a minimized DFA over `alphabet` and assembles the
    /// tokenizer. Duplicate alphabet entries are ignored. The first failing rule
    /// aborts the build with a [`BuildError`] naming it.
    pub fn build(self, alphabet: &[char]) -> Result<Tokenizer, BuildError> {
        let mut unique: Vec<char> = Vec::with_capacity(alphabet.len());
        for &symbol in alphabet {
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        let mut priority = INITIAL_PRIORITY;
        for (token_type, pattern) in self.rules {
            let nfa = Regex::compile(&pattern)
                .to_nfa()
                .map_err(|source| BuildError {
                    token_type: token_type.to_string(),
                    regex: pattern.clone(),
                    source,
                })?;
            let dfa = nfa.to_dfa(&unique).minimized();
            rules.push(TokenRule {
                token_type,
                dfa,
                priority,
            });
            priority = priority.saturating_sub(1);
        }
        Ok(Tokenizer { rules })
    }
}
