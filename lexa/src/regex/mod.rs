//! # Regular expressions
//! Token rules are written as plain regular expressions over single characters. The surface is
//! deliberately small: any character is a literal, `|` denotes alternation, `*`/`+` are Kleene
//! star/plus, `?` marks an optional part, and parentheses `(`/`)` group. Concatenation is
//! implicit; it is made explicit internally with the marker [`CONCAT`] (`·`) before the
//! expression is compiled. There are no character classes, escape sequences, anchors or capture
//! groups, and the reserved characters `|`, `*`, `+`, `?`, `(`, `)` and `·` cannot appear as
//! literals.
//!
//! Compilation is a three-stage pipeline:
//! 1. [`explicit_concat`] inserts `·` wherever two neighbouring positions concatenate,
//! 2. [`to_postfix`] rewrites the infix expression to postfix with a shunting yard,
//! 3. [`Regex::to_nfa`] runs Thompson's construction over the postfix form.
//!
//! ```
//! use lexa::regex::{explicit_concat, to_postfix, Regex};
//!
//! assert_eq!(explicit_concat("ab"), "a·b");
//! assert_eq!(explicit_concat("a(b|c)*"), "a·(b|c)*");
//! assert_eq!(to_postfix("a·(b|c)*"), "abc|*·");
//!
//! let nfa = Regex::compile("(a|b)*c").to_nfa().unwrap();
//! let dfa = nfa.to_dfa(&['a', 'b', 'c']);
//! assert!(dfa.accepts("abac"));
//! assert!(!dfa.accepts("ab"));
//! ```
//!
//! Malformed expressions surface as a [`RegexError`] when the postfix form is compiled: an
//! operator without enough operands underflows the construction stack, and an expression that
//! leaves more than one fragment behind does not reduce. Unmatched parentheses, however, are
//! silently discarded by the shunting yard rather than rejected; `(ab` compiles like `ab`.

use crate::nfa::{Nfa, NfaState, Transition};
use thiserror::Error;

/// The explicit concatenation marker inserted by [`explicit_concat`].
pub const CONCAT: char = '·';

/// Errors detected while compiling a postfix expression to an NFA.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegexError {
    /// An operator was applied with too few operands on the construction stack,
    /// e.g. the expression `*a` or `|b`.
    #[error("operator '{0}' is missing an operand")]
    MissingOperand(char),
    /// The expression was empty (or reduced to nothing).
    #[error("expression is empty")]
    EmptyExpression,
    /// More than one fragment remained after the whole expression was consumed.
    #[error("expression does not reduce to a single fragment")]
    UnbalancedExpression,
}

/// A compiled regular expression, held in postfix form. Compiling never fails; errors are
/// reported by [`Regex::to_nfa`] since only the Thompson construction can see that an
/// expression is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pattern: String,
    postfix: String,
}

/// A partial NFA under construction: one start and one accept state, both indices
/// into the arena being built.
struct Fragment {
    start: usize,
    accept: usize,
}

/// Checks whether a character acts as a literal (an operand) in a pattern, i.e. is none
/// of the reserved characters `|`, `*`, `+`, `?`, `(`, `)` and `·`.
pub fn is_literal(c: char) -> bool {
    !matches!(c, '|' | '*' | '?' | '+' | '(' | ')') && c != CONCAT
}

/// Inserts the explicit concatenation marker `·` between every pair of neighbouring
/// positions that concatenate: operand-operand, operand-`(`, `)`-operand, a postfix
/// operator (`*`, `+`, `?`) followed by an operand or `(`, and `)`-`(`. Empty input
/// passes through unchanged.
pub fn explicit_concat(regex: &str) -> String {
    let chars: Vec<char> = regex.chars().collect();
    let mut result = String::with_capacity(regex.len() * 2);
    for (i, &c) in chars.iter().enumerate() {
        result.push(c);
        let Some(&next) = chars.get(i + 1) else {
            break;
        };
        let postfix_op = matches!(c, '*' | '+' | '?');
        let concatenates = (is_literal(c) && is_literal(next))
            || (is_literal(c) && next == '(')
            || (c == ')' && is_literal(next))
            || (postfix_op && (is_literal(next) || next == '('))
            || (c == ')' && next == '(');
        if concatenates {
            result.push(CONCAT);
        }
    }
    result
}

/// Operator precedence: alternation binds weakest, the postfix repetition
/// operators strongest. Operands have no precedence.
fn precedence(c: char) -> Option<u8> {
    match c {
        '|' => Some(1),
        CONCAT => Some(2),
        '*' | '+' | '?' => Some(3),
        _ => None,
    }
}

/// Converts an infix expression (with explicit `·` markers, see [`explicit_concat`])
/// to postfix using the shunting yard algorithm. All operators are treated as
/// left-associative. Unmatched parentheses are dropped without error.
pub fn to_postfix(regex: &str) -> String {
    let mut output = String::with_capacity(regex.len());
    let mut stack: Vec<char> = Vec::new();
    for c in regex.chars() {
        match c {
            '(' => stack.push(c),
            ')' => {
                while let Some(top) = stack.pop() {
                    if top == '(' {
                        break;
                    }
                    output.push(top);
                }
            }
            op => match precedence(op) {
                Some(prec) => {
                    while let Some(&top) = stack.last() {
                        match precedence(top) {
                            Some(top_prec) if top_prec >= prec => {
                                output.push(top);
                                stack.pop();
                            }
                            _ => break,
                        }
                    }
                    stack.push(op);
                }
                None => output.push(op),
            },
        }
    }
    while let Some(op) = stack.pop() {
        if op != '(' {
            output.push(op);
        }
    }
    output
}

fn new_state(states: &mut Vec<NfaState>) -> usize {
    states.push(NfaState {
        transitions: Vec::new(),
        accepting: false,
    });
    states.len() - 1
}

fn link(states: &mut [NfaState], from: usize, symbol: Option<char>, to: usize) {
    states[from].transitions.push(Transition { symbol, target: to });
}

impl Regex {
    /// Compiles a pattern to its postfix form. The pattern text is kept around so that
    /// errors downstream can cite it.
    pub fn compile(pattern: &str) -> Self {
        let postfix = to_postfix(&explicit_concat(pattern));
        Regex {
            pattern: pattern.to_string(),
            postfix,
        }
    }

    /// The original pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The postfix form the pattern compiled to.
    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    /// Runs Thompson's construction over the postfix form, producing an NFA with exactly
    /// one start and one accept state. Every operator pops its operand fragments off a
    /// stack, wires them together with ε-transitions and pushes the combined fragment;
    /// the accept state of a fragment loses its accepting flag as soon as it becomes an
    /// interior state of a larger fragment.
    pub fn to_nfa(&self) -> Result<Nfa, RegexError> {
        let mut states: Vec<NfaState> = Vec::new();
        let mut stack: Vec<Fragment> = Vec::new();

        for c in self.postfix.chars() {
            match c {
                CONCAT => {
                    let b = stack.pop().ok_or(RegexError::MissingOperand(c))?;
                    let a = stack.pop().ok_or(RegexError::MissingOperand(c))?;
                    states[a.accept].accepting = false;
                    link(&mut states, a.accept, None, b.start);
                    stack.push(Fragment {
                        start: a.start,
                        accept: b.accept,
                    });
                }
                '|' => {
                    let b = stack.pop().ok_or(RegexError::MissingOperand(c))?;
                    let a = stack.pop().ok_or(RegexError::MissingOperand(c))?;
                    states[a.accept].accepting = false;
                    states[b.accept].accepting = false;
                    let start = new_state(&mut states);
                    let accept = new_state(&mut states);
                    link(&mut states, start, None, a.start);
                    link(&mut states, start, None, b.start);
                    link(&mut states, a.accept, None, accept);
                    link(&mut states, b.accept, None, accept);
                    states[accept].accepting = true;
                    stack.push(Fragment { start, accept });
                }
                '*' => {
                    let n = stack.pop().ok_or(RegexError::MissingOperand(c))?;
                    states[n.accept].accepting = false;
                    let start = new_state(&mut states);
                    let accept = new_state(&mut states);
                    link(&mut states, start, None, n.start);
                    link(&mut states, start, None, accept);
                    link(&mut states, n.accept, None, n.start);
                    link(&mut states, n.accept, None, accept);
                    states[accept].accepting = true;
                    stack.push(Fragment { start, accept });
                }
                '+' => {
                    // One-or-more: a star without the start-to-accept shortcut
                    let n = stack.pop().ok_or(RegexError::MissingOperand(c))?;
                    states[n.accept].accepting = false;
                    let start = new_state(&mut states);
                    let accept = new_state(&mut states);
                    link(&mut states, start, None, n.start);
                    link(&mut states, n.accept, None, n.start);
                    link(&mut states, n.accept, None, accept);
                    states[accept].accepting = true;
                    stack.push(Fragment { start, accept });
                }
                '?' => {
                    let n = stack.pop().ok_or(RegexError::MissingOperand(c))?;
                    states[n.accept].accepting = false;
                    let start = new_state(&mut states);
                    let accept = new_state(&mut states);
                    link(&mut states, start, None, n.start);
                    link(&mut states, start, None, accept);
                    link(&mut states, n.accept, None, accept);
                    states[accept].accepting = true;
                    stack.push(Fragment { start, accept });
                }
                symbol => {
                    let start = new_state(&mut states);
                    let accept = new_state(&mut states);
                    link(&mut states, start, Some(symbol), accept);
                    states[accept].accepting = true;
                    stack.push(Fragment { start, accept });
                }
            }
        }

        let fragment = stack.pop().ok_or(RegexError::EmptyExpression)?;
        if !stack.is_empty() {
            return Err(RegexError::UnbalancedExpression);
        }
        Ok(Nfa {
            states,
            start: fragment.start,
            accept: fragment.accept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_between_operands() {
        assert_eq!(explicit_concat("abc"), "a·b·c");
    }

    #[test]
    fn concat_around_groups() {
        assert_eq!(explicit_concat("a(b)"), "a·(b)");
        assert_eq!(explicit_concat("(a)b"), "(a)·b");
        assert_eq!(explicit_concat("(a)(b)"), "(a)·(b)");
    }

    #[test]
    fn concat_after_repetition() {
        assert_eq!(explicit_concat("a*b"), "a*·b");
        assert_eq!(explicit_concat("a+(b)"), "a+·(b)");
        assert_eq!(explicit_concat("a?b"), "a?·b");
    }

    #[test]
    fn no_concat_around_alternation() {
        assert_eq!(explicit_concat("a|b"), "a|b");
        assert_eq!(explicit_concat("a|b|c"), "a|b|c");
    }

    #[test]
    fn empty_input_passes_through() {
        assert_eq!(explicit_concat(""), "");
        assert_eq!(to_postfix(""), "");
    }

    #[test]
    fn postfix_precedence() {
        assert_eq!(to_postfix(&explicit_concat("a|bc")), "abc·|");
        assert_eq!(to_postfix(&explicit_concat("ab|c")), "ab·c|");
        assert_eq!(to_postfix(&explicit_concat("ab*")), "ab*·");
    }

    #[test]
    fn postfix_parenthesized() {
        assert_eq!(to_postfix(&explicit_concat("(a|b)c")), "ab|c·");
        assert_eq!(to_postfix(&explicit_concat("(a|b)*")), "ab|*");
    }

    #[test]
    fn unmatched_parens_are_dropped() {
        assert_eq!(to_postfix("(a·b"), "ab·");
        assert_eq!(to_postfix("a·b)"), "ab·");
    }

    #[test]
    fn literal_nfa_shape() {
        let nfa = Regex::compile("a").to_nfa().unwrap();
        assert_eq!(nfa.states().len(), 2);
        assert!(!nfa.states()[nfa.start_index()].is_accepting());
        assert!(nfa.states()[nfa.accept_index()].is_accepting());
    }

    #[test]
    fn interior_accept_flags_are_cleared() {
        let nfa = Regex::compile("ab").to_nfa().unwrap();
        let accepting: Vec<usize> = (0..nfa.states().len())
            .filter(|&i| nfa.states()[i].is_accepting())
            .collect();
        assert_eq!(accepting, vec![nfa.accept_index()]);
    }

    #[test]
    fn missing_operand_is_an_error() {
        assert_eq!(
            Regex::compile("*").to_nfa().unwrap_err(),
            RegexError::MissingOperand('*')
        );
        assert_eq!(
            Regex::compile("|a").to_nfa().unwrap_err(),
            RegexError::MissingOperand('|')
        );
    }

    #[test]
    fn empty_expression_is_an_error() {
        assert_eq!(
            Regex::compile("").to_nfa().unwrap_err(),
            RegexError::EmptyExpression
        );
    }
}
