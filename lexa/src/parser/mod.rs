//! # lexa parser
//! This module contains parsers for the two text formats understood by the toolkit: token
//! rule files and grammar files. Both parsers produce a borrowing `Parsed*` value which
//! only mirrors the structure of the file; validation happens in a second step with
//! [`TryInto`], into [`crate::tokenizer::TokenizerBuilder`] and [`crate::grammar::Grammar`]
//! respectively.
//!
//! ## Format for token rules
//! One rule per line: the token type name, whitespace, then the pattern. Neither may
//! contain whitespace or `#`. Rule order matters, since earlier rules win equal-length
//! matches when tokenizing. Comments start with `#` and run to the end of the line;
//! lines with only whitespace or comments are ignored.
//!
//! ```text
//! # keywords before identifiers
//! IF      if
//! ID      (i|f|a|b)(i|f|a|b)*
//! NUMBER  (0|1)(0|1)*
//! ```
//!
//! ## Format for grammars
//! One production per line: the left-hand side, `->` (or `→`), then one or more
//! alternatives separated by `|`, each a whitespace-separated sequence of symbols.
//! Symbols appearing on some left-hand side are non-terminals, all others are terminals.
//! `ε` (or `eps`) denotes the empty string and may only stand alone; `$` is reserved for
//! end-of-input and may not be written. The first line's left-hand side is the start
//! symbol. The same comment and whitespace rules apply.
//!
//! ```text
//! E  -> T E'
//! E' -> + T E' | ε
//! T  -> ( E ) | id
//! ```

mod grammar;
mod rules;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{line_ending, not_line_ending, space0};
use nom::combinator::{all_consuming, eof, opt, recognize, value, verify};
use nom::sequence::{pair, terminated};
use nom::{error::Error, Finish, IResult};

/// A token rule file parsed structurally, not yet validated.
#[derive(Debug)]
pub struct ParsedRules<'a> {
    pub rules: Vec<ParsedRule<'a>>,
}

/// One line of a token rule file.
#[derive(Debug, Clone, Copy)]
pub struct ParsedRule<'a> {
    pub name: &'a str,
    pub pattern: &'a str,
}

/// A grammar file parsed structurally, not yet validated.
#[derive(Debug)]
pub struct ParsedGrammar<'a> {
    pub productions: Vec<ParsedProduction<'a>>,
}

/// One line of a grammar file: a left-hand side and its alternatives.
#[derive(Debug)]
pub struct ParsedProduction<'a> {
    pub lhs: &'a str,
    pub alternatives: Vec<Vec<&'a str>>,
}

/// Parses a token rule file according to the format above. The whole string must be
/// parsable, otherwise this function errors. Note that the result is a [`ParsedRules`],
/// which is not yet checked for duplicate rule names; use [`TryInto::try_into`] to
/// convert it to a [`crate::tokenizer::TokenizerBuilder`].
pub fn rules(input: &str) -> Result<ParsedRules, Error<&str>> {
    all_consuming(rules::full_rules)(input)
        .finish()
        .map(|(_, rules)| rules)
}

/// Parses a grammar file according to the format above. The whole string must be
/// parsable, otherwise this function errors. Note that the result is a
/// [`ParsedGrammar`], which is not yet validated; use [`TryInto::try_into`] to convert
/// it to a [`crate::grammar::Grammar`].
pub fn grammar(input: &str) -> Result<ParsedGrammar, Error<&str>> {
    all_consuming(grammar::full_grammar)(input)
        .finish()
        .map(|(_, grammar)| grammar)
}

/// A line holding nothing but whitespace and/or a comment, including its line ending
/// (or eof). Refuses to succeed without consuming input, so wrapping it in `many0`
/// terminates at the end of the file. Both file formats treat such lines the same way,
/// so the combinator lives here rather than in either submodule.
fn blank_line(input: &str) -> IResult<&str, ()> {
    value(
        (),
        verify(
            recognize(terminated(trailing_space_comment, alt((line_ending, eof)))),
            |consumed: &str| !consumed.is_empty(),
        ),
    )(input)
}

/// Whatever may trail meaningful content on a line: whitespace and an optional comment.
fn trailing_space_comment(input: &str) -> IResult<&str, ()> {
    value((), pair(space0, opt(comment)))(input)
}

/// A `#` comment running to the end of the line
fn comment(input: &str) -> IResult<&str, ()> {
    value((), pair(tag("#"), not_line_ending))(input)
}
