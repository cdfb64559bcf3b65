use crate::parser::{ParsedRule, ParsedRules};
use crate::tokenizer::TokenizerBuilder;
use std::collections::HashSet;
use thiserror::Error;

/// Error when validating a parsed rule file into a [`TokenizerBuilder`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RulesParseError<'a> {
    #[error("token rule '{0}' defined multiple times")]
    DuplicateRule(&'a str),
}

impl<'a> TryFrom<ParsedRules<'a>> for TokenizerBuilder {
    type Error = RulesParseError<'a>;

    /// Converts a parsed rule file into a builder with the rules registered in file
    /// order, so the tie-breaking priorities follow the order of declaration.
    fn try_from(value: ParsedRules<'a>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        let mut builder = TokenizerBuilder::new();
        for ParsedRule { name, pattern } in value.rules {
            if !seen.insert(name) {
                return Err(RulesParseError::DuplicateRule(name));
            }
            builder = builder.rule(name, pattern);
        }
        Ok(builder)
    }
}
