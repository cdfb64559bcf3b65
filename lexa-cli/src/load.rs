use lexa::grammar::Grammar;
use lexa::tokenizer::TokenizerBuilder;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error loading file {0}: {1}")]
    File(PathBuf, io::Error),
    #[error("Error reading stdin: {0}")]
    Stdin(io::Error),
    #[error("Error parsing rule file: {0}")]
    RulesParse(nom::error::Error<String>),
    #[error("Error in rule file: {0}")]
    RulesInvalid(String),
    #[error("Error parsing grammar: {0}")]
    GrammarParse(nom::error::Error<String>),
    #[error("Error in grammar: {0}")]
    GrammarInvalid(#[from] lexa::grammar::GrammarParseError),
    #[error("{0}")]
    Build(#[from] lexa::tokenizer::BuildError),
    #[error("{0}")]
    Lexical(#[from] lexa::tokenizer::LexicalError),
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| Error::File(path.to_path_buf(), e))
}

/// Loads a rule file into a builder with the rules in declaration order.
pub fn rule_file(path: &Path) -> Result<TokenizerBuilder, Error> {
    let content = read(path)?;
    let parsed = lexa::parser::rules(&content)
        .map_err(|e| Error::RulesParse(nom::error::Error::new(e.input.to_string(), e.code)))?;
    parsed
        .try_into()
        .map_err(|e: lexa::tokenizer::RulesParseError| Error::RulesInvalid(e.to_string()))
}

/// Loads and validates a grammar file.
pub fn grammar_file(path: &Path) -> Result<Grammar, Error> {
    let content = read(path)?;
    let parsed = lexa::parser::grammar(&content)
        .map_err(|e| Error::GrammarParse(nom::error::Error::new(e.input.to_string(), e.code)))?;
    Ok(parsed.try_into()?)
}

/// The alphabet from the `--alphabet` flag, or every literal mentioned by the rules.
pub fn alphabet(builder: &TokenizerBuilder, flag: Option<&str>) -> Vec<char> {
    match flag {
        Some(chars) => chars.chars().collect(),
        None => builder.literal_characters(),
    }
}
