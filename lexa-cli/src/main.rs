mod analyze;
mod load;
mod tables;
mod tokenize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lexa", version, about = "Scanner generation and grammar analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tokenize text with the rules of a rule file
    Tokenize {
        /// Path to the rule file
        rules: PathBuf,
        /// The text to tokenize; read from stdin when absent
        input: Option<String>,
        /// Characters of the alphabet; defaults to every literal mentioned by the rules
        #[arg(short, long)]
        alphabet: Option<String>,
    },
    /// Print the minimized DFA of every rule in a rule file
    Tables {
        /// Path to the rule file
        rules: PathBuf,
        /// Characters of the alphabet; defaults to every literal mentioned by the rules
        #[arg(short, long)]
        alphabet: Option<String>,
    },
    /// Print the FIRST and FOLLOW sets of a grammar file
    Analyze {
        /// Path to the grammar file
        grammar: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Tokenize {
            rules,
            input,
            alphabet,
        } => tokenize::run(rules, input.as_deref(), alphabet.as_deref()),
        Command::Tables { rules, alphabet } => tables::run(rules, alphabet.as_deref()),
        Command::Analyze { grammar } => analyze::run(grammar),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
