use crate::load::{self, Error};
use lexa::grammar::Symbol;
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub fn run(grammar: &Path) -> Result<(), Error> {
    let grammar = load::grammar_file(grammar)?;
    let first = grammar.first_sets();
    let follow = grammar.follow_sets();

    // Stable ordering: non-terminals sorted by name, sets sorted with ε and $ last
    // (the derived Symbol ordering)
    let mut non_terminals: Vec<&Symbol> = grammar.non_terminals().iter().collect();
    non_terminals.sort();
    let width = non_terminals
        .iter()
        .map(|symbol| symbol.name().chars().count())
        .max()
        .unwrap_or(0);

    println!("FIRST sets:");
    for &symbol in &non_terminals {
        print_set(symbol, &first, width);
    }
    println!();
    println!("FOLLOW sets:");
    for &symbol in &non_terminals {
        print_set(symbol, &follow, width);
    }
    Ok(())
}

fn print_set(symbol: &Symbol, sets: &HashMap<Symbol, HashSet<Symbol>>, width: usize) {
    let mut members: Vec<&Symbol> = sets.get(symbol).into_iter().flatten().collect();
    members.sort();
    let rendered: Vec<String> = members.iter().map(|member| member.to_string()).collect();
    println!(
        "  {:width$}  {{ {} }}",
        symbol.name(),
        rendered.join(" "),
        width = width
    );
}
