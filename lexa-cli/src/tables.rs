use crate::load::{self, Error};
use std::path::Path;

pub fn run(rules: &Path, alphabet: Option<&str>) -> Result<(), Error> {
    let builder = load::rule_file(rules)?;
    let alphabet = load::alphabet(&builder, alphabet);
    let tokenizer = builder.build(&alphabet)?;

    for rule in tokenizer.rules() {
        println!(
            "{} (priority {}, {} states):",
            rule.token_type(),
            rule.priority(),
            rule.dfa().states().len()
        );
        println!("{}", rule.dfa().to_table());
        println!();
    }
    Ok(())
}
