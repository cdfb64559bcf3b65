use crate::load::{self, Error};
use std::io::Read;
use std::path::Path;

pub fn run(rules: &Path, input: Option<&str>, alphabet: Option<&str>) -> Result<(), Error> {
    let builder = load::rule_file(rules)?;
    let alphabet = load::alphabet(&builder, alphabet);
    let tokenizer = builder.build(&alphabet)?;

    let input = match input {
        Some(text) => text.to_string(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(Error::Stdin)?;
            buffer
        }
    };

    let tokens = tokenizer.tokenize(input.trim_end_matches('\n'))?;
    for token in &tokens {
        println!("{token}");
    }
    Ok(())
}
