use crate::parser::{blank_line, trailing_space_comment, ParsedGrammar, ParsedProduction};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{space0, space1};
use nom::combinator::{map, verify};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{delimited, terminated, tuple};
use nom::IResult;

pub(crate) fn full_grammar(input: &str) -> IResult<&str, ParsedGrammar> {
    map(
        delimited(
            many0(blank_line),
            separated_list1(many1(blank_line), production_line),
            many0(blank_line),
        ),
        |productions| ParsedGrammar { productions },
    )(input)
}

fn production_line(input: &str) -> IResult<&str, ParsedProduction> {
    map(
        delimited(
            space0,
            tuple((
                terminated(symbol_name, space1),
                terminated(arrow, space1),
                separated_list1(delimited(space0, tag("|"), space0), alternative),
            )),
            trailing_space_comment,
        ),
        |(lhs, _, alternatives)| ParsedProduction { lhs, alternatives },
    )(input)
}

fn alternative(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(space1, symbol_name)(input)
}

fn symbol_name(input: &str) -> IResult<&str, &str> {
    verify(
        take_till1(|c: char| c.is_whitespace() || c == '#' || c == '|'),
        |name| !["->", "→"].contains(&name),
    )(input)
}

fn arrow(input: &str) -> IResult<&str, ()> {
    map(alt((tag("->"), tag("→"))), |_| ())(input)
}

#[cfg(test)]
mod tests {
    use crate::parser;

    #[test]
    fn parses_alternatives() {
        let parsed = parser::grammar("E -> T + E | T").unwrap();
        assert_eq!(parsed.productions.len(), 1);
        let production = &parsed.productions[0];
        assert_eq!(production.lhs, "E");
        assert_eq!(production.alternatives, vec![vec!["T", "+", "E"], vec!["T"]]);
    }

    #[test]
    fn parses_unicode_arrow_and_epsilon() {
        let parsed = parser::grammar("E' → + T E' | ε").unwrap();
        let production = &parsed.productions[0];
        assert_eq!(production.lhs, "E'");
        assert_eq!(production.alternatives, vec![vec!["+", "T", "E'"], vec!["ε"]]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let input = "
            # a tiny grammar
            S -> a S    # right recursion

            S -> b
        ";
        let parsed = parser::grammar(input).unwrap();
        assert_eq!(parsed.productions.len(), 2);
    }

    #[test]
    fn rejects_a_line_without_an_arrow() {
        assert!(parser::grammar("E T +").is_err());
    }
}
