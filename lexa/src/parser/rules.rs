use crate::parser::{blank_line, trailing_space_comment, ParsedRule, ParsedRules};
use nom::bytes::complete::take_till1;
use nom::character::complete::{space0, space1};
use nom::combinator::map;
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{delimited, pair, terminated};
use nom::IResult;

pub(crate) fn full_rules(input: &str) -> IResult<&str, ParsedRules> {
    map(
        delimited(
            many0(blank_line),
            separated_list1(many1(blank_line), rule_line),
            many0(blank_line),
        ),
        |rules| ParsedRules { rules },
    )(input)
}

fn rule_line(input: &str) -> IResult<&str, ParsedRule> {
    map(
        delimited(
            space0,
            pair(terminated(rule_name, space1), pattern),
            trailing_space_comment,
        ),
        |(name, pattern)| ParsedRule { name, pattern },
    )(input)
}

fn rule_name(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace() || c == '#')(input)
}

fn pattern(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace() || c == '#')(input)
}

#[cfg(test)]
mod tests {
    use crate::parser;

    #[test]
    fn parses_names_and_patterns() {
        let parsed = parser::rules("NUMBER (0|1)(0|1)*").unwrap();
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].name, "NUMBER");
        assert_eq!(parsed.rules[0].pattern, "(0|1)(0|1)*");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let input = "
            # two rules
            A a   # trailing comment

            B b*
        ";
        let parsed = parser::rules(input).unwrap();
        let names: Vec<&str> = parsed.rules.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn rejects_a_line_without_a_pattern() {
        assert!(parser::rules("JUST_A_NAME").is_err());
    }
}
