use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use lexa::grammar::Grammar;
use lexa::regex::Regex;
use lexa::tokenizer::TokenizerBuilder;

const ALPHABET: [char; 4] = ['0', '1', 'a', 'b'];

lazy_static! {
    static ref INPUT: String = "ab01b a0 10ab ".repeat(500);
}

fn builder() -> TokenizerBuilder {
    TokenizerBuilder::new()
        .rule("AB", "ab")
        .rule("NUMBER", "(0|1)(0|1)*")
        .rule("ID", "(a|b)(a|b|0|1)*")
        .rule("SPACE", " ")
}

pub fn tokenizer_build(c: &mut Criterion) {
    c.bench_function("tokenizer build", |b| {
        b.iter(|| black_box(builder()).build(&['0', '1', 'a', 'b', ' ']).unwrap())
    });
}

pub fn tokenize(c: &mut Criterion) {
    let tokenizer = builder().build(&['0', '1', 'a', 'b', ' ']).unwrap();
    c.bench_function("tokenize", |b| {
        b.iter(|| tokenizer.tokenize(black_box(&INPUT)).unwrap())
    });
}

pub fn minimize(c: &mut Criterion) {
    // fourth-to-last symbol is an 'a': the subset construction blows this up
    let dfa = Regex::compile("(a|b)*a(a|b)(a|b)(a|b)")
        .to_nfa()
        .unwrap()
        .to_dfa(&ALPHABET);
    c.bench_function("dfa minimize", |b| b.iter(|| black_box(&dfa).minimized()));
}

pub fn analysis(c: &mut Criterion) {
    let grammar: Grammar = lexa::parser::grammar(
        "
        E  -> T E'
        E' -> + T E' | ε
        T  -> F T'
        T' -> * F T' | ε
        F  -> ( E ) | id
        ",
    )
    .unwrap()
    .try_into()
    .unwrap();
    c.bench_function("first/follow", |b| {
        b.iter(|| {
            let grammar = black_box(&grammar);
            (grammar.first_sets(), grammar.follow_sets())
        })
    });
}

criterion_group!(benches, tokenizer_build, tokenize, minimize, analysis);
criterion_main!(benches);
