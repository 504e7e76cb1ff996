#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::rules::{GlobalRules, OneOf, Production};
use crate::token::Exact;
use crate::test_support::{chars, lit};
use crate::CancellationToken;

fn grammar_with(entry: &str, body: crate::RuleRef<char>) -> Grammar<char> {
    Grammar::new().with_rule(Production::new(entry, body).unwrap().into_rule(), false)
}

fn ambiguous() -> Parser<char> {
    let body = Arc::new(OneOf::new(vec![lit("a"), lit("a")]).unwrap());
    Parser::new(grammar_with("A", body)).with_options(ParseOptions::default().sequential())
}

#[test]
fn single_survivor_yields_its_tree() {
    let parser = Parser::new(grammar_with("Word", lit("ab")));
    let tree = parser.parse(chars("ab"), "Word").unwrap().unwrap();
    let root = tree.root().unwrap();
    assert_eq!(root.rule_name(), "Word");
    assert_eq!(root.span(), 0..2);
}

#[test]
fn no_survivor_is_not_an_error() {
    let parser = Parser::new(grammar_with("Word", lit("ab")));
    assert_eq!(parser.parse(chars("xy"), "Word"), Ok(None));
}

#[test]
fn several_survivors_are_ambiguous() {
    assert_eq!(
        ambiguous().parse(chars("a"), "A"),
        Err(Error::AmbiguousParse {
            rule: "A".to_owned(),
            branches: 2
        })
    );
}

#[test]
fn parse_all_returns_every_interpretation() {
    let trees = ambiguous().parse_all(chars("a"), "A").unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0], trees[1]);
}

#[test]
fn unknown_entry_rule_fails_eagerly() {
    let parser = Parser::new(Grammar::<char>::new());
    assert_eq!(
        parser.parse(chars("a"), "Missing"),
        Err(Error::RuleNotFound {
            name: "Missing".to_owned()
        })
    );
}

#[test]
fn incomplete_matches_are_dropped_by_default() {
    let parser = Parser::new(grammar_with("Word", lit("ab")));
    assert_eq!(parser.parse(chars("abc"), "Word"), Ok(None));

    let partial = Parser::new(grammar_with("Word", lit("ab")))
        .with_options(ParseOptions::default().allow_partial());
    let tree = partial.parse(chars("abc"), "Word").unwrap().unwrap();
    assert_eq!(tree.root().map(|root| root.span()), Some(0..2));
}

#[test]
fn cancelled_parse_reports_cancellation() {
    let token = CancellationToken::new();
    token.cancel();
    let parser = Parser::new(grammar_with("Word", lit("ab")))
        .with_options(ParseOptions::default().with_cancellation(token));
    assert_eq!(parser.parse(chars("ab"), "Word"), Err(Error::Cancelled));
}

#[test]
fn parser_is_reusable_across_threads() {
    let parser = Arc::new(Parser::new(grammar_with("Word", lit("ab"))));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let parser = Arc::clone(&parser);
            std::thread::spawn(move || parser.parse(chars("ab"), "Word").map(|t| t.is_some()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(true));
    }
}

/// `Pair ::= "a" "b"` with `Ws ::= (' ' | '\n')+` as a global rule.
fn spaced_pair() -> Parser<char> {
    let ws = Production::define("Ws", GlobalRules::None, |r| {
        let blank = r.one_of(vec![r.tokens(vec![' '], Exact)?, r.tokens(vec!['\n'], Exact)?])?;
        Ok(r.one_or_more(blank))
    })
    .unwrap()
    .atomic()
    .into_rule();
    let pair = Production::define("Pair", GlobalRules::All, |r| {
        r.sequence(vec![r.tokens(vec!['a'], Exact)?, r.tokens(vec!['b'], Exact)?])
    })
    .unwrap()
    .into_rule();
    let grammar = Grammar::new().with_rule(pair, false).with_rule(ws, true);
    Parser::new(grammar)
}

#[test]
fn repeated_global_matches_are_not_ambiguous() {
    let tree = spaced_pair().parse(chars("a  \n b"), "Pair").unwrap().unwrap();
    assert_eq!(tree.root().map(|root| root.span()), Some(0..6));
}

#[test]
fn trailing_global_rules_complete_the_input() {
    let parser = spaced_pair();
    let tree = parser.parse(chars("a b \n"), "Pair").unwrap().unwrap();
    assert_eq!(tree.root().map(|root| root.span()), Some(0..3));
    assert_eq!(tree.len(), 1);

    assert_eq!(parser.parse(chars("a b \nc"), "Pair"), Ok(None));
}

#[test]
fn tracing_setup_tolerates_repeated_calls() {
    crate::init_tracing();
    crate::init_tracing();
    let parser = Parser::new(grammar_with("Word", lit("ab")));
    assert!(parser.parse(chars("ab"), "Word").unwrap().is_some());
}
