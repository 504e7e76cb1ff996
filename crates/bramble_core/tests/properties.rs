#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

//! Property tests over generated inputs.

use std::sync::Arc;

use bramble_core::rules::{
    GlobalRules, LiteralSequence, Production, RuleFactory, Terminal, ZeroOrMore,
};
use bramble_core::token::Exact;
use bramble_core::{
    match_rule, Branch, Grammar, ParseOptions, ParseTree, Parser, RuleRef, SliceSource,
};
use proptest::prelude::*;

fn chars(input: &str) -> SliceSource<char> {
    SliceSource::new(input.chars().collect::<Vec<_>>(), '\0')
}

fn define(
    name: &str,
    build: impl FnOnce(&RuleFactory<char>) -> bramble_core::Result<RuleRef<char>>,
) -> RuleRef<char> {
    Production::define(name, GlobalRules::None, build)
        .unwrap()
        .into_rule()
}

/// ```text
/// List   ::= Word (Comma Word)*
/// Word   ::= Letter+
/// Comma  ::= ","
/// Letter ::= 'a'..'z'
/// ```
fn list_parser() -> Parser<char> {
    let letter = Terminal::new("Letter", |branch: &mut Branch<char>| {
        if branch.is_at_end() || !branch.current().is_ascii_lowercase() {
            return Ok(false);
        }
        branch.advance()?;
        Ok(true)
    });
    let word = define("Word", |rules| Ok(rules.one_or_more(rules.rule("Letter")?)));
    let comma = define("Comma", |rules| rules.tokens(vec![','], Exact));
    let list = define("List", |rules| {
        rules.sequence(vec![
            rules.rule("Word")?,
            rules.zero_or_more(rules.sequence(vec![rules.rule("Comma")?, rules.rule("Word")?])?),
        ])
    });

    let grammar = Grammar::new()
        .with_rule(Arc::new(letter), false)
        .with_rule(word, false)
        .with_rule(comma, false)
        .with_rule(list, false);
    Parser::new(grammar).with_options(ParseOptions::default().sequential())
}

fn assert_spans_nest(tree: &ParseTree) {
    for node in tree.iter() {
        assert!(node.start_position() <= node.end_position());
        let mut cursor = node.start_position();
        for child in node.children() {
            assert!(child.start_position() >= cursor, "{child:?} overlaps in {node:?}");
            assert!(child.end_position() <= node.end_position());
            cursor = child.end_position();
        }
    }
}

proptest! {
    #[test]
    fn spans_nest_and_leaves_round_trip(words in prop::collection::vec("[a-z]{1,4}", 1..5)) {
        let input = words.join(",");
        let backing: Vec<char> = input.chars().collect();
        let tree = list_parser().parse(chars(&input), "List").unwrap().unwrap();

        let root = tree.root().unwrap();
        prop_assert_eq!(root.span(), 0..backing.len());
        assert_spans_nest(&tree);

        let leaves: String = tree
            .iter()
            .filter(|node| node.is_leaf())
            .flat_map(|node| node.slice(&backing).iter().copied())
            .collect();
        prop_assert_eq!(leaves, input);

        let words_found = tree.iter().filter(|node| node.rule_name() == "Word").count();
        prop_assert_eq!(words_found, words.len());
    }

    #[test]
    fn zero_or_more_yields_every_count(count in 0usize..12) {
        let rule = ZeroOrMore::new(Arc::new(LiteralSequence::new(vec!['a'], Exact).unwrap()));
        let branch = Branch::new(
            Arc::new(Grammar::new()),
            Box::new(chars(&"a".repeat(count))),
            ParseOptions::default(),
        );
        let ends: Vec<_> = match_rule(&rule, branch)
            .unwrap()
            .iter()
            .map(Branch::position)
            .collect();
        prop_assert_eq!(ends, (0..=count).collect::<Vec<_>>());
    }

    #[test]
    fn malformed_lists_are_rejected(words in prop::collection::vec("[a-z]{1,3}", 1..4)) {
        let input = format!("{},", words.join(","));
        prop_assert_eq!(list_parser().parse(chars(&input), "List").unwrap(), None);
    }
}
