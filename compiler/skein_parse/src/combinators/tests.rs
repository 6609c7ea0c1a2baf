use super::*;
use crate::RuleResult;
use skein_ir::Node;
use pretty_assertions::assert_eq;

/// INT tokens with the given texts on one line, then EOF.
fn ints(texts: &[&str]) -> Vec<Token> {
    tokens(&texts.iter().map(|&text| ("INT", text)).collect::<Vec<_>>())
}

/// Tokens on line 1 at columns 1, 2, 3, ..., then EOF.
fn tokens(kinds_and_texts: &[(&str, &str)]) -> Vec<Token> {
    let mut out: Vec<Token> = kinds_and_texts
        .iter()
        .zip(1..)
        .map(|(&(kind, text), column)| Token::new(kind, text, 1, column))
        .collect();
    let column = u32::try_from(kinds_and_texts.len()).unwrap() + 1;
    out.push(Token::new("EOF", "", 1, column));
    out
}

/// One line per candidate: `Kind [leaf texts] +remaining` or `error Rule at line:column`.
fn describe(candidates: Candidates<'_>) -> Vec<String> {
    candidates
        .map(|result| match &result.outcome {
            Ok(node) => {
                let texts: Vec<&str> = node
                    .leaves()
                    .into_iter()
                    .map(|token| token.text.as_str())
                    .collect();
                format!(
                    "{} [{}] +{}",
                    node.kind,
                    texts.join(" "),
                    result.remaining.len()
                )
            }
            Err(error) => format!("error {} at {}", error.rule, error.token.position()),
        })
        .collect()
}

// === Tokens ===

#[test]
fn token_matches_by_type() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let input = ints(&["7"]);
    assert_eq!(describe(g.check(int, &input)), vec!["Int [7] +1"]);
}

#[test]
fn token_mismatch_leaves_input_untouched() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let input = tokens(&[("COMMA", ",")]);
    let results: Vec<_> = g.check(int, &input).collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].remaining.len(), input.len());
    let error = results[0].error().unwrap();
    assert_eq!(error.rule, "Int");
    assert_eq!(error.token.text, ",");
}

#[test]
fn token_on_empty_input_fails_at_end_of_stream() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let empty: Vec<Token> = Vec::new();
    let results: Vec<_> = g.check(int, &empty).collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].error().unwrap().token, Token::end_of_stream());
}

#[test]
fn token_value_checks_text() {
    let mut g = Grammar::new();
    let one = g.token_value("One", "INT", "1");
    let input = ints(&["2"]);
    assert_eq!(describe(g.check(one, &input)), vec!["error One at 1:1"]);
    let input = ints(&["1"]);
    assert_eq!(describe(g.check(one, &input)), vec!["One [1] +1"]);
}

// === Seq ===

#[test]
fn seq_matches_in_order() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let comma = g.token_type("Comma", "COMMA");
    let pair = g.seq("Pair", [int, comma, int]);
    let input = tokens(&[("INT", "1"), ("COMMA", ","), ("INT", "2")]);

    let results: Vec<_> = g.check(pair, &input).collect();
    assert_eq!(results.len(), 1);
    let node = results[0].node().unwrap();
    let kinds: Vec<&str> = node.children().iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(kinds, vec!["Int", "Comma", "Int"]);
    assert_eq!(results[0].remaining.len(), 1);
}

#[test]
fn seq_reports_the_failing_part() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let comma = g.token_type("Comma", "COMMA");
    let pair = g.seq("Pair", [int, comma, int]);
    let input = ints(&["1", "2"]);
    assert_eq!(describe(g.check(pair, &input)), vec!["error Comma at 1:2"]);
}

#[test]
fn empty_seq_matches_nothing() {
    let mut g = Grammar::new();
    let nothing = g.seq("Nothing", []);
    let input = ints(&[]);
    assert_eq!(describe(g.check(nothing, &input)), vec!["Nothing [] +1"]);
}

#[test]
fn seq_backtracks_into_repetition() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let many = g.many("Ints", int);
    let line = g.seq("Line", [many, int]);
    let input = ints(&["1", "2", "3"]);

    assert_eq!(
        describe(g.check(line, &input)),
        vec![
            "Line [1 2 3] +1",
            "Line [1 2] +2",
            "Line [1] +3",
            "error Int at 1:4",
        ]
    );

    let first = g.check(line, &input).next().unwrap();
    let node = first.node().unwrap();
    assert_eq!(node.children()[0].children().len(), 2);
    assert_eq!(node.children()[1].text(), "3");
}

// === Or ===

#[test]
fn or_keeps_every_alternative() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let many = g.many("Ints", int);
    let choice = g.or("Choice", [int, many]).unwrap();
    let input = ints(&["1"]);

    assert_eq!(
        describe(g.check(choice, &input)),
        vec![
            "Choice [1] +1",
            "Choice [1] +1",
            "Choice [] +2",
            "error Int at 1:2",
        ]
    );

    let first = g.check(choice, &input).next().unwrap();
    let node = first.node().unwrap();
    assert_eq!(node.children().len(), 1);
    assert_eq!(node.children()[0].kind, "Int");
}

#[test]
fn or_without_success_reports_first_of_equal_failures() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let comma = g.token_type("Comma", "COMMA");
    let choice = g.or("Choice", [int, comma]).unwrap();
    let input = tokens(&[("WORD", "x")]);
    assert_eq!(describe(g.check(choice, &input)), vec!["error Int at 1:1"]);
}

#[test]
fn or_reports_the_furthest_failure() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let comma = g.token_type("Comma", "COMMA");
    let short = g.seq("Short", [comma]);
    let long = g.seq("Long", [int, int, comma]);
    let choice = g.or("Choice", [short, long]).unwrap();
    let input = ints(&["1", "2", "3"]);
    assert_eq!(describe(g.check(choice, &input)), vec!["error Comma at 1:3"]);
}

// === Repetition ===

#[test]
fn many_is_longest_first_then_empty() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let many = g.many("Ints", int);
    let input = ints(&["1", "2"]);
    assert_eq!(
        describe(g.check(many, &input)),
        vec!["Ints [1 2] +1", "Ints [1] +2", "Ints [] +3", "error Int at 1:3"]
    );
}

#[test]
fn many_matches_empty_input() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let many = g.many("Ints", int);
    let empty: Vec<Token> = Vec::new();
    let results: Vec<_> = g.check(many, &empty).collect();
    assert_eq!(results[0].node(), Some(&Node::internal("Ints", vec![])));
    assert!(results[0].remaining.is_empty());
}

#[test]
fn one_or_many_has_no_empty_candidate() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let some = g.one_or_many("Ints", int);
    let input = ints(&["1", "2"]);
    assert_eq!(
        describe(g.check(some, &input)),
        vec!["Ints [1 2] +1", "Ints [1] +2", "error Int at 1:3"]
    );
}

#[test]
fn one_or_many_fails_without_a_first_item() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let some = g.one_or_many("Ints", int);
    let input = tokens(&[("COMMA", ",")]);
    let results: Vec<_> = g.check(some, &input).collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].remaining.len(), input.len());
    assert_eq!(results[0].error().unwrap().token.text, ",");
}

#[test]
fn zero_width_items_do_not_loop() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let inner = g.many("Inner", int);
    let outer = g.many("Outer", inner);
    let input = ints(&[]);

    let results: Vec<_> = g.check(outer, &input).collect();
    assert_eq!(
        describe(g.check(outer, &input)),
        vec!["Outer [] +1", "Outer [] +1", "error Int at 1:1"]
    );
    assert_eq!(results[0].node().unwrap().children().len(), 1);
    assert_eq!(results[1].node().unwrap().children().len(), 0);
}

#[test]
fn zero_width_items_end_a_longer_match() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let maybe = g.one_or_none("Maybe", int);
    let outer = g.many("Outer", maybe);
    let input = ints(&["1", "2"]);

    let results: Vec<_> = g.check(outer, &input).collect();
    let first = results[0].node().unwrap();
    assert_eq!(first.text(), "12");
    assert_eq!(first.children().len(), 3);
    assert_eq!(results[0].remaining.len(), 1);
}

// === Optional ===

#[test]
fn one_or_none_matches_then_skips() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let maybe = g.one_or_none("Maybe", int);
    let input = ints(&["1"]);
    assert_eq!(
        describe(g.check(maybe, &input)),
        vec!["Maybe [1] +1", "Maybe [] +2"]
    );
}

#[test]
fn one_or_none_skips_then_reports() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let maybe = g.one_or_none("Maybe", int);
    let input = ints(&[]);
    assert_eq!(
        describe(g.check(maybe, &input)),
        vec!["Maybe [] +1", "error Int at 1:1"]
    );
}

// === Separated lists ===

#[test]
fn separated_list_is_flat_and_longest_first() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let comma = g.token_type("Comma", "COMMA");
    let list = g.many_with_separator("List", int, comma);
    let input = tokens(&[
        ("INT", "1"),
        ("COMMA", ","),
        ("INT", "2"),
        ("COMMA", ","),
        ("INT", "3"),
    ]);

    assert_eq!(
        describe(g.check(list, &input)),
        vec![
            "List [1 , 2 , 3] +1",
            "List [1 , 2] +3",
            "List [1] +5",
            "List [] +6",
            "error Comma at 1:6",
        ]
    );

    let first = g.check(list, &input).next().unwrap();
    let kinds: Vec<&str> = first
        .node()
        .unwrap()
        .children()
        .iter()
        .map(|c| c.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["Int", "Comma", "Int", "Comma", "Int"]);
}

#[test]
fn separated_list_does_not_end_on_a_separator() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let comma = g.token_type("Comma", "COMMA");
    let list = g.one_or_many_with_separator("List", int, comma);
    let input = tokens(&[("INT", "1"), ("COMMA", ",")]);
    assert_eq!(
        describe(g.check(list, &input)),
        vec!["List [1] +2", "error Int at 1:3"]
    );
}

#[test]
fn one_or_many_separated_needs_an_item() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let comma = g.token_type("Comma", "COMMA");
    let list = g.one_or_many_with_separator("List", int, comma);
    let input = ints(&[]);
    assert_eq!(describe(g.check(list, &input)), vec!["error Int at 1:1"]);
}

// === Rename and forward references ===

#[test]
fn rename_relabels_nodes_and_errors() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let number = g.rename("Number", int);
    let input = ints(&["5"]);
    assert_eq!(describe(g.check(number, &input)), vec!["Number [5] +1"]);
    let input = tokens(&[("COMMA", ",")]);
    assert_eq!(describe(g.check(number, &input)), vec!["error Number at 1:1"]);
}

#[test]
fn forward_reference_is_transparent() {
    let mut g = Grammar::new();
    let value = g.declare("Value");
    let int = g.token_type("Int", "INT");
    g.define(value, int).unwrap();
    let input = ints(&["9"]);
    assert_eq!(describe(g.check(value, &input)), vec!["Int [9] +1"]);
}

#[test]
fn undefined_forward_reference_yields_nothing() {
    let mut g = Grammar::new();
    let value = g.declare("Value");
    let input = ints(&["9"]);
    assert!(describe(g.check(value, &input)).is_empty());
}

#[test]
fn recursive_rules_terminate() {
    // List := "(" Value* ")" ; Value := INT | List
    let mut g = Grammar::new();
    let value = g.declare("Value");
    let open = g.token_type("Open", "OPEN");
    let close = g.token_type("Close", "CLOSE");
    let int = g.token_type("Int", "INT");
    let items = g.many("Items", value);
    let list = g.seq("List", [open, items, close]);
    let body = g.or("ValueBody", [int, list]).unwrap();
    g.define(value, body).unwrap();

    let input = tokens(&[
        ("OPEN", "("),
        ("INT", "1"),
        ("OPEN", "("),
        ("CLOSE", ")"),
        ("CLOSE", ")"),
    ]);
    let first = g.check(value, &input).find(RuleResult::is_match).unwrap();
    assert_eq!(first.node().unwrap().text(), "(1())");
    assert_eq!(first.remaining.len(), 1);
}

#[test]
fn unmatched_blames_the_first_token() {
    let input = ints(&["4"]);
    assert_eq!(unmatched("X", &input).token.text, "4");
    assert_eq!(unmatched("X", &[]).token, Token::end_of_stream());
}

// === Exhaustion and long input ===

#[test]
fn seq_is_exhausted_after_its_only_success() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let pair = g.seq("Pair", [int, int]);
    let input = ints(&["1", "2"]);
    let mut stream = g.check(pair, &input);
    assert!(!stream.successes_exhausted());
    assert!(stream.next().unwrap().is_match());
    assert!(stream.successes_exhausted());
    assert!(stream.next().is_none());
}

#[test]
fn many_is_exhausted_only_after_the_empty_candidate() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let many = g.many("Ints", int);
    let input = ints(&["1"]);
    let mut stream = g.check(many, &input);
    assert!(stream.next().unwrap().is_match());
    assert!(!stream.successes_exhausted());
    assert!(stream.next().unwrap().is_match());
    assert!(stream.successes_exhausted());
    assert!(stream.next().unwrap().error().is_some());
}

#[test]
fn optional_and_renamed_streams_report_exhaustion() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let maybe = g.one_or_none("Maybe", int);
    let alias = g.rename("Alias", maybe);
    let input = ints(&["1"]);
    let mut stream = g.check(alias, &input);
    assert!(stream.next().unwrap().is_match());
    assert!(!stream.successes_exhausted());
    assert!(stream.next().unwrap().is_match());
    assert!(stream.successes_exhausted());
}

#[test]
fn held_items_survive_every_later_candidate() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let many = g.many("Ints", int);
    let line = g.seq("Line", [int, many, many]);
    let input = ints(&["1", "2"]);
    assert_eq!(
        describe(g.check(line, &input)),
        vec![
            "Line [1 2] +1",
            "Line [1 2] +1",
            "Line [1] +2",
            "error Int at 1:3",
        ]
    );
}

#[test]
fn long_repetitions_do_not_overflow() {
    let mut g = Grammar::new();
    let int = g.token_type("Int", "INT");
    let many = g.many("Ints", int);
    let texts: Vec<String> = (0..5_000).map(|i| i.to_string()).collect();
    let input = ints(&texts.iter().map(String::as_str).collect::<Vec<_>>());

    let mut stream = g.check(many, &input);
    let first = stream.next().unwrap();
    let node = first.node().unwrap();
    assert_eq!(node.children().len(), 5_000);
    assert_eq!(node.child(4_999).and_then(Node::token).unwrap().text, "4999");
    assert_eq!(first.remaining.len(), 1);
    drop(stream);
}
