//! End-to-end tests with small client grammars
//!
//! These grammars are written the way a user of the library would write them:
//! a tree of combinator calls, invoked once, with the raw match turned into a
//! parse tree afterwards.

use lex_combinators::config::CombinatorConfig;
use lex_combinators::prelude::*;
use lex_combinators::runner::parse_tree;
use lex_combinators::testing::assert_tree;

/// var <Name> [= <Value>] ;
fn var_declaration() -> Parser {
    sequence(vec![
        symbol("var"),
        label("Name", word()),
        maybe(sequence(vec![symbol("="), label("Value", natural())])),
        semi(),
    ])
}

/// <type> {, <attribute>} :: <var> {, <var>}
fn fortran_declaration() -> Parser {
    let dimension = sequence(vec![
        symbol("dimension"),
        parens(label("Dim", sep_by(comma(), natural()))),
    ]);
    let intent = sequence(vec![symbol("intent"), parens(label("Intent", word()))]);
    let attribute = sequence(vec![comma(), choice(vec![dimension, intent])]);

    sequence(vec![
        label("Type", one_of(&["integer", "real", "logical"])),
        many(attribute),
        symbol("::"),
        sep_by(comma(), label("Var", word())),
    ])
}

#[test]
fn test_var_declaration_with_value() {
    let result = var_declaration().parse("var res = 42;");
    assert!(result.success);
    assert_eq!(result.remaining, "");

    let tree = get_parse_tree(&result.matched);
    assert_eq!(
        tree,
        ParseTree::map([
            ("Name", ParseTree::scalar("res")),
            ("Value", ParseTree::scalar("42")),
        ])
    );
}

#[test]
fn test_var_declaration_without_value() {
    let result = var_declaration().parse("var res;");
    assert!(result.success);
    assert_eq!(result.remaining, "");

    let tree = get_parse_tree(&result.matched);
    assert_tree(&tree)
        .key_count(1)
        .key("Name", |name| {
            name.scalar("res");
        })
        .no_key("Value");
}

#[test]
fn test_var_declaration_failure_keeps_input() {
    let result = var_declaration().parse("var res = ;");
    assert!(!result.success);
    assert_eq!(result.remaining, "var res = ;");
}

#[test]
fn test_label_round_trip() {
    let result = label("X", word()).parse("abc def");
    assert!(result.success);
    assert_eq!(result.remaining, " def");
    assert_eq!(
        get_parse_tree(&result.matched),
        ParseTree::map([("X", ParseTree::scalar("abc"))])
    );
}

#[test]
fn test_repeated_labels_collapse_into_list() {
    let result = sep_by(comma(), label("Var", word())).parse("u,v,w");
    assert!(result.success);
    assert_eq!(result.remaining, "");

    let tree = get_parse_tree(&result.matched);
    assert_tree(&tree).key("Var", |vars| {
        vars.scalars(&["u", "v", "w"]);
    });
}

#[test]
fn test_fortran_declaration() {
    let result = fortran_declaration().parse("integer, dimension(10), intent(in) :: a, b, c");
    assert!(result.success);
    assert_eq!(result.remaining, "");

    let tree = get_parse_tree(&result.matched);
    insta::assert_snapshot!(tree.to_json().unwrap(), @r#"
    {
      "Dim": [
        "10"
      ],
      "Intent": "in",
      "Type": "integer",
      "Var": [
        "a",
        "b",
        "c"
      ]
    }
    "#);
}

#[test]
fn test_fortran_declaration_single_variable_is_scalar() {
    let result = fortran_declaration().parse("real :: x");
    assert!(result.success);

    let tree = get_parse_tree(&result.matched);
    assert_tree(&tree)
        .key_count(2)
        .key("Type", |t| {
            t.scalar("real");
        })
        .key("Var", |v| {
            v.scalar("x");
        });
}

#[test]
fn test_fortran_declaration_yaml() {
    let result = fortran_declaration().parse("logical, intent(out) :: flag");
    let tree = get_parse_tree(&result.matched);
    insta::assert_snapshot!(tree.to_yaml().unwrap(), @r#"
    Intent: out
    Type: logical
    Var: flag
    "#);
}

#[test]
fn test_fortran_declaration_rejects_unknown_type() {
    let config = CombinatorConfig::default();
    assert!(parse_tree(&fortran_declaration(), "complex :: z", &config).is_err());
}

#[test]
fn test_whole_input_tree() {
    let config = CombinatorConfig::default();
    let tree = parse_tree(&var_declaration(), "var total = 7;\n", &config).unwrap();
    assert_tree(&tree)
        .key("Name", |n| {
            n.scalar("total");
        })
        .key("Value", |v| {
            v.scalar("7");
        });
}

/// expr := term ("+" term)*
/// term := natural | "(" expr ")"
#[test]
fn test_recursive_arithmetic_grammar() {
    let mut grammar = Grammar::new();
    let term = grammar.rule("term");
    let expr = grammar.rule("expr");

    grammar
        .define(
            "expr",
            sequence(vec![
                label("Operand", term.clone()),
                many(sequence(vec![symbol("+"), label("Operand", term)])),
            ]),
        )
        .unwrap();
    grammar
        .define("term", choice(vec![natural(), parens(expr)]))
        .unwrap();
    assert!(grammar.check().is_ok());

    let result = grammar.parse("expr", "1 + (2+3) + 4");
    assert!(result.success);
    assert_eq!(result.remaining, "");

    let tree = get_parse_tree(&result.matched);
    assert_tree(&tree).key("Operand", |operands| {
        operands
            .len(3)
            .item(0, |first| {
                first.scalar("1");
            })
            .item(1, |nested| {
                nested.key("Operand", |inner| {
                    inner.scalars(&["2", "3"]);
                });
            })
            .item(2, |last| {
                last.scalar("4");
            });
    });
}

#[test]
fn test_grammar_shared_across_threads() {
    let parser = var_declaration();
    let inputs = ["var a = 1;", "var b;", "var c = ;", "var d = 22;"];

    let results: Vec<(bool, String)> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let parser = parser.clone();
                scope.spawn(move || {
                    let result = parser.parse(input);
                    (result.success, result.remaining.to_string())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("parser thread panicked"))
            .collect()
    });

    for (input, (success, remaining)) in inputs.iter().zip(results) {
        let expected = parser.parse(input);
        assert_eq!(success, expected.success, "input {:?}", input);
        assert_eq!(remaining, expected.remaining, "input {:?}", input);
    }
}
