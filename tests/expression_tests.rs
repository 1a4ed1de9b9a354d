//! Document-mode expression parsing tests.
//! End-to-end coverage for the grammar: literals, paths, operators,
//! predicates, placeholders and the canonical printer round trip.

use xexpr_core::{parse, parse_with, DocumentPathItem, Expr, Identifier, ParserOptions, Scalar};

fn field(name: &str) -> Expr {
    Expr::Identifier(Identifier {
        document_path: vec![DocumentPathItem::Member(name.to_string())],
        ..Default::default()
    })
}

/// Parse, print, and re-parse; the trees must be structurally equal
fn assert_round_trip(input: &str) {
    let first = parse(input).unwrap();
    let printed = first.output.to_string();
    let second = parse(&printed)
        .unwrap_or_else(|e| panic!("re-parse of '{printed}' (from '{input}') failed: {e}"));
    assert_eq!(
        first.output, second.output,
        "round trip changed the tree for '{input}' -> '{printed}'"
    );
}

#[test]
fn test_filter_expression_shape() {
    let result = parse("foo.bar = :v1 AND baz IN (1,2,3)").unwrap();

    let Expr::Operator(and) = &result.output else {
        panic!("expected operator root");
    };
    assert_eq!(and.name, "&&");
    assert_eq!(and.params.len(), 2);

    let Expr::Operator(eq) = &and.params[0] else {
        panic!("expected comparison on the left");
    };
    assert_eq!(eq.name, "==");
    assert_eq!(eq.params[1], Expr::Placeholder(0));

    let Expr::Operator(in_op) = &and.params[1] else {
        panic!("expected IN on the right");
    };
    assert_eq!(in_op.name, "in");
    assert_eq!(in_op.params.len(), 4);
}

#[test]
fn test_integer_classification_across_range() {
    for (input, expected) in [
        ("0", Scalar::UInt(0)),
        ("42", Scalar::UInt(42)),
        ("-1", Scalar::SInt(-1)),
        ("18446744073709551615", Scalar::UInt(u64::MAX)),
        (
            "18446744073709551616",
            Scalar::String("18446744073709551616".to_string()),
        ),
        ("-9223372036854775808", Scalar::SInt(i64::MIN)),
        (
            "-9223372036854775809",
            Scalar::String("-9223372036854775809".to_string()),
        ),
    ] {
        let result = parse(input).unwrap();
        assert_eq!(
            result.output,
            Expr::Literal(expected),
            "failed for input: {input}"
        );
    }
}

#[test]
fn test_float_classification_by_fraction_digits() {
    assert_eq!(
        parse("3.1415").unwrap().output,
        Expr::Literal(Scalar::Float(3.1415))
    );
    assert_eq!(
        parse("3.141592653").unwrap().output,
        Expr::Literal(Scalar::Double(3.141592653))
    );
}

#[test]
fn test_string_escaping_rules() {
    // Doubled quote and backslash-quote both unescape
    assert_eq!(
        parse("'it''s'").unwrap().output,
        Expr::Literal(Scalar::String("it's".to_string()))
    );
    assert_eq!(
        parse(r"'it\'s'").unwrap().output,
        Expr::Literal(Scalar::String("it's".to_string()))
    );
    // Double-quoted strings leave single quotes alone
    assert_eq!(
        parse("\"it's\"").unwrap().output,
        Expr::Literal(Scalar::String("it's".to_string()))
    );
    // Backslash-backslash collapses
    assert_eq!(
        parse(r"'a\\b'").unwrap().output,
        Expr::Literal(Scalar::String(r"a\b".to_string()))
    );
}

#[test]
fn test_keyword_case_insensitivity() {
    let lower = parse("a like 'x' and b is not null or not c").unwrap();
    let upper = parse("a LIKE 'x' AND b IS NOT NULL OR NOT c").unwrap();
    assert_eq!(lower.output, upper.output);
}

#[test]
fn test_deep_document_paths() {
    let result = parse("a.b[0].c[*].d**.e").unwrap();
    let Expr::Identifier(ident) = &result.output else {
        panic!("expected identifier");
    };
    assert_eq!(
        ident.document_path,
        vec![
            DocumentPathItem::Member("a".to_string()),
            DocumentPathItem::Member("b".to_string()),
            DocumentPathItem::ArrayIndex(0),
            DocumentPathItem::Member("c".to_string()),
            DocumentPathItem::ArrayIndexAsterisk,
            DocumentPathItem::Member("d".to_string()),
            DocumentPathItem::DoubleAsterisk,
            DocumentPathItem::Member("e".to_string()),
        ]
    );
}

#[test]
fn test_predicates_fall_through_to_comparison() {
    // No predicate keyword present: plain comparison survives unchanged
    let result = parse("a < b").unwrap();
    assert_eq!(
        result.output,
        Expr::operator("<", vec![field("a"), field("b")])
    );
}

#[test]
fn test_not_negates_operator_names_not_operands() {
    for (input, name) in [
        ("a not in (1)", "not_in"),
        ("a not in [1]", "not_cont_in"),
        ("a not like 'x'", "not_like"),
        ("a not between 1 and 2", "between_not"),
        ("a not regexp 'x'", "not_regexp"),
        ("a not overlaps b", "not_overlaps"),
        ("a is not false", "is_not"),
    ] {
        let result = parse(input).unwrap();
        let Expr::Operator(op) = &result.output else {
            panic!("expected operator for '{input}'");
        };
        assert_eq!(op.name, name, "failed for input: {input}");
        // The left operand stays a bare identifier
        assert_eq!(op.params[0], field("a"), "failed for input: {input}");
    }
}

#[test]
fn test_empty_containers_parse() {
    assert_eq!(parse("[]").unwrap().output, Expr::Array(vec![]));
    assert_eq!(parse("{}").unwrap().output, Expr::Object(vec![]));
}

#[test]
fn test_mixed_arithmetic_precedence() {
    // 1 + 2 * 3 << 2 & 1  parses as ((1 + (2*3)) << 2) & 1
    let result = parse("1 + 2 * 3 << 2 & 1").unwrap();
    let expected = Expr::operator(
        "&",
        vec![
            Expr::operator(
                "<<",
                vec![
                    Expr::operator(
                        "+",
                        vec![
                            Expr::Literal(Scalar::UInt(1)),
                            Expr::operator(
                                "*",
                                vec![
                                    Expr::Literal(Scalar::UInt(2)),
                                    Expr::Literal(Scalar::UInt(3)),
                                ],
                            ),
                        ],
                    ),
                    Expr::Literal(Scalar::UInt(2)),
                ],
            ),
            Expr::Literal(Scalar::UInt(1)),
        ],
    );
    assert_eq!(result.output, expected);
}

#[test]
fn test_placeholder_reuse_is_stable_anywhere() {
    let result = parse("(:a + :b) * :a - :c").unwrap();
    assert_eq!(
        result.placeholders,
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn test_scoped_paths() {
    let options = ParserOptions {
        scoped: true,
        ..Default::default()
    };
    let scoped = parse_with("$.meta.tags[0]", &options).unwrap();
    let bare = parse("meta.tags[0]").unwrap();
    assert_eq!(scoped.output, bare.output);
}

#[test]
fn test_round_trips() {
    for input in [
        "42",
        "-7",
        "1.5",
        "0.123456789",
        "'it''s'",
        "TRUE",
        "NULL",
        "foo.bar",
        "a.b[0].c[*]",
        "foo**.bar",
        "`a b`.`c``d`",
        "$",
        "$[0]",
        "[]",
        "{}",
        "[1, [2], {'k': 3}]",
        "{'a': 1, 'b': [TRUE]}",
        ":x AND :x",
        "foo.bar = :v1 AND baz IN (1,2,3)",
        "1 IN [1,2,3]",
        "a NOT IN (1, 2)",
        "name LIKE '%x%' ESCAPE '!'",
        "age NOT BETWEEN 18 AND 65",
        "name REGEXP '^a'",
        "a OVERLAPS b",
        "x IS NOT NULL",
        "NOT (a OR b)",
        "4 % 2 * 3",
        "10 DIV 3 - 1",
        "1 & 2 ^ 3 | 4",
        "1 << 2 >> 3",
        "'a' + INTERVAL 1 SECOND + INTERVAL 2 HOUR",
        "created - INTERVAL 30 DAY",
        "CAST(num AS DECIMAL(2,4))",
        "CAST(x AS SIGNED INTEGER)",
        "concat('a', foo.bar, :p)",
        "xt.ident(1)",
        "now()",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn test_ast_serialization_shape() {
    // The AST is the protocol-ready artifact; its serialized form must keep
    // variant names and field structure stable
    let result = parse("field in (1)").unwrap();
    let value = serde_json::to_value(&result.output).unwrap();
    assert_eq!(value["Operator"]["name"], "in");
    assert_eq!(
        value["Operator"]["params"][0]["Identifier"]["document_path"][0]["Member"],
        "field"
    );
    assert_eq!(value["Operator"]["params"][1]["Literal"]["UInt"], 1);
}

#[test]
fn test_parse_failures_are_fail_fast() {
    for input in [
        "",
        "AND 1",
        "1 +",
        "foo.",
        "foo..bar",
        "foo**",
        "[1,",
        "{'a' 1}",
        "{a: 1}",
        "(1",
        "cast(x as varchar)",
        "x + interval 1 fortnight",
        "a between 1",
        "a is 1",
        "not",
        ": AND 1",
    ] {
        assert!(parse(input).is_err(), "expected failure for '{input}'");
    }
}
