//! Parser integration tests
//!
//! Token sequences are built with the testing factories and laid out one space apart, so
//! `( a b ) c` means tokens at [0,1) [2,3) [4,5) [6,7) [8,9).

use lambda_syntax::lambda::ast::Tree;
use lambda_syntax::lambda::parsing::{parse, ParseErrorKind, ParseOutput};
use lambda_syntax::lambda::testing::{
    assemble, assert_tree, dot, hole, id, lambda, pl, pos, pr, range,
};
use lambda_syntax::lambda::token::Token;
use rstest::rstest;

fn parse_clean(tokens: &[Token]) -> ParseOutput {
    let output = parse(&assemble(tokens));
    assert!(output.is_ok(), "unexpected errors: {:?}", output.errors);
    output
}

fn error_kinds(output: &ParseOutput) -> Vec<ParseErrorKind> {
    output.errors.iter().map(|e| e.kind()).collect()
}

#[test]
fn test_variable() {
    let output = parse_clean(&[id("var")]);
    assert_eq!(output.expression, Tree::variable("var", range(0, 3)));
}

#[test]
fn test_parenthesized_variable() {
    let output = parse_clean(&[pl(), id("parenVar"), pr()]);
    assert_eq!(output.expression, Tree::variable("parenVar", range(0, 12)));
}

#[test]
fn test_application() {
    let output = parse_clean(&[id("fn"), id("arg")]);
    assert_eq!(
        output.expression,
        Tree::application(
            Tree::variable("fn", range(0, 2)),
            Tree::variable("arg", range(3, 6)),
            range(0, 6)
        )
    );
}

#[test]
fn test_application_of_blanks() {
    let output = parse_clean(&[hole(), hole()]);
    assert_eq!(
        output.expression,
        Tree::application(Tree::blank(range(0, 1)), Tree::blank(range(2, 3)), range(0, 3))
    );
}

#[test]
fn test_parenthesized_argument() {
    let output = parse_clean(&[id("a"), pl(), id("b"), id("c"), pr()]);
    assert_tree(&output.expression)
        .application()
        .range(0, 9)
        .function(|f| {
            f.variable("a").range(0, 1);
        })
        .argument(|arg| {
            arg.application()
                .range(2, 9)
                .function(|b| {
                    b.variable("b").range(4, 5);
                })
                .argument(|c| {
                    c.variable("c").range(6, 7);
                });
        });
}

#[test]
fn test_parenthesized_function() {
    let output = parse_clean(&[pl(), id("a"), id("b"), pr(), id("c")]);
    assert_eq!(
        output.expression,
        Tree::application(
            Tree::application(
                Tree::variable("a", range(2, 3)),
                Tree::variable("b", range(4, 5)),
                range(0, 7)
            ),
            Tree::variable("c", range(8, 9)),
            range(0, 9)
        )
    );
}

#[test]
fn test_application_is_left_associative() {
    let output = parse_clean(&[id("a"), id("b"), id("c")]);
    assert_tree(&output.expression)
        .application()
        .range(0, 5)
        .function(|ab| {
            ab.application().range(0, 3).renders_as("a b");
        })
        .argument(|c| {
            c.variable("c").range(4, 5);
        });
}

#[test]
fn test_abstraction() {
    let output = parse_clean(&[lambda(), id("x"), dot(), id("y")]);
    assert_eq!(
        output.expression,
        Tree::abstraction("x", Tree::variable("y", range(6, 7)), range(2, 3), range(0, 7))
    );
}

#[test]
fn test_nested_abstraction() {
    let output = parse_clean(&[
        lambda(),
        id("x"),
        dot(),
        lambda(),
        id("y"),
        dot(),
        id("y"),
        id("x"),
    ]);
    assert_tree(&output.expression)
        .abstraction("x")
        .range(0, 15)
        .parameter_range(2, 3)
        .body(|inner| {
            inner
                .abstraction("y")
                .range(6, 15)
                .parameter_range(8, 9)
                .body(|body| {
                    body.application().range(12, 15).renders_as("y x");
                });
        });
}

#[test]
fn test_redundant_parentheses() {
    // ( ( x ( ( y ) ) ) )
    let output = parse_clean(&[
        pl(),
        pl(),
        id("x"),
        pl(),
        pl(),
        id("y"),
        pr(),
        pr(),
        pr(),
        pr(),
    ]);
    assert_eq!(
        output.expression,
        Tree::application(
            Tree::variable("x", range(4, 5)),
            Tree::variable("y", range(6, 15)),
            range(0, 19)
        )
    );
}

#[test]
fn test_applied_abstractions() {
    // ( λ x . x ) ( λ y . y ) f
    let output = parse_clean(&[
        pl(),
        lambda(),
        id("x"),
        dot(),
        id("x"),
        pr(),
        pl(),
        lambda(),
        id("y"),
        dot(),
        id("y"),
        pr(),
        id("f"),
    ]);
    let identity_x =
        Tree::abstraction("x", Tree::variable("x", range(8, 9)), range(4, 5), range(0, 11));
    let identity_y =
        Tree::abstraction("y", Tree::variable("y", range(20, 21)), range(16, 17), range(12, 23));
    assert_eq!(
        output.expression,
        Tree::application(
            Tree::application(identity_x, identity_y, range(0, 23)),
            Tree::variable("f", range(24, 25)),
            range(0, 25)
        )
    );
    assert_eq!(output.expression.to_string(), "(λx. x) (λy. y) f");
}

#[test]
fn test_parentheses_around_and_inside_abstraction() {
    // ( ( λ x . ( ( x ) ) ) )
    let output = parse_clean(&[
        pl(),
        pl(),
        lambda(),
        id("x"),
        dot(),
        pl(),
        pl(),
        id("x"),
        pr(),
        pr(),
        pr(),
        pr(),
    ]);
    assert_eq!(
        output.expression,
        Tree::abstraction("x", Tree::variable("x", range(10, 19)), range(6, 7), range(0, 23))
    );
}

#[test]
fn test_curried_binder() {
    // λ x y . y x
    let output = parse_clean(&[lambda(), id("x"), id("y"), dot(), id("y"), id("x")]);
    assert_eq!(
        output.expression,
        Tree::abstraction(
            "x",
            Tree::abstraction(
                "y",
                Tree::application(
                    Tree::variable("y", range(8, 9)),
                    Tree::variable("x", range(10, 11)),
                    range(8, 11)
                ),
                range(4, 5),
                range(4, 11)
            ),
            range(2, 3),
            range(0, 11)
        )
    );
}

#[test]
fn test_curried_binders_inside_application() {
    // a ( λ v w x . λ y z . b ) c
    let output = parse_clean(&[
        id("a"),
        pl(),
        lambda(),
        id("v"),
        id("w"),
        id("x"),
        dot(),
        lambda(),
        id("y"),
        id("z"),
        dot(),
        id("b"),
        pr(),
        id("c"),
    ]);
    assert_tree(&output.expression)
        .application()
        .range(0, 27)
        .renders_as("a (λv. λw. λx. λy. λz. b) c")
        .argument(|c| {
            c.variable("c").range(26, 27);
        })
        .function(|f| {
            f.application().range(0, 25).argument(|v| {
                v.abstraction("v")
                    .range(2, 25)
                    .parameter_range(6, 7)
                    .body(|w| {
                        w.abstraction("w")
                            .range(8, 23)
                            .parameter_range(8, 9)
                            .body(|x| {
                                x.abstraction("x").range(10, 23).body(|y| {
                                    y.abstraction("y").range(14, 23).body(|z| {
                                        z.abstraction("z")
                                            .range(18, 23)
                                            .parameter_range(18, 19)
                                            .body(|b| {
                                                b.variable("b").range(22, 23);
                                            });
                                    });
                                });
                            });
                    });
            });
        });
}

#[test]
fn test_empty_token_list() {
    let output = parse(&[]);
    assert_eq!(output.expression, Tree::blank(range(0, 0)));
    assert!(output.errors.is_empty());
}

#[test]
fn test_lone_close_paren() {
    let output = parse(&assemble(&[pr()]));
    assert_eq!(error_kinds(&output), vec![ParseErrorKind::ExtraClose]);
    assert!(output.expression.is_blank());
    assert!(output.expression.range().is_empty());
}

#[rstest]
#[case::empty_parens(vec![pl(), pr()], vec![ParseErrorKind::EmptyExpression], "_")]
#[case::nested_empty_parens(vec![pl(), pl(), pr(), pr()], vec![ParseErrorKind::EmptyExpression], "_")]
#[case::extra_close(vec![id("a"), pr(), pr()], vec![ParseErrorKind::ExtraClose, ParseErrorKind::ExtraClose], "a")]
#[case::unclosed(vec![pl(), pl(), id("a")], vec![ParseErrorKind::UnclosedParenthesis, ParseErrorKind::UnclosedParenthesis], "a")]
#[case::unclosed_empty(vec![pl()], vec![ParseErrorKind::UnclosedParenthesis], "_")]
#[case::bare_dot(vec![dot()], vec![ParseErrorKind::UnexpectedToken], "_")]
#[case::binder_at_end(vec![id("f"), pl(), lambda()], vec![ParseErrorKind::UnexpectedEnd, ParseErrorKind::UnclosedParenthesis], "f _")]
#[case::missing_body(vec![lambda(), id("x"), dot()], vec![ParseErrorKind::UnexpectedEnd], "λx. _")]
#[case::empty_body_in_parens(vec![pl(), lambda(), id("x"), dot(), pr(), id("y")], vec![ParseErrorKind::EmptyExpression], "(λx. _) y")]
#[case::binder_after_value(vec![id("f"), lambda(), id("x"), dot(), id("x")], vec![ParseErrorKind::UnexpectedToken, ParseErrorKind::UnexpectedToken], "f x x")]
#[case::blank_as_parameter(vec![lambda(), hole(), dot(), id("y")], vec![ParseErrorKind::UnexpectedToken, ParseErrorKind::UnexpectedToken], "_ y")]
#[case::paren_in_parameters(vec![lambda(), id("x"), pl(), id("y"), pr()], vec![ParseErrorKind::UnexpectedToken], "λx. y")]
#[case::elided_parameter(vec![lambda(), dot(), id("y")], vec![], "λ. y")]
fn test_recovery(
    #[case] tokens: Vec<Token>,
    #[case] expected_errors: Vec<ParseErrorKind>,
    #[case] rendered: &str,
) {
    let output = parse(&assemble(&tokens));
    assert_eq!(error_kinds(&output), expected_errors);
    assert_eq!(output.expression.to_string(), rendered);
}

#[test]
fn test_error_ranges() {
    // ( a ) ) .
    let output = parse(&assemble(&[pl(), id("a"), pr(), pr(), dot()]));
    let ranges: Vec<_> = output.errors.iter().map(|e| e.range()).collect();
    assert_eq!(ranges, vec![range(6, 7), range(8, 9)]);

    // λ x (input ends inside the binder)
    let output = parse(&assemble(&[lambda(), id("x")]));
    assert_eq!(output.errors[0].range(), range(3, 3));
    assert_eq!(output.errors[0].range().start, pos(3));
}

#[test]
fn test_blank_synthesized_before_close_paren() {
    // ( λ x . ) : the blank body sits right after the dot
    let output = parse(&assemble(&[pl(), lambda(), id("x"), dot(), pr()]));
    assert_tree(&output.expression)
        .abstraction("x")
        .range(0, 9)
        .body(|body| {
            body.blank().range(7, 7);
        });
}
