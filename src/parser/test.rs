use super::*;
use crate::ir::{AugOp, BinOp, BoolOp, Branch, CmpOp, Expr, ForIter, Stmt, UnaryOp};
use crate::lexer::tokenize;

// Helper function to parse input straight from source
fn parse_str(input: &str) -> Result<Module, ParseError> {
    let tokens = tokenize(input).expect("test input should lex");
    parse(tokens)
}

fn parse_ok(input: &str) -> Vec<Stmt> {
    parse_str(input).unwrap().body
}

fn parse_expr(input: &str) -> Expr {
    match parse_ok(input).remove(0) {
        Stmt::Expr(expr) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn name(n: &str) -> Expr {
    Expr::Name(n.to_string())
}

fn num(n: &str) -> Expr {
    Expr::Number(n.to_string())
}

fn bin(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::BinOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[test]
fn test_parse_literals() {
    let body = parse_ok("5\n3.14\n\"hello\"\nTrue\nFalse\nNone\n");
    assert_eq!(
        body,
        vec![
            Stmt::Expr(num("5")),
            Stmt::Expr(num("3.14")),
            Stmt::Expr(Expr::Str("\"hello\"".to_string())),
            Stmt::Expr(Expr::Bool(true)),
            Stmt::Expr(Expr::Bool(false)),
            Stmt::Expr(Expr::None),
        ]
    );
}

#[test]
fn test_parse_assign() {
    let body = parse_ok("x = 5\n");
    assert_eq!(
        body,
        vec![Stmt::Assign {
            target: "x".to_string(),
            value: num("5"),
        }]
    );
}

#[test]
fn test_parse_aug_assign() {
    let body = parse_ok("x //= 2\n");
    assert_eq!(body.len(), 1);
    assert_eq!(
        body[0],
        Stmt::AugAssign {
            target: "x".to_string(),
            op: AugOp::FloorDiv,
            value: num("2"),
        }
    );

    let ops: Vec<AugOp> = parse_ok("a += 1\na -= 1\na *= 1\na /= 1\na %= 1\na **= 1\na <<= 1\n")
        .into_iter()
        .map(|stmt| match stmt {
            Stmt::AugAssign { op, .. } => op,
            other => panic!("expected AugAssign, got {:?}", other),
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            AugOp::Add,
            AugOp::Sub,
            AugOp::Mul,
            AugOp::Div,
            AugOp::Mod,
            AugOp::Pow,
            AugOp::Shl
        ]
    );
}

#[test]
fn test_assignment_to_non_name_is_an_error() {
    let err = parse_str("xs[0] = 1\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.expected, "a variable name as assignment target");
    assert_eq!(err.found, "an index expression");

    let err = parse_str("x = 1\nf() += 2\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.found, "a function call");
}

#[test]
fn test_parse_precedence() {
    // 1 + 2 * 3 ** 2
    assert_eq!(
        parse_expr("1 + 2 * 3 ** 2\n"),
        bin(
            BinOp::Add,
            num("1"),
            bin(BinOp::Mul, num("2"), bin(BinOp::Pow, num("3"), num("2")))
        )
    );

    // left-associative
    assert_eq!(
        parse_expr("a - b - c\n"),
        bin(BinOp::Sub, bin(BinOp::Sub, name("a"), name("b")), name("c"))
    );

    // right-associative
    assert_eq!(
        parse_expr("a ** b ** c\n"),
        bin(BinOp::Pow, name("a"), bin(BinOp::Pow, name("b"), name("c")))
    );

    assert_eq!(
        parse_expr("(a + b) // c % d\n"),
        bin(
            BinOp::Mod,
            bin(BinOp::FloorDiv, bin(BinOp::Add, name("a"), name("b")), name("c")),
            name("d")
        )
    );
}

#[test]
fn test_parse_unary_and_power() {
    // power binds tighter than a leading minus
    assert_eq!(
        parse_expr("-x ** 2\n"),
        Expr::UnaryOp {
            op: UnaryOp::Neg,
            operand: Box::new(bin(BinOp::Pow, name("x"), num("2"))),
        }
    );

    assert_eq!(
        parse_expr("2 ** -1\n"),
        bin(
            BinOp::Pow,
            num("2"),
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand: Box::new(num("1")),
            }
        )
    );

    assert_eq!(
        parse_expr("-a * +b\n"),
        bin(
            BinOp::Mul,
            Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand: Box::new(name("a")),
            },
            Expr::UnaryOp {
                op: UnaryOp::Plus,
                operand: Box::new(name("b")),
            }
        )
    );
}

#[test]
fn test_parse_boolean_operators() {
    // not binds tighter than and, which binds tighter than or
    let expr = parse_expr("a or not b and c\n");
    assert_eq!(
        expr,
        Expr::BoolOp {
            op: BoolOp::Or,
            left: Box::new(name("a")),
            right: Box::new(Expr::BoolOp {
                op: BoolOp::And,
                left: Box::new(Expr::UnaryOp {
                    op: UnaryOp::Not,
                    operand: Box::new(name("b")),
                }),
                right: Box::new(name("c")),
            }),
        }
    );
}

#[test]
fn test_parse_comparisons() {
    let expr = parse_expr("x + 1 <= y\n");
    assert_eq!(
        expr,
        Expr::Compare {
            op: CmpOp::LessEq,
            left: Box::new(bin(BinOp::Add, name("x"), num("1"))),
            right: Box::new(name("y")),
        }
    );

    let Expr::Compare { op, .. } = parse_expr("a is not None\n") else {
        panic!("expected comparison");
    };
    assert_eq!(op, CmpOp::IsNot);

    let Expr::Compare { op, .. } = parse_expr("a is b\n") else {
        panic!("expected comparison");
    };
    assert_eq!(op, CmpOp::Is);
}

#[test]
fn test_parse_comparison_chain() {
    let lt = |left: Expr, right: Expr| Expr::Compare {
        op: CmpOp::Less,
        left: Box::new(left),
        right: Box::new(right),
    };
    assert_eq!(
        parse_expr("1 < x < 3\n"),
        Expr::Chain(vec![lt(num("1"), name("x")), lt(name("x"), num("3"))])
    );

    assert_eq!(
        parse_expr("a < b not in c\n"),
        Expr::Chain(vec![
            lt(name("a"), name("b")),
            Expr::Membership {
                negated: true,
                element: Box::new(name("b")),
                container: Box::new(name("c")),
            },
        ])
    );
}

#[test]
fn test_parse_membership() {
    assert_eq!(
        parse_expr("x in xs\n"),
        Expr::Membership {
            negated: false,
            element: Box::new(name("x")),
            container: Box::new(name("xs")),
        }
    );

    assert_eq!(
        parse_expr("x not in [1, 2]\n"),
        Expr::Membership {
            negated: true,
            element: Box::new(name("x")),
            container: Box::new(Expr::List(vec![num("1"), num("2")])),
        }
    );

    // `not` applied to a membership test
    let expr = parse_expr("not x in xs\n");
    assert!(matches!(
        expr,
        Expr::UnaryOp {
            op: UnaryOp::Not,
            ..
        }
    ));
}

#[test]
fn test_parse_list_index_and_call() {
    assert_eq!(parse_expr("[]\n"), Expr::List(vec![]));
    assert_eq!(
        parse_expr("[1, 2, 3,]\n"),
        Expr::List(vec![num("1"), num("2"), num("3")])
    );

    assert_eq!(
        parse_expr("grid[i][j]\n"),
        Expr::Index {
            value: Box::new(Expr::Index {
                value: Box::new(name("grid")),
                index: Box::new(name("i")),
            }),
            index: Box::new(name("j")),
        }
    );

    assert_eq!(
        parse_expr("foo(1, bar(2), x[0])\n"),
        Expr::Call {
            callee: Box::new(name("foo")),
            args: vec![
                num("1"),
                Expr::Call {
                    callee: Box::new(name("bar")),
                    args: vec![num("2")],
                },
                Expr::Index {
                    value: Box::new(name("x")),
                    index: Box::new(num("0")),
                },
            ],
        }
    );

    assert_eq!(
        parse_expr("xs.append(1)\n"),
        Expr::Call {
            callee: Box::new(Expr::Attribute {
                value: Box::new(name("xs")),
                name: "append".to_string(),
            }),
            args: vec![num("1")],
        }
    );
}

#[test]
fn test_parse_function() {
    let body = parse_ok("def add(a, b):\n    total = a + b\n    return total\n");
    assert_eq!(
        body,
        vec![Stmt::FunctionDef {
            name: "add".to_string(),
            params: vec!["a".to_string(), "b".to_string()],
            body: vec![
                Stmt::Assign {
                    target: "total".to_string(),
                    value: bin(BinOp::Add, name("a"), name("b")),
                },
                Stmt::Return(Some(name("total"))),
            ],
        }]
    );

    let body = parse_ok("def noop():\n    return\n");
    assert_eq!(
        body,
        vec![Stmt::FunctionDef {
            name: "noop".to_string(),
            params: vec![],
            body: vec![Stmt::Return(None)],
        }]
    );
}

#[test]
fn test_parse_if_elif_else_is_one_node() {
    let input = "\
if x > 0:
    a = 1
elif x < 0:
    a = 2
elif x == 0:
    pass
else:
    a = 3
";
    let body = parse_ok(input);
    assert_eq!(body.len(), 1);

    let Stmt::If { branches, orelse } = &body[0] else {
        panic!("expected If, got {:?}", body[0]);
    };
    assert_eq!(branches.len(), 3);
    assert_eq!(
        branches[2],
        Branch {
            condition: Expr::Compare {
                op: CmpOp::Eq,
                left: Box::new(name("x")),
                right: Box::new(num("0")),
            },
            body: vec![Stmt::Pass],
        }
    );
    assert_eq!(
        orelse.as_deref(),
        Some(
            &[Stmt::Assign {
                target: "a".to_string(),
                value: num("3"),
            }][..]
        )
    );
}

#[test]
fn test_parse_nested_blocks() {
    let input = "\
def f(n):
    while n > 0:
        if n % 2 == 0:
            n -= 1
        else:
            break
    return n
";
    let body = parse_ok(input);
    let Stmt::FunctionDef { body, .. } = &body[0] else {
        panic!("expected function");
    };
    assert_eq!(body.len(), 2);
    let Stmt::While { body: loop_body, .. } = &body[0] else {
        panic!("expected while");
    };
    let Stmt::If { orelse, .. } = &loop_body[0] else {
        panic!("expected if");
    };
    assert_eq!(orelse.as_deref(), Some(&[Stmt::Break][..]));
    assert_eq!(body[1], Stmt::Return(Some(name("n"))));
}

#[test]
fn test_parse_for_range_forms() {
    let iter_of = |input: &str| match parse_ok(input).remove(0) {
        Stmt::For { iter, .. } => iter,
        other => panic!("expected For, got {:?}", other),
    };

    assert_eq!(
        iter_of("for i in range(3):\n    pass\n"),
        ForIter::Range {
            start: None,
            stop: num("3"),
            step: None,
        }
    );
    assert_eq!(
        iter_of("for i in range(1, n):\n    pass\n"),
        ForIter::Range {
            start: Some(num("1")),
            stop: name("n"),
            step: None,
        }
    );
    assert_eq!(
        iter_of("for i in range(0, 10, 2):\n    pass\n"),
        ForIter::Range {
            start: Some(num("0")),
            stop: num("10"),
            step: Some(num("2")),
        }
    );
}

#[test]
fn test_parse_for_each() {
    let body = parse_ok("for name in names:\n    print(name)\n");
    assert_eq!(
        body,
        vec![Stmt::For {
            target: "name".to_string(),
            iter: ForIter::Each(name("names")),
            body: vec![Stmt::Expr(Expr::Call {
                callee: Box::new(name("print")),
                args: vec![name("name")],
            })],
        }]
    );

    // other calls are iterated as values
    let body = parse_ok("for x in items():\n    pass\n");
    assert!(matches!(
        &body[0],
        Stmt::For {
            iter: ForIter::Each(Expr::Call { .. }),
            ..
        }
    ));
}

#[test]
fn test_range_with_bad_arity() {
    let err = parse_str("for i in range():\n    pass\n").unwrap_err();
    assert_eq!(err.expected, "1 to 3 arguments to range()");
    assert_eq!(err.found, "0 arguments");

    let err = parse_str("for i in range(1, 2, 3, 4):\n    pass\n").unwrap_err();
    assert_eq!(err.found, "4 arguments");
}

#[test]
fn test_inline_suite() {
    let body = parse_ok("if done: return\nwhile x: x -= 1\n");
    assert_eq!(
        body[0],
        Stmt::If {
            branches: vec![Branch {
                condition: name("done"),
                body: vec![Stmt::Return(None)],
            }],
            orelse: None,
        }
    );
    assert!(matches!(&body[1], Stmt::While { body, .. } if body.len() == 1));
}

#[test]
fn test_missing_colon() {
    let err = parse_str("if x\n    print(x)\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.expected, "':' after if condition");
    assert_eq!(err.found, "NEWLINE");
    assert_eq!(
        err.to_string(),
        "line 1: expected ':' after if condition, found NEWLINE"
    );
}

#[test]
fn test_missing_closing_bracket() {
    let err = parse_str("x = [1, 2 3]\n").unwrap_err();
    assert_eq!(err.expected, "']' to close the list");
    assert_eq!(err.found, "'3'");

    let err = parse_str("print(1 2)\n").unwrap_err();
    assert_eq!(err.expected, "')' to close the argument list");
}

#[test]
fn test_missing_block() {
    let err = parse_str("def f():\nx = 1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.expected, "an indented block after function signature");
}

#[test]
fn test_unexpected_statement_start() {
    let err = parse_str("x = 1\n    y = 2\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.found, "INDENT");

    let err = parse_str("else:\n    pass\n").unwrap_err();
    assert_eq!(err.expected, "a statement");
    assert_eq!(err.found, "'else'");
}

#[test]
fn test_trailing_tokens_after_statement() {
    let err = parse_str("x = 1 2\n").unwrap_err();
    assert_eq!(err.expected, "end of line after statement");
    assert_eq!(err.found, "'2'");
}

#[test]
fn test_bad_expression_start() {
    let err = parse_str("x = * 2\n").unwrap_err();
    assert_eq!(err.expected, "an expression");
    assert_eq!(err.found, "'*'");
}
