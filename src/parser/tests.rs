//! Unit tests for the parser module.
//!
//! Covers operator precedence and associativity, increment forms, statement
//! dispatch, loops, error messages and error positions.

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    lexer::lexer::{strip_comments, tokenize},
    parse_expression, parse_program, parse_statement, Position,
};

use super::{
    expr::ExpressionParser,
    parser::{StatementParser, MAX_NESTING_DEPTH},
};

fn render_expr(source: &str) -> String {
    parse_expression(source).unwrap().to_string()
}

fn render_stmt(source: &str) -> String {
    parse_statement(source).unwrap().to_string()
}

fn expr_error(source: &str) -> String {
    parse_expression(source).unwrap_err().to_string()
}

fn stmt_error(source: &str) -> String {
    parse_statement(source).unwrap_err().to_string()
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(render_expr("2 + 3 * 4"), "(2 + (3 * 4))");
    assert_eq!(render_expr("10 - 6 / 2"), "(10 - (6 / 2))");
    assert_eq!(render_expr("7 + 8 % 3"), "(7 + (8 % 3))");
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(render_expr("8 - 3 - 2"), "((8 - 3) - 2)");
    assert_eq!(render_expr("12 / 4 / 3"), "((12 / 4) / 3)");
    assert_eq!(render_expr("a or b or c"), "((a or b) or c)");
    assert_eq!(render_expr("a == b != c"), "((a == b) != c)");
}

#[test]
fn test_parentheses_are_kept_structurally() {
    assert_eq!(render_expr("(2 + 3) * 4"), "((2 + 3) * 4)");
    assert_eq!(render_expr("((x))"), "x");
}

#[test]
fn test_full_precedence_chain() {
    assert_eq!(
        render_expr("not a + b * c > d and e or f"),
        "(((((not a) + (b * c)) > d) and e) or f)"
    );
    assert_eq!(render_expr("a || b && c"), "(a || (b && c))");
    assert_eq!(render_expr("x >= 1 == y < 2"), "((x >= 1) == (y < 2))");
}

#[test]
fn test_unary_operators() {
    assert_eq!(render_expr("-x"), "(- x)");
    assert_eq!(render_expr("+5"), "(+ 5)");
    assert_eq!(render_expr("!done"), "(! done)");
    assert_eq!(render_expr("not not x"), "(not (not x))");
    assert_eq!(render_expr("2 - -3"), "(2 - (- 3))");
}

#[test]
fn test_literals() {
    assert_eq!(render_expr("true"), "true");
    assert_eq!(render_expr("false and true"), "(false and true)");
    assert_eq!(render_expr("3.14"), "3.14");
    assert_eq!(render_expr("\"hi there\""), "\"hi there\"");
    assert_eq!(parse_expression("true").unwrap(), Expr::Boolean(true));
}

#[test]
fn test_increment_on_identifiers() {
    assert_eq!(render_expr("++x"), "(++x)");
    assert_eq!(render_expr("x++"), "(x++)");
    assert_eq!(render_expr("--y"), "(--y)");
    assert_eq!(render_expr("y--"), "(y--)");
    assert_eq!(render_expr("i++ + 1"), "((i++) + 1)");
}

#[test]
fn test_increment_rejects_non_variables() {
    assert_eq!(
        expr_error("5++"),
        "Post-increment/decrement can only be applied to variables"
    );
    assert_eq!(
        expr_error("true++"),
        "Post-increment/decrement can only be applied to variables"
    );
    assert_eq!(expr_error("++5"), "Expected identifier after ++");
    assert_eq!(expr_error("--"), "Expected identifier after --");
}

#[test]
fn test_expression_errors() {
    assert_eq!(expr_error("(2 + 3"), "Expected ')' after expression. Got: end of input");
    assert_eq!(expr_error("2 + 3)"), "Unexpected token after expression: ')'");
    assert_eq!(expr_error("2 +"), "Unexpected end of input");
    assert_eq!(expr_error(""), "Unexpected end of input");
    assert_eq!(expr_error("* 3"), "Unexpected token: '*'");
    assert_eq!(expr_error("x = 1"), "Unexpected token after expression: '='");
    assert_eq!(expr_error("if"), "Unexpected token: 'if'");
}

#[test]
fn test_expression_error_positions() {
    let error = parse_expression("2 + 3)").unwrap_err();
    assert_eq!(error.get_position(), Position::Token(3));

    let error = parse_expression("1 + (2 * )").unwrap_err();
    assert_eq!(error.get_position(), Position::Token(5));
}

#[test]
fn test_comment_tokens_are_rejected_by_the_parser() {
    let tokens = tokenize("x // note").unwrap();
    let error = ExpressionParser::new(&tokens).parse().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unexpected token after expression: '// note'"
    );

    let tokens = strip_comments(tokens);
    assert_eq!(ExpressionParser::new(&tokens).parse().unwrap().to_string(), "x");
}

#[test]
fn test_variable_declarations() {
    assert_eq!(render_stmt("number x = 42;"), "number x = 42;");
    assert_eq!(render_stmt("word name = \"Bob\";"), "word name = \"Bob\";");
    assert_eq!(render_stmt("boolean ok;"), "boolean ok;");
    assert_eq!(render_stmt("number y = x * 2 + 1;"), "number y = ((x * 2) + 1);");
}

#[test]
fn test_assignment_and_expression_statements() {
    assert_eq!(render_stmt("x = x + 1;"), "x = (x + 1);");
    assert_eq!(render_stmt("x++;"), "(x++);");
    assert_eq!(render_stmt("a + b;"), "(a + b);");
    assert!(matches!(parse_statement("x = 1;").unwrap(), Stmt::Assignment(_)));
    assert!(matches!(parse_statement("x == 1;").unwrap(), Stmt::Expression(_)));
}

#[test]
fn test_if_statements() {
    assert_eq!(
        render_stmt("if (x > 5) x = 10; else x = 0;"),
        "if ((x > 5)) x = 10; else x = 0;"
    );
    assert_eq!(render_stmt("if (ok) x = 1;"), "if (ok) x = 1;");
    assert_eq!(
        render_stmt("if ((a or b)) { y = 2; }"),
        "if ((a or b)) {\n  y = 2;\n}"
    );
}

#[test]
fn test_else_binds_to_nearest_if() {
    let stmt = parse_statement("if (a) if (b) x = 1; else x = 2;").unwrap();
    assert_eq!(stmt.to_string(), "if (a) if (b) x = 1; else x = 2;");

    let Stmt::If(outer) = stmt else {
        panic!("expected an if statement");
    };
    assert!(outer.else_body.is_none());
    let Stmt::If(inner) = *outer.then_body else {
        panic!("expected a nested if statement");
    };
    assert!(inner.else_body.is_some());
}

#[test]
fn test_blocks() {
    assert_eq!(render_stmt("{ }"), "{\n}");
    assert_eq!(
        render_stmt("{ number x = 1; x++; }"),
        "{\n  number x = 1;\n  (x++);\n}"
    );
    assert_eq!(render_stmt("{ { x = 1; } }"), "{\n  {\n  x = 1;\n}\n}");
}

#[test]
fn test_while_statement() {
    assert_eq!(render_stmt("while (x < 10) x++;"), "while ((x < 10)) (x++);");
    assert_eq!(
        render_stmt("while (not done) { done = true; }"),
        "while ((not done)) {\n  done = true;\n}"
    );
}

#[test]
fn test_for_statement() {
    assert_eq!(
        render_stmt("for (number i = 0; i < 10; i++) x = x + i;"),
        "for (number i = 0; (i < 10); (i++)) x = (x + i);"
    );
    assert_eq!(render_stmt("for (;;) { x++; }"), "for (; ; ) {\n  (x++);\n}");
    assert_eq!(
        render_stmt("for (i = 0; i < n;) i++;"),
        "for (i = 0; (i < n); ) (i++);"
    );
}

#[test]
fn test_missing_terminators_are_fatal() {
    assert_eq!(
        stmt_error("number x = 5"),
        "Expected ';' after variable declaration. Got: end of input"
    );
    assert_eq!(
        stmt_error("x = 10"),
        "Expected ';' after assignment. Got: end of input"
    );
    assert_eq!(
        stmt_error("x + 1 y"),
        "Unexpected token after expression: 'y'"
    );
}

#[test]
fn test_unmatched_delimiters_are_fatal() {
    assert_eq!(stmt_error("{ x = 5;"), "Expected '}' after block. Got: end of input");
    assert_eq!(stmt_error("if x > 5 x = 10;"), "Expected '(' after 'if'. Got: 'x'");
    assert_eq!(
        stmt_error("while (x x++;"),
        "Unexpected token after expression: 'x'"
    );
}

#[test]
fn test_statement_errors() {
    assert_eq!(stmt_error("number;"), "Expected variable name. Got: ';'");
    assert_eq!(stmt_error("x = ;"), "Expected expression");
    assert_eq!(stmt_error(";"), "Expected expression");
    assert_eq!(stmt_error("5 = x;"), "Unexpected token after expression: '='");
    assert_eq!(stmt_error("x = 1; y = 2;"), "Unexpected token after statement: 'y'");
}

#[test]
fn test_nested_error_positions_are_absolute() {
    // x = 5 + ;
    // 0 1 2 3 4
    let error = parse_statement("x = 5 +;").unwrap_err();
    assert_eq!(error.to_string(), "Unexpected end of input");
    assert_eq!(error.get_position(), Position::Token(4));

    let error = parse_statement("if (a) { b = 1 }").unwrap_err();
    assert_eq!(error.get_position(), Position::Token(8));
}

#[test]
fn test_parse_statements_reads_to_end_of_input() {
    let tokens = strip_comments(tokenize("number x = 1; // one\nx = x + 1;").unwrap());
    let statements = StatementParser::new(&tokens).parse_statements().unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1].to_string(), "x = (x + 1);");

    let tokens = tokenize("").unwrap();
    assert!(StatementParser::new(&tokens).parse_statements().unwrap().is_empty());
}

#[test]
fn test_parse_program() {
    let program = parse_program("number x = 1;\nwhile (x < 3) x++;").unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(
        program.to_string(),
        "Program:\nnumber x = 1;\nwhile ((x < 3)) (x++);\n"
    );
}

#[test]
fn test_rendering_is_idempotent() {
    let sources = [
        "2 + 3 * 4",
        "(2 + 3) * 4",
        "8 - 3 - 2",
        "not a + b * c > d and e or f",
        "-x * +y",
        "a || b && !c",
        "\"s\" == name",
    ];

    for source in sources {
        let first = render_expr(source);
        assert_eq!(render_expr(&first), first, "source: {}", source);
    }
}

#[test]
fn test_nesting_limit_for_expressions() {
    let nested = |depth: usize| format!("{}x{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(render_expr(&nested(MAX_NESTING_DEPTH)), "x");

    let error = parse_expression(&nested(MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert_eq!(error.to_string(), "Nested too deeply: more than 128 levels");
    assert_eq!(error.get_position(), Position::Token(MAX_NESTING_DEPTH));

    let error = parse_expression(&nested(5000)).unwrap_err();
    assert_eq!(error.get_error_name(), "NestedTooDeeply");

    let negations = format!("{}x", "- ".repeat(5000));
    assert_eq!(parse_expression(&negations).unwrap_err().get_error_name(), "NestedTooDeeply");
}

#[test]
fn test_nesting_limit_for_statements() {
    let blocks = |depth: usize| format!("{}x = 1;{}", "{ ".repeat(depth), " }".repeat(depth));

    assert!(parse_statement(&blocks(MAX_NESTING_DEPTH)).is_ok());
    assert_eq!(
        stmt_error(&blocks(MAX_NESTING_DEPTH + 1)),
        "Nested too deeply: more than 128 levels"
    );

    let ifs = format!("{}y = 1;", "if (x) ".repeat(5000));
    assert_eq!(parse_statement(&ifs).unwrap_err().get_error_name(), "NestedTooDeeply");

    let condition = format!("while ({}x{}) x++;", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(parse_statement(&condition).unwrap_err().get_error_name(), "NestedTooDeeply");
}
