use crate::ir::{AugOp, Branch, Expr, ForIter, Stmt};
use crate::lexer::TokenKind;
use crate::parser::{ParseError, Parser};

use tracing::trace;

/// Calls to this name in a `for` header become counted loops.
const RANGE: &str = "range";

impl Parser {
    pub fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let token = self.peek();
        let (kind, text) = (token.kind, token.text.clone());

        match (kind, text.as_str()) {
            (TokenKind::Keyword, "def") => self.parse_function(),
            (TokenKind::Keyword, "if") => self.parse_if(),
            (TokenKind::Keyword, "while") => self.parse_while(),
            (TokenKind::Keyword, "for") => self.parse_for(),
            (TokenKind::Keyword, "elif" | "else") => Err(self.error("a statement")),
            (TokenKind::Indent | TokenKind::Dedent | TokenKind::Newline, _) => {
                Err(self.error("a statement"))
            }
            _ => self.parse_simple_statement(),
        }
    }

    /// Statements that fit on one logical line, including the NEWLINE that
    /// ends them.
    pub fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let stmt = if self.eat_keyword("return") {
            if self.at(TokenKind::Newline) {
                Stmt::Return(None)
            } else {
                Stmt::Return(Some(self.parse_expression()?))
            }
        } else if self.eat_keyword("pass") {
            Stmt::Pass
        } else if self.eat_keyword("break") {
            Stmt::Break
        } else if self.eat_keyword("continue") {
            Stmt::Continue
        } else {
            self.parse_assignment_or_expression()?
        };

        self.expect_kind(TokenKind::Newline, "end of line after statement")?;
        Ok(stmt)
    }

    fn parse_assignment_or_expression(&mut self) -> Result<Stmt, ParseError> {
        let line = self.peek().line;
        let expr = self.parse_expression()?;

        if self.eat_op("=") {
            let target = assignment_target(expr, line)?;
            let value = self.parse_expression()?;
            return Ok(Stmt::Assign { target, value });
        }

        let aug_op = match self.peek() {
            token if token.kind == TokenKind::Op => AugOp::from_symbol(&token.text),
            _ => None,
        };
        if let Some(op) = aug_op {
            self.advance();
            let target = assignment_target(expr, line)?;
            let value = self.parse_expression()?;
            return Ok(Stmt::AugAssign { target, op, value });
        }

        Ok(Stmt::Expr(expr))
    }

    pub fn parse_function(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword("def", "to start a function")?;
        let name = self.expect_name("after 'def'")?;
        self.expect_op("(", "after function name")?;

        let mut params = vec![];
        if !self.eat_op(")") {
            loop {
                params.push(self.expect_name("for a parameter")?);
                if self.eat_op(",") {
                    if self.eat_op(")") {
                        break;
                    }
                    continue;
                }
                self.expect_op(")", "to close the parameter list")?;
                break;
            }
        }

        self.expect_op(":", "after function signature")?;
        let body = self.parse_block("after function signature")?;
        Ok(Stmt::FunctionDef { name, params, body })
    }

    pub fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword("if", "to start a conditional")?;
        let mut branches = vec![self.parse_branch("if")?];

        while self.eat_keyword("elif") {
            branches.push(self.parse_branch("elif")?);
        }

        let orelse = if self.eat_keyword("else") {
            self.expect_op(":", "after 'else'")?;
            Some(self.parse_block("after 'else'")?)
        } else {
            None
        };

        Ok(Stmt::If { branches, orelse })
    }

    fn parse_branch(&mut self, keyword: &str) -> Result<Branch, ParseError> {
        let condition = self.parse_expression()?;
        self.expect_op(":", &format!("after {} condition", keyword))?;
        let body = self.parse_block(&format!("after '{}'", keyword))?;
        Ok(Branch { condition, body })
    }

    pub fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword("while", "to start a loop")?;
        let condition = self.parse_expression()?;
        self.expect_op(":", "after while condition")?;
        let body = self.parse_block("after 'while'")?;
        Ok(Stmt::While { condition, body })
    }

    pub fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword("for", "to start a loop")?;
        let target = self.expect_name("for the loop variable")?;
        self.expect_keyword("in", "after loop variable")?;
        let line = self.peek().line;
        let iterable = self.parse_expression()?;
        self.expect_op(":", "after for iterable")?;
        let body = self.parse_block("after 'for'")?;

        let iter = for_iter(iterable, line)?;
        Ok(Stmt::For { target, iter, body })
    }

    /// Either an indented suite or a single simple statement on the header
    /// line (`if done: return`).
    fn parse_block(&mut self, context: &str) -> Result<Vec<Stmt>, ParseError> {
        if !self.at(TokenKind::Newline) {
            return Ok(vec![self.parse_simple_statement()?]);
        }
        self.advance();
        self.expect_kind(TokenKind::Indent, &format!("an indented block {}", context))?;
        trace!(context, "entering block");

        let mut body = vec![];
        loop {
            body.push(self.parse_statement()?);
            if self.at(TokenKind::Dedent) {
                self.advance();
                break;
            }
            if self.at(TokenKind::Eof) {
                return Err(self.error("end of indented block"));
            }
        }
        Ok(body)
    }
}

fn assignment_target(expr: Expr, line: usize) -> Result<String, ParseError> {
    let found = match expr {
        Expr::Name(name) => return Ok(name),
        Expr::Index { .. } => "an index expression",
        Expr::Attribute { .. } => "an attribute",
        Expr::Call { .. } => "a function call",
        Expr::Number(_) | Expr::Str(_) | Expr::Bool(_) | Expr::None | Expr::List(_) => "a literal",
        _ => "an expression",
    };
    Err(ParseError {
        line,
        expected: "a variable name as assignment target".to_string(),
        found: found.to_string(),
    })
}

fn for_iter(iterable: Expr, line: usize) -> Result<ForIter, ParseError> {
    let args = match iterable {
        Expr::Call { callee, args } if matches!(callee.as_ref(), Expr::Name(name) if name == RANGE) => {
            args
        }
        other => return Ok(ForIter::Each(other)),
    };

    let count = args.len();
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next(), args.next()) {
        (Some(stop), None, None, None) => Ok(ForIter::Range {
            start: None,
            stop,
            step: None,
        }),
        (Some(start), Some(stop), None, None) => Ok(ForIter::Range {
            start: Some(start),
            stop,
            step: None,
        }),
        (Some(start), Some(stop), Some(step), None) => Ok(ForIter::Range {
            start: Some(start),
            stop,
            step: Some(step),
        }),
        _ => Err(ParseError {
            line,
            expected: "1 to 3 arguments to range()".to_string(),
            found: format!("{} arguments", count),
        }),
    }
}
