pub mod expression;
pub mod statement;

#[cfg(test)]
pub mod test;

use crate::ir::Module;
use crate::lexer::{Token, TokenKind};

use thiserror::Error;
use tracing::debug;

use std::iter::Peekable;
use std::vec::IntoIter;

type TokenIter = Peekable<IntoIter<Token>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: expected {expected}, found {found}")]
pub struct ParseError {
    pub line: usize,
    pub expected: String,
    pub found: String,
}

pub struct Parser {
    tokens: TokenIter,
    // handed out once the stream is exhausted
    eof: Token,
}

pub fn parse(tokens: Vec<Token>) -> Result<Module, ParseError> {
    let mut parser = Parser::new(tokens);
    let module = parser.parse_program()?;
    debug!(statements = module.body.len(), "parsed module");
    Ok(module)
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let last_line = tokens.last().map(|token| token.line).unwrap_or(1);
        Parser {
            tokens: tokens.into_iter().peekable(),
            eof: Token::new(TokenKind::Eof, "", last_line),
        }
    }

    pub fn parse_program(&mut self) -> Result<Module, ParseError> {
        let mut body = vec![];
        while self.peek().kind != TokenKind::Eof {
            body.push(self.parse_statement()?);
        }
        Ok(Module { body })
    }

    fn peek(&mut self) -> &Token {
        match self.tokens.peek() {
            Some(token) => token,
            None => &self.eof,
        }
    }

    fn advance(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => token,
            None => self.eof.clone(),
        }
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn at_op(&mut self, op: &str) -> bool {
        self.peek().is_op(op)
    }

    fn at_keyword(&mut self, keyword: &str) -> bool {
        self.peek().is_keyword(keyword)
    }

    fn eat_op(&mut self, op: &str) -> bool {
        if self.at_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// An error against the lookahead token.
    fn error(&mut self, expected: impl Into<String>) -> ParseError {
        let token = self.peek();
        ParseError {
            line: token.line,
            expected: expected.into(),
            found: token.describe(),
        }
    }

    fn expect_op(&mut self, op: &str, context: &str) -> Result<Token, ParseError> {
        if self.at_op(op) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("'{}' {}", op, context)))
        }
    }

    fn expect_keyword(&mut self, keyword: &str, context: &str) -> Result<Token, ParseError> {
        if self.at_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("'{}' {}", keyword, context)))
        }
    }

    fn expect_kind(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_name(&mut self, context: &str) -> Result<String, ParseError> {
        self.expect_kind(TokenKind::Name, &format!("a name {}", context))
            .map(|token| token.text)
    }
}
