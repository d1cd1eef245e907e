use logos::Logos;
use thiserror::Error;
use tracing::debug;

use std::fmt::{self, Display, Formatter};


/// Reserved words. Everything else matching the identifier pattern is a NAME.
pub const KEYWORDS: &[&str] = &[
    "def", "if", "elif", "else", "while", "for", "in", "return", "not", "and", "or", "True",
    "False", "None", "pass", "is", "break", "continue",
];

const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Newline,
    Indent,
    Dedent,
    Name,
    Number,
    String,
    Op,
    Keyword,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Op => "OP",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Eof => "EOF",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    /// How the token is named in error messages: structural tokens by kind,
    /// everything else by its quoted text.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof => {
                self.kind.to_string()
            }
            _ => format!("'{}'", self.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

impl LexError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        LexError {
            line,
            message: message.into(),
        }
    }
}

/// Raw lexemes of a single physical line. Layout (indentation, newlines) is
/// handled by [`tokenize`], not here.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
enum Lexeme {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    #[regex(r#""([^"\\\n]|\\.)*"#)]
    #[regex(r#"'([^'\\\n]|\\.)*"#)]
    UnterminatedString,

    #[token("(")]
    #[token("[")]
    Open,

    #[token(")")]
    #[token("]")]
    Close,

    #[token("**=")]
    #[token("//=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("**")]
    #[token("//")]
    #[token("<<")]
    #[token(">>")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("<")]
    #[token(">")]
    #[token("=")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("~")]
    #[token(",")]
    #[token(":")]
    #[token(".")]
    Op,
}

struct Lexer {
    tokens: Vec<Token>,
    indents: Vec<usize>,
    // line numbers of currently open brackets
    brackets: Vec<usize>,
    line: usize,
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer {
        tokens: vec![],
        indents: vec![0],
        brackets: vec![],
        line: 1,
    };

    for (index, text) in source.lines().enumerate() {
        lexer.line = index + 1;
        lexer.physical_line(text)?;
    }

    let tokens = lexer.finish()?;
    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

impl Lexer {
    fn physical_line(&mut self, text: &str) -> Result<(), LexError> {
        let joined = !self.brackets.is_empty();

        if !joined {
            let body = text.trim();
            if body.is_empty() || body.starts_with('#') {
                return Ok(());
            }
            self.indent_to(indentation_width(text))?;
        }

        self.scan(text)?;

        if self.brackets.is_empty() {
            self.push(TokenKind::Newline, "");
        }
        Ok(())
    }

    fn indent_to(&mut self, width: usize) -> Result<(), LexError> {
        if width > self.current_indent() {
            self.indents.push(width);
            self.push(TokenKind::Indent, "");
            return Ok(());
        }

        while width < self.current_indent() {
            self.indents.pop();
            self.push(TokenKind::Dedent, "");
        }

        if width != self.current_indent() {
            return Err(LexError::new(
                self.line,
                "unindent does not match any outer indentation level",
            ));
        }
        Ok(())
    }

    fn scan(&mut self, text: &str) -> Result<(), LexError> {
        for (lexeme, span) in Lexeme::lexer(text).spanned() {
            let slice = &text[span];
            let Ok(lexeme) = lexeme else {
                return Err(LexError::new(
                    self.line,
                    format!("unexpected character '{}'", slice),
                ));
            };

            match lexeme {
                Lexeme::Word if KEYWORDS.contains(&slice) => self.push(TokenKind::Keyword, slice),
                Lexeme::Word => self.push(TokenKind::Name, slice),
                Lexeme::Number => self.push(TokenKind::Number, slice),
                Lexeme::String => self.push(TokenKind::String, slice),
                Lexeme::UnterminatedString => {
                    return Err(LexError::new(self.line, "unterminated string literal"));
                }
                Lexeme::Open => {
                    self.brackets.push(self.line);
                    self.push(TokenKind::Op, slice);
                }
                Lexeme::Close => {
                    if self.brackets.pop().is_none() {
                        return Err(LexError::new(
                            self.line,
                            format!("unmatched '{}'", slice),
                        ));
                    }
                    self.push(TokenKind::Op, slice);
                }
                Lexeme::Op => self.push(TokenKind::Op, slice),
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token>, LexError> {
        if let Some(opened) = self.brackets.last() {
            return Err(LexError::new(
                *opened,
                "bracket opened here is never closed",
            ));
        }

        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, "");
        }
        self.push(TokenKind::Eof, "");
        Ok(self.tokens)
    }

    fn current_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    fn push(&mut self, kind: TokenKind, text: &str) {
        self.tokens.push(Token::new(kind, text, self.line));
    }
}

fn indentation_width(text: &str) -> usize {
    text.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}
