pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod ir;
pub mod lexer;
pub mod logger;
pub mod parser;


use config::CodegenConfig;
use lexer::LexError;
use parser::ParseError;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl TranspileError {
    pub fn stage(&self) -> &'static str {
        match self {
            TranspileError::Lex(_) => "lex",
            TranspileError::Parse(_) => "parse",
        }
    }

    /// 1-based source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            TranspileError::Lex(e) => e.line,
            TranspileError::Parse(e) => e.line,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TranspileError::Lex(e) => e.message.clone(),
            TranspileError::Parse(e) => format!("expected {}, found {}", e.expected, e.found),
        }
    }
}

/// Translates a source program to JavaScript with the default settings.
pub fn transpile(source: &str) -> Result<String, TranspileError> {
    transpile_with(source, &CodegenConfig::default())
}

pub fn transpile_with(source: &str, config: &CodegenConfig) -> Result<String, TranspileError> {
    let tokens = lexer::tokenize(source)?;
    let module = parser::parse(tokens)?;
    let output = codegen::generate(&module, config);
    debug!(
        input = source.len(),
        output = output.len(),
        "transpiled source"
    );
    Ok(output)
}
