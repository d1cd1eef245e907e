use crate::config::CodegenConfig;
use crate::ir::{Module, Stmt};

use tracing::debug;

pub mod expression;
pub mod statement;


/// Renders an IR [`Module`] as JavaScript source.
pub struct JsCodegen {
    indent_unit: String,
    level: usize,
    out: String,
}

pub fn generate(module: &Module, config: &CodegenConfig) -> String {
    let mut codegen = JsCodegen::new(config);
    codegen.emit_module(module);
    let out = codegen.finish();
    debug!(bytes = out.len(), "generated javascript");
    out
}

impl JsCodegen {
    pub fn new(config: &CodegenConfig) -> Self {
        Self {
            indent_unit: config.indent.unit(),
            level: 0,
            out: String::new(),
        }
    }

    pub fn emit_module(&mut self, module: &Module) {
        for stmt in &module.body {
            self.emit_stmt(stmt);
        }
    }

    /// The generated text, always ending in a newline, even when nothing
    /// was emitted.
    pub fn finish(mut self) -> String {
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.out
    }

    fn emit_line(&mut self, text: &str) {
        for _ in 0..self.level {
            self.out.push_str(&self.indent_unit);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Statements one level deeper than the current line.
    fn emit_body(&mut self, body: &[Stmt]) {
        self.level += 1;
        for stmt in body {
            self.emit_stmt(stmt);
        }
        self.level -= 1;
    }

    /// `header {`, the indented body, then the closing brace.
    fn emit_block(&mut self, header: &str, body: &[Stmt]) {
        self.emit_line(&format!("{} {{", header));
        self.emit_body(body);
        self.emit_line("}");
    }
}
