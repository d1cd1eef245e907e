use crate::codegen::JsCodegen;
use crate::ir::{AugOp, Expr, ForIter, Stmt, UnaryOp};

impl JsCodegen {
    pub fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDef { name, params, body } => {
                let header = format!("function {}({})", name, params.join(", "));
                self.emit_block(&header, body);
            }
            Stmt::Assign { target, value } => {
                let line = format!("let {} = {};", target, self.expr(value));
                self.emit_line(&line);
            }
            Stmt::AugAssign { target, op, value } => {
                let value = self.expr(value);
                let line = match op {
                    AugOp::FloorDiv => format!("{t} = Math.floor({t} / {v});", t = target, v = value),
                    AugOp::Pow => format!("{t} = Math.pow({t}, {v});", t = target, v = value),
                    op => format!("{} {} {};", target, op, value),
                };
                self.emit_line(&line);
            }
            Stmt::Return(Some(value)) => {
                let line = format!("return {};", self.expr(value));
                self.emit_line(&line);
            }
            Stmt::Return(None) => self.emit_line("return;"),
            Stmt::If { branches, orelse } => {
                for (i, branch) in branches.iter().enumerate() {
                    let condition = self.expr(&branch.condition);
                    if i == 0 {
                        self.emit_line(&format!("if ({}) {{", condition));
                    } else {
                        self.emit_line(&format!("}} else if ({}) {{", condition));
                    }
                    self.emit_body(&branch.body);
                }
                if let Some(orelse) = orelse {
                    self.emit_line("} else {");
                    self.emit_body(orelse);
                }
                self.emit_line("}");
            }
            Stmt::While { condition, body } => {
                let header = format!("while ({})", self.expr(condition));
                self.emit_block(&header, body);
            }
            Stmt::For { target, iter, body } => {
                let header = self.for_header(target, iter);
                self.emit_block(&header, body);
            }
            Stmt::Expr(expr) => {
                let line = format!("{};", self.expr(expr));
                self.emit_line(&line);
            }
            Stmt::Pass => {}
            Stmt::Break => self.emit_line("break;"),
            Stmt::Continue => self.emit_line("continue;"),
        }
    }

    fn for_header(&self, target: &str, iter: &ForIter) -> String {
        match iter {
            ForIter::Range { start, stop, step } => {
                let start = start
                    .as_ref()
                    .map(|start| self.expr(start))
                    .unwrap_or_else(|| "0".to_string());
                let stop = self.expr(stop);
                let (compare, step) = match step {
                    Some(step) if is_negative_literal(step) => (">", self.expr(step)),
                    Some(step) => ("<", self.expr(step)),
                    None => ("<", "1".to_string()),
                };
                format!(
                    "for (let {t} = {start}; {t} {compare} {stop}; {t} += {step})",
                    t = target
                )
            }
            ForIter::Each(iterable) => format!("for (let {} of {})", target, self.expr(iterable)),
        }
    }
}

/// `-3`, `-1.5`: a step we can tell counts downwards without evaluating it.
fn is_negative_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::UnaryOp {
            op: UnaryOp::Neg,
            operand,
        } if matches!(operand.as_ref(), Expr::Number(_))
    )
}
