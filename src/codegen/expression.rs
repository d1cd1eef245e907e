use crate::codegen::JsCodegen;
use crate::ir::{BinOp, BoolOp, CmpOp, Expr, UnaryOp};

/// Source-level callables with a different spelling in the output.
const BUILTINS: &[(&str, &str)] = &[("print", "console.log")];

impl JsCodegen {
    pub fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Name(name) => name.clone(),
            Expr::Number(number) => number.clone(),
            Expr::Str(string) => string.clone(),
            Expr::Bool(true) => "true".to_string(),
            Expr::Bool(false) => "false".to_string(),
            Expr::None => "null".to_string(),

            Expr::List(elements) => format!("[{}]", self.expr_list(elements)),
            Expr::Index { value, index } => {
                format!("{}[{}]", self.expr(value), self.expr(index))
            }
            Expr::Attribute { value, name } => format!("{}.{}", self.expr(value), name),

            Expr::BinOp { op, left, right } => {
                let (left, right) = (self.expr(left), self.expr(right));
                match op {
                    BinOp::FloorDiv => format!("Math.floor({} / {})", left, right),
                    BinOp::Pow => format!("Math.pow({}, {})", left, right),
                    op => format!("({} {} {})", left, op, right),
                }
            }

            Expr::UnaryOp { op, operand } => {
                let operand = self.expr(operand);
                match op {
                    UnaryOp::Not => format!("!{}", operand),
                    // keep `- -x` from turning into `--x`
                    op if operand.starts_with(['-', '+']) => format!("{}({})", op, operand),
                    op => format!("{}{}", op, operand),
                }
            }

            Expr::BoolOp { op, left, right } => {
                let op = match op {
                    BoolOp::And => "&&",
                    BoolOp::Or => "||",
                };
                format!("({} {} {})", self.expr(left), op, self.expr(right))
            }

            Expr::Compare { op, left, right } => {
                let op = match op {
                    CmpOp::Eq | CmpOp::Is => "===",
                    CmpOp::NotEq | CmpOp::IsNot => "!==",
                    CmpOp::Less => "<",
                    CmpOp::LessEq => "<=",
                    CmpOp::Greater => ">",
                    CmpOp::GreaterEq => ">=",
                };
                format!("({} {} {})", self.expr(left), op, self.expr(right))
            }

            // NOTE: JS `in` tests keys, not values
            Expr::Membership {
                negated,
                element,
                container,
            } => {
                let test = format!("({} in {})", self.expr(element), self.expr(container));
                if *negated { format!("!{}", test) } else { test }
            }

            Expr::Chain(links) => {
                let links = links
                    .iter()
                    .map(|link| self.expr(link))
                    .collect::<Vec<_>>();
                format!("({})", links.join(" && "))
            }

            Expr::Call { callee, args } => {
                let callee = match callee.as_ref() {
                    Expr::Name(name) => builtin(name)
                        .map(str::to_string)
                        .unwrap_or_else(|| name.clone()),
                    other => self.expr(other),
                };
                format!("{}({})", callee, self.expr_list(args))
            }
        }
    }

    fn expr_list(&self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|expr| self.expr(expr))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn builtin(name: &str) -> Option<&'static str> {
    BUILTINS
        .iter()
        .find(|(source, _)| *source == name)
        .map(|(_, target)| *target)
}
