use crate::ir::{BinOp, BoolOp, CmpOp, Expr, UnaryOp};
use crate::lexer::TokenKind;
use crate::parser::{ParseError, Parser};

enum Comparison {
    Cmp(CmpOp),
    In { negated: bool },
}

impl Comparison {
    fn link(self, left: Expr, right: Expr) -> Expr {
        match self {
            Comparison::Cmp(op) => Expr::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            Comparison::In { negated } => Expr::Membership {
                negated,
                element: Box::new(left),
                container: Box::new(right),
            },
        }
    }
}

impl Parser {
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat_keyword("or") {
            let right = self.parse_and()?;
            left = Expr::BoolOp {
                op: BoolOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while self.eat_keyword("and") {
            let right = self.parse_not()?;
            left = Expr::BoolOp {
                op: BoolOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.eat_keyword("not") {
            let operand = self.parse_not()?;
            return Ok(Expr::UnaryOp {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    /// One precedence level. Several operators in a row form a chain whose
    /// links share their middle operands: `a < b < c` holds `a < b` and `b < c`.
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_bit_or()?;
        let mut links = vec![];
        while let Some(comparison) = self.comparison_operator()? {
            let right = self.parse_bit_or()?;
            links.push(comparison.link(left, right.clone()));
            left = right;
        }

        match links.len() {
            0 => Ok(left),
            1 => Ok(links.remove(0)),
            _ => Ok(Expr::Chain(links)),
        }
    }

    fn comparison_operator(&mut self) -> Result<Option<Comparison>, ParseError> {
        let token = self.peek();
        if token.kind == TokenKind::Op {
            let op = CmpOp::from_symbol(&token.text);
            if op.is_some() {
                self.advance();
            }
            return Ok(op.map(Comparison::Cmp));
        }

        if self.eat_keyword("in") {
            return Ok(Some(Comparison::In { negated: false }));
        }
        if self.eat_keyword("not") {
            self.expect_keyword("in", "after 'not' in a comparison")?;
            return Ok(Some(Comparison::In { negated: true }));
        }
        if self.eat_keyword("is") {
            let op = if self.eat_keyword("not") {
                CmpOp::IsNot
            } else {
                CmpOp::Is
            };
            return Ok(Some(Comparison::Cmp(op)));
        }
        Ok(None)
    }

    fn parse_bit_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(&[BinOp::BitOr], Self::parse_bit_xor)
    }

    fn parse_bit_xor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(&[BinOp::BitXor], Self::parse_bit_and)
    }

    fn parse_bit_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(&[BinOp::BitAnd], Self::parse_shift)
    }

    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(&[BinOp::Shl, BinOp::Shr], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(&[BinOp::Add, BinOp::Sub], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(
            &[BinOp::Mul, BinOp::Div, BinOp::FloorDiv, BinOp::Mod],
            Self::parse_unary,
        )
    }

    /// Left-associative binary level over `ops`, with `operand` parsing the
    /// next tighter level.
    fn parse_binary(
        &mut self,
        ops: &[BinOp],
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;
        loop {
            let token = self.peek();
            let op = match BinOp::from_symbol(&token.text) {
                Some(op) if token.kind == TokenKind::Op && ops.contains(&op) => op,
                _ => return Ok(left),
            };
            self.advance();
            let right = operand(self)?;
            left = Expr::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = if self.eat_op("-") {
            UnaryOp::Neg
        } else if self.eat_op("+") {
            UnaryOp::Plus
        } else if self.eat_op("~") {
            UnaryOp::Invert
        } else {
            return self.parse_power();
        };

        let operand = self.parse_unary()?;
        Ok(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    /// `**` is right-associative and its exponent may carry a sign: `2 ** -x`.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_postfix()?;
        if self.eat_op("**") {
            let exponent = self.parse_unary()?;
            return Ok(Expr::BinOp {
                op: BinOp::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat_op("[") {
                let index = self.parse_expression()?;
                self.expect_op("]", "to close the index")?;
                expr = Expr::Index {
                    value: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.eat_op("(") {
                let args = self.parse_sequence(")", "to close the argument list")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.eat_op(".") {
                let name = self.expect_name("after '.'")?;
                expr = Expr::Attribute {
                    value: Box::new(expr),
                    name,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.eat_op("(") {
            let expr = self.parse_expression()?;
            self.expect_op(")", "to close the parenthesized expression")?;
            return Ok(expr);
        }
        if self.eat_op("[") {
            let elements = self.parse_sequence("]", "to close the list")?;
            return Ok(Expr::List(elements));
        }

        let token = self.peek();
        let literal = match (token.kind, token.text.as_str()) {
            (TokenKind::Name, name) => Some(Expr::Name(name.to_string())),
            (TokenKind::Number, number) => Some(Expr::Number(number.to_string())),
            (TokenKind::String, string) => Some(Expr::Str(string.to_string())),
            (TokenKind::Keyword, "True") => Some(Expr::Bool(true)),
            (TokenKind::Keyword, "False") => Some(Expr::Bool(false)),
            (TokenKind::Keyword, "None") => Some(Expr::None),
            _ => None,
        };

        let Some(expr) = literal else {
            return Err(self.error("an expression"));
        };
        self.advance();
        Ok(expr)
    }

    /// Comma-separated expressions up to `close`, trailing comma allowed.
    /// The opening bracket is already consumed.
    fn parse_sequence(&mut self, close: &str, context: &str) -> Result<Vec<Expr>, ParseError> {
        let mut items = vec![];
        if self.eat_op(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if self.eat_op(",") {
                if self.eat_op(close) {
                    return Ok(items);
                }
                continue;
            }
            self.expect_op(close, context)?;
            return Ok(items);
        }
    }
}
