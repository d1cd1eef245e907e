use std::fmt::{self, Display, Formatter};

/// A whole translation unit: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    Assign {
        target: String,
        value: Expr,
    },
    AugAssign {
        target: String,
        op: AugOp,
        value: Expr,
    },
    Return(Option<Expr>),
    /// `if` / `elif`* / `else?` folded into one node.
    If {
        branches: Vec<Branch>,
        orelse: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    For {
        target: String,
        iter: ForIter,
        body: Vec<Stmt>,
    },
    Expr(Expr),
    Pass,
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

/// What a `for` loop walks over. `range(...)` calls are recognised while
/// parsing so the generator never has to look inside a call.
#[derive(Debug, Clone, PartialEq)]
pub enum ForIter {
    Range {
        start: Option<Expr>,
        stop: Expr,
        step: Option<Expr>,
    },
    Each(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(String),
    /// Numeric literal exactly as written.
    Number(String),
    /// String literal exactly as written, quotes and escapes included.
    Str(String),
    Bool(bool),
    None,

    List(Vec<Expr>),

    Index {
        value: Box<Expr>,
        index: Box<Expr>,
    },

    Attribute {
        value: Box<Expr>,
        name: String,
    },

    BinOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    BoolOp {
        op: BoolOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Compare {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// `element in container`, or `not in` when negated.
    Membership {
        negated: bool,
        element: Box<Expr>,
        container: Box<Expr>,
    },

    /// `a < b < c`: each link is a `Compare` or `Membership` over adjacent
    /// operands, all of which must hold.
    Chain(Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    Invert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Is,
    IsNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

const BIN_OPS: &[(&str, BinOp)] = &[
    ("+", BinOp::Add),
    ("-", BinOp::Sub),
    ("*", BinOp::Mul),
    ("/", BinOp::Div),
    ("//", BinOp::FloorDiv),
    ("%", BinOp::Mod),
    ("**", BinOp::Pow),
    ("&", BinOp::BitAnd),
    ("|", BinOp::BitOr),
    ("^", BinOp::BitXor),
    ("<<", BinOp::Shl),
    (">>", BinOp::Shr),
];

const CMP_OPS: &[(&str, CmpOp)] = &[
    ("==", CmpOp::Eq),
    ("!=", CmpOp::NotEq),
    ("<", CmpOp::Less),
    ("<=", CmpOp::LessEq),
    (">", CmpOp::Greater),
    (">=", CmpOp::GreaterEq),
];

const AUG_OPS: &[(&str, AugOp)] = &[
    ("+=", AugOp::Add),
    ("-=", AugOp::Sub),
    ("*=", AugOp::Mul),
    ("/=", AugOp::Div),
    ("//=", AugOp::FloorDiv),
    ("%=", AugOp::Mod),
    ("**=", AugOp::Pow),
    ("&=", AugOp::BitAnd),
    ("|=", AugOp::BitOr),
    ("^=", AugOp::BitXor),
    ("<<=", AugOp::Shl),
    (">>=", AugOp::Shr),
];

fn lookup<T: Copy>(table: &[(&str, T)], symbol: &str) -> Option<T> {
    table
        .iter()
        .find(|(spelling, _)| *spelling == symbol)
        .map(|(_, op)| *op)
}

fn spelling<T: PartialEq>(table: &[(&'static str, T)], op: &T) -> &'static str {
    table
        .iter()
        .find(|(_, candidate)| candidate == op)
        .map(|(spelling, _)| *spelling)
        .unwrap_or("?")
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        lookup(BIN_OPS, symbol)
    }
}

impl CmpOp {
    /// Only the symbolic comparisons; `is` / `is not` are keywords.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        lookup(CMP_OPS, symbol)
    }
}

impl AugOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        lookup(AUG_OPS, symbol)
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", spelling(BIN_OPS, self))
    }
}

impl Display for AugOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", spelling(AUG_OPS, self))
    }
}

impl Display for CmpOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CmpOp::Is => write!(f, "is"),
            CmpOp::IsNot => write!(f, "is not"),
            op => write!(f, "{}", spelling(CMP_OPS, op)),
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Invert => "~",
        };
        write!(f, "{}", s)
    }
}

impl Display for BoolOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BoolOp::And => write!(f, "and"),
            BoolOp::Or => write!(f, "or"),
        }
    }
}
