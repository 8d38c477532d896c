use std::fmt::Display;

/// `++` or `--` applied to a plain variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOp {
    Increment,
    Decrement,
}

impl IncrementOp {
    pub fn from_lexeme(lexeme: &str) -> Option<IncrementOp> {
        match lexeme {
            "++" => Some(IncrementOp::Increment),
            "--" => Some(IncrementOp::Decrement),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementOp::Increment => "++",
            IncrementOp::Decrement => "--",
        }
    }
}

impl Display for IncrementOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary Expression
/// `left operator right`, with the operator kept as spelled (`and` and `&&`
/// stay distinct).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
}

/// Unary Expression
/// One of `not`, `!`, `-`, `+` applied to an operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: String,
    pub operand: Box<Expr>,
}

/// Increment Expression
/// The target is a variable name, never an arbitrary subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementExpr {
    pub operator: IncrementOp,
    pub variable: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, kept as source text.
    Number(String),
    Identifier(String),
    Boolean(bool),
    /// String literal, raw lexeme including the quotes.
    String(String),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    /// `++x`
    PreIncrement(IncrementExpr),
    /// `x++`
    PostIncrement(IncrementExpr),
}

impl Expr {
    pub fn binary(left: Expr, operator: &str, right: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator: operator.to_string(),
            right: Box::new(right),
        })
    }

    pub fn unary(operator: &str, operand: Expr) -> Expr {
        Expr::Unary(UnaryExpr {
            operator: operator.to_string(),
            operand: Box::new(operand),
        })
    }

    pub fn pre_increment(operator: IncrementOp, variable: &str) -> Expr {
        Expr::PreIncrement(IncrementExpr {
            operator,
            variable: variable.to_string(),
        })
    }

    pub fn post_increment(variable: &str, operator: IncrementOp) -> Expr {
        Expr::PostIncrement(IncrementExpr {
            operator,
            variable: variable.to_string(),
        })
    }

    /// The variable name when this expression is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(value) | Expr::Identifier(value) | Expr::String(value) => {
                f.write_str(value)
            }
            Expr::Boolean(value) => write!(f, "{}", value),
            Expr::Binary(BinaryExpr {
                left,
                operator,
                right,
            }) => write!(f, "({} {} {})", left, operator, right),
            Expr::Unary(UnaryExpr { operator, operand }) => {
                write!(f, "({} {})", operator, operand)
            }
            Expr::PreIncrement(IncrementExpr { operator, variable }) => {
                write!(f, "({}{})", operator, variable)
            }
            Expr::PostIncrement(IncrementExpr { operator, variable }) => {
                write!(f, "({}{})", variable, operator)
            }
        }
    }
}
