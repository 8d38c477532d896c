use std::{fmt::Display, slice::Iter};

use super::expressions::Expr;

/// `type name;` or `type name = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub type_name: String,
    pub identifier: String,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub variable: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// `for (init condition; increment) body`. The initializer is a full
/// statement and renders its own `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub initializer: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::VarDecl(VarDeclStmt {
                type_name,
                identifier,
                initializer,
            }) => match initializer {
                Some(value) => write!(f, "{} {} = {};", type_name, identifier, value),
                None => write!(f, "{} {};", type_name, identifier),
            },
            Stmt::Assignment(AssignmentStmt { variable, value }) => {
                write!(f, "{} = {};", variable, value)
            }
            Stmt::Expression(ExpressionStmt { expression }) => write!(f, "{};", expression),
            Stmt::Block(block) => {
                writeln!(f, "{{")?;
                for stmt in block.iter() {
                    writeln!(f, "  {}", stmt)?;
                }
                write!(f, "}}")
            }
            Stmt::If(IfStmt {
                condition,
                then_body,
                else_body,
            }) => {
                write!(f, "if ({}) {}", condition, then_body)?;
                if let Some(else_body) = else_body {
                    write!(f, " else {}", else_body)?;
                }
                Ok(())
            }
            Stmt::While(WhileStmt { condition, body }) => {
                write!(f, "while ({}) {}", condition, body)
            }
            Stmt::For(ForStmt {
                initializer,
                condition,
                increment,
                body,
            }) => {
                write!(f, "for (")?;
                match initializer {
                    Some(initializer) => write!(f, "{}", initializer)?,
                    None => write!(f, ";")?,
                }
                write!(f, " ")?;
                if let Some(condition) = condition {
                    write!(f, "{}", condition)?;
                }
                write!(f, "; ")?;
                if let Some(increment) = increment {
                    write!(f, "{}", increment)?;
                }
                write!(f, ") {}", body)
            }
        }
    }
}
