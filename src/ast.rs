use std::{fmt, rc::Rc};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(String),
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Lambda {
        params: Vec<String>,
        body: Rc<Expr>,
    },
    Application {
        operator: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn number(n: f64) -> Self {
        Expr::Literal(Literal::Number(n))
    }

    pub fn boolean(b: bool) -> Self {
        Expr::Literal(Literal::Bool(b))
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn conditional(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn lambda(params: Vec<String>, body: Expr) -> Self {
        Expr::Lambda {
            params,
            body: Rc::new(body),
        }
    }

    pub fn application(operator: Expr, args: Vec<Expr>) -> Self {
        Expr::Application {
            operator: Box::new(operator),
            args,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

// Renders back into surface syntax; `var` forms show up in their desugared shape.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Identifier(name) => write!(f, "{name}"),
            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "(if {condition} {then_branch} {else_branch})"),
            Expr::Lambda { params, body } => write!(f, "(lam ({}) {body})", params.join(" ")),
            Expr::Application { operator, args } => {
                write!(f, "({operator}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
