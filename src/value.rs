use std::{fmt, rc::Rc};

use crate::{
    ast::Expr,
    diagnostics::{Diagnostic, DiagnosticKind, Result, ZhrlError},
    environment::Environment,
};

/// Display token for every closure.
pub const PROCEDURE_TOKEN: &str = "#<procedure>";
/// Display token for every builtin.
pub const PRIMOP_TOKEN: &str = "#<primop>";

#[derive(Clone)]
pub struct Value(pub Rc<ValueKind>);

impl Value {
    pub fn new(kind: ValueKind) -> Self {
        Self(Rc::new(kind))
    }

    pub fn number(value: f64) -> Self {
        Self::new(ValueKind::Number(value))
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ValueKind::Bool(value))
    }

    pub fn closure(env: Environment, params: Vec<String>, body: Rc<Expr>) -> Self {
        Self::new(ValueKind::Closure(Closure { env, params, body }))
    }

    pub fn kind(&self) -> &ValueKind {
        &self.0
    }

    pub fn type_name(&self) -> &'static str {
        match &*self.0 {
            ValueKind::Number(_) => "Number",
            ValueKind::Bool(_) => "Boolean",
            ValueKind::Closure(_) => "Closure",
            ValueKind::Builtin(_) => "Builtin",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(&*self.0, ValueKind::Closure(_) | ValueKind::Builtin(_))
    }

    pub fn expect_number(&self, context: &str) -> Result<f64> {
        match &*self.0 {
            ValueKind::Number(n) => Ok(*n),
            _ => Err(ZhrlError::from(Diagnostic::new(
                DiagnosticKind::Type,
                format!("{context} expected Number, found {} {self}", self.type_name()),
            ))),
        }
    }
}

/// Render a value the way the top level reports results.
pub fn serialize(value: &Value) -> String {
    value.to_string()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (&*self.0, &*other.0) {
            (ValueKind::Number(a), ValueKind::Number(b)) => a == b,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Closure(a), ValueKind::Closure(b)) => a == b,
            (ValueKind::Builtin(a), ValueKind::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ValueKind::Number(n) => write!(f, "{n}"),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Closure(closure) => write!(
                f,
                "<closure ({}) {} over {} bindings>",
                closure.params.join(" "),
                closure.body,
                closure.env.len()
            ),
            ValueKind::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ValueKind::Number(n) => write!(f, "{n}"),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Closure(_) => f.write_str(PROCEDURE_TOKEN),
            ValueKind::Builtin(_) => f.write_str(PRIMOP_TOKEN),
        }
    }
}

#[derive(Clone)]
pub enum ValueKind {
    Number(f64),
    Bool(bool),
    Closure(Closure),
    Builtin(Builtin),
}

#[derive(Clone, PartialEq)]
pub struct Closure {
    pub env: Environment,
    pub params: Vec<String>,
    pub body: Rc<Expr>,
}

/// Marks a builtin that accepts any number of arguments.
pub const VARIADIC: usize = usize::MAX;

#[derive(Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub callback: fn(&[Value]) -> Result<Value>,
}

impl Builtin {
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        if self.arity != VARIADIC && args.len() != self.arity {
            return Err(ZhrlError::from(Diagnostic::new(
                DiagnosticKind::Arity,
                format!(
                    "builtin `{}` expected {} arguments but received {}",
                    self.name,
                    self.arity,
                    args.len()
                ),
            )));
        }
        (self.callback)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(_: &[Value]) -> Result<Value> {
        Ok(Value::number(1.0))
    }

    #[test]
    fn numbers_and_booleans_serialize_canonically() {
        assert_eq!(serialize(&Value::number(7.0)), "7");
        assert_eq!(serialize(&Value::number(-3.5)), "-3.5");
        assert_eq!(serialize(&Value::bool(true)), "true");
        assert_eq!(serialize(&Value::bool(false)), "false");
    }

    #[test]
    fn callables_serialize_to_fixed_tokens() {
        let closure = Value::closure(Environment::new(), vec!["x".into()], Rc::new(Expr::identifier("x")));
        let builtin = Value::new(ValueKind::Builtin(Builtin {
            name: "one",
            arity: 0,
            callback: constant,
        }));
        assert_eq!(serialize(&closure), PROCEDURE_TOKEN);
        assert_eq!(serialize(&builtin), PRIMOP_TOKEN);
    }

    #[test]
    fn closures_compare_structurally() {
        let env = Environment::new().bind("a", Value::number(1.0));
        let body = Expr::identifier("a");
        let first = Value::closure(env.clone(), vec!["x".into()], Rc::new(body.clone()));
        let second = Value::closure(env.clone(), vec!["x".into()], Rc::new(body.clone()));
        assert_eq!(first, second);

        let other_env = Value::closure(env.bind("a", Value::number(2.0)), vec!["x".into()], Rc::new(body.clone()));
        assert_ne!(first, other_env);

        let other_params = Value::closure(env, vec!["y".into()], Rc::new(body));
        assert_ne!(first, other_params);
    }

    #[test]
    fn builtin_checks_arity_before_running() {
        let builtin = Builtin {
            name: "one",
            arity: 0,
            callback: constant,
        };
        let err = builtin.call(&[Value::bool(true)]).unwrap_err();
        assert_eq!(err.kind(), Some(DiagnosticKind::Arity));
        assert_eq!(builtin.call(&[]).unwrap(), Value::number(1.0));
    }

    #[test]
    fn type_expectations_report_the_offending_value() {
        let err = Value::bool(true).expect_number("`+`").unwrap_err();
        assert_eq!(err.kind(), Some(DiagnosticKind::Type));
        assert!(err.to_string().contains("found Boolean true"));
    }
}
