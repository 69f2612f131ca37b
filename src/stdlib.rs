use indexmap::IndexMap;

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Result, ZhrlError},
    environment::Environment,
    value::{Builtin, Value, ValueKind, VARIADIC},
};

thread_local! {
    static GLOBALS: Environment = install(&Environment::new());
}

/// The shared global environment: every builtin and nothing else.
///
/// Built once per thread on first use and never modified afterwards; callers
/// receive a structural clone, so extending it cannot leak back.
pub fn global_environment() -> Environment {
    GLOBALS.with(Environment::clone)
}

/// `env` extended with every builtin.
pub fn install(env: &Environment) -> Environment {
    let table = registry();
    tracing::debug!(builtins = table.len(), "installing builtin registry");
    env.extend(
        table
            .into_iter()
            .map(|(name, builtin)| (name, Value::new(ValueKind::Builtin(builtin)))),
    )
}

/// Builtins in declaration order, keyed by the name they are bound to.
pub fn registry() -> IndexMap<&'static str, Builtin> {
    let mut table = IndexMap::new();
    for builtin in [
        native("+", 2, arith_add),
        native("-", 2, arith_sub),
        native("*", 2, arith_mul),
        native("/", 2, arith_div),
        native("<=", 2, compare_less_equal),
        native("equal?", 2, compare_equal),
        native("true", VARIADIC, constant_true),
        native("false", VARIADIC, constant_false),
    ] {
        table.insert(builtin.name, builtin);
    }
    table
}

fn native(name: &'static str, arity: usize, callback: fn(&[Value]) -> Result<Value>) -> Builtin {
    Builtin {
        name,
        arity,
        callback,
    }
}

fn numbers(args: &[Value], name: &str) -> Result<(f64, f64)> {
    let [left, right] = args else {
        return Err(ZhrlError::from(Diagnostic::new(
            DiagnosticKind::Arity,
            format!("`{name}` expected 2 arguments but received {}", args.len()),
        )));
    };
    let context = format!("`{name}`");
    Ok((left.expect_number(&context)?, right.expect_number(&context)?))
}

fn arith_add(args: &[Value]) -> Result<Value> {
    let (a, b) = numbers(args, "+")?;
    Ok(Value::number(a + b))
}

fn arith_sub(args: &[Value]) -> Result<Value> {
    let (a, b) = numbers(args, "-")?;
    Ok(Value::number(a - b))
}

fn arith_mul(args: &[Value]) -> Result<Value> {
    let (a, b) = numbers(args, "*")?;
    Ok(Value::number(a * b))
}

fn arith_div(args: &[Value]) -> Result<Value> {
    let (a, b) = numbers(args, "/")?;
    if b == 0.0 {
        return Err(ZhrlError::from(Diagnostic::new(
            DiagnosticKind::DivisionByZero,
            format!("`/` cannot divide {a} by zero"),
        )));
    }
    Ok(Value::number(a / b))
}

fn compare_less_equal(args: &[Value]) -> Result<Value> {
    let (a, b) = numbers(args, "<=")?;
    Ok(Value::bool(a <= b))
}

fn compare_equal(args: &[Value]) -> Result<Value> {
    let (a, b) = numbers(args, "equal?")?;
    Ok(Value::bool(a == b))
}

fn constant_true(_: &[Value]) -> Result<Value> {
    Ok(Value::bool(true))
}

fn constant_false(_: &[Value]) -> Result<Value> {
    Ok(Value::bool(false))
}
