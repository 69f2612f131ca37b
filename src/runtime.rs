use crate::{
    ast::{Expr, Literal},
    diagnostics::{Diagnostic, DiagnosticKind, Result, ZhrlError},
    environment::Environment,
    parser,
    sexp::Sexp,
    stdlib,
    value::{serialize, Value, ValueKind},
};

/// Parse, evaluate against the global environment, and serialize.
pub fn top_evaluate(input: &Sexp) -> Result<String> {
    Interpreter::new().top_evaluate(input)
}

pub struct Interpreter {
    globals: Environment,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            globals: stdlib::global_environment(),
        }
    }

    /// An interpreter whose top level is `globals` instead of the builtin registry.
    pub fn with_environment(globals: Environment) -> Self {
        Self { globals }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn eval_sexp(&self, input: &Sexp) -> Result<Value> {
        tracing::debug!(program = %input, "evaluating");
        let expr = parser::parse(input)?;
        evaluate(&expr, &self.globals)
    }

    pub fn eval_json(&self, source: &str) -> Result<Value> {
        let input = Sexp::from_json(source)?;
        self.eval_sexp(&input)
    }

    pub fn top_evaluate(&self, input: &Sexp) -> Result<String> {
        self.eval_sexp(input).map(|value| serialize(&value))
    }
}

pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Value> {
    match expr {
        Expr::Literal(lit) => Ok(literal(lit)),
        Expr::Identifier(name) => env.lookup(name),
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            let test = evaluate(condition, env)?;
            match test.kind() {
                ValueKind::Bool(true) => evaluate(then_branch, env),
                ValueKind::Bool(false) => evaluate(else_branch, env),
                _ => Err(ZhrlError::from(Diagnostic::new(
                    DiagnosticKind::Type,
                    format!(
                        "`if` condition {condition} must be Boolean, found {} {test}",
                        test.type_name()
                    ),
                ))),
            }
        }
        Expr::Lambda { params, body } => {
            Ok(Value::closure(env.clone(), params.clone(), body.clone()))
        }
        Expr::Application { operator, args } => {
            let callee = evaluate(operator, env)?;
            if !callee.is_callable() {
                return Err(ZhrlError::from(
                    Diagnostic::new(
                        DiagnosticKind::ApplyToNonFunction,
                        format!(
                            "cannot apply {} {callee}, it is not a function",
                            callee.type_name()
                        ),
                    )
                    .with_note(format!("in {expr}")),
                ));
            }
            let mut eval_args = Vec::with_capacity(args.len());
            for arg in args {
                eval_args.push(evaluate(arg, env)?);
            }
            apply(callee, eval_args)
        }
    }
}

/// Call a closure or builtin with already-evaluated arguments.
pub fn apply(callee: Value, args: Vec<Value>) -> Result<Value> {
    match callee.kind() {
        ValueKind::Builtin(builtin) => {
            tracing::trace!(builtin = builtin.name, args = args.len(), "applying builtin");
            builtin.call(&args)
        }
        ValueKind::Closure(closure) => {
            if args.len() != closure.params.len() {
                return Err(ZhrlError::from(Diagnostic::new(
                    DiagnosticKind::Arity,
                    format!(
                        "closure ({}) expected {} arguments but received {}",
                        closure.params.join(" "),
                        closure.params.len(),
                        args.len()
                    ),
                )));
            }
            tracing::trace!(params = ?closure.params, "applying closure");
            let new_env = closure
                .env
                .extend(closure.params.iter().map(String::as_str).zip(args));
            evaluate(&closure.body, &new_env)
        }
        ValueKind::Number(_) | ValueKind::Bool(_) => Err(ZhrlError::from(Diagnostic::new(
            DiagnosticKind::ApplyToNonFunction,
            format!(
                "cannot apply {} {callee}, it is not a function",
                callee.type_name()
            ),
        ))),
    }
}

fn literal(literal: &Literal) -> Value {
    match literal {
        Literal::Number(n) => Value::number(*n),
        Literal::Bool(b) => Value::bool(*b),
    }
}
