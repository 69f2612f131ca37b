use std::collections::HashSet;

use crate::{
    ast::Expr,
    diagnostics::{Diagnostic, DiagnosticKind},
    sexp::Sexp,
};

/// Words with special meaning in head position; never usable as binding names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Lam,
    Var,
    Separator,
}

impl Keyword {
    pub fn lookup(word: &str) -> Option<Keyword> {
        match word {
            "if" => Some(Keyword::If),
            "lam" => Some(Keyword::Lam),
            "var" => Some(Keyword::Var),
            "=" => Some(Keyword::Separator),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Lam => "lam",
            Keyword::Var => "var",
            Keyword::Separator => "=",
        }
    }
}

pub fn parse(input: &Sexp) -> Result<Expr, Diagnostic> {
    match input {
        Sexp::Number(n) => Ok(Expr::number(*n)),
        Sexp::Boolean(b) => Ok(Expr::boolean(*b)),
        Sexp::String(name) => Ok(Expr::identifier(name.clone())),
        Sexp::List(items) => parse_list(input, items),
    }
}

fn parse_list(form: &Sexp, items: &[Sexp]) -> Result<Expr, Diagnostic> {
    let Some((head, rest)) = items.split_first() else {
        return Err(syntax("the empty list is not an expression"));
    };
    match head.as_str().and_then(Keyword::lookup) {
        Some(Keyword::If) => parse_if(form, rest),
        Some(Keyword::Lam) => parse_lam(form, rest),
        Some(Keyword::Var) => parse_var(form, rest),
        Some(Keyword::Separator) | None => {
            let args = rest.iter().map(parse).collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::application(parse(head)?, args))
        }
    }
}

fn parse_if(form: &Sexp, rest: &[Sexp]) -> Result<Expr, Diagnostic> {
    match rest {
        [condition, then_branch, else_branch] => Ok(Expr::conditional(
            parse(condition)?,
            parse(then_branch)?,
            parse(else_branch)?,
        )),
        _ => Err(syntax(format!(
            "`if` expects a condition, a then branch and an else branch in {form}"
        ))),
    }
}

fn parse_lam(form: &Sexp, rest: &[Sexp]) -> Result<Expr, Diagnostic> {
    let [params, body] = rest else {
        return Err(syntax(format!(
            "`lam` expects a parameter list and a body in {form}"
        )));
    };
    let Some(params) = params.as_list() else {
        return Err(syntax(format!(
            "`lam` expects a list of parameter names, found {params} in {form}"
        )));
    };
    let mut names = Vec::with_capacity(params.len());
    for param in params {
        let Some(name) = param.as_str() else {
            return Err(syntax(format!(
                "expected {param} to be an identifier in {form}"
            )));
        };
        names.push(name.to_owned());
    }
    check_names(&names, form)?;
    Ok(Expr::lambda(names, parse(body)?))
}

/// `(var (a = e1) (b = e2) body)` becomes `((lam (a b) body) e1 e2)`.
fn parse_var(form: &Sexp, rest: &[Sexp]) -> Result<Expr, Diagnostic> {
    let Some((body, bindings)) = rest.split_last().filter(|(_, b)| !b.is_empty()) else {
        return Err(syntax(format!(
            "`var` expects at least one binding and a body in {form}"
        )));
    };
    let mut names = Vec::with_capacity(bindings.len());
    let mut values = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let (name, value) = parse_binding(binding, form)?;
        names.push(name);
        values.push(value);
    }
    check_names(&names, form)?;
    Ok(Expr::application(Expr::lambda(names, parse(body)?), values))
}

fn parse_binding(binding: &Sexp, form: &Sexp) -> Result<(String, Expr), Diagnostic> {
    let shape_error = || {
        syntax(format!(
            "`var` binding {binding} must have the shape (name = expr)"
        ))
        .with_note(format!("in {form}"))
    };
    let [name, separator, value] = binding.as_list().ok_or_else(shape_error)? else {
        return Err(shape_error());
    };
    let name = name.as_str().ok_or_else(shape_error)?;
    if separator.as_str() != Some(Keyword::Separator.as_str()) {
        return Err(shape_error());
    }
    Ok((name.to_owned(), parse(value)?))
}

fn check_names(names: &[String], form: &Sexp) -> Result<(), Diagnostic> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if let Some(keyword) = Keyword::lookup(name) {
            return Err(syntax(format!(
                "reserved word `{}` cannot be bound in {form}",
                keyword.as_str()
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(syntax(format!("duplicate name `{name}` in {form}")));
        }
    }
    Ok(())
}

fn syntax(message: impl Into<String>) -> Diagnostic {
    Diagnostic::new(DiagnosticKind::Syntax, message)
}
