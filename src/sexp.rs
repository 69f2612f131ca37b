//! Nested-list literals: the shape a reader hands to the parser.
//!
//! The reader itself is JSON. A program such as
//! `[["lam", ["x", "y"], ["+", "x", "y"]], 3, 4]` is already a valid JSON
//! document, so `serde_json` does the character-level work and this module
//! only narrows its value model down to the four shapes the parser accepts.

use std::fmt;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Sexp {
    Number(f64),
    Boolean(bool),
    String(String),
    List(Vec<Sexp>),
}

impl Sexp {
    /// Read a single nested-list literal from JSON text.
    pub fn from_json(source: &str) -> Result<Sexp> {
        let json: serde_json::Value = serde_json::from_str(source)?;
        Ok(Sexp::try_from(json)?)
    }

    pub fn list(items: impl IntoIterator<Item = Sexp>) -> Self {
        Sexp::List(items.into_iter().collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Sexp::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::List(items) => Some(items),
            _ => None,
        }
    }
}

impl TryFrom<serde_json::Value> for Sexp {
    type Error = Diagnostic;

    fn try_from(json: serde_json::Value) -> std::result::Result<Self, Self::Error> {
        use serde_json::Value as JV;

        match json {
            JV::Bool(b) => Ok(Sexp::Boolean(b)),
            JV::Number(n) => n.as_f64().map(Sexp::Number).ok_or_else(|| {
                Diagnostic::new(
                    DiagnosticKind::Syntax,
                    format!("number `{n}` cannot be represented"),
                )
            }),
            JV::String(s) => Ok(Sexp::String(s)),
            JV::Array(items) => items
                .into_iter()
                .map(Sexp::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Sexp::List),
            other @ (JV::Null | JV::Object(_)) => Err(Diagnostic::new(
                DiagnosticKind::Syntax,
                format!("`{other}` is not a number, boolean, string or list"),
            )),
        }
    }
}

impl From<f64> for Sexp {
    fn from(n: f64) -> Self {
        Sexp::Number(n)
    }
}

impl From<i32> for Sexp {
    fn from(n: i32) -> Self {
        Sexp::Number(f64::from(n))
    }
}

impl From<bool> for Sexp {
    fn from(b: bool) -> Self {
        Sexp::Boolean(b)
    }
}

impl From<&str> for Sexp {
    fn from(s: &str) -> Self {
        Sexp::String(s.to_owned())
    }
}

impl From<String> for Sexp {
    fn from(s: String) -> Self {
        Sexp::String(s)
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(items: Vec<Sexp>) -> Self {
        Sexp::List(items)
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Number(n) => write!(f, "{n}"),
            Sexp::Boolean(b) => write!(f, "{b}"),
            Sexp::String(s) => write!(f, "{s}"),
            Sexp::List(items) => {
                write!(f, "(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::diagnostics::ZhrlError;

    #[test]
    fn reads_nested_json_arrays() {
        let sexp = Sexp::from_json(r#"[["lam", ["x"], "x"], 30, true]"#).unwrap();
        assert_eq!(
            sexp,
            Sexp::list([
                Sexp::list(["lam".into(), Sexp::list(["x".into()]), "x".into()]),
                30.into(),
                true.into(),
            ])
        );
    }

    #[test]
    fn rejects_null_and_objects() {
        let err = Sexp::try_from(json!(["+", null, 1])).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Syntax);

        let err = Sexp::try_from(json!({"op": "+"})).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Syntax);
    }

    #[test]
    fn malformed_json_is_a_reader_error() {
        match Sexp::from_json("[1, 2") {
            Err(ZhrlError::Json(_)) => {}
            other => panic!("expected JSON error, found {other:?}"),
        }
    }

    #[test]
    fn displays_as_s_expression() {
        let sexp = Sexp::try_from(json!(["var", ["a", "=", 3.5], ["*", "a", 2]])).unwrap();
        assert_eq!(sexp.to_string(), "(var (a = 3.5) (* a 2))");
    }
}
