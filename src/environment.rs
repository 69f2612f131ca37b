use im::OrdMap;

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Result, ZhrlError},
    value::Value,
};

/// A flat, immutable snapshot of name-to-value bindings.
///
/// Extending an environment never touches the original: `extend` and `bind`
/// return a new snapshot in which the new bindings shadow same-named old
/// ones. The persistent map shares structure between snapshots, so a
/// closure capturing one by value costs a pointer copy rather than a deep
/// clone, and nothing done to the defining scope afterwards is visible
/// through the capture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: OrdMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.get(name).cloned().ok_or_else(|| {
            ZhrlError::from(Diagnostic::new(
                DiagnosticKind::UnboundIdentifier,
                format!("unbound identifier `{name}`"),
            ))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// A copy of this environment with one extra binding.
    pub fn bind(&self, name: impl Into<String>, value: Value) -> Environment {
        Environment {
            bindings: self.bindings.update(name.into(), value),
        }
    }

    /// A copy of this environment with every pair in `bindings` applied in order.
    pub fn extend<I, S>(&self, bindings: I) -> Environment
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut next = self.bindings.clone();
        for (name, value) in bindings {
            next.insert(name.into(), value);
        }
        tracing::trace!(before = self.len(), after = next.len(), "extended environment");
        Environment { bindings: next }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_absent_name_is_unbound_identifier() {
        let env = Environment::new().bind("a", Value::number(3.0));
        assert_eq!(env.lookup("a").unwrap(), Value::number(3.0));

        let err = env.lookup("c").unwrap_err();
        assert_eq!(err.kind(), Some(DiagnosticKind::UnboundIdentifier));
        assert!(err.to_string().contains("`c`"));
    }

    #[test]
    fn extension_shadows_without_touching_the_original() {
        let outer = Environment::new()
            .bind("x", Value::number(1.0))
            .bind("y", Value::bool(false));
        let inner = outer.extend([("x", Value::number(2.0)), ("z", Value::number(5.0))]);

        assert_eq!(inner.get("x"), Some(&Value::number(2.0)));
        assert_eq!(inner.get("y"), Some(&Value::bool(false)));
        assert_eq!(inner.len(), 3);

        assert_eq!(outer.get("x"), Some(&Value::number(1.0)));
        assert!(!outer.contains("z"));
        assert_eq!(outer.len(), 2);
    }

    #[test]
    fn later_pairs_in_one_extension_win() {
        let env = Environment::new().extend([("x", Value::number(1.0)), ("x", Value::number(9.0))]);
        assert_eq!(env.get("x"), Some(&Value::number(9.0)));
    }

    #[test]
    fn names_are_ordered() {
        let env = Environment::new()
            .bind("b", Value::number(1.0))
            .bind("a", Value::number(2.0));
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(Environment::new().is_empty());
    }
}
