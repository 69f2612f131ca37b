//! Core library for ZHRL, a small dynamically-typed, lexically-scoped
//! language written as nested lists: parsing into an expression tree,
//! evaluation against flat copy-on-extend environments, and display of the
//! resulting values.

pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod sexp;
pub mod stdlib;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, ZhrlError};
pub use environment::Environment;
pub use repl::Repl;
pub use runtime::{top_evaluate, Interpreter};
pub use sexp::Sexp;
pub use value::{serialize, Value};
