use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
    diagnostics::{Result, ZhrlError},
    runtime::Interpreter,
    stdlib,
    value::serialize,
};

/// Line-oriented session: each line is one program written as a JSON nested list.
pub struct Repl {
    interpreter: Interpreter,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(|err| {
            ZhrlError::from(std::io::Error::new(std::io::ErrorKind::Other, err))
        })?;
        loop {
            match editor.readline("zhrl> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == ":quit" || trimmed == ":exit" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();
                    match self.eval_line(trimmed) {
                        Ok(output) => println!("{output}"),
                        Err(err) => eprintln!("{err}"),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    return Err(ZhrlError::from(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        err,
                    )));
                }
            }
        }
        Ok(())
    }

    /// Evaluate one input line, handling the `:builtins` command.
    pub fn eval_line(&self, line: &str) -> Result<String> {
        if line == ":builtins" {
            let names: Vec<_> = stdlib::registry().keys().copied().collect();
            return Ok(names.join(" "));
        }
        let value = self.interpreter.eval_json(line)?;
        Ok(serialize(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn evaluates_json_lines() {
        let repl = Repl::new();
        assert_eq!(repl.eval_line(r#"[["lam", ["x"], "x"], 30]"#).unwrap(), "30");
        assert_eq!(repl.eval_line(r#"["lam", [], 1]"#).unwrap(), "#<procedure>");
        assert_eq!(repl.eval_line(r#""+""#).unwrap(), "#<primop>");
    }

    #[test]
    fn lists_builtins() {
        let repl = Repl::new();
        assert_eq!(repl.eval_line(":builtins").unwrap(), "+ - * / <= equal? true false");
    }

    #[test]
    fn reports_faults_and_reader_errors() {
        let repl = Repl::new();
        let err = repl.eval_line(r#"["if", 1, 2, 3]"#).unwrap_err();
        assert_eq!(err.kind(), Some(DiagnosticKind::Type));
        assert!(matches!(repl.eval_line("(+ 1 2)"), Err(ZhrlError::Json(_))));
    }
}
