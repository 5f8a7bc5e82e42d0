//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

/// Failure of a whole checking run.
///
/// Individual type errors never abort the analyzer; they accumulate in the
/// run's [`Diagnostics`](crate::sema::Diagnostics) so one pass reports as
/// much as possible. This error is the caller-facing summary consulted
/// before code generation.
#[derive(Error, Debug)]
pub enum SemaError {
    #[error("type checking failed with {count} error(s)")]
    CheckFailed { count: usize },
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
