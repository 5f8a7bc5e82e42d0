//! Shared infrastructure: source spans and error reporting

mod error;
mod span;

pub use error::{DiagnosticReporter, SemaError};
pub use span::Span;
