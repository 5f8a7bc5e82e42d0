//! Diagnostic accumulation and did-you-mean suggestions.
//!
//! Checking never stops at the first error: every diagnostic is recorded
//! and analysis continues so one run reports as much as possible.

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::common::Span;

/// One recorded type error, with an optional name suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDiagnostic {
    pub span: Span,
    pub message: String,
    pub suggestion: Option<String>,
}

impl TypeDiagnostic {
    /// Full message text, suggestion suffix included
    pub fn render(&self) -> String {
        match &self.suggestion {
            Some(suggestion) => format!("{}: did you mean '{suggestion}'?", self.message),
            None => self.message.clone(),
        }
    }

    pub fn to_report(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.render())
            .with_labels(vec![Label::primary(file_id, self.span)])
    }
}

/// Per-run diagnostic session. A fresh session (or [`Diagnostics::reset`])
/// starts with a clear error flag.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<TypeDiagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    pub fn error(&mut self, span: Span, message: impl Into<String>) {
        self.error_with_suggestion(span, message, None);
    }

    pub fn error_with_suggestion(
        &mut self,
        span: Span,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) {
        let diag = TypeDiagnostic { span, message: message.into(), suggestion };
        log::debug!("type error at {}..{}: {}", span.start, span.end, diag.render());
        self.entries.push(diag);
    }

    pub fn had_error(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[TypeDiagnostic] {
        &self.entries
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Classic two-row Levenshtein edit distance
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest candidate within edit distance 1 or 2 of `name`, if any.
///
/// Candidates whose length differs from `name` by more than 2 are skipped
/// before computing the distance. Ties keep the first candidate seen.
pub fn find_similar<'a, I>(candidates: I, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<&str> = None;
    let mut best_dist = 3usize;
    for candidate in candidates {
        if candidate.len().abs_diff(name.len()) > 2 {
            continue;
        }
        let dist = levenshtein(candidate, name);
        if dist > 0 && dist < best_dist {
            best = Some(candidate);
            best_dist = dist;
        }
    }
    best
}
