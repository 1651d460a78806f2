use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One reported problem. Diagnostics are plain values carried back to the
/// caller; no stage signals expected failure by panicking or throwing.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub severity: Severity,
    pub file: String,
    pub snippet: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        line: usize,
        column: usize,
        snippet: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity: Severity::Error,
            file: file.into(),
            snippet: snippet.into(),
        }
    }

    pub fn warning(
        file: impl Into<String>,
        line: usize,
        column: usize,
        snippet: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity: Severity::Warning,
            file: file.into(),
            snippet: snippet.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file, self.line, self.column, self.severity, self.message
        )
    }
}

/// Aggregate outcome of parsing one buffer, consumed by the LSP entry point.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub actions: Vec<String>,
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Byte span of the diagnostic's line within `source`, narrowed to the
/// snippet when it occurs on that line.
fn resolve_span(diagnostic: &Diagnostic, source: &str) -> Range<usize> {
    let mut offset = 0;
    for (index, line) in source.split('\n').enumerate() {
        if index + 1 == diagnostic.line {
            if !diagnostic.snippet.is_empty() {
                if let Some(at) = line.find(diagnostic.snippet.as_str()) {
                    return offset + at..offset + at + diagnostic.snippet.len();
                }
            }
            return offset..offset + line.len();
        }
        offset += line.len() + 1;
    }
    0..0
}

pub fn print_diagnostic(diagnostic: &Diagnostic, source: &str) {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };
    let color = match diagnostic.severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    };
    let span = resolve_span(diagnostic, source);

    Report::build(kind, (diagnostic.file.clone(), span.clone()))
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((diagnostic.file.clone(), span))
                .with_message(&diagnostic.message)
                .with_color(color),
        )
        .finish()
        .print((
            diagnostic.file.clone(),
            Source::from(source.to_string()),
        ))
        .ok();
}

/// Renders every diagnostic against its originating file, reading each file
/// once. Files that can no longer be read fall back to a plain one-liner.
pub fn print_all(diagnostics: &[Diagnostic]) {
    let mut sources: HashMap<&str, Option<String>> = HashMap::new();

    for diagnostic in diagnostics {
        let source = sources
            .entry(diagnostic.file.as_str())
            .or_insert_with(|| fs::read_to_string(&diagnostic.file).ok());
        match source {
            Some(source) => print_diagnostic(diagnostic, source),
            None => eprintln!("{diagnostic}"),
        }
    }
}
