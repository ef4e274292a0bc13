use std::fmt;
use std::sync::{Mutex, PoisonError};

use strum::{EnumIter, IntoStaticStr};
use thiserror::Error;
use tmplc_ast::{SourceMap, Span};

use crate::utils::fmt::{DisplayFn, underline};

pub mod pass;

/// A problem found in a template file. The `Display` output is the final message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("{}", DiagnosticKind::RequireStrictHtml.message_template())]
    StatefulTemplateNotStrictHtml(Span),
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::StatefulTemplateNotStrictHtml(_) => DiagnosticKind::RequireStrictHtml,
        }
    }

    #[inline]
    pub fn key(&self) -> &'static str {
        self.kind().key()
    }

    pub fn is_fatal(&self) -> bool {
        match self {
            Self::StatefulTemplateNotStrictHtml(_) => true,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::StatefulTemplateNotStrictHtml(span) => *span,
        }
    }

    pub fn display<'a>(
        &'a self,
        sources: &'a SourceMap,
    ) -> Result<impl fmt::Display + use<'a>, UnknownSource> {
        let span = self.span();
        let file = sources.get(span.file).ok_or(UnknownSource(span))?;
        let start = file.lookup(span.start);
        let end = file.lookup(span.end);
        let line = file.line(start.line).ok_or(UnknownSource(span))?;

        Ok(DisplayFn::new(move |f: &mut fmt::Formatter<'_>| {
            writeln!(f, "At {}:{start}", file.path().display())?;
            writeln!(f, "{}", line.trim_end())?;

            let underline_len = if start.line == end.line {
                end.col.saturating_sub(start.col).max(1)
            } else {
                3
            };
            writeln!(f, "{}", underline(start.col, underline_len))?;
            writeln!(f, "{self}")
        }))
    }
}

/// The catalog of diagnostics a pass may report.
///
/// Keys are stable and safe to match on in tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumIter)]
pub enum DiagnosticKind {
    #[strum(serialize = "REQUIRE_STRICTHTML")]
    RequireStrictHtml,
}

impl DiagnosticKind {
    #[inline]
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn message_template(self) -> &'static str {
        match self {
            Self::RequireStrictHtml => {
                "Stateful templates cannot be of type stricthtml=\"false\"."
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An insertion-ordered sink for reported problems. Reporting never fails.
#[derive(Debug)]
pub struct Reporter<A> {
    reported: Vec<A>,
}

impl<A> Reporter<A> {
    #[inline]
    pub fn report(&mut self, error: impl Into<A>) {
        self.reported.push(error.into());
    }

    pub fn report_many(&mut self, errors: impl IntoIterator<Item = impl Into<A>>) {
        self.reported.extend(errors.into_iter().map(Into::into));
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.reported.len())
    }

    /// Returns everything reported after `checkpoint` was taken.
    pub fn reported_since(&self, checkpoint: Checkpoint) -> &[A] {
        self.reported.get(checkpoint.0..).unwrap_or_default()
    }

    #[inline]
    pub fn has_reported_since(&self, checkpoint: Checkpoint) -> bool {
        !self.reported_since(checkpoint).is_empty()
    }

    #[inline]
    pub fn reported(&self) -> &[A] {
        &self.reported
    }

    #[inline]
    pub fn into_reported(self) -> Vec<A> {
        self.reported
    }
}

impl<E> Default for Reporter<E> {
    fn default() -> Self {
        Self {
            reported: Vec::new(),
        }
    }
}

/// A position in a [`Reporter`] to compare later reports against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// A reporter shared by workers checking different files at the same time.
///
/// Each worker reports into its own [`Reporter`] and submits it once done, so the reports of a
/// single file are never interleaved with another file's.
#[derive(Debug)]
pub struct SharedReporter<A> {
    inner: Mutex<Reporter<A>>,
}

impl<A> SharedReporter<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&self, reporter: Reporter<A>) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.report_many(reporter.into_reported());
    }

    pub fn into_reporter(self) -> Reporter<A> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A> Default for SharedReporter<A> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Reporter::default()),
        }
    }
}

#[derive(Debug, Error)]
#[error("the source of a diagnostic could not be determined (span: {0})")]
pub struct UnknownSource(Span);
