use std::fmt;

use bon::bon;
use rayon::prelude::*;
use thiserror::Error;
pub use tmplc_ast as ast;
use tmplc_ast::{FileNode, IncrementingIdGenerator, SourceMap};
use tmplc_compiler_frontend::pass::{DEFAULT_FILE_PASSES, FilePass, run_file_passes};
pub use tmplc_compiler_frontend::{
    CompileErrorReporter, Diagnostic, DiagnosticKind, SharedReporter, UnknownSource, pass,
};

/// A parsed file together with the id generator of its compilation unit.
pub type FileUnit<'src> = (FileNode<'src>, IncrementingIdGenerator);

/// Runs a fixed list of file passes over parsed files and collects what they report.
pub struct Check {
    passes: &'static [&'static dyn FilePass],
    threads: usize,
}

#[bon]
impl Check {
    #[builder]
    pub fn new(
        #[builder(default = DEFAULT_FILE_PASSES)] passes: &'static [&'static dyn FilePass],
        #[builder(default = 1)] threads: usize,
    ) -> Self {
        Self {
            passes,
            threads: threads.max(1),
        }
    }

    pub fn run_file(
        &self,
        file: &mut FileNode<'_>,
        ids: &mut IncrementingIdGenerator,
    ) -> Diagnostics {
        let mut reporter = CompileErrorReporter::default();
        run_file_passes(self.passes, file, ids, &mut reporter);
        Diagnostics::from(reporter.into_reported())
    }

    /// Checks every file. With more than one thread configured, files are checked in parallel,
    /// but the result is ordered the same way regardless.
    pub fn run(&self, files: &mut [FileUnit<'_>]) -> Result<Diagnostics, Error> {
        log::info!(
            "Checking {} files with {} passes",
            files.len(),
            self.passes.len()
        );

        let shared = SharedReporter::new();
        if self.threads == 1 || files.len() < 2 {
            for (file, ids) in files.iter_mut() {
                self.check_into(file, ids, &shared);
            }
        } else {
            log::debug!("Starting a pool of {} workers", self.threads);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()?;
            pool.install(|| {
                files
                    .par_iter_mut()
                    .for_each(|(file, ids)| self.check_into(file, ids, &shared));
            });
        }

        Ok(Diagnostics::from(shared.into_reporter().into_reported()))
    }

    fn check_into(
        &self,
        file: &mut FileNode<'_>,
        ids: &mut IncrementingIdGenerator,
        shared: &SharedReporter<Diagnostic>,
    ) {
        let mut reporter = CompileErrorReporter::default();
        run_file_passes(self.passes, file, ids, &mut reporter);
        shared.submit(reporter);
    }

    pub fn passes(&self) -> impl Iterator<Item = &'static str> {
        self.passes.iter().map(|pass| pass.name())
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for Check {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("passes", &self.passes().collect::<Vec<_>>())
            .field("threads", &self.threads)
            .finish()
    }
}

/// Diagnostics grouped by file. Within a file they keep the order they were reported in.
#[derive(Debug, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn has_fatal_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_fatal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn dump(&self, sources: &SourceMap) -> Result<(), UnknownSource> {
        let mut warnings = 0;
        let mut errors = 0;

        for diagnostic in self {
            // log macros skip their arguments when the level is disabled
            let rendered = diagnostic.display(sources)?;
            if diagnostic.is_fatal() {
                log::error!("{rendered}");
                errors += 1;
            } else {
                log::warn!("{rendered}");
                warnings += 1;
            }
        }
        log::info!("Completed with {warnings} warnings and {errors} errors");
        Ok(())
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by_key(|diagnostic| diagnostic.span().file);
        Self(diagnostics)
    }
}

impl IntoIterator for Diagnostics {
    type IntoIter = std::vec::IntoIter<Diagnostic>;
    type Item = Diagnostic;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type IntoIter = std::slice::Iter<'a, Diagnostic>;
    type Item = &'a Diagnostic;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.into_iter().try_for_each(|d| writeln!(f, "{d}"))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not start the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
