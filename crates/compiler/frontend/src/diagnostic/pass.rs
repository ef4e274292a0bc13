use tmplc_ast::{FileNode, IdGenerator};

use crate::CompileErrorReporter;

mod stateful_templates;

pub use stateful_templates::StatefulTemplates;

/// The passes run over every file, in order.
pub const DEFAULT_FILE_PASSES: &[&'static dyn FilePass] = &[&StatefulTemplates];

/// Whether a pass only inspects a file or is allowed to rewrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Validating,
    Transforming,
}

/// A unit of work run once over each parsed file.
///
/// Passes never abort compilation. Every problem they find is reported, and it's up to the caller
/// to decide whether the accumulated diagnostics block later stages. A pass must not keep the
/// file or the id generator around after `run` returns.
pub trait FilePass: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> PassKind;

    fn run(
        &self,
        file: &mut FileNode<'_>,
        ids: &mut dyn IdGenerator,
        reporter: &mut CompileErrorReporter,
    );
}

pub fn run_file_passes(
    passes: &[&dyn FilePass],
    file: &mut FileNode<'_>,
    ids: &mut dyn IdGenerator,
    reporter: &mut CompileErrorReporter,
) {
    for pass in passes {
        log::trace!("Running {} on file {:?}", pass.name(), file.file());

        let before = (cfg!(debug_assertions) && pass.kind() == PassKind::Validating)
            .then(|| file.clone());

        let checkpoint = reporter.checkpoint();
        pass.run(file, ids, reporter);

        if let Some(before) = before {
            debug_assert!(
                before == *file,
                "validating pass {} modified the file",
                pass.name()
            );
        }

        let reported = reporter.reported_since(checkpoint).len();
        if reported > 0 {
            log::debug!(
                "{} reported {reported} diagnostic(s) for file {:?}",
                pass.name(),
                file.file()
            );
        }
    }
}
