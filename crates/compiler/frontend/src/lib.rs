mod diagnostic;
pub mod utils;

pub use diagnostic::{
    Checkpoint, Diagnostic, DiagnosticKind, Reporter, SharedReporter, UnknownSource, pass,
};
pub use tmplc_ast as ast;

pub type CompileErrorReporter = Reporter<Diagnostic>;
