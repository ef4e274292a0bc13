mod ast;
mod files;
mod id;
mod span;

pub use ast::{FileNode, TemplateFlags, TemplateNode};
pub use files::{File, SourceLoc, SourceMap};
pub use id::{IdGenerator, IncrementingIdGenerator, NodeId};
pub use span::{FileId, Span};
