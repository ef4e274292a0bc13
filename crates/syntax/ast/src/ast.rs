use bitflags::bitflags;

use crate::id::{IdGenerator, NodeId};
use crate::span::{FileId, Span};

bitflags! {
    /// Semantic flags of a template, resolved by the parser from its declared attributes.
    ///
    /// The flags are independent of each other, so every combination can be constructed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TemplateFlags: u8 {
        const STATEFUL = 1 << 0;
        const STRICT_HTML = 1 << 1;
    }
}

impl Default for TemplateFlags {
    #[inline]
    fn default() -> Self {
        Self::STRICT_HTML
    }
}

/// A parsed template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode<'src> {
    id: NodeId,
    file: FileId,
    templates: Vec<TemplateNode<'src>>,
}

impl<'src> FileNode<'src> {
    pub fn new(file: FileId, ids: &mut dyn IdGenerator) -> Self {
        Self {
            id: ids.gen_id(),
            file,
            templates: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn file(&self) -> FileId {
        self.file
    }

    /// Templates in declaration order.
    #[inline]
    pub fn templates(&self) -> &[TemplateNode<'src>] {
        &self.templates
    }

    #[inline]
    pub fn templates_mut(&mut self) -> &mut [TemplateNode<'src>] {
        &mut self.templates
    }

    pub fn template(&self, id: NodeId) -> Option<&TemplateNode<'src>> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn add_template(
        &mut self,
        name: &'src str,
        flags: TemplateFlags,
        span: Span,
        ids: &mut dyn IdGenerator,
    ) -> NodeId {
        let id = ids.gen_id();
        self.templates.push(TemplateNode::new(id, name, flags, span));
        id
    }

    pub fn remove_template(&mut self, id: NodeId) -> Option<TemplateNode<'src>> {
        let idx = self.templates.iter().position(|template| template.id == id)?;
        Some(self.templates.remove(idx))
    }
}

/// A single template declared in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode<'src> {
    id: NodeId,
    name: &'src str,
    flags: TemplateFlags,
    span: Span,
}

impl<'src> TemplateNode<'src> {
    pub fn new(id: NodeId, name: &'src str, flags: TemplateFlags, span: Span) -> Self {
        Self {
            id,
            name,
            flags,
            span,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'src str {
        self.name
    }

    #[inline]
    pub fn flags(&self) -> TemplateFlags {
        self.flags
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn is_stateful(&self) -> bool {
        self.flags.contains(TemplateFlags::STATEFUL)
    }

    #[inline]
    pub fn is_strict_html(&self) -> bool {
        self.flags.contains(TemplateFlags::STRICT_HTML)
    }

    pub fn set_flags(&mut self, flags: TemplateFlags) {
        self.flags = flags;
    }

    pub fn with_flags(mut self, flags: TemplateFlags) -> Self {
        self.flags = flags;
        self
    }
}
