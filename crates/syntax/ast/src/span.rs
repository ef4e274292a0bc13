use std::fmt;

/// A byte range inside one source file.
///
/// Spans order by file first and then by position, which is the order diagnostics are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32, file: FileId) -> Self {
        Span { file, start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} in file {}", self.start, self.end, self.file.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub(super) i32);

impl FileId {
    #[cfg(any(test, feature = "testing"))]
    pub fn from_i32(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn spans_order_by_file_then_position() {
        let a = Span::new(40, 50, FileId::from_i32(0));
        let b = Span::new(0, 10, FileId::from_i32(1));
        let c = Span::new(10, 20, FileId::from_i32(0));

        let mut spans = vec![a, b, c];
        spans.sort();
        assert_eq!(spans, vec![c, a, b]);
    }
}
