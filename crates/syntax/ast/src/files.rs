use std::fmt;
use std::path::{Path, PathBuf};

use crate::span::FileId;

/// The template sources of one compilation, addressed by [`FileId`].
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<File>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> FileId {
        let id = i32::try_from(self.files.len()).expect("source map size should fit in i32");
        self.files.push(File::new(path, source));
        FileId(id)
    }

    #[inline]
    pub fn get(&self, id: FileId) -> Option<&File> {
        usize::try_from(id.0).ok().and_then(|i| self.files.get(i))
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &File)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, file)| (FileId(i as i32), file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl fmt::Display for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.files().enumerate().try_for_each(|(i, (_, file))| {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", file.path.display())
        })
    }
}

#[derive(Debug)]
pub struct File {
    path: PathBuf,
    source: String,
    // byte offsets at which each line after the first one starts
    lines: Vec<u32>,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        let source = source.into();
        let lines = source
            .match_indices('\n')
            .map(|(offset, _)| offset as u32 + 1)
            .collect();
        Self {
            path: path.into(),
            source,
            lines,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves a byte offset to a zero-based line and column.
    ///
    /// Offsets past the end of the source are clamped to the end.
    pub fn lookup(&self, offset: u32) -> SourceLoc {
        let offset = offset.min(self.source.len() as u32);
        let line = self.lines.partition_point(|&start| start <= offset);
        let line_offset = if line == 0 { 0 } else { self.lines[line - 1] };
        let col = self
            .source
            .get(line_offset as usize..offset as usize)
            .map_or(0, |prefix| prefix.chars().count());
        SourceLoc { line, col }
    }

    /// Returns the contents of a zero-based line, including its line terminator.
    pub fn line(&self, idx: usize) -> Option<&str> {
        let start = if idx == 0 {
            0
        } else {
            self.lines.get(idx - 1).copied()?
        };
        let end = self
            .lines
            .get(idx)
            .copied()
            .unwrap_or(self.source.len() as u32);
        self.source.get(start as usize..end as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLoc {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}
