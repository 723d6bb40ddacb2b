use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::report::Location;

/// One schema source: text plus a line-start table so pattern byte offsets
/// convert to (line, column) pairs.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    content: String,
    /// Byte offsets where each line starts (0-indexed into content)
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        // Lossy conversion: probing is diagnostic, a stray invalid byte must
        // not abort the run.
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::from_string(path.to_path_buf(), content))
    }

    /// Create a SourceFile from a string, using the given path for display purposes.
    pub fn from_string(path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(content.as_bytes());
        Self {
            path,
            content,
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// Convert a byte offset into a (1-indexed line, 0-indexed column) pair.
    /// Column is a character offset (UTF-8 codepoint count) within the line.
    pub fn offset_to_line_col(&self, byte_offset: usize) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_bytes = &self.content.as_bytes()[self.line_starts[line_idx]..byte_offset];
        // Count bytes that are NOT UTF-8 continuation bytes (0x80..0xBF).
        // This equals the number of UTF-8 character starts.
        let col = line_bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
        (line_idx + 1, col)
    }

    /// Convert a byte offset into a report Location.
    pub fn location_at(&self, byte_offset: usize) -> Location {
        let (line, column) = self.offset_to_line_col(byte_offset);
        Location { line, column }
    }

    /// Convert a (1-indexed line, 0-indexed column) pair to a byte offset.
    /// Returns `None` if line is out of range.
    pub fn line_col_to_offset(&self, line: usize, col: usize) -> Option<usize> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        if col == 0 {
            return Some(start);
        }
        let end = if line < self.line_starts.len() {
            self.line_starts[line]
        } else {
            self.content.len()
        };
        let bytes = self.content.as_bytes();
        let mut chars_seen = 0;
        for (i, &b) in bytes[start..end].iter().enumerate() {
            // Only check at character boundaries (non-continuation bytes)
            if (b & 0xC0) != 0x80 {
                if chars_seen == col {
                    return Some(start + i);
                }
                chars_seen += 1;
            }
        }
        if chars_seen == col {
            Some(end)
        } else {
            // col exceeds line length; fall back to clamped position
            Some(start + col.min(end - start))
        }
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

fn compute_line_starts(content: &[u8]) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, &byte) in content.iter().enumerate() {
        if byte == b'\n' && i + 1 < content.len() {
            starts.push(i + 1);
        }
    }
    starts
}
