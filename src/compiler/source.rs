use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Provides raw bytes for a relative source path.
///
/// The front-end core never touches the file system directly; everything it
/// reads comes through this trait so tests can substitute in-memory sources.
pub(crate) trait SourceProvider {
    /// Returns the raw bytes of the file at the given relative path, or an
    /// I/O error if it cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Returns whether a file exists at the given relative path.
    fn exists(&self, path: &Path) -> bool;
}

/// Disk-backed source provider rooted at a base directory.
pub(crate) struct DiskSource {
    /// All relative lookups resolve against this directory.
    root: PathBuf,
}

impl DiskSource {
    /// Creates a provider rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DiskSource { root: root.into() }
    }
}

impl SourceProvider for DiskSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).is_file()
    }
}

/// Lazily splits a byte buffer into logical lines with 1-based numbering.
///
/// `\n` terminates a line and is not part of it; a final line without a
/// trailing newline is yielded once; empty input yields nothing. A `\r`
/// immediately before the terminator is dropped so CRLF sources read the
/// same as LF sources.
pub(crate) struct LineReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    line_number: u32,
}

impl<'a> LineReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        LineReader {
            bytes,
            pos: 0,
            line_number: 0,
        }
    }
}

impl<'a> Iterator for LineReader<'a> {
    type Item = (u32, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }

        let start = self.pos;
        let rest = &self.bytes[start..];
        let end = match rest.iter().position(|&b| b == b'\n') {
            Some(idx) => {
                self.pos = start + idx + 1;
                start + idx
            }
            None => {
                self.pos = self.bytes.len();
                self.bytes.len()
            }
        };

        let mut line = &self.bytes[start..end];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }

        self.line_number += 1;
        Some((self.line_number, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(bytes: &[u8]) -> Vec<(u32, Vec<u8>)> {
        LineReader::new(bytes)
            .map(|(n, l)| (n, l.to_vec()))
            .collect()
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn trailing_line_without_newline_is_emitted_once() {
        let lines = collect(b"one\ntwo");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], (2, b"two".to_vec()));
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let lines = collect(b"one\r\ntwo\r\n");
        assert_eq!(lines[0].1, b"one");
        assert_eq!(lines[1].1, b"two");
    }

    #[test]
    fn numbering_is_one_based_and_monotonic() {
        let lines = collect(b"a\n\nb\n");
        assert_eq!(
            lines.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
