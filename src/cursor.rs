//! # Record Cursor
//!
//! One cursor per input source. A cursor owns its reader, holds exactly one
//! in-flight record, and advances through the file a line at a time; closing
//! it releases the handle and optionally deletes the underlying file.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::chrom::ChromKey;
use crate::error::{MergeError, Result};

/// One data line, decomposed for ordering.
///
/// The chromosome label is the first whitespace-delimited field and the
/// position the second; everything after is opaque and travels inside
/// `line`, which holds the full input line without its trailing newline.
#[derive(Clone, Debug)]
pub struct Record {
    /// Ordering key derived from the chromosome label
    pub key: ChromKey,
    /// Position parsed from the second field
    pub pos: u64,
    /// The full line, trailing newline removed
    pub line: String,
}

impl Record {
    /// Parse a data line. `line_no` is the line's 1-based ordinal within the
    /// file and is carried into error messages.
    pub fn parse(path: &Path, line_no: usize, line: &str) -> Result<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let mut fields = line.split_whitespace();
        let chrom = fields
            .next()
            .ok_or_else(|| MergeError::format(path, line_no, "missing chromosome field"))?;
        let pos_field = fields
            .next()
            .ok_or_else(|| MergeError::format(path, line_no, "missing position field"))?;
        let pos: u64 = pos_field.parse().map_err(|_| {
            MergeError::format(
                path,
                line_no,
                format!("invalid position '{}'", pos_field),
            )
        })?;
        Ok(Self {
            key: ChromKey::from_label(chrom),
            pos,
            line: line.to_string(),
        })
    }
}

/// Cursor over one pre-sorted source.
pub struct RecordCursor {
    path: PathBuf,
    /// `None` once closed
    reader: Option<Box<dyn BufRead + Send>>,
    record: Record,
    line_no: usize,
    /// Scratch line buffer reused across `advance` calls
    buf: String,
}

impl RecordCursor {
    /// Build a cursor already positioned on its first data record.
    ///
    /// The caller has consumed any header lines and read the first data
    /// line; `line_no` is that line's 1-based ordinal within the file.
    pub fn seed(
        path: &Path,
        reader: Box<dyn BufRead + Send>,
        first_data_line: &str,
        line_no: usize,
    ) -> Result<Self> {
        let record = Record::parse(path, line_no, first_data_line)?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: Some(reader),
            record,
            line_no,
            buf: String::new(),
        })
    }

    /// Path of the underlying source.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current record. Valid until the next `advance`.
    pub fn peek(&self) -> &Record {
        &self.record
    }

    /// Read the next record. Returns `Ok(true)` when the current record was
    /// replaced, `Ok(false)` when the source is exhausted. A malformed line
    /// aborts with a format error rather than being skipped.
    pub fn advance(&mut self) -> Result<bool> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(false);
        };
        self.buf.clear();
        let bytes_read = reader
            .read_line(&mut self.buf)
            .map_err(|e| MergeError::read(&self.path, e))?;
        if bytes_read == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        self.record = Record::parse(&self.path, self.line_no, &self.buf)?;
        Ok(true)
    }

    /// Release the source handle; if `delete_source` is set, also remove the
    /// file. Calling `close` again is a no-op, so the file is deleted at most
    /// once.
    pub fn close(&mut self, delete_source: bool) -> Result<()> {
        if self.reader.take().is_none() {
            return Ok(());
        }
        if delete_source {
            fs::remove_file(&self.path).map_err(|e| MergeError::cleanup(&self.path, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn cursor_over(path: &str, data: &str) -> RecordCursor {
        let mut reader: Box<dyn BufRead + Send> = Box::new(Cursor::new(data.to_string()));
        let mut first = String::new();
        reader.read_line(&mut first).unwrap();
        RecordCursor::seed(Path::new(path), reader, &first, 1).unwrap()
    }

    #[test]
    fn test_parse_decomposes_line() {
        let rec = Record::parse(Path::new("a.txt"), 1, "chr2 500 rs1\tA\tT\n").unwrap();
        assert_eq!(rec.key, ChromKey::Numeric(2));
        assert_eq!(rec.pos, 500);
        assert_eq!(rec.line, "chr2 500 rs1\tA\tT");
    }

    #[test]
    fn test_parse_rejects_short_line() {
        let err = Record::parse(Path::new("a.txt"), 7, "chr1").unwrap_err();
        match err {
            MergeError::Format { line, .. } => assert_eq!(line, 7),
            other => panic!("expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_integer_position() {
        assert!(Record::parse(Path::new("a.txt"), 1, "chr1 abc x").is_err());
        assert!(Record::parse(Path::new("a.txt"), 1, "chr1 -5 x").is_err());
    }

    #[test]
    fn test_advance_walks_lines_then_exhausts() {
        let mut cur = cursor_over("s.txt", "1 100 a\n1 200 b\n1 300 c\n");
        assert_eq!(cur.peek().pos, 100);
        assert!(cur.advance().unwrap());
        assert_eq!(cur.peek().pos, 200);
        assert!(cur.advance().unwrap());
        assert_eq!(cur.peek().pos, 300);
        assert!(!cur.advance().unwrap());
        assert!(!cur.advance().unwrap());
    }

    #[test]
    fn test_advance_reports_offending_line_number() {
        let mut cur = cursor_over("s.txt", "1 100 a\n1 oops b\n");
        let err = cur.advance().unwrap_err();
        match err {
            MergeError::Format { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_advance_handles_missing_final_newline() {
        let mut cur = cursor_over("s.txt", "1 100 a\n1 200 b");
        assert!(cur.advance().unwrap());
        assert_eq!(cur.peek().line, "1 200 b");
        assert!(!cur.advance().unwrap());
    }

    #[test]
    fn test_close_deletes_at_most_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "1 100 a").unwrap();
        drop(file);

        let reader: Box<dyn BufRead + Send> =
            Box::new(std::io::BufReader::new(std::fs::File::open(&path).unwrap()));
        let mut cur = RecordCursor::seed(&path, reader, "1 100 a", 1).unwrap();
        cur.close(true).unwrap();
        assert!(!path.exists());
        // Second close must not surface a spurious cleanup error.
        cur.close(true).unwrap();
    }

    #[test]
    fn test_close_without_delete_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.txt");
        std::fs::write(&path, "1 100 a\n").unwrap();

        let reader: Box<dyn BufRead + Send> =
            Box::new(std::io::BufReader::new(std::fs::File::open(&path).unwrap()));
        let mut cur = RecordCursor::seed(&path, reader, "1 100 a", 1).unwrap();
        cur.close(false).unwrap();
        assert!(path.exists());
    }
}
