//! # Sorted-Source Merge
//!
//! Streaming k-way merge of pre-sorted record files into one sorted output.
//! The frontier holds exactly one in-flight record per open source, so the
//! merge runs in O(total records * log k) time with O(k) resident records
//! regardless of input size.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};

use crate::chrom::ChromKey;
use crate::cursor::RecordCursor;
use crate::error::{MergeError, Result};
use crate::io::{create_sink, open_source, MergeOutput};

/// Marker character for header lines.
pub const HEADER_PREFIX: char = '#';

/// One active cursor tagged with its position in the input list.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed to pop the
/// smallest (key, position) first; `order` breaks ties toward the
/// first-listed source, keeping the output reproducible across runs.
struct FrontierEntry {
    order: usize,
    cursor: RecordCursor,
}

impl FrontierEntry {
    fn sort_key(&self) -> (&ChromKey, u64, usize) {
        let record = self.cursor.peek();
        (&record.key, record.pos, self.order)
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.sort_key().cmp(&self.sort_key())
    }
}

/// Merge pre-sorted sources into one sorted output.
///
/// Each input must be internally sorted ascending by (chromosome, position);
/// records are never reordered within a source and duplicates across sources
/// are all emitted. Header lines are forwarded verbatim from the first
/// source only and discarded from the rest. With `delete_inputs` set, each
/// source file is removed as soon as it is fully drained; a failed deletion
/// is logged and skipped, never retried.
///
/// Any open, read, parse, or write failure aborts the whole call, and a
/// partially written output must be treated as invalid. Inputs are never
/// deleted on the abort path.
///
/// Returns the output path, or `None` when writing to stdout.
pub fn merge_files<P: AsRef<Path>>(
    inputs: &[P],
    output: MergeOutput,
    delete_inputs: bool,
) -> Result<Option<PathBuf>> {
    info_span!("merge_files", n_sources = inputs.len()).in_scope(|| {
        let mut sink = create_sink(&output)?;
        let mut frontier = BinaryHeap::with_capacity(inputs.len());

        for (order, input) in inputs.iter().enumerate() {
            let first_source = order == 0;
            if let Some(cursor) =
                seed_source(input.as_ref(), first_source, &mut sink, delete_inputs)?
            {
                frontier.push(FrontierEntry { order, cursor });
            }
        }

        let mut n_records = 0u64;
        while let Some(mut entry) = frontier.pop() {
            write_record(&mut sink, &entry.cursor.peek().line)?;
            n_records += 1;

            if entry.cursor.advance()? {
                frontier.push(entry);
            } else {
                release_cursor(&mut entry.cursor, delete_inputs);
            }
        }

        sink.flush().map_err(MergeError::write)?;
        info!(n_records, n_sources = inputs.len(), "merge complete");

        Ok(match output {
            MergeOutput::Path(path) => Some(path),
            MergeOutput::Stdout => None,
        })
    })
}

/// Open one source, consume its header block, and position a cursor on its
/// first data record.
///
/// Headers are forwarded to the sink only for the first-listed source.
/// Returns `None` for a source with no data lines; such a source is released
/// (and deleted, when requested) on the spot.
fn seed_source<W: Write>(
    path: &Path,
    forward_headers: bool,
    sink: &mut W,
    delete_inputs: bool,
) -> Result<Option<RecordCursor>> {
    let mut reader = open_source(path)?;
    let mut line = String::new();
    let mut line_no = 0usize;

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .map_err(|e| MergeError::read(path, e))?;
        if bytes_read == 0 {
            drop(reader);
            if delete_inputs {
                if let Err(e) = fs::remove_file(path) {
                    warn!(path = ?path, error = %e, "failed to delete drained source");
                }
            }
            return Ok(None);
        }
        line_no += 1;

        if line.starts_with(HEADER_PREFIX) {
            if forward_headers {
                sink.write_all(line.as_bytes()).map_err(MergeError::write)?;
                if !line.ends_with('\n') {
                    sink.write_all(b"\n").map_err(MergeError::write)?;
                }
            }
            continue;
        }

        let cursor = RecordCursor::seed(path, reader, &line, line_no)?;
        return Ok(Some(cursor));
    }
}

/// Write one record line, re-terminating it with a single newline.
fn write_record<W: Write>(sink: &mut W, line: &str) -> Result<()> {
    sink.write_all(line.as_bytes()).map_err(MergeError::write)?;
    sink.write_all(b"\n").map_err(MergeError::write)?;
    Ok(())
}

/// Close a drained cursor. Deletion failures are reported and skipped so the
/// merge of the remaining sources continues.
fn release_cursor(cursor: &mut RecordCursor, delete_inputs: bool) {
    if let Err(e) = cursor.close(delete_inputs) {
        warn!(path = ?cursor.path(), error = %e, "failed to delete drained source");
    }
}
