//! # Source and Sink I/O
//!
//! Opens input sources and creates the merge output. A `gz` or `bgz`
//! extension selects BGZF encoding in both directions; everything else is
//! plain text. Uses the `noodles` crate for BGZF.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use noodles::bgzf::io as bgzf_io;

use crate::error::{MergeError, Result};

/// Destination for the merged stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutput {
    /// Write to a file, BGZF-compressed when the extension is `gz`/`bgz`
    Path(PathBuf),
    /// Write plain text to the process's standard output, which is shared
    /// with the embedding application and never closed here
    Stdout,
}

impl MergeOutput {
    /// Map the conventional `-` argument to `Stdout`, anything else to a
    /// file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            MergeOutput::Stdout
        } else {
            MergeOutput::Path(PathBuf::from(arg))
        }
    }
}

/// Check if a path's extension selects BGZF encoding
fn is_bgzf(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "gz" || e == "bgz")
        .unwrap_or(false)
}

/// Open one input source for buffered line reading.
pub fn open_source(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path).map_err(|e| MergeError::open(path, e))?;

    let reader: Box<dyn BufRead + Send> = if is_bgzf(path) {
        Box::new(BufReader::new(bgzf_io::Reader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

/// Create the output sink.
///
/// Creating the file (for `Path` targets) counts as a write failure, since
/// `Open` errors are reserved for input sources.
pub fn create_sink(output: &MergeOutput) -> Result<Box<dyn Write + Send>> {
    match output {
        MergeOutput::Path(path) => {
            let file = File::create(path).map_err(MergeError::write)?;

            let writer: Box<dyn Write + Send> = if is_bgzf(path) {
                Box::new(BufWriter::new(bgzf_io::Writer::new(file)))
            } else {
                Box::new(BufWriter::new(file))
            };

            Ok(writer)
        }
        MergeOutput::Stdout => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
