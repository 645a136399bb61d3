//! # Genomerge Library Root
//!
//! Streaming, bounded-memory k-way merge of pre-sorted, line-oriented
//! genomic record files. Inputs are ordered by (chromosome, position) with
//! integer-labelled chromosomes sorting by value ahead of named ones;
//! duplicates are preserved, header lines pass through from the first
//! source only, and drained inputs can optionally be deleted.
//!
//! The crate is a library by design: command-line parsing and pipeline
//! configuration belong to the embedding application, which calls
//! [`merge_files`] with the per-region outputs it has produced.
//!
//! ## Module Structure
//! ```text
//! genomerge
//! ├── chrom   # Chromosome label ordering key
//! ├── cursor  # Per-source record cursor
//! ├── error   # Centralized error types
//! ├── io      # Source/sink opening (plain text + BGZF)
//! └── merge   # Merge frontier and drain loop
//! ```

pub mod chrom;
pub mod cursor;
pub mod error;
pub mod io;
pub mod merge;

pub use chrom::ChromKey;
pub use cursor::{Record, RecordCursor};
pub use error::{MergeError, Result};
pub use io::MergeOutput;
pub use merge::{merge_files, HEADER_PREFIX};
