//! # Pantokit Pipeline
//!
//! Batch conversion between PMD and SVG files.
//!
//! - Decode direction: N PMD files to one SVG document, with per-file
//!   error isolation (a bad file is captured and skipped, the batch
//!   continues).
//! - Encode direction: one SVG document to one PMD file per title
//!   label, with per-label error isolation and output directory
//!   creation.

pub mod decode;
pub mod encode;

pub use decode::{decode_batch, decode_file, BatchItem};
pub use encode::{encode_document, EncodeOutcome};
