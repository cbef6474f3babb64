//! # Pantokit Formats
//!
//! File format support for pantokit:
//!
//! - **PMD**: the binary motor-command format, one angle pair per
//!   drawn point, grouped into pen strokes.
//! - **SVG**: labeled vector path entities, one per pen stroke, with
//!   the title label carrying the originating file name.

pub mod pmd;
pub mod svg;
