//! PMD to SVG batch pipeline
//!
//! Decodes any number of PMD files, runs forward kinematics over every
//! angle pair, and aggregates the resulting strokes into one SVG
//! document labeled by source file name.
//!
//! Failures are isolated per input file: each file produces a
//! [`BatchItem`] holding either its strokes or the captured error, and a
//! bad file never aborts the batch. Reporting is left to the caller.

use pantokit_core::{MechanismConfig, PathDocument, Point, Result, Segment};
use pantokit_formats::{pmd, svg};
use pantokit_kinematics::forward;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of converting one input file.
#[derive(Debug)]
pub struct BatchItem {
    /// The input file this outcome belongs to.
    pub source: PathBuf,
    /// The decoded strokes, or the error that stopped this file.
    pub result: Result<Vec<Segment<Point>>>,
}

impl BatchItem {
    /// The label under which this file's strokes are published: its
    /// file name, falling back to the full path for odd inputs.
    pub fn label(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.to_string_lossy().into_owned())
    }
}

/// Decodes one PMD file into point strokes.
pub fn decode_file(path: &Path, config: &MechanismConfig) -> Result<Vec<Segment<Point>>> {
    let document = pmd::read_file(path)?;
    let mut strokes = Vec::with_capacity(document.segments.len());
    for segment in &document.segments {
        let mut points = Vec::with_capacity(segment.len());
        for pair in segment {
            points.push(forward(*pair, config)?);
        }
        strokes.push(points);
    }
    Ok(strokes)
}

/// Decodes every input, capturing per-file errors instead of aborting.
pub fn decode_batch(inputs: &[PathBuf], config: &MechanismConfig) -> Vec<BatchItem> {
    inputs
        .iter()
        .map(|path| BatchItem {
            source: path.clone(),
            result: decode_file(path, config),
        })
        .collect()
}

/// Collects the successful items into one path document, labeled by
/// source file name.
pub fn aggregate(items: &[BatchItem]) -> PathDocument {
    let mut document = PathDocument::new();
    for item in items {
        if let Ok(strokes) = &item.result {
            let label = item.label();
            for stroke in strokes {
                document.push_segment(&label, stroke.clone());
            }
        }
    }
    document
}

/// Runs the whole decode direction: batch-decode `inputs`, aggregate the
/// successes, and write one SVG to `output`. Returns the per-file
/// outcomes so the caller can report failures.
///
/// # Errors
///
/// Only the final write can fail; per-file errors are captured in the
/// returned items.
pub fn run(inputs: &[PathBuf], output: &Path, config: &MechanismConfig) -> Result<Vec<BatchItem>> {
    let items = decode_batch(inputs, config);
    let document = aggregate(&items);
    std::fs::write(output, svg::render_document(&document))?;
    info!(output = %output.display(), labels = document.len(), "wrote SVG document");
    Ok(items)
}
