//! SVG to PMD batch pipeline
//!
//! Parses one SVG document, runs inverse kinematics over every point,
//! and writes one PMD file per title label into an output directory
//! (created if absent).
//!
//! Failures are isolated per label: when any point of a label fails
//! inverse kinematics, that label is skipped and recorded, and the
//! remaining labels are still written. Filesystem failures are fatal.

use pantokit_core::{
    Error, MechanismConfig, PathDocument, PmdDocument, Point, Result, Segment,
};
use pantokit_formats::{pmd, svg};
use pantokit_kinematics::inverse;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of the encode direction.
#[derive(Debug, Default)]
pub struct EncodeOutcome {
    /// PMD files written, in label order.
    pub written: Vec<PathBuf>,
    /// Labels skipped because a point had no valid angle solution.
    pub skipped: Vec<(String, Error)>,
}

/// Converts one label's strokes into a PMD document.
pub fn strokes_to_pmd(
    strokes: &[Segment<Point>],
    config: &MechanismConfig,
) -> Result<PmdDocument> {
    let mut segments = Vec::with_capacity(strokes.len());
    for stroke in strokes {
        let mut pairs = Vec::with_capacity(stroke.len());
        for point in stroke {
            pairs.push(inverse(*point, config)?);
        }
        segments.push(pairs);
    }
    Ok(PmdDocument::new(segments))
}

/// Encodes a parsed document: one PMD file per label under `output_dir`.
pub fn encode_document(
    document: &PathDocument,
    output_dir: &Path,
    config: &MechanismConfig,
) -> Result<EncodeOutcome> {
    std::fs::create_dir_all(output_dir)?;

    let mut outcome = EncodeOutcome::default();
    for (label, strokes) in document.iter() {
        match strokes_to_pmd(strokes, config) {
            Ok(pmd_document) => {
                let path = output_dir.join(label);
                pmd::write_file(&path, &pmd_document)?;
                info!(path = %path.display(), "wrote PMD file");
                outcome.written.push(path);
            }
            Err(error) => {
                warn!(label = %label, error = %error, "skipping label with unreachable points");
                outcome.skipped.push((label.to_string(), error));
            }
        }
    }
    Ok(outcome)
}

/// Runs the whole encode direction: parse the SVG at `input` and write
/// one PMD file per label into `output_dir`.
pub fn run(input: &Path, output_dir: &Path, config: &MechanismConfig) -> Result<EncodeOutcome> {
    let content = std::fs::read_to_string(input)?;
    let document = svg::parse_document(&content)?;
    encode_document(&document, output_dir, config)
}
