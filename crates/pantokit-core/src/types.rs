//! Shared data model for pantokit
//!
//! Defines the point, angle-pair and document types that flow between
//! the codec, the kinematics model and the batch pipeline.
//!
//! Coordinate system:
//! - center of the robot (between the two motors) is the origin
//! - left is negative x, right is positive x
//! - down (away from the motors) is positive y
//! - all lengths are in centimeters

use serde::{Deserialize, Serialize};

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A pair of motor arm angles in degrees, measured from a perpendicular
/// reference line on the robot body.
///
/// Angles are stored at the 32-bit precision of the PMD wire format so
/// that decoding an encoded document recovers it bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnglePair {
    /// Left motor angle in degrees.
    pub left_deg: f32,
    /// Right motor angle in degrees.
    pub right_deg: f32,
}

impl AnglePair {
    /// Creates a new angle pair.
    pub fn new(left_deg: f32, right_deg: f32) -> Self {
        Self { left_deg, right_deg }
    }
}

/// One continuous pen stroke: an ordered run of points or angle pairs.
/// Order is stroke order and is significant.
pub type Segment<T> = Vec<T>;

/// An in-memory PMD document: ordered segments of angle pairs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PmdDocument {
    /// The pen strokes, in drawing order.
    pub segments: Vec<Segment<AnglePair>>,
}

impl PmdDocument {
    /// The magic number identifying a PMD byte stream.
    pub const MAGIC: u8 = 1;

    /// Creates a document from segments.
    pub fn new(segments: Vec<Segment<AnglePair>>) -> Self {
        Self { segments }
    }

    /// Total number of angle pairs across all segments.
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|s| s.len()).sum()
    }
}

/// Point strokes grouped under a title label (typically a source file
/// name). Labels are kept in first-appearance order so output is
/// deterministic, though label order carries no meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathDocument {
    entries: Vec<(String, Vec<Segment<Point>>)>,
}

impl PathDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment to the given label, creating the label on first
    /// use. Multiple strokes under one label accumulate in order.
    pub fn push_segment(&mut self, label: &str, segment: Segment<Point>) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, segments)) => segments.push(segment),
            None => self.entries.push((label.to_string(), vec![segment])),
        }
    }

    /// Segments recorded under a label, if any.
    pub fn segments(&self, label: &str) -> Option<&[Segment<Point>]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, s)| s.as_slice())
    }

    /// Iterates labels and their segments in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Segment<Point>])> {
        self.entries.iter().map(|(l, s)| (l.as_str(), s.as_slice()))
    }

    /// Number of labels in the document.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn path_document_appends_to_existing_label() {
        let mut doc = PathDocument::new();
        doc.push_segment("a.pmd", vec![Point::new(0.0, 1.0)]);
        doc.push_segment("b.pmd", vec![Point::new(2.0, 3.0)]);
        doc.push_segment("a.pmd", vec![Point::new(4.0, 5.0)]);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.segments("a.pmd").unwrap().len(), 2);
        assert_eq!(doc.segments("b.pmd").unwrap().len(), 1);

        // first-appearance order
        let labels: Vec<_> = doc.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["a.pmd", "b.pmd"]);
    }

    #[test]
    fn pmd_document_point_count() {
        let doc = PmdDocument::new(vec![
            vec![AnglePair::new(45.0, 135.0); 3],
            vec![AnglePair::new(50.0, 130.0); 2],
        ]);
        assert_eq!(doc.point_count(), 5);
    }
}
