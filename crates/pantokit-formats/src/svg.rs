//! SVG path adapter
//!
//! Converts between internal point segments and SVG path entities.
//!
//! The internal coordinate system puts positive x on the robot's right;
//! SVG's handedness is the opposite, so x is sign-flipped on render and
//! flipped back on parse.
//!
//! Parsing accepts both numeric-separator conventions found in the wild:
//! `"M 1,2 L 3,4"` (Inkscape) and `"M 1 2 L 3 4"` decode identically.
//! Every `<path>` entity must carry a `d` attribute and a nested
//! `<title>` label; entities sharing a label accumulate segments under
//! that label in document order.

use pantokit_core::{FormatError, PathDocument, Point, Result, Segment};
use regex::Regex;
use tracing::debug;

/// The SVG namespace required on the root element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Renders one segment as SVG path data: a move to the first point,
/// lines to the rest, with the x sign flip applied.
pub fn segment_to_path_data(segment: &[Point]) -> String {
    segment
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let command = if i == 0 { 'M' } else { 'L' };
            format!("{} {} {}", command, -p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a whole document: one labeled `<path>` entity per non-empty
/// segment, all wrapped in a single `<svg>` root.
pub fn render_document(document: &PathDocument) -> String {
    let mut svg = format!("<svg xmlns=\"{}\" version=\"1.1\">", SVG_NAMESPACE);
    for (label, segments) in document.iter() {
        for segment in segments {
            if segment.is_empty() {
                continue;
            }
            svg.push_str(&format!(
                "<path d=\"{}\" stroke=\"black\" fill=\"none\"><title>{}</title></path>",
                segment_to_path_data(segment),
                label
            ));
        }
    }
    svg.push_str("</svg>");
    svg
}

/// Parses an SVG document into point segments grouped by title label.
///
/// # Errors
///
/// - [`FormatError::NotSvg`] if the root `<svg>` element or its
///   namespace declaration is missing.
/// - [`FormatError::MissingLabel`] if a path entity lacks a `<title>`.
/// - [`FormatError::MalformedPath`] if path data does not tokenize into
///   command/coordinate triples.
pub fn parse_document(content: &str) -> Result<PathDocument> {
    if !content.contains("<svg") {
        return Err(FormatError::NotSvg {
            reason: "missing <svg> element".to_string(),
        }
        .into());
    }
    if !content.contains(SVG_NAMESPACE) {
        return Err(FormatError::NotSvg {
            reason: format!("missing {} namespace", SVG_NAMESPACE),
        }
        .into());
    }

    // Both self-closing entities and ones with child elements; the
    // latter may hold the <title> label.
    let path_re = Regex::new(r"(?s)<path\b([^>]*?)(?:/>|>(.*?)</path>)").expect("valid regex");
    let title_re = Regex::new(r"(?s)<title>(.*?)</title>").expect("valid regex");

    let mut document = PathDocument::new();
    for captures in path_re.captures_iter(content) {
        let attributes = captures.get(1).map_or("", |m| m.as_str());
        let children = captures.get(2).map_or("", |m| m.as_str());

        let label = title_re
            .captures(children)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .ok_or(FormatError::MissingLabel)?;

        let data = extract_attribute(attributes, "d").ok_or_else(|| {
            FormatError::MalformedPath {
                reason: format!("path '{}' has no d attribute", label),
            }
        })?;

        debug!(label = %label, "parsing path entity");
        let segment = parse_path_data(data)?;
        document.push_segment(&label, segment);
    }

    Ok(document)
}

/// Tokenizes SVG path data into points, keeping move/line commands and
/// undoing the x sign flip.
fn parse_path_data(data: &str) -> Result<Segment<Point>> {
    // Comma and whitespace separators are equivalent.
    let tokens: Vec<&str> = data
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if tokens.len() % 3 != 0 {
        return Err(FormatError::MalformedPath {
            reason: format!(
                "expected command/coordinate triples, got {} tokens",
                tokens.len()
            ),
        }
        .into());
    }

    let mut points = Vec::with_capacity(tokens.len() / 3);
    for triple in tokens.chunks(3) {
        let command = triple[0];
        if command != "M" && command != "L" {
            continue;
        }
        let x: f64 = parse_coordinate(triple[1])?;
        let y: f64 = parse_coordinate(triple[2])?;
        points.push(Point::new(-x, y));
    }

    Ok(points)
}

fn parse_coordinate(token: &str) -> Result<f64> {
    token.parse().map_err(|_| {
        FormatError::MalformedPath {
            reason: format!("invalid coordinate '{}'", token),
        }
        .into()
    })
}

fn extract_attribute<'a>(tag: &'a str, attribute: &str) -> Option<&'a str> {
    let pattern = format!("{}=\"", attribute);
    let mut search_from = 0;
    while let Some(found) = tag[search_from..].find(&pattern) {
        let at = search_from + found;
        // Attribute name must start the tag or follow whitespace, so
        // `d="` does not match inside `id="`.
        if at == 0 || tag[..at].ends_with(char::is_whitespace) {
            let start = at + pattern.len();
            let end = tag[start..].find('"')?;
            return Some(&tag[start..start + end]);
        }
        search_from = at + pattern.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantokit_core::Error;

    #[test]
    fn render_applies_sign_flip() {
        let data = segment_to_path_data(&[Point::new(1.0, 2.0), Point::new(-3.0, 4.0)]);
        assert_eq!(data, "M -1 2 L 3 4");
    }

    #[test]
    fn comma_and_space_separators_are_equivalent() {
        let svg_comma = wrap_path("M 1,2 L 3,4", "a.pmd");
        let svg_space = wrap_path("M 1 2 L 3 4", "a.pmd");
        let doc_comma = parse_document(&svg_comma).unwrap();
        let doc_space = parse_document(&svg_space).unwrap();
        assert_eq!(doc_comma, doc_space);
        assert_eq!(
            doc_comma.segments("a.pmd").unwrap()[0],
            vec![Point::new(-1.0, 2.0), Point::new(-3.0, 4.0)]
        );
    }

    #[test]
    fn render_parse_round_trip() {
        let mut document = PathDocument::new();
        document.push_segment(
            "drawing.pmd",
            vec![Point::new(0.5, 14.0), Point::new(-1.25, 13.5)],
        );
        document.push_segment("drawing.pmd", vec![Point::new(2.0, 12.0)]);

        let parsed = parse_document(&render_document(&document)).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn shared_labels_accumulate_segments() {
        let svg = format!(
            "<svg xmlns=\"{}\" version=\"1.1\">{}{}</svg>",
            SVG_NAMESPACE,
            path_entity("M 1 2", "multi.pmd"),
            path_entity("M 3 4 L 5 6", "multi.pmd"),
        );
        let document = parse_document(&svg).unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.segments("multi.pmd").unwrap().len(), 2);
    }

    #[test]
    fn non_line_commands_are_skipped() {
        let svg = wrap_path("M 1 2 C 9 9 L 3 4", "a.pmd");
        let document = parse_document(&svg).unwrap();
        // C triple dropped, M and L kept.
        assert_eq!(
            document.segments("a.pmd").unwrap()[0],
            vec![Point::new(-1.0, 2.0), Point::new(-3.0, 4.0)]
        );
    }

    #[test]
    fn missing_title_is_rejected() {
        let svg = format!(
            "<svg xmlns=\"{}\"><path d=\"M 1 2\" stroke=\"black\"/></svg>",
            SVG_NAMESPACE
        );
        let err = parse_document(&svg).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::MissingLabel)));
    }

    #[test]
    fn dangling_coordinate_is_rejected() {
        let svg = wrap_path("M 1 2 L 3", "a.pmd");
        let err = parse_document(&svg).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::MalformedPath { .. })
        ));
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let svg = wrap_path("M 1 2 L x 4", "a.pmd");
        let err = parse_document(&svg).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::MalformedPath { .. })
        ));
    }

    #[test]
    fn missing_namespace_is_rejected() {
        let err = parse_document("<svg><path d=\"M 1 2\"/></svg>").unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::NotSvg { .. })));
    }

    fn path_entity(data: &str, label: &str) -> String {
        format!(
            "<path d=\"{}\" stroke=\"black\" fill=\"none\"><title>{}</title></path>",
            data, label
        )
    }

    fn wrap_path(data: &str, label: &str) -> String {
        format!(
            "<svg xmlns=\"{}\" version=\"1.1\">{}</svg>",
            SVG_NAMESPACE,
            path_entity(data, label)
        )
    }
}
