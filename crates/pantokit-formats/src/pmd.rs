//! PMD binary codec
//!
//! Encodes and decodes the motor-command file format of the pantograph.
//!
//! ## Wire Format
//!
//! All multi-byte fields are little-endian.
//!
//! | Field | Type | Meaning |
//! |-------|------|---------|
//! | magic | u8 | must equal 1 |
//! | segment_count | u32 | number of segments |
//! | per segment: point_count | u32 | angle pairs in the segment |
//! | per point: left_deg, right_deg | 2 x f32 | one angle pair |
//!
//! A well-formed document encodes to exactly
//! `1 + 4 + sum(4 + 8 * point_count)` bytes, and decoding an encoded
//! document recovers it bit-for-bit.

use pantokit_core::{AnglePair, FormatError, PmdDocument, Result};
use std::path::Path;

/// Cursor over a PMD byte buffer with truncation-checked reads.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, needed: usize) -> std::result::Result<&'a [u8], FormatError> {
        if self.data.len() - self.offset < needed {
            return Err(FormatError::Truncated {
                offset: self.offset,
                needed: needed - (self.data.len() - self.offset),
            });
        }
        let slice = &self.data[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }

    fn read_u8(&mut self) -> std::result::Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> std::result::Result<u32, FormatError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_f32(&mut self) -> std::result::Result<f32, FormatError> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Decodes a PMD byte buffer into a document.
///
/// # Errors
///
/// Returns [`FormatError::BadMagic`] if the first byte is not 1, and
/// [`FormatError::Truncated`] if the buffer ends before a declared field.
pub fn decode(data: &[u8]) -> Result<PmdDocument> {
    let mut reader = Reader::new(data);

    let magic = reader.read_u8()?;
    if magic != PmdDocument::MAGIC {
        return Err(FormatError::BadMagic { found: magic }.into());
    }

    let segment_count = reader.read_u32()?;
    let mut segments = Vec::with_capacity(segment_count.min(1024) as usize);
    for _ in 0..segment_count {
        let point_count = reader.read_u32()?;
        let mut segment = Vec::with_capacity(point_count.min(65536) as usize);
        for _ in 0..point_count {
            let left_deg = reader.read_f32()?;
            let right_deg = reader.read_f32()?;
            segment.push(AnglePair::new(left_deg, right_deg));
        }
        segments.push(segment);
    }

    Ok(PmdDocument::new(segments))
}

/// Encodes a document into PMD bytes.
///
/// Always succeeds for an in-memory document; the output length is
/// exactly `1 + 4 + sum(4 + 8 * point_count)`.
pub fn encode(document: &PmdDocument) -> Vec<u8> {
    let size = 1 + 4 + document.segments.iter().map(|s| 4 + 8 * s.len()).sum::<usize>();
    let mut bytes = Vec::with_capacity(size);

    bytes.push(PmdDocument::MAGIC);
    bytes.extend_from_slice(&(document.segments.len() as u32).to_le_bytes());
    for segment in &document.segments {
        bytes.extend_from_slice(&(segment.len() as u32).to_le_bytes());
        for pair in segment {
            bytes.extend_from_slice(&pair.left_deg.to_le_bytes());
            bytes.extend_from_slice(&pair.right_deg.to_le_bytes());
        }
    }

    bytes
}

/// Reads and decodes a PMD file.
pub fn read_file(path: impl AsRef<Path>) -> Result<PmdDocument> {
    let data = std::fs::read(path.as_ref())?;
    decode(&data)
}

/// Encodes and writes a document to a PMD file.
pub fn write_file(path: impl AsRef<Path>, document: &PmdDocument) -> Result<()> {
    std::fs::write(path.as_ref(), encode(document))?;
    Ok(())
}
