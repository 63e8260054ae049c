//! In-memory reference host backed by a rope buffer.
//!
//! `MemoryHost` implements [`EditorHost`] over an `xi_rope::Rope` plus a
//! table of screen regions mapped to text offsets. It is the host used by the
//! engine's own test suites and by the CLI; a real editor integration
//! implements [`EditorHost`] against its own document instead.

use std::ops::Range;

use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::geometry::{Point, Rect};
use crate::host::{EditorHost, PositionError, ReplaceError};

pub struct MemoryHost {
    buffer: Rope,
    /// Screen regions that resolve to a text offset, checked in order.
    regions: Vec<(Rect, usize)>,
}

impl MemoryHost {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            regions: Vec::new(),
        }
    }

    /// Current document text.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Register a screen region that resolves to `offset`, the way a real
    /// editor's coordinate mapping would.
    pub fn map_region(&mut self, bounds: Rect, offset: usize) {
        self.regions.push((bounds, offset));
    }

    /// Byte offset of the first character of the 0-based line `index`.
    ///
    /// Convenient for registering regions and driving the CLI; errors if the
    /// document has fewer lines.
    pub fn offset_of_line(&self, index: usize) -> Result<usize, PositionError> {
        let text = self.buffer.slice_to_cow(0..self.buffer.len());
        let mut offset = 0;
        for _ in 0..index {
            match text[offset..].find('\n') {
                Some(pos) => offset += pos + 1,
                None => return Err(PositionError::LineOutOfBounds(index)),
            }
        }
        Ok(offset)
    }

    fn check_offset(&self, offset: usize) -> Result<(), PositionError> {
        if offset > self.buffer.len() {
            return Err(PositionError::OutOfBounds(offset));
        }
        let text = self.buffer.slice_to_cow(0..self.buffer.len());
        if !text.is_char_boundary(offset) {
            return Err(PositionError::NotCharBoundary(offset));
        }
        Ok(())
    }
}

impl EditorHost for MemoryHost {
    fn offset_at(&self, point: Point) -> Option<usize> {
        self.regions
            .iter()
            .find(|(bounds, _)| bounds.contains(point))
            .map(|&(_, offset)| offset)
    }

    fn line_text(&self, offset: usize) -> Result<String, PositionError> {
        let span = self.line_span(offset)?;
        Ok(self.buffer.slice_to_cow(span).into_owned())
    }

    fn line_span(&self, offset: usize) -> Result<Range<usize>, PositionError> {
        self.check_offset(offset)?;
        let before = self.buffer.slice_to_cow(0..offset);
        let start = match before.rfind('\n') {
            Some(newline_pos) => newline_pos + 1,
            None => 0,
        };
        let after = self.buffer.slice_to_cow(offset..self.buffer.len());
        let end = match after.find('\n') {
            Some(newline_pos) => offset + newline_pos,
            None => self.buffer.len(),
        };
        Ok(start..end)
    }

    fn replace_span(&mut self, span: Range<usize>, text: &str) -> Result<(), ReplaceError> {
        let out_of_bounds = ReplaceError::OutOfBounds {
            start: span.start,
            end: span.end,
        };
        if span.start > span.end || span.end > self.buffer.len() {
            return Err(out_of_bounds);
        }
        let current = self.buffer.slice_to_cow(0..self.buffer.len());
        if !current.is_char_boundary(span.start) || !current.is_char_boundary(span.end) {
            return Err(out_of_bounds);
        }
        let mut builder = Builder::new(self.buffer.len());
        builder.replace(span, Rope::from(text));
        self.buffer = builder.build().apply(&self.buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Notes\n![[pic.png]]\nlast line";

    #[test]
    fn line_span_of_middle_line() {
        let host = MemoryHost::new(DOC);
        // Offset 10 is inside "![[pic.png]]"
        let span = host.line_span(10).unwrap();
        assert_eq!(span, 8..20);
        assert_eq!(host.line_text(10).unwrap(), "![[pic.png]]");
    }

    #[test]
    fn line_span_of_first_and_last_lines() {
        let host = MemoryHost::new(DOC);
        assert_eq!(host.line_span(0).unwrap(), 0..7);
        assert_eq!(host.line_text(DOC.len()).unwrap(), "last line");
    }

    #[test]
    fn offset_of_line_counts_newlines() {
        let host = MemoryHost::new(DOC);
        assert_eq!(host.offset_of_line(0).unwrap(), 0);
        assert_eq!(host.offset_of_line(1).unwrap(), 8);
        assert_eq!(host.offset_of_line(2).unwrap(), 21);
        assert!(host.offset_of_line(3).is_err());
    }

    #[test]
    fn replace_span_rewrites_one_line() {
        let mut host = MemoryHost::new(DOC);
        let span = host.line_span(10).unwrap();
        host.replace_span(span, "![[pic.png | 120]]").unwrap();
        assert_eq!(host.text(), "# Notes\n![[pic.png | 120]]\nlast line");
    }

    #[test]
    fn replace_span_rejects_out_of_bounds() {
        let mut host = MemoryHost::new(DOC);
        let result = host.replace_span(0..DOC.len() + 1, "x");
        assert!(matches!(result, Err(ReplaceError::OutOfBounds { .. })));
    }

    #[test]
    fn line_span_rejects_offset_past_end() {
        let host = MemoryHost::new(DOC);
        assert!(matches!(
            host.line_span(DOC.len() + 1),
            Err(PositionError::OutOfBounds(_))
        ));
    }

    #[test]
    fn replace_span_rejects_split_char_boundary() {
        let mut host = MemoryHost::new("héllo");
        // Offset 2 falls inside the two-byte 'é'.
        let result = host.replace_span(1..2, "e");
        assert!(matches!(result, Err(ReplaceError::OutOfBounds { .. })));
    }

    #[test]
    fn offset_at_uses_registered_regions() {
        let mut host = MemoryHost::new(DOC);
        host.map_region(Rect::new(0.0, 50.0, 400.0, 100.0), 8);
        assert_eq!(host.offset_at(Point::new(200.0, 75.0)), Some(8));
        assert_eq!(host.offset_at(Point::new(200.0, 10.0)), None);
    }
}
