//! Span utility functions for diagnostic processing.
//!
//! Provides helpers for computing line and column numbers from spans, used
//! by the terminal emitter to render source snippets.
//!
//! For repeated lookups on the same source, use [`LineOffsetTable`] which
//! pre-computes line offsets for O(log L) lookup instead of O(n) scanning.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// Builds a table of byte offsets for each line start, enabling O(log L)
/// binary search lookups instead of O(n) linear scans.
///
/// # Example
///
/// ```
/// use lipi_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));  // 'l' in line1
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));  // 'l' in line2
/// assert_eq!(table.offset_to_line_col(source, 12), (3, 1)); // 'l' in line3
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start (0-indexed lines internally).
    /// offsets[0] = 0 (line 1 starts at byte 0)
    /// offsets[1] = byte after first \n (line 2 start)
    /// etc.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    ///
    /// Scans the source once to find all newlines, O(n) construction
    /// for O(log L) lookups where L is the number of lines.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                // Next line starts at byte after the newline
                offsets.push((i + 1) as u32);
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset using binary search.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        // Binary search for the largest line start <= offset
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,                      // Exact match: offset is at line start
            Err(insert) => insert.saturating_sub(1), // Insert point: line is before
        };
        (line_idx as u32) + 1 // Convert to 1-based
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column is computed as the number of characters (not bytes)
    /// from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_idx = (line - 1) as usize;
        let line_start = self.offsets.get(line_idx).copied().unwrap_or(0) as usize;
        let offset = offset as usize;

        // Column is 1-based, counting characters from line start to offset
        let col_bytes = &source[line_start..offset.min(source.len())];
        let col = u32::try_from(col_bytes.chars().count()).unwrap_or(u32::MAX - 1) + 1;

        (line, col)
    }

    /// Get the byte offset of a line start (1-based line number).
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Get the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Compute 1-based (line, column) from a byte offset.
///
/// The column is computed as the number of characters (not bytes)
/// from the start of the line.
///
/// Note: For repeated lookups, use [`LineOffsetTable`] instead.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = offset as usize;
    let bytes = source.as_bytes();
    let mut line = 1u32;
    let mut line_start = 0usize;

    for (i, &byte) in bytes.iter().enumerate() {
        if i >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }

    // Column is 1-based, counting characters from line start to offset
    let col_bytes = &source[line_start..offset.min(source.len())];
    let col = u32::try_from(col_bytes.chars().count()).unwrap_or(u32::MAX - 1) + 1;

    (line, col)
}
