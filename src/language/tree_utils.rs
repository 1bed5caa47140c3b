use tree_sitter::Node;

/// Line/column lookup over a document's byte offsets
///
/// Lines and columns are 1-based. Columns count characters, not bytes, so
/// multi-byte text before a token does not shift its column.
#[derive(Debug, Clone)]
pub struct LinePositions<'a> {
    content: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LinePositions<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            content,
            line_starts,
        }
    }

    /// Number of lines, counting a trailing empty line
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair
    ///
    /// Returns `None` for offsets past the end or inside a multi-byte character.
    pub fn locate(&self, byte_offset: usize) -> Option<(u32, u32)> {
        if byte_offset > self.content.len() || !self.content.is_char_boundary(byte_offset) {
            return None;
        }

        let line = self.line_starts.partition_point(|&start| start <= byte_offset) - 1;
        let line_start = self.line_starts[line];
        let column = self.content[line_start..byte_offset].chars().count() + 1;

        Some((line as u32 + 1, column as u32))
    }
}

/// Source text of a node, empty if the node range is not valid UTF-8
pub fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    node.utf8_text(content.as_bytes()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_line() {
        let positions = LinePositions::new("color: red;\nwidth: 1px;");
        assert_eq!(positions.locate(0), Some((1, 1)));
        assert_eq!(positions.locate(7), Some((1, 8)));
    }

    #[test]
    fn test_locate_after_newline() {
        let positions = LinePositions::new("color: red;\nwidth: 1px;");
        assert_eq!(positions.locate(12), Some((2, 1)));
        assert_eq!(positions.line_count(), 2);
    }

    #[test]
    fn test_locate_counts_characters_not_bytes() {
        // "é" is two bytes but one column
        let content = "/* é */ color: red;";
        let positions = LinePositions::new(content);
        let offset = content.find("color").unwrap();
        assert_eq!(offset, 9);
        assert_eq!(positions.locate(offset), Some((1, 9)));
    }

    #[test]
    fn test_locate_rejects_bad_offsets() {
        let content = "é";
        let positions = LinePositions::new(content);
        assert_eq!(positions.locate(1), None);
        assert_eq!(positions.locate(3), None);
        assert_eq!(positions.locate(2), Some((1, 2)));
    }

    #[test]
    fn test_locate_on_later_line() {
        let content = "a {\n  color: é;\n}";
        let positions = LinePositions::new(content);
        let offset = content.find('é').unwrap();
        assert_eq!(positions.locate(offset), Some((2, 10)));
        assert_eq!(positions.locate(content.len()), Some((3, 2)));
    }
}
