use serde::{Serialize, ser::SerializeStruct};

/// One card located in a document.
///
/// Line numbers are zero-based and inclusive, addressing the same `\n` split
/// of the document the caller parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRange {
    /// Position of this card in [`ParseResult::ranges`].
    pub index: usize,
    /// Line bearing the card's leading `- `.
    pub start_line: usize,
    /// Last non-blank line of the card.
    pub end_line: usize,
    /// Note ID, `None` until the card has been synced.
    pub nid: Option<i64>,
    /// Card ID, `None` until the card has been synced.
    pub cid: Option<i64>,
}

impl CardRange {
    /// Whether `line` falls inside this card's span.
    pub fn contains_line(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }

    /// Number of lines in the reported span.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// The outcome of locating cards in one document.
///
/// Ranges are sorted by `start_line` and never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub ranges: Vec<CardRange>,
    /// Line of the closing frontmatter `---`, if the document has one.
    pub frontmatter_end_line: Option<usize>,
}

impl ParseResult {
    pub fn has_cards(&self) -> bool {
        !self.ranges.is_empty()
    }
}

// Hand-written so the derived `hasCards` travels with the ranges.
impl Serialize for ParseResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ParseResult", 3)?;
        s.serialize_field("ranges", &self.ranges)?;
        s.serialize_field("frontmatterEndLine", &self.frontmatter_end_line)?;
        s.serialize_field("hasCards", &self.has_cards())?;
        s.end()
    }
}
