use xi_rope::Rope;

use crate::parsing::{CardRange, ParseResult, parse_cards};

/// A note's text together with the cards located in it.
///
/// This is the view editor overlays and sync pipelines work from: the
/// `ParseResult` gives line spans, and the rope turns those spans back into
/// the raw card text.
#[derive(Debug, Clone)]
pub struct CardDocument {
    buffer: Rope,
    result: ParseResult,
    line_count: usize,
}

impl CardDocument {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            result: parse_cards(text),
            line_count: text.split('\n').count(),
        }
    }

    /// Create a document from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn result(&self) -> &ParseResult {
        &self.result
    }

    pub fn cards(&self) -> &[CardRange] {
        &self.result.ranges
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Raw source text of a card's reported span, without the final line
    /// ending (`\n` or `\r\n`).
    pub fn card_text(&self, card: &CardRange) -> String {
        let start = self.offset_of_line(card.start_line);
        let end = self.offset_of_line(card.end_line + 1).max(start);
        let text = self.buffer.slice_to_cow(start..end);
        let text = text.strip_suffix('\n').unwrap_or(&text[..]);
        text.strip_suffix('\r').unwrap_or(text).to_string()
    }

    /// The card whose span contains `line`, e.g. the one under the cursor.
    pub fn card_at_line(&self, line: usize) -> Option<&CardRange> {
        let cards = self.cards();
        let idx = cards.partition_point(|c| c.end_line < line);
        cards.get(idx).filter(|c| c.contains_line(line))
    }

    /// Cards that have not been synced yet (no `nid`).
    pub fn pending_sync(&self) -> impl Iterator<Item = &CardRange> {
        self.cards().iter().filter(|c| c.nid.is_none())
    }

    pub fn find_by_nid(&self, nid: i64) -> Option<&CardRange> {
        self.cards().iter().find(|c| c.nid == Some(nid))
    }

    /// Byte offset where `line` starts, clamped to the end of the buffer.
    fn offset_of_line(&self, line: usize) -> usize {
        if line >= self.line_count {
            return self.buffer.len();
        }
        self.buffer.offset_of_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOTE: &str = "---\ndeck: Default\ncards:\n  - Front: one\n    nid: 11\n  - Front: two\n\n---\nBody";

    #[test]
    fn card_text_slices_reported_span() {
        let doc = CardDocument::new(NOTE);
        assert_eq!(doc.cards().len(), 2);
        assert_eq!(doc.card_text(&doc.cards()[0]), "  - Front: one\n    nid: 11");
        assert_eq!(doc.card_text(&doc.cards()[1]), "  - Front: two");
    }

    #[test]
    fn card_text_at_end_of_document() {
        let doc = CardDocument::new("x\ncards:\n- a: 1\n  b: 2");
        assert_eq!(doc.card_text(&doc.cards()[0]), "- a: 1\n  b: 2");
    }

    #[test]
    fn card_text_drops_crlf_line_ending() {
        let doc = CardDocument::new(&NOTE.replace('\n', "\r\n"));
        assert_eq!(doc.cards().len(), 2);
        assert_eq!(
            doc.card_text(&doc.cards()[0]),
            "  - Front: one\r\n    nid: 11"
        );
        assert_eq!(doc.card_text(&doc.cards()[1]), "  - Front: two");
    }

    #[test]
    fn card_at_line_finds_containing_card() {
        let doc = CardDocument::new(NOTE);
        assert_eq!(doc.card_at_line(2), None);
        assert_eq!(doc.card_at_line(3).map(|c| c.index), Some(0));
        assert_eq!(doc.card_at_line(4).map(|c| c.index), Some(0));
        assert_eq!(doc.card_at_line(5).map(|c| c.index), Some(1));
        assert_eq!(doc.card_at_line(6), None);
        assert_eq!(doc.card_at_line(100), None);
    }

    #[test]
    fn pending_sync_lists_cards_without_nid() {
        let doc = CardDocument::new(NOTE);
        let pending: Vec<_> = doc.pending_sync().map(|c| c.index).collect();
        assert_eq!(pending, vec![1]);
        assert_eq!(doc.find_by_nid(11).map(|c| c.index), Some(0));
        assert_eq!(doc.find_by_nid(12), None);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(CardDocument::from_bytes(&[0xFF, 0xFE, 0xFD]).is_err());
    }

    #[test]
    fn text_round_trips() {
        let doc = CardDocument::from_bytes(NOTE.as_bytes()).unwrap();
        assert_eq!(doc.text(), NOTE);
        assert_eq!(doc.result().frontmatter_end_line, Some(7));
    }
}
