use super::{
    block::{BlockExtent, extract_block},
    lines::Lines,
};

const CARDS_KEY: &str = "cards:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for a `cards:` key.
    Searching,
    /// Inside the card list; items at the base indent are cards.
    InCards,
}

/// Walks the document once, handing each card item to the block extractor.
///
/// Scanning starts at line 1 whether or not frontmatter was detected. It
/// stops at the closing frontmatter delimiter only while searching; inside a
/// card list that line goes through the indent rules like any other, so the
/// list can run on into the body. The base indent is captured from the first
/// list item seen inside a card list and kept for the rest of the scan.
pub struct CardScanner<'l, 'a> {
    lines: &'l Lines<'a>,
    frontmatter_end: Option<usize>,
    state: ScanState,
    base_indent: Option<usize>,
    cursor: usize,
}

impl<'l, 'a> CardScanner<'l, 'a> {
    pub fn new(lines: &'l Lines<'a>, frontmatter_end: Option<usize>) -> Self {
        Self {
            lines,
            frontmatter_end,
            state: ScanState::Searching,
            base_indent: None,
            cursor: 1,
        }
    }

    pub fn scan(mut self) -> Vec<BlockExtent> {
        let mut out = vec![];

        while self.cursor < self.lines.len() {
            match self.state {
                ScanState::Searching => {
                    if self.frontmatter_end == Some(self.cursor) {
                        break;
                    }
                    self.search_line();
                }
                ScanState::InCards => {
                    if let Some(block) = self.card_line() {
                        out.push(block);
                        self.cursor = block.raw_end + 1;
                        continue;
                    }
                }
            }
            self.cursor += 1;
        }

        out
    }

    fn search_line(&mut self) {
        let line = &self.lines[self.cursor];
        if !line.is_blank && line.trimmed.starts_with(CARDS_KEY) {
            log::trace!("card list opens at line {}", self.cursor);
            self.state = ScanState::InCards;
        }
    }

    /// Handles one line inside the card list, returning the extent of a card
    /// that starts here.
    fn card_line(&mut self) -> Option<BlockExtent> {
        let line = &self.lines[self.cursor];

        if self.base_indent.is_none() && line.is_list_item() {
            self.base_indent = Some(line.indent);
        }
        let base = self.base_indent?;

        if line.indent == base && line.is_list_item() {
            return Some(extract_block(
                self.lines,
                self.cursor,
                base,
                self.frontmatter_end,
            ));
        }
        if line.indent < base && !line.is_blank {
            log::trace!("card list closes at line {}", self.cursor);
            self.state = ScanState::Searching;
        }
        None
    }
}
