//! # Card Parsing
//!
//! Locates the `cards:` list embedded in a note and recovers each card's line
//! span and optional backend identifiers.
//!
//! ## Stages
//!
//! 1. **Lines** (`lines`): the text is split on `\n` into an indexable arena of
//!    classified lines (indent, trimmed content, blank status)
//! 2. **Frontmatter** (`frontmatter`): finds the closing `---` of a leading
//!    frontmatter block
//! 3. **Scanner** (`scanner`): a `Searching` / `InCards` state machine that
//!    finds card items at the list's base indent
//! 4. **Block** (`block`): determines how far each item extends
//! 5. **Identifiers** (`ids`): reads `nid` / `cid` from the item's text
//!
//! ## Key Invariants
//!
//! - Ranges are sorted by start line, never overlap, and `index` matches position
//! - Malformed input degrades to fewer identifiers, never to an error
//! - Parsing is a pure function of the input text

pub mod block;
pub mod frontmatter;
pub mod ids;
pub mod lines;
pub mod scanner;
pub mod types;

pub use ids::CardIds;
pub use types::{CardRange, ParseResult};

use frontmatter::frontmatter_end_line;
use ids::resolve_ids;
use lines::Lines;
use scanner::CardScanner;

/// Locates every card in `text`.
pub fn parse_cards(text: &str) -> ParseResult {
    let lines = Lines::new(text);
    let frontmatter_end_line = frontmatter_end_line(&lines);

    let ranges = CardScanner::new(&lines, frontmatter_end_line)
        .scan()
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let CardIds { nid, cid } = resolve_ids(&lines.join(block.start_line, block.raw_end));
            CardRange {
                index,
                start_line: block.start_line,
                end_line: block.end_line,
                nid,
                cid,
            }
        })
        .collect();

    ParseResult {
        ranges,
        frontmatter_end_line,
    }
}
