use super::lines::Lines;

/// The extent of one card item in the line arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockExtent {
    /// Line bearing the item's leading `- `.
    pub start_line: usize,
    /// Last line belonging to the item, trailing blank lines included.
    pub raw_end: usize,
    /// Last non-blank line of the item; this is the reported span end.
    pub end_line: usize,
}

/// Finds where the item starting at `start` ends.
///
/// Scans forward until a sibling item at `base_indent`, a line indented less
/// than `base_indent`, or a frontmatter delimiter. Blank lines are absorbed
/// provisionally so multi-line scalars survive; they are trimmed from
/// `end_line` but kept in `raw_end`.
pub fn extract_block(
    lines: &Lines<'_>,
    start: usize,
    base_indent: usize,
    frontmatter_end: Option<usize>,
) -> BlockExtent {
    let mut raw_end = start;

    for j in start + 1..lines.len() {
        let line = &lines[j];

        if line.is_blank {
            raw_end = j;
            continue;
        }
        if frontmatter_end.is_some() && line.is_delimiter() {
            break;
        }
        if line.indent == base_indent && line.is_list_item() {
            break;
        }
        if line.indent < base_indent {
            break;
        }
        raw_end = j;
    }

    BlockExtent {
        start_line: start,
        raw_end,
        end_line: lines.last_non_blank(start, raw_end),
    }
}
