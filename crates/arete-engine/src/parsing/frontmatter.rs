use super::lines::{FRONTMATTER_DELIMITER, Lines};

const BOM: char = '\u{feff}';

/// Returns the line index of the closing frontmatter delimiter.
///
/// Frontmatter only exists when line 0 is exactly the `---` delimiter (a
/// leading byte-order mark is ignored). The closing line must match exactly
/// too, so an indented `---` inside a card never closes the block. Returns
/// `None` when there is no opening delimiter or the block never closes.
pub fn frontmatter_end_line(lines: &Lines<'_>) -> Option<usize> {
    let first = lines.get(0)?.content();
    if first.strip_prefix(BOM).unwrap_or(first) != FRONTMATTER_DELIMITER {
        return None;
    }
    (1..lines.len()).find(|&i| lines[i].is_delimiter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::closed("---\ntitle: x\n---\nbody", Some(2))]
    #[case::empty_block("---\n---\n", Some(1))]
    #[case::first_closing_wins("---\na: 1\n---\nb\n---\n", Some(2))]
    #[case::never_closes("---\ntitle: x\nbody", None)]
    #[case::no_opening("title: x\n---\n", None)]
    #[case::indented_opening("  ---\nx\n---", None)]
    #[case::indented_closing_skipped("---\nx: |\n  ---\n---", Some(3))]
    #[case::trailing_space_is_not_delimiter("---\nx\n--- \n---", Some(3))]
    #[case::byte_order_mark("\u{feff}---\nx: 1\n---\n", Some(2))]
    #[case::crlf("---\r\nx: 1\r\n---\r\n", Some(2))]
    #[case::empty_document("", None)]
    fn detects_closing_delimiter(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(frontmatter_end_line(&Lines::new(text)), expected);
    }
}
