/// A single line of the document with the local facts every stage needs.
///
/// Classification is done once up front so the scanner and the block
/// extractor can index the arena by position instead of re-trimming.
#[derive(Debug, Clone)]
pub struct LineRef<'a> {
    /// The line as split from the source, without the `\n`.
    pub text: &'a str,
    /// Trimmed content. `str::trim` also drops a trailing `\r`.
    pub trimmed: &'a str,
    /// Count of leading whitespace characters (a tab counts as one).
    pub indent: usize,
    /// Whether the line is empty after trimming.
    pub is_blank: bool,
}

impl<'a> LineRef<'a> {
    fn classify(text: &'a str) -> Self {
        let trimmed = text.trim();
        let leading = &text[..text.len() - text.trim_start().len()];
        LineRef {
            text,
            trimmed,
            indent: leading.chars().count(),
            is_blank: trimmed.is_empty(),
        }
    }

    /// Whether the trimmed content opens a block sequence item.
    pub fn is_list_item(&self) -> bool {
        self.trimmed.starts_with("- ")
    }

    /// The line without a CRLF line ending's `\r`.
    pub fn content(&self) -> &'a str {
        self.text.strip_suffix('\r').unwrap_or(self.text)
    }

    /// Whether the line is exactly the frontmatter delimiter.
    ///
    /// Indentation or trailing spaces make it ordinary content, such as a
    /// horizontal rule inside a block scalar.
    pub fn is_delimiter(&self) -> bool {
        self.content() == FRONTMATTER_DELIMITER
    }
}

pub const FRONTMATTER_DELIMITER: &str = "---";

/// Index-addressed arena over the lines of a document.
///
/// Lines are split on `\n` only, so a trailing newline yields a final empty
/// line and line numbers line up with a plain editor line split.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    lines: Vec<LineRef<'a>>,
}

impl<'a> Lines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').map(LineRef::classify).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineRef<'a>> {
        self.lines.get(index)
    }

    /// Joins the raw text of `start..=end` with `\n`.
    pub fn join(&self, start: usize, end: usize) -> String {
        self.lines[start..=end]
            .iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Last non-blank line in `start..=end`, or `start` if all are blank.
    pub fn last_non_blank(&self, start: usize, end: usize) -> usize {
        (start..=end)
            .rev()
            .find(|&i| !self.lines[i].is_blank)
            .unwrap_or(start)
    }
}

impl<'a> std::ops::Index<usize> for Lines<'a> {
    type Output = LineRef<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lines[index]
    }
}
