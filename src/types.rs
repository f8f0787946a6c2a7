/// Core domain types for docbind fragments, regions, and headings.
use serde::Serialize;

/// One named section of the corpus at its position in the ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Zero-based position in the ordering list.
    pub index: usize,
    /// Section identifier as written in the ordering file.
    pub name: String,
    /// Source text, or `None` when the section file could not be read.
    pub text: Option<String>,
}

/// A heading found in prose, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Link target slug, without the leading `#`.
    pub anchor: String,
    /// Heading text with the marker prefix removed.
    pub display_text: String,
    /// Whether this is a primary or secondary heading.
    pub level: HeadingLevel,
    /// Zero-based ordinal used for the displayed number.
    /// Global entry count for primaries, per-primary count for secondaries.
    pub ordinal: usize,
    /// The heading line exactly as it appeared in the source.
    pub raw_line: String,
}

impl Heading {
    /// Render this heading as one table-of-contents line.
    /// Secondary entries are indented by four spaces.
    pub fn toc_line(&self) -> String {
        let indent = match self.level {
            HeadingLevel::Primary => "",
            HeadingLevel::Secondary => "    ",
        };
        let number = self.ordinal.saturating_add(1);
        return format!("{indent}{number}. [{}](#{})\n", self.display_text, self.anchor);
    }
}

/// The two heading levels the table of contents recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// Marked by `# `.
    Primary,
    /// Marked by `## `.
    Secondary,
}

impl HeadingLevel {
    /// The line prefix that marks a heading of this level.
    pub const fn marker(self) -> &'static str {
        return match self {
            HeadingLevel::Primary => "# ",
            HeadingLevel::Secondary => "## ",
        };
    }
}

/// A contiguous span of a fragment. The text keeps every byte of the
/// source, fence lines included, so regions concatenate back to the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// Markup text outside any fence.
    Prose(String),
    /// A fenced block, opening and closing fence lines included.
    Verbatim(String),
}

impl Region {
    /// The literal source text of this region.
    pub fn text(&self) -> &str {
        return match self {
            Region::Prose(text) | Region::Verbatim(text) => text,
        };
    }
}
