//! Table-of-contents construction from prose headings.

use std::sync::LazyLock;

use regex::Regex;

use crate::slug;
use crate::types::{Heading, HeadingLevel, Region};

/// Running numbering state for one left-to-right scan of the corpus.
#[derive(Debug, Default)]
struct Counters {
    /// Entries emitted so far, primary and secondary alike.
    emitted: usize,
    /// Secondary entries since the last primary heading.
    secondary: usize,
}

/// Heading patterns, compiled on first use.
static PATTERNS: LazyLock<HeadingPatterns> = LazyLock::new(HeadingPatterns::new);

/// Anchored line patterns for the two recognised heading levels.
struct HeadingPatterns {
    /// Matches `# text`.
    primary: Regex,
    /// Matches `## text`.
    secondary: Regex,
}

impl HeadingPatterns {
    /// Compile the heading patterns.
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded heading regexes are invalid (compile-time invariant).
    fn new() -> Self {
        let anchored = |level: HeadingLevel| {
            let pattern = format!("^{}(.*)$", regex::escape(level.marker()));
            return Regex::new(&pattern).expect("valid regex");
        };
        return Self {
            primary: anchored(HeadingLevel::Primary),
            secondary: anchored(HeadingLevel::Secondary),
        };
    }

    /// Classify one line. Primary is checked first; the two never both match.
    fn classify<'a>(&self, line: &'a str) -> Option<(HeadingLevel, &'a str)> {
        if let Some(cap) = self.primary.captures(line) {
            return Some((HeadingLevel::Primary, cap.get(1).map_or("", |m| return m.as_str())));
        }
        if let Some(cap) = self.secondary.captures(line) {
            return Some((HeadingLevel::Secondary, cap.get(1).map_or("", |m| return m.as_str())));
        }
        return None;
    }
}

/// Recognise a primary or secondary heading line and return its text with
/// the marker removed. Trailing whitespace is kept, as it is in the anchor.
pub fn classify_line(line: &str) -> Option<(HeadingLevel, &str)> {
    return PATTERNS.classify(line);
}

/// Build the table of contents for a segmented corpus as a markdown block:
/// a title line followed by one numbered line per heading.
pub fn build_toc(fragments: &[Vec<Region>], title: &str) -> String {
    return render_toc(title, &collect_headings(fragments));
}

/// Collect headings from every prose region, in corpus order.
///
/// Verbatim regions are never inspected, so heading-like lines inside code
/// blocks produce no entries. Primary headings are numbered by the global
/// entry count; secondary headings restart at zero after each primary.
pub fn collect_headings(fragments: &[Vec<Region>]) -> Vec<Heading> {
    let mut counters = Counters::default();
    let mut headings = Vec::new();

    for region in fragments.iter().flatten() {
        let Region::Prose(text) = region else {
            continue;
        };
        scan_prose(text, &mut counters, &mut headings);
    }

    log::debug!("collected {} headings", headings.len());
    return headings;
}

/// Render headings under a title line, one entry per line.
pub fn render_toc(title: &str, headings: &[Heading]) -> String {
    let mut out = format!("# {title}\n");
    for heading in headings {
        out.push_str(&heading.toc_line());
    }
    return out;
}

/// Scan one prose region line by line, appending any headings found.
fn scan_prose(text: &str, counters: &mut Counters, headings: &mut Vec<Heading>) {
    for line in text.lines() {
        let Some((level, display_text)) = classify_line(line) else {
            continue;
        };
        let ordinal = match level {
            HeadingLevel::Primary => {
                counters.secondary = 0;
                counters.emitted
            },
            HeadingLevel::Secondary => {
                let ordinal = counters.secondary;
                counters.secondary = counters.secondary.saturating_add(1);
                ordinal
            },
        };
        counters.emitted = counters.emitted.saturating_add(1);
        headings.push(Heading {
            anchor: slug::anchor_for(display_text),
            display_text: display_text.to_string(),
            level,
            ordinal,
            raw_line: line.to_string(),
        });
    }
    return;
}
