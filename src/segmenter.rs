//! Splits one fragment into alternating prose and verbatim regions.

use crate::types::Region;

/// The delimiter that opens and closes a verbatim block.
pub const FENCE: &str = "```";

/// Which kind of region the segmenter is currently accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside any fence.
    Prose,
    /// Between an opening fence and its closing fence.
    Verbatim,
}

/// Whether a line toggles the segmenter state. Any line containing the
/// marker counts, so info strings like "```rust" open a block too.
pub fn is_fence_line(line: &str) -> bool {
    return line.contains(FENCE);
}

/// Split fragment text into an ordered sequence of regions.
///
/// Lines keep their own terminators, so concatenating every region's text
/// reproduces `text` exactly. The buffer left at end of input is always
/// flushed, even when empty, which makes `2k` fence lines yield `2k + 1`
/// regions. An unmatched fence flushes the tail as `Verbatim`; that is
/// malformed input and renders oddly, but never fails.
pub fn segment(text: &str) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut state = State::Prose;
    let mut buffer = String::new();

    for line in text.split_inclusive('\n') {
        if !is_fence_line(line) {
            buffer.push_str(line);
            continue;
        }
        match state {
            State::Prose => {
                regions.push(Region::Prose(std::mem::take(&mut buffer)));
                buffer.push_str(line);
                state = State::Verbatim;
            },
            State::Verbatim => {
                buffer.push_str(line);
                regions.push(Region::Verbatim(std::mem::take(&mut buffer)));
                state = State::Prose;
            },
        }
    }

    regions.push(match state {
        State::Prose => Region::Prose(buffer),
        State::Verbatim => Region::Verbatim(buffer),
    });
    return regions;
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn rejoin(regions: &[Region]) -> String {
        return regions.iter().map(Region::text).collect();
    }

    #[test]
    fn splits_prose_code_prose() {
        let text = "some text here\n```\nprint(\"some code\")\n```\nsome more text";
        let regions = segment(text);
        assert_eq!(
            regions,
            vec![
                Region::Prose("some text here\n".to_string()),
                Region::Verbatim("```\nprint(\"some code\")\n```\n".to_string()),
                Region::Prose("some more text".to_string()),
            ]
        );
    }

    #[test]
    fn no_fences_is_one_prose_region() {
        let text = "# Title\n\nJust prose.\n";
        assert_eq!(segment(text), vec![Region::Prose(text.to_string())]);
    }

    #[test]
    fn empty_text_is_one_empty_prose_region() {
        assert_eq!(segment(""), vec![Region::Prose(String::new())]);
    }

    #[test]
    fn leading_fence_emits_empty_prose_first() {
        let regions = segment("```\nx = 1\n```\n");
        assert_eq!(regions.len(), 3);
        assert_eq!(regions.first(), Some(&Region::Prose(String::new())));
        assert_eq!(regions.last(), Some(&Region::Prose(String::new())));
    }

    #[test]
    fn unmatched_fence_flushes_as_verbatim() {
        let text = "intro\n```python\nnever closed\n";
        let regions = segment(text);
        assert_eq!(
            regions,
            vec![
                Region::Prose("intro\n".to_string()),
                Region::Verbatim("```python\nnever closed\n".to_string()),
            ]
        );
        assert_eq!(rejoin(&regions), text);
    }

    #[test]
    fn fence_with_info_string_toggles() {
        let regions = segment("a\n```rust\nfn main() {}\n```\nb\n");
        assert!(matches!(regions.get(1), Some(Region::Verbatim(code)) if code.starts_with("```rust")));
    }

    #[rstest]
    #[case("", 0)]
    #[case("plain\n", 0)]
    #[case("a\n```\nb\n```\nc\n", 2)]
    #[case("```\n1\n```\n```\n2\n```\n", 4)]
    #[case("x\r\n```\r\ny\r\n```\r\nz", 2)]
    #[case("# h\n```\n# not a heading\n```\n## h2\n```\n```\n", 4)]
    fn lossless_and_parity(#[case] text: &str, #[case] fences: usize) {
        let regions = segment(text);
        assert_eq!(rejoin(&regions), text);
        assert_eq!(regions.len(), fences + 1);
    }
}
