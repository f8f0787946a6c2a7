//! Anchor slugs shared by the table of contents and the heading renderer.

/// Turn heading text into an in-document anchor: lowercase, every space
/// becomes a hyphen, every apostrophe (straight or typographic) is dropped.
/// Nothing else is escaped. Equal headings produce equal anchors and are not disambiguated.
pub fn anchor_for(text: &str) -> String {
    return text.to_lowercase().replace(' ', "-").replace(['\'', '\u{2019}'], "");
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Intro", "intro")]
    #[case("My Section's Title", "my-sections-title")]
    #[case("Two  Spaces", "two--spaces")]
    #[case("Already-hyphenated", "already-hyphenated")]
    #[case("Author\u{2019}s Note", "authors-note")]
    #[case("", "")]
    fn derives_anchor(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(anchor_for(text), expected);
    }
}
