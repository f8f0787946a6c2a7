//! Markup-to-HTML rendering for prose regions via pulldown-cmark.

use std::ops::Range;

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, html};

use crate::slug;
use crate::toc;

/// Whether a link destination stays inside the current site.
/// Fragment, root-relative, and dot-relative links are local; anything else
/// (absolute URLs, protocol-relative URLs, bare names) opens elsewhere.
fn is_relative_link(dest: &str) -> bool {
    if dest.starts_with('#') || dest.starts_with("./") || dest.starts_with("../") {
        return true;
    }
    return dest.starts_with('/') && !dest.starts_with("//");
}

/// Parser extensions enabled for prose.
fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    return options;
}

/// Render one prose region to HTML.
///
/// Headings without an explicit `{#id}` get an id from [`slug::anchor_for`]
/// over their source line, the same text the table of contents slugs, so
/// its links resolve. Links leaving the document open in a new browsing
/// context.
pub fn render_markdown(text: &str) -> String {
    let parsed = Parser::new_ext(text, options()).into_offset_iter().collect();
    let events = with_heading_anchors(text, parsed);
    let mut html_buf = String::new();
    html::push_html(&mut html_buf, events.into_iter().map(open_external_links_in_new_context));
    return html_buf;
}

/// Replace the opening tag of non-relative links with one that carries
/// `target="_blank"`. The matching end event still renders `</a>`.
fn open_external_links_in_new_context(event: Event<'_>) -> Event<'_> {
    let Event::Start(Tag::Link { link_type, dest_url, title, .. }) = &event else {
        return event;
    };
    if matches!(link_type, LinkType::Email) || is_relative_link(dest_url) {
        return event;
    }

    let mut tag = format!(
        "<a href=\"{}\"",
        html_escape::encode_double_quoted_attribute(dest_url.as_ref())
    );
    if !title.is_empty() {
        tag.push_str(&format!(
            " title=\"{}\"",
            html_escape::encode_double_quoted_attribute(title.as_ref())
        ));
    }
    tag.push_str(" target=\"_blank\" rel=\"noopener noreferrer\">");
    return Event::InlineHtml(CowStr::from(tag));
}

/// Give every heading without an explicit id an anchor.
///
/// `#` and `##` headings are slugged from their source line with the marker
/// removed, exactly as the table of contents reads them. Smart punctuation
/// and inline markup therefore never reach the slug. Other headings (deeper
/// levels, setext, nested in containers) fall back to their plain text.
fn with_heading_anchors<'a>(
    source: &str,
    events: Vec<(Event<'a>, Range<usize>)>,
) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut open: Option<(usize, String)> = None;

    for (mut event, range) in events {
        match &mut event {
            Event::Code(text) | Event::Text(text) => {
                if let Some((_, plain)) = open.as_mut() {
                    plain.push_str(text);
                }
            },
            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, plain)) = open.take()
                    && let Some(Event::Start(Tag::Heading { id, .. })) = out.get_mut(start)
                    && id.is_none()
                {
                    *id = Some(CowStr::from(slug::anchor_for(&plain)));
                }
            },
            Event::Start(Tag::Heading { id, .. }) => {
                if id.is_none()
                    && let Some(anchor) = source_anchor(source, range.start)
                {
                    *id = Some(CowStr::from(anchor));
                }
                open = Some((out.len(), String::new()));
            },
            _ => {},
        }
        out.push(event);
    }

    return out;
}

/// Slug the heading line starting at `start`, if it is one the table of
/// contents lists.
fn source_anchor(source: &str, start: usize) -> Option<String> {
    let line = source.get(start..)?.lines().next()?;
    let (_, text) = toc::classify_line(line)?;
    return Some(slug::anchor_for(text));
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn headings_get_slug_ids() {
        let html = render_markdown("# My Section's Title\n");
        assert_eq!(html, "<h1 id=\"my-sections-title\">My Section’s Title</h1>\n");
    }

    #[test]
    fn explicit_heading_ids_are_kept() {
        let html = render_markdown("## Setup {#custom}\n");
        assert!(html.contains("id=\"custom\""), "{html}");
    }

    #[rstest]
    #[case::double_quotes("# Say \"Hi\"\n", "<h1 id=\"say-&quot;hi&quot;\">")]
    #[case::en_dash("# Before -- After\n", "<h1 id=\"before----after\">")]
    #[case::ellipsis("## Wait...\n", "<h2 id=\"wait...\">")]
    #[case::inline_code("# Using `cargo`\n", "<h1 id=\"using-`cargo`\">")]
    #[case::emphasis("# A *big* deal\n", "<h1 id=\"a-*big*-deal\">")]
    #[case::trailing_space("# Intro \n", "<h1 id=\"intro-\">")]
    fn heading_id_is_slugged_from_source_line(#[case] text: &str, #[case] open_tag: &str) {
        let html = render_markdown(text);
        assert!(html.starts_with(open_tag), "{html}");
    }

    #[test]
    fn deeper_and_setext_headings_use_plain_text() {
        let html = render_markdown("### Using `cargo`\n\nTitle\n=====\n");
        assert!(html.contains("<h3 id=\"using-cargo\">"), "{html}");
        assert!(html.contains("<h1 id=\"title\">"), "{html}");
    }

    #[test]
    fn external_links_open_in_new_context() {
        let html = render_markdown("[site](https://example.com \"Ex\")\n");
        assert_eq!(
            html,
            "<p><a href=\"https://example.com\" title=\"Ex\" target=\"_blank\" \
             rel=\"noopener noreferrer\">site</a></p>\n"
        );
    }

    #[test]
    fn in_document_links_stay_in_page() {
        let html = render_markdown("[Intro](#intro) and [up](../index.html)\n");
        assert!(!html.contains("target="), "{html}");
        assert!(html.contains("<a href=\"#intro\">Intro</a>"), "{html}");
    }

    #[test]
    fn heading_may_follow_paragraph_without_blank_line() {
        let html = render_markdown("text\n# Next\n");
        assert!(html.contains("<h1 id=\"next\">Next</h1>"), "{html}");
    }

    #[test]
    fn tables_are_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"), "{html}");
    }

    #[test]
    fn empty_prose_renders_nothing() {
        assert_eq!(render_markdown(""), "");
    }
}
