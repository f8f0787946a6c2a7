//! Dispatches each region to the markup renderer or the colorizer.

use crate::error::Error;
use crate::highlight::Highlighter;
use crate::markdown;
use crate::segmenter;
use crate::types::Region;

/// Render regions in order and concatenate the results.
///
/// Prose goes through the markup renderer as-is. Verbatim blocks lose their
/// fence lines and the interior goes to the colorizer. No region is skipped.
///
/// # Errors
///
/// Returns `Error::Highlight` if the colorizer fails; nothing is salvaged.
pub fn render(regions: &[Region], highlighter: &Highlighter) -> Result<String, Error> {
    let mut body = String::new();
    for (position, region) in regions.iter().enumerate() {
        let html = match region {
            Region::Prose(text) => markdown::render_markdown(text),
            Region::Verbatim(text) => highlighter.colorize(&strip_fences(text))?,
        };
        log::debug!("region {position}: {} bytes in, {} bytes out", region.text().len(), html.len());
        body.push_str(&html);
    }
    return Ok(body);
}

/// Drop the opening and closing fence lines of a verbatim block.
/// An unterminated block only loses its opening fence.
pub fn strip_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.split_inclusive('\n').collect();
    if lines.first().is_some_and(|line| return segmenter::is_fence_line(line)) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| return segmenter::is_fence_line(line)) {
        lines.pop();
    }
    return lines.concat();
}
