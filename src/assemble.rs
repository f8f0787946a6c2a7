//! Assembly driver: ordering, fragments, segmentation, TOC, render, output.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::highlight::Highlighter;
use crate::render;
use crate::segmenter;
use crate::template::Template;
use crate::toc;
use crate::types::{Fragment, Region};

/// The products of one run, ready to be written.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Rendered body: the TOC followed by every fragment, in order.
    pub body: String,
    /// The body wrapped in the output template.
    pub document: String,
    /// Stylesheet for the colorized code blocks.
    pub stylesheet: String,
}

/// Run the whole pipeline for one configuration.
///
/// Missing section files and a missing ordering file are logged and
/// treated as empty; only collaborator failures abort.
///
/// # Errors
///
/// Returns `Error::Highlight` if colorizing or stylesheet emission fails.
pub fn assemble(
    config: &Config,
    highlighter: &Highlighter,
    template: &Template,
) -> Result<Assembly, Error> {
    let order = load_order(&config.order_path(), config.skip_blank_entries);
    let fragments = load_fragments(config, &order);
    let corpus = segment_corpus(&fragments);

    let toc = toc::build_toc(&corpus, &config.toc_title);
    let regions = with_toc(toc, corpus);
    let body = render::render(&regions, highlighter)?;

    let stylesheet_href = config.stylesheet_file.to_string_lossy();
    let document = template.wrap(&body, &config.title, &stylesheet_href);
    let stylesheet = highlighter.stylesheet()?;

    return Ok(Assembly { body, document, stylesheet });
}

/// Split ordering-file text into section identifiers, trimming each line.
/// Blank entries are dropped when `skip_blank` is set; otherwise they are
/// kept and later fail to load like any other missing section.
pub fn extract_order(text: &str, skip_blank: bool) -> Vec<String> {
    return text
        .split('\n')
        .map(str::trim)
        .filter(|entry| return !(skip_blank && entry.is_empty()))
        .map(str::to_string)
        .collect();
}

/// Load the section file for every ordering entry, in order.
/// Unreadable files are logged and recorded with no text.
pub fn load_fragments(config: &Config, order: &[String]) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(order.len());
    for (index, name) in order.iter().enumerate() {
        let path = config.fragment_path(name);
        let text = read_or_warn(&path, "section");
        fragments.push(Fragment { index, name: name.clone(), text });
    }
    let loaded = fragments.iter().filter(|f| return f.text.is_some()).count();
    log::info!("loaded {loaded} of {} sections", fragments.len());
    return fragments;
}

/// Read the ordering file. A missing file yields an empty ordering.
pub fn load_order(path: &Path, skip_blank: bool) -> Vec<String> {
    let text = read_or_warn(path, "ordering file").unwrap_or_default();
    return extract_order(&text, skip_blank);
}

/// Read a text file, logging and returning `None` on any failure.
fn read_or_warn(path: &Path, what: &str) -> Option<String> {
    return match std::fs::read_to_string(path) {
        Err(e) => {
            log::warn!("{what} {}: {e}; using empty content", path.display());
            None
        },
        Ok(text) => Some(text),
    };
}

/// Segment every fragment, preserving fragment order. A fragment whose
/// file could not be read contributes an empty region list.
pub fn segment_corpus(fragments: &[Fragment]) -> Vec<Vec<Region>> {
    return fragments
        .iter()
        .map(|fragment| {
            let regions = fragment.text.as_deref().map(segmenter::segment).unwrap_or_default();
            log::debug!("section {} `{}`: {} regions", fragment.index, fragment.name, regions.len());
            return regions;
        })
        .collect();
}

/// Prepend the TOC as a synthetic single-region fragment and flatten.
pub fn with_toc(toc: String, corpus: Vec<Vec<Region>>) -> Vec<Region> {
    return std::iter::once(Region::Prose(toc)).chain(corpus.into_iter().flatten()).collect();
}

/// Write both artifacts, creating the output directory if needed.
/// Returns the paths written, document first.
///
/// # Errors
///
/// Returns `Error::WriteFailed` for the first artifact that cannot be written.
pub fn write(config: &Config, assembly: &Assembly) -> Result<(PathBuf, PathBuf), Error> {
    let document_path = config.output_path();
    let stylesheet_path = config.stylesheet_path();
    write_artifact(&document_path, &assembly.document)?;
    write_artifact(&stylesheet_path, &assembly.stylesheet)?;
    return Ok((document_path, stylesheet_path));
}

/// Write one artifact, creating its parent directory first.
///
/// # Errors
///
/// Returns `Error::WriteFailed` if the directory or file cannot be written.
fn write_artifact(path: &Path, content: &str) -> Result<(), Error> {
    let to_error = |source: std::io::Error| return Error::WriteFailed { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, content).map_err(to_error)?;
    log::info!("wrote {} ({} bytes)", path.display(), content.len());
    return Ok(());
}
