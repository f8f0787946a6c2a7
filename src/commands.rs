//! Core CLI commands for docbind: build, toc, css, themes.

use std::path::{Path, PathBuf};

use crate::assemble;
use crate::config::Config;
use crate::error;
use crate::highlight::{self, Highlighter};
use crate::template::Template;
use crate::toc;

/// Command-line values that take precedence over `.docbind.toml`.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Replaces `language`.
    pub language: Option<String>,
    /// Replaces `output_dir`.
    pub output_dir: Option<PathBuf>,
    /// Replaces `theme`.
    pub theme: Option<String>,
}

/// Assemble the document and write it with its stylesheet.
///
/// # Errors
///
/// Returns config, highlighter, template, render, or write errors.
pub fn build(root: &Path, overrides: &Overrides) -> Result<(), error::Error> {
    let config = load_config(root, overrides)?;
    let highlighter = Highlighter::new(&config.theme, &config.language)?;
    let template = Template::from_config(&config)?;

    let assembly = assemble::assemble(&config, &highlighter, &template)?;
    log::debug!(
        "rendered body: {} bytes, document: {} bytes",
        assembly.body.len(),
        assembly.document.len()
    );
    let (document, stylesheet) = assemble::write(&config, &assembly)?;
    eprintln!("Wrote {} and {}", document.display(), stylesheet.display());
    return Ok(());
}

/// Print the stylesheet for the configured theme.
///
/// # Errors
///
/// Returns config or highlighter errors.
pub fn css(root: &Path, overrides: &Overrides) -> Result<(), error::Error> {
    let config = load_config(root, overrides)?;
    let highlighter = Highlighter::new(&config.theme, &config.language)?;
    print!("{}", highlighter.stylesheet()?);
    return Ok(());
}

/// Load `.docbind.toml` and apply command-line overrides.
///
/// # Errors
///
/// Returns `Error::Io` or `Error::TomlDe` from config loading.
fn load_config(root: &Path, overrides: &Overrides) -> Result<Config, error::Error> {
    let mut config = Config::load(root)?;
    if let Some(language) = &overrides.language {
        config.language.clone_from(language);
    }
    if let Some(output_dir) = &overrides.output_dir {
        config.output_dir.clone_from(output_dir);
    }
    if let Some(theme) = &overrides.theme {
        config.theme.clone_from(theme);
    }
    return Ok(config);
}

/// List the bundled highlighting themes, one per line.
pub fn themes() {
    for name in highlight::available_themes() {
        println!("{name}");
    }
    return;
}

/// Print the table of contents the next build would produce.
/// With `json`, print the discovered headings instead.
///
/// # Errors
///
/// Returns config errors, or `Error::Io` if JSON serialization fails.
pub fn toc(root: &Path, overrides: &Overrides, json: bool) -> Result<(), error::Error> {
    let config = load_config(root, overrides)?;
    let order = assemble::load_order(&config.order_path(), config.skip_blank_entries);
    let corpus = assemble::segment_corpus(&assemble::load_fragments(&config, &order));
    let headings = toc::collect_headings(&corpus);

    if json {
        let out = serde_json::to_string_pretty(&headings).map_err(std::io::Error::from)?;
        println!("{out}");
    } else {
        print!("{}", toc::render_toc(&config.toc_title, &headings));
    }
    return Ok(());
}
