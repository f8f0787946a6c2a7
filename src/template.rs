//! Wraps an assembled HTML body into a complete document.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;

/// Placeholder replaced by the rendered body. Required.
const BODY: &str = "{{ body }}";

/// Template compiled into the binary.
const BUILTIN: &str = include_str!("../templates/page.html");

/// Placeholder replaced by the stylesheet file name.
const STYLESHEET: &str = "{{ stylesheet }}";

/// Placeholder replaced by the HTML-escaped document title.
const TITLE: &str = "{{ title }}";

/// A validated output template.
#[derive(Debug, Clone)]
pub struct Template {
    /// Where the template came from, for diagnostics.
    origin: PathBuf,
    /// Template text containing at least one body placeholder.
    source: String,
}

impl Template {
    /// The template shipped with docbind.
    pub fn builtin() -> Self {
        return Self {
            origin: PathBuf::from("<built-in>"),
            source: BUILTIN.to_string(),
        };
    }

    /// The configured template, or the built-in one when none is set.
    ///
    /// # Errors
    ///
    /// See [`Template::load`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        return match config.template_path() {
            None => Ok(Self::builtin()),
            Some(path) => Self::load(&path),
        };
    }

    /// Read and validate a template file.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateUnreadable` if the file cannot be read,
    /// or `Error::TemplateInvalid` if it has no `{{ body }}` placeholder.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path)
            .map_err(|source| return Error::TemplateUnreadable { path: path.to_path_buf(), source })?;
        return Self::parse(path, source);
    }

    /// Validate template text.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateInvalid` if `source` has no body placeholder.
    pub fn parse(origin: &Path, source: String) -> Result<Self, Error> {
        if !source.contains(BODY) {
            return Err(Error::TemplateInvalid {
                path: origin.to_path_buf(),
                reason: format!("missing `{BODY}` placeholder"),
            });
        }
        return Ok(Self { origin: origin.to_path_buf(), source });
    }

    /// Produce the final document. The body is inserted verbatim; only the
    /// template's own text is searched for the title and stylesheet
    /// placeholders, so a body that mentions them is left untouched.
    pub fn wrap(&self, body: &str, title: &str, stylesheet: &str) -> String {
        let title = html_escape::encode_text(title);
        let stylesheet = html_escape::encode_double_quoted_attribute(stylesheet);
        log::debug!("wrapping {} bytes with template {}", body.len(), self.origin.display());
        return self
            .source
            .split(BODY)
            .map(|part| return part.replace(TITLE, &title).replace(STYLESHEET, &stylesheet))
            .collect::<Vec<_>>()
            .join(body);
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_wraps_body_with_title_and_stylesheet() {
        let page = Template::builtin().wrap("<h1 id=\"a\">A</h1>", "Notes & Things", "styles.css");
        assert!(page.contains("<h1 id=\"a\">A</h1>"), "{page}");
        assert!(page.contains("<title>Notes &amp; Things</title>"), "{page}");
        assert!(page.contains("href=\"styles.css\""), "{page}");
        assert!(!page.contains("{{"), "{page}");
    }

    #[test]
    fn body_placeholders_are_not_expanded() {
        let template = Template::parse(Path::new("t.html"), "<b>{{ body }}</b>".to_string()).unwrap();
        assert_eq!(template.wrap("{{ title }}", "T", "s.css"), "<b>{{ title }}</b>");
    }

    #[test]
    fn template_without_body_is_invalid() {
        let result = Template::parse(Path::new("t.html"), "<html></html>".to_string());
        assert!(matches!(result, Err(Error::TemplateInvalid { .. })));
    }

    #[test]
    fn missing_template_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.html");
        assert!(matches!(Template::load(&path), Err(Error::TemplateUnreadable { path: p, .. }) if p == path));
    }

    #[test]
    fn non_utf8_template_keeps_io_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.html");
        std::fs::write(&path, b"<p>caf\xe9 {{ body }}</p>").unwrap();
        let Err(Error::TemplateUnreadable { source, .. }) = Template::load(&path) else {
            panic!("expected an unreadable template");
        };
        assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn config_without_template_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let template = Template::from_config(&Config::defaults(dir.path())).unwrap();
        assert_eq!(template.source, BUILTIN);
    }
}
