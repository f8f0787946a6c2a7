use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::highlight::{DEFAULT_LANGUAGE, DEFAULT_THEME};

/// Name of the optional project configuration file.
pub const CONFIG_FILE: &str = ".docbind.toml";

/// Project configuration loaded from `.docbind.toml`.
/// Relative paths are resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Extension appended to each ordering entry to find its section file.
    pub extension: String,
    /// Language token handed to the colorizer for every verbatim block.
    pub language: String,
    /// Ordering file, relative to `source_dir`.
    pub order_file: PathBuf,
    /// Directory both output artifacts are written to.
    pub output_dir: PathBuf,
    /// File name of the rendered document inside `output_dir`.
    pub output_file: PathBuf,
    /// Project root every other path is relative to.
    pub root: PathBuf,
    /// Skip blank lines in the ordering file instead of loading them.
    pub skip_blank_entries: bool,
    /// Directory holding the ordering file and the section files.
    pub source_dir: PathBuf,
    /// File name of the stylesheet inside `output_dir`.
    pub stylesheet_file: PathBuf,
    /// Custom output template; the built-in template is used when unset.
    pub template: Option<PathBuf>,
    /// Highlighting theme for code blocks and the stylesheet.
    pub theme: String,
    /// Document title substituted into the template.
    pub title: String,
    /// Title line of the generated table of contents.
    pub toc_title: String,
}

/// Raw TOML structure for `.docbind.toml`. Every key is optional.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct DocbindTomlConfig {
    /// See [`Config::extension`].
    extension: Option<String>,
    /// See [`Config::language`].
    language: Option<String>,
    /// See [`Config::order_file`].
    order_file: Option<PathBuf>,
    /// See [`Config::output_dir`].
    output_dir: Option<PathBuf>,
    /// See [`Config::output_file`].
    output_file: Option<PathBuf>,
    /// See [`Config::skip_blank_entries`].
    skip_blank_entries: Option<bool>,
    /// See [`Config::source_dir`].
    source_dir: Option<PathBuf>,
    /// See [`Config::stylesheet_file`].
    stylesheet_file: Option<PathBuf>,
    /// See [`Config::template`].
    template: Option<PathBuf>,
    /// See [`Config::theme`].
    theme: Option<String>,
    /// See [`Config::title`].
    title: Option<String>,
    /// See [`Config::toc_title`].
    toc_title: Option<String>,
}

impl Config {
    /// Defaults matching the conventional `text/` + `output/` layout.
    pub fn defaults(root: &Path) -> Self {
        return Self {
            extension: "md".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            order_file: PathBuf::from("order.txt"),
            output_dir: PathBuf::from("output"),
            output_file: PathBuf::from("output.html"),
            root: root.to_path_buf(),
            skip_blank_entries: true,
            source_dir: PathBuf::from("text"),
            stylesheet_file: PathBuf::from("styles.css"),
            template: None,
            theme: DEFAULT_THEME.to_string(),
            title: "Document".to_string(),
            toc_title: "Table of Contents".to_string(),
        };
    }

    /// Path of the section file for one ordering entry.
    pub fn fragment_path(&self, name: &str) -> PathBuf {
        let file = format!("{name}.{}", self.extension);
        return self.root.join(&self.source_dir).join(file);
    }

    /// Load config from `.docbind.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the
    /// user wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::defaults(root)),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: DocbindTomlConfig = toml::from_str(&content)?;
        log::debug!("loaded {}", path.display());
        return Ok(Self::defaults(root).merge(raw));
    }

    /// Overlay every key present in the raw file onto `self`.
    fn merge(self, raw: DocbindTomlConfig) -> Self {
        return Self {
            extension: raw.extension.unwrap_or(self.extension),
            language: raw.language.unwrap_or(self.language),
            order_file: raw.order_file.unwrap_or(self.order_file),
            output_dir: raw.output_dir.unwrap_or(self.output_dir),
            output_file: raw.output_file.unwrap_or(self.output_file),
            root: self.root,
            skip_blank_entries: raw.skip_blank_entries.unwrap_or(self.skip_blank_entries),
            source_dir: raw.source_dir.unwrap_or(self.source_dir),
            stylesheet_file: raw.stylesheet_file.unwrap_or(self.stylesheet_file),
            template: raw.template.or(self.template),
            theme: raw.theme.unwrap_or(self.theme),
            title: raw.title.unwrap_or(self.title),
            toc_title: raw.toc_title.unwrap_or(self.toc_title),
        };
    }

    /// Path of the ordering file.
    pub fn order_path(&self) -> PathBuf {
        return self.root.join(&self.source_dir).join(&self.order_file);
    }

    /// Path the rendered document is written to.
    pub fn output_path(&self) -> PathBuf {
        return self.root.join(&self.output_dir).join(&self.output_file);
    }

    /// Path the stylesheet is written to.
    pub fn stylesheet_path(&self) -> PathBuf {
        return self.root.join(&self.output_dir).join(&self.stylesheet_file);
    }

    /// Path of the custom template, if one is configured.
    pub fn template_path(&self) -> Option<PathBuf> {
        return self.template.as_ref().map(|t| return self.root.join(t));
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::defaults(dir.path()));
        assert_eq!(config.order_path(), dir.path().join("text").join("order.txt"));
        assert_eq!(config.fragment_path("intro"), dir.path().join("text").join("intro.md"));
        assert_eq!(config.output_path(), dir.path().join("output").join("output.html"));
        assert_eq!(config.stylesheet_path(), dir.path().join("output").join("styles.css"));
        assert_eq!(config.template_path(), None);
    }

    #[test]
    fn present_keys_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "source_dir = \"chapters\"\ntheme = \"base16-ocean.dark\"\ntemplate = \"page.html\"\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("chapters"));
        assert_eq!(config.theme, "base16-ocean.dark");
        assert_eq!(config.template_path(), Some(dir.path().join("page.html")));
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert!(config.skip_blank_entries);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "theme = [").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "themes = \"x\"\n").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }
}
