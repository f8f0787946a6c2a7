//! Syntax colorizing and stylesheet emission for verbatim blocks via syntect.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::Error;

/// Theme used when the configuration names none.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Language used when the configuration names none.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Class-based colorizer for one theme and one source language.
///
/// Output carries CSS classes instead of inline colors; the rules for those
/// classes come from [`Highlighter::stylesheet`] for the same theme.
pub struct Highlighter {
    /// Language token as configured, e.g. `python` or `rs`.
    language: String,
    /// Bundled syntax definitions (newline-terminated variant).
    syntaxes: SyntaxSet,
    /// Theme the stylesheet is generated from.
    theme: Theme,
    /// Name the theme was selected by.
    theme_name: String,
}

impl Highlighter {
    /// Colorize source text into a `<pre class="code">` block.
    ///
    /// # Errors
    ///
    /// Returns `Error::Highlight` if syntect fails on any line.
    pub fn colorize(&self, source: &str) -> Result<String, Error> {
        let syntax = self.syntax()?;
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(source) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| return Error::Highlight { reason: e.to_string() })?;
        }
        let html = generator.finalize();
        return Ok(format!("<pre class=\"code\"><code>{html}</code></pre>\n"));
    }

    /// Build a colorizer for a named theme and language token.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownTheme` if no bundled theme has that name,
    /// or `Error::UnsupportedLanguage` if no bundled syntax matches the token.
    pub fn new(theme_name: &str, language: &str) -> Result<Self, Error> {
        let mut themes = ThemeSet::load_defaults();
        let Some(theme) = themes.themes.remove(theme_name) else {
            return Err(Error::UnknownTheme {
                available: themes.themes.keys().cloned().collect(),
                name: theme_name.to_string(),
            });
        };

        let highlighter = Self {
            language: language.to_string(),
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
            theme_name: theme_name.to_string(),
        };
        highlighter.syntax()?;
        log::debug!("highlighting {language} with theme {theme_name}");
        return Ok(highlighter);
    }

    /// CSS rules for every class the colorizer can emit under this theme.
    ///
    /// # Errors
    ///
    /// Returns `Error::Highlight` if syntect cannot render the theme.
    pub fn stylesheet(&self) -> Result<String, Error> {
        return css_for_theme_with_class_style(&self.theme, ClassStyle::Spaced).map_err(|e| {
            return Error::Highlight {
                reason: format!("stylesheet for theme `{}`: {e}", self.theme_name),
            };
        });
    }

    /// Resolve the configured language token to a syntax definition.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedLanguage` if no bundled syntax matches.
    fn syntax(&self) -> Result<&SyntaxReference, Error> {
        return self.syntaxes.find_syntax_by_token(&self.language).ok_or_else(|| {
            return Error::UnsupportedLanguage { token: self.language.clone() };
        });
    }
}

/// Names of all bundled themes, sorted.
pub fn available_themes() -> Vec<String> {
    return ThemeSet::load_defaults().themes.into_keys().collect();
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn colorizes_with_classes() {
        let highlighter = Highlighter::new(DEFAULT_THEME, DEFAULT_LANGUAGE).unwrap();
        let html = highlighter.colorize("print(\"hi\")\n").unwrap();
        assert!(html.starts_with("<pre class=\"code\"><code>"), "{html}");
        assert!(html.contains("<span class=\""), "{html}");
        assert!(html.contains("print"), "{html}");
        assert!(!html.contains("style=\""), "{html}");
    }

    #[test]
    fn escapes_markup_in_code() {
        let highlighter = Highlighter::new(DEFAULT_THEME, DEFAULT_LANGUAGE).unwrap();
        let html = highlighter.colorize("x = 1 < 2\n").unwrap();
        assert!(html.contains("&lt;"), "{html}");
    }

    #[test]
    fn empty_source_still_produces_block() {
        let highlighter = Highlighter::new(DEFAULT_THEME, DEFAULT_LANGUAGE).unwrap();
        let html = highlighter.colorize("").unwrap();
        assert!(html.ends_with("</code></pre>\n"), "{html}");
    }

    #[test]
    fn unknown_theme_lists_alternatives() {
        let Err(Error::UnknownTheme { available, name }) = Highlighter::new("pygments", "python") else {
            panic!("expected UnknownTheme");
        };
        assert_eq!(name, "pygments");
        assert!(available.contains(&DEFAULT_THEME.to_string()));
    }

    #[test]
    fn unknown_language_is_rejected() {
        let result = Highlighter::new(DEFAULT_THEME, "no-such-language");
        assert!(matches!(result, Err(Error::UnsupportedLanguage { token }) if token == "no-such-language"));
    }

    #[test]
    fn other_languages_resolve_by_token() {
        let highlighter = Highlighter::new(DEFAULT_THEME, "rs").unwrap();
        assert!(highlighter.colorize("fn main() {}\n").is_ok());
    }

    #[test]
    fn stylesheet_styles_code_blocks() {
        let highlighter = Highlighter::new(DEFAULT_THEME, DEFAULT_LANGUAGE).unwrap();
        let css = highlighter.stylesheet().unwrap();
        assert!(css.contains(".code"), "{css}");
    }

    #[test]
    fn themes_are_sorted() {
        let themes = available_themes();
        let mut sorted = themes.clone();
        sorted.sort();
        assert_eq!(themes, sorted);
        assert!(themes.contains(&DEFAULT_THEME.to_string()));
    }
}
