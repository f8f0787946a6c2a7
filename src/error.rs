/// Crate-level error types for docbind diagnostics.
use std::path::PathBuf;

/// Fatal failures of a docbind run. Each variant names the file, theme, or
/// reason so the diagnostic is useful without a debugger.
///
/// Missing fragments and a missing ordering file are deliberately absent:
/// they are logged and replaced with empty content instead of failing.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The syntax colorizer failed on a verbatim block.
    #[error("highlight failed: {reason}")]
    Highlight {
        /// Description of the colorizer failure.
        reason: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The output template cannot be used to wrap a document.
    #[error("template invalid: {}: {reason}", path.display())]
    TemplateInvalid {
        /// Template file, or `<built-in>` for the embedded template.
        path: PathBuf,
        /// Description of what is wrong with the template.
        reason: String,
    },

    /// The configured output template is missing, unreadable, or not UTF-8.
    #[error("template unreadable: {}: {source}", path.display())]
    TemplateUnreadable {
        /// Path to the configured template.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No bundled highlighting theme has the configured name.
    #[error("unknown theme: `{name}`, available: {}", available.join(", "))]
    UnknownTheme {
        /// Theme names that are available.
        available: Vec<String>,
        /// Theme name that was requested.
        name: String,
    },

    /// No bundled syntax definition matches the configured language token.
    #[error("no syntax for language: `{token}`")]
    UnsupportedLanguage {
        /// Language token that was requested.
        token: String,
    },

    /// An output artifact could not be written.
    #[error("write failed: {}: {source}", path.display())]
    WriteFailed {
        /// Output file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
