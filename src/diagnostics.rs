use crate::error::Error;

/// ANSI bold on.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Print an error as markdown to stderr, with bold headings.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened,
/// and how to fix it where there is an obvious fix.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::Highlight { reason } => format!("\
# Error: Highlighting Failed

{reason}
"),
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::TemplateInvalid { path, reason } => format!("\
# Error: Template Invalid

`{}`: {reason}

## Fix

Add a `{{{{ body }}}}` placeholder where the rendered document belongs.
", path.display()),
        Error::TemplateUnreadable { path, source } => format!("\
# Error: Template Unreadable

`{}`: {source}

## Fix

Check the `template` path in `.docbind.toml` and that the file is readable UTF-8, or remove it to use the built-in template.
", path.display()),
        Error::TomlDe(e) => format!("\
# Error: Invalid Config

{e}
"),
        Error::UnknownTheme { available, name } => render_unknown_theme(name, available),
        Error::UnsupportedLanguage { token } => format!("\
# Error: Unsupported Language

No syntax definition matches `{token}`.

## Fix

Use a language name or file extension such as `python`, `rs`, or `js`.
"),
        Error::WriteFailed { path, source } => format!("\
# Error: Write Failed

Could not write `{}`: {source}
", path.display()),
    };
}

/// Diagnostic for an unknown theme, listing what is available.
fn render_unknown_theme(name: &str, available: &[String]) -> String {
    let mut out = format!("\
# Error: Unknown Theme

No bundled theme is named `{name}`.

## Available Themes

");
    for theme in available {
        out.push_str(&format!("- `{theme}`\n"));
    }
    out.push_str("\n## Fix\n\nSet `theme` in `.docbind.toml` or pass `--theme` with one of the names above.\n");
    return out;
}
