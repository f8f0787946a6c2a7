mod assemble;
mod commands;
mod config;
mod diagnostics;
mod error;
mod highlight;
mod markdown;
mod render;
mod segmenter;
mod slug;
mod template;
mod toc;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::Overrides;

/// Top-level command line.
#[derive(Parser)]
#[command(name = "docbind", about = "Bind ordered markdown sections into one highlighted HTML page")]
struct Cli {
    /// Subcommand to run; `build` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Language token for code blocks (overrides `language`).
    #[arg(long, global = true)]
    language: Option<String>,
    /// Output directory (overrides `output_dir`).
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Project root containing `.docbind.toml`.
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    root: PathBuf,
    /// Highlighting theme (overrides `theme`).
    #[arg(long, global = true)]
    theme: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Assemble all sections and write the document and stylesheet
    Build,
    /// Print the stylesheet for the configured theme
    Css,
    /// List bundled highlighting themes
    Themes,
    /// Print the table of contents
    Toc {
        /// Print discovered headings as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        language: cli.language,
        output_dir: cli.output_dir,
        theme: cli.theme,
    };

    let result = match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => commands::build(&cli.root, &overrides),
        Commands::Css => commands::css(&cli.root, &overrides),
        Commands::Themes => {
            commands::themes();
            Ok(())
        },
        Commands::Toc { json } => commands::toc(&cli.root, &overrides, json),
    };

    return match result {
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
        Ok(()) => ExitCode::SUCCESS,
    };
}
