//! metacheck - inspect and edit file metadata from the command line.
//!
//! Every command prints JSON on stdout. Logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use metacheck_core::config::ConfigManager;
use metacheck_core::fields::FieldCategory;
use metacheck_core::logging::{init_tracing, LogLevel};
use metacheck_core::{MetadataEngine, TagWriteRequest};

#[derive(Parser)]
#[command(name = "metacheck")]
#[command(about = "Aggregate file metadata from exiftool, mediainfo, ffprobe and friends", long_about = None)]
#[command(version = clap::crate_version!())]
struct Cli {
    /// Config file (created with defaults if missing)
    #[arg(long, global = true, default_value = ".config/metacheck.toml")]
    config: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which extraction tools are installed
    Tools,

    /// Print the full metadata report for a file
    Inspect {
        file: PathBuf,
    },

    /// Write tags with exiftool
    Write {
        file: PathBuf,

        /// Tag assignment, repeatable (e.g. --tag Title=Holiday)
        #[arg(long = "tag", value_name = "KEY=VALUE", required = true)]
        tags: Vec<String>,

        /// Skip re-reading the file after a successful write
        #[arg(long)]
        no_confirm: bool,
    },

    /// List suggested writable tags
    Fields {
        /// common, image, video or audio
        #[arg(default_value = "common")]
        category: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::new(&cli.config);
    config
        .load_or_create()
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let settings = config.settings();

    init_tracing(cli.log_level.unwrap_or(settings.logging.level));
    tracing::debug!(config = %config.path().display(), "configuration loaded");

    let engine = MetadataEngine::from_settings(settings);

    match cli.command {
        Commands::Tools => print_json(&engine.tools_status()),
        Commands::Inspect { file } => {
            engine.check_file(&file)?;
            print_json(&engine.aggregate(&file))
        }
        Commands::Write {
            file,
            tags,
            no_confirm,
        } => write(&engine, &file, &tags, no_confirm),
        Commands::Fields { category } => {
            let category = FieldCategory::from_name(&category);
            print_json(&FieldList {
                category,
                fields: category.fields(),
            })
        }
    }
}

#[derive(Serialize)]
struct FieldList {
    category: FieldCategory,
    fields: &'static [&'static str],
}

fn write(engine: &MetadataEngine, file: &Path, tags: &[String], no_confirm: bool) -> Result<()> {
    engine.check_file(file)?;
    let request = parse_tags(tags)?;
    request.validated()?;

    let success = if no_confirm {
        let outcome = engine.write(file, &request);
        print_json(&outcome)?;
        outcome.success()
    } else {
        let confirmed = engine.write_and_confirm(file, &request);
        print_json(&confirmed)?;
        confirmed.outcome.success()
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_tags(tags: &[String]) -> Result<TagWriteRequest> {
    tags.iter()
        .map(|tag| match tag.split_once('=') {
            Some((name, value)) => Ok((name.to_string(), value.to_string())),
            None => bail!("invalid tag {:?}, expected KEY=VALUE", tag),
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_assignments() {
        let request = parse_tags(&["Title=A=B".to_string(), "Artist=".to_string()]).unwrap();
        let tags = request.sanitize();
        assert_eq!(tags["Title"], "A=B");
        assert_eq!(tags["Artist"], "");
    }

    #[test]
    fn tags_without_valid_names_are_invalid_input() {
        let request = parse_tags(&["!!!=x".to_string()]).unwrap();
        assert!(matches!(
            request.validated(),
            Err(metacheck_core::EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_missing_equals() {
        assert!(parse_tags(&["Title".to_string()]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
