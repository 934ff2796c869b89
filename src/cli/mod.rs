//! Command-line interface for actionizer.
//!
//! Provides commands for extracting action items from a transcript,
//! normalizing a single due-date phrase, listing detected participants,
//! and showing the resolved configuration.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::config::{self, ResolvedConfig};
use crate::domain::ActionItemDraft;
use crate::extract::{dates, participants, Extractor};

/// actionizer - Meeting transcript action item extractor
#[derive(Parser, Debug)]
#[command(name = "actionizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract action items from a transcript
    Extract {
        /// Transcript file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Skip the model and use heuristic extraction only
        #[arg(long)]
        offline: bool,

        /// Reference date for relative due dates (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Normalize a due-date phrase ("next Friday", "21st of March")
    Date {
        /// Phrase to normalize
        phrase: String,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },

    /// List participant names detected in a transcript
    Names {
        /// Transcript file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Output format for extracted drafts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,

    /// One numbered line per item
    Text,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, dates::DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Extract {
                input,
                offline,
                today,
                format,
            } => extract(input, offline, today, format).await,
            Commands::Date { phrase, today } => {
                let today = today.unwrap_or_else(dates::local_today);
                println!("{}", dates::normalize(&phrase, today));
                Ok(())
            }
            Commands::Names { input } => show_names(input),
            Commands::Config => show_config(),
        }
    }
}

/// Read the transcript from a file or piped stdin
fn read_input(input_file: Option<PathBuf>) -> Result<String> {
    if let Some(path) = input_file {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        anyhow::bail!("No input provided. Use --input <file> or pipe to stdin");
    }
}

async fn extract(
    input_file: Option<PathBuf>,
    offline: bool,
    today: Option<NaiveDate>,
    format: OutputFormat,
) -> Result<()> {
    let cfg = settle_config(config::load_config(), offline)?;
    let input = read_input(input_file)?;
    let transcript = cfg.limits.validate(&input)?;

    let extractor = if offline {
        Extractor::fallback_only()
    } else {
        Extractor::from_config(&cfg.model)?
    };

    let today = today.unwrap_or_else(dates::local_today);
    let drafts = extractor.extract_on(transcript, today).await?;

    print!("{}", render(&drafts, format)?);
    Ok(())
}

/// Offline extraction only needs the input limits, so an unreadable config
/// file falls back to defaults there instead of aborting.
fn settle_config(loaded: Result<ResolvedConfig>, offline: bool) -> Result<ResolvedConfig> {
    match loaded {
        Err(err) if offline => {
            warn!(error = %err, "Ignoring config file in offline mode, using defaults");
            Ok(ResolvedConfig::default())
        }
        other => other,
    }
}

/// Render drafts for stdout
pub fn render(drafts: &[ActionItemDraft], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(drafts).context("Failed to serialize drafts")?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Text => {
            if drafts.is_empty() {
                return Ok("No action items found.\n".to_string());
            }

            let mut out = String::new();
            for (i, draft) in drafts.iter().enumerate() {
                out.push_str(&format!("{}. {}", i + 1, draft.task));
                if let Some(owner) = &draft.owner {
                    out.push_str(&format!("  [owner: {owner}]"));
                }
                if let Some(due) = &draft.due_date {
                    out.push_str(&format!("  [due: {due}]"));
                }
                for tag in &draft.tags {
                    out.push_str(&format!(" #{tag}"));
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}

fn show_names(input_file: Option<PathBuf>) -> Result<()> {
    let input = read_input(input_file)?;
    let names = participants::detect(&input);

    if names.is_empty() {
        println!("(no participants detected)");
    } else {
        for name in names.iter() {
            println!("{name}");
        }
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let cfg: ResolvedConfig = config::load_config()?;

    println!("actionizer configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Model:");
    println!("  Name:        {}", cfg.model.model);
    println!("  Base URL:    {}", cfg.model.base_url);
    println!("  API key:     {}", cfg.model.masked_key());
    println!("  Temperature: {}", cfg.model.temperature);
    println!("  Timeout:     {}s", cfg.model.timeout_seconds);
    println!();
    println!("Limits:");
    println!("  Max transcript size: {} bytes", cfg.limits.max_transcript_bytes);

    Ok(())
}
