//! Summix CLI - extractive webpage summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use serde::Serialize;
use std::path::{Path, PathBuf};
use summix::input::validate_text;
use summix::{
    chat_with_summary, classify, extract_readable_text, summarize, ChatResponder, Config,
    HttpFetcher, NlpContext, Ratio, SummaryStats, ValidationError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "summix")]
#[command(author, version, about = "Extractive webpage summarisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarise a webpage by URL
    Summarise {
        /// URL to summarise
        url: String,
        /// Share of sentences to keep (0.1 - 0.9)
        #[arg(long)]
        ratio: Option<Ratio>,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarise text from a file or stdin
    Text {
        /// File to read (stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Share of sentences to keep (0.1 - 0.9)
        #[arg(long)]
        ratio: Option<Ratio>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask one question about a summary read from a file or stdin
    Ask {
        /// The question
        question: String,
        /// Summary file (stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Chat interactively about a summary read from a file or stdin
    Chat {
        /// Summary file (stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show which intent a question maps to
    Intent {
        /// The question
        question: String,
    },
}

/// JSON output of the summarise commands
#[derive(Serialize)]
struct Report<'a> {
    url: Option<&'a str>,
    title: Option<&'a str>,
    ratio: Ratio,
    summary: String,
    stats: SummaryStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "summix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = NlpContext::english();

    match cli.command {
        Some(Commands::Summarise {
            url,
            ratio,
            raw,
            json,
        }) => {
            eprintln!("Fetching: {}", url);

            let fetcher = HttpFetcher::new(&config.fetch)?;
            let content = extract_readable_text(&fetcher, &url, &config.extract).await?;
            let text = validate_text(
                &content.text,
                config.extract.min_text_length,
                config.extract.max_text_length,
            )?;
            let title = content.title.as_deref().unwrap_or("No title");

            if raw {
                // Just show raw extracted text
                println!("\n=== {} ===\n", title.bold());
                println!("{}", text);
                println!("\n--- Extracted {} characters ---", text.chars().count());
                return Ok(());
            }

            let ratio = ratio.unwrap_or_else(|| Ratio::new(config.summary.default_ratio));
            let summary = summarize(&ctx, text, ratio).text();
            let report = Report {
                url: Some(&content.url),
                title: content.title.as_deref(),
                ratio,
                stats: SummaryStats::new(text, &summary),
                summary,
            };
            print_report(&report, json)?;
        }
        Some(Commands::Text { file, ratio, json }) => {
            let input = read_input(file.as_deref())?;
            let text = validate_text(
                &input,
                config.extract.min_text_length,
                config.extract.max_text_length,
            )?;

            let ratio = ratio.unwrap_or_else(|| Ratio::new(config.summary.default_ratio));
            let summary = summarize(&ctx, text, ratio).text();
            let report = Report {
                url: None,
                title: None,
                ratio,
                stats: SummaryStats::new(text, &summary),
                summary,
            };
            print_report(&report, json)?;
        }
        Some(Commands::Ask { question, file }) => {
            let summary = read_input(file.as_deref())?;
            println!("{}", chat_with_summary(&ctx, &question, &summary));
        }
        Some(Commands::Chat { file }) => {
            let summary = read_input(file.as_deref())?;
            if summary.trim().is_empty() {
                return Err(ValidationError::EmptyInput.into());
            }
            let responder = ChatResponder::new(&ctx);

            println!("{}", "Ask about the summary ('quit' to leave).".dimmed());
            loop {
                let question: String = Input::new()
                    .with_prompt("You")
                    .allow_empty(true)
                    .interact_text()?;
                if matches!(question.trim(), "quit" | "exit") {
                    break;
                }
                println!("{} {}\n", "Bot:".cyan().bold(), responder.respond(&question, &summary));
            }
        }
        Some(Commands::Intent { question }) => {
            println!("{}", classify(&question));
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Read the whole of `file`, or stdin when no file is given
fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
    }
}

fn print_report(report: &Report<'_>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if let Some(title) = report.title {
        println!("=== {} ===\n", title.bold());
    }
    println!("{}", "📝 Summary:".bold());
    println!("  {}\n", report.summary);

    let stats = &report.stats;
    println!("{}", "📊 Stats:".bold());
    println!(
        "  Original: {} words, {} characters",
        stats.original_words, stats.original_chars
    );
    println!(
        "  Summary:  {} words, {} characters",
        stats.summary_words, stats.summary_chars
    );
    println!(
        "  Compression: {}% (ratio {})",
        stats.compression_ratio, report.ratio
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_file_flag_is_optional() {
        for command in ["chat", "text"] {
            let cli = Cli::try_parse_from(["summix", command]).unwrap();
            assert!(matches!(
                cli.command,
                Some(Commands::Chat { file: None } | Commands::Text { file: None, .. })
            ));
        }

        let cli = Cli::try_parse_from(["summix", "chat", "--file", "notes.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Chat { file: Some(ref path) }) if path == Path::new("notes.txt")
        ));
        assert!(Cli::try_parse_from(["summix", "ask", "why?", "--file", "s.txt"]).is_ok());
    }
}
