//! CLI interface for the internship matcher

use crate::config::OutputFormat;
use crate::processing::tier::MatchTier;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "internship-matcher")]
#[command(about = "Match a student profile against internship postings")]
#[command(long_about = "Score a student against each internship posting by career, year of study, soft skills, technical skills and languages, and show which postings the student may apply to")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score postings against a student profile
    Match {
        /// Path to the student profile (JSON, TOML)
        #[arg(short, long)]
        profile: PathBuf,

        /// Path to the posting catalogue (JSON, TOML)
        #[arg(short = 'j', long)]
        postings: PathBuf,

        /// Hide postings below this tier: perfecta, alta, media, baja
        #[arg(long, value_parser = parse_tier)]
        min_tier: Option<MatchTier>,

        /// Sort by score, best first
        #[arg(long)]
        sort: bool,

        /// Show at most this many postings
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show the per-dimension breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the tier for a score and whether it allows applying
    Classify {
        /// Match score between 0 and 100
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        score: u8,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

pub fn parse_tier(tier: &str) -> Result<MatchTier, String> {
    tier.parse()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_match_arguments() {
        let cli = Cli::try_parse_from([
            "internship-matcher",
            "match",
            "--profile",
            "student.json",
            "--postings",
            "postings.toml",
            "--min-tier",
            "alta",
            "--sort",
            "-l",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Match {
                min_tier,
                sort,
                limit,
                ..
            } => {
                assert_eq!(min_tier, Some(MatchTier::Alta));
                assert!(sort);
                assert_eq!(limit, Some(3));
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_classify_rejects_out_of_range_scores() {
        assert!(Cli::try_parse_from(["internship-matcher", "classify", "101"]).is_err());
        assert!(Cli::try_parse_from(["internship-matcher", "classify", "80"]).is_ok());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_file_extension_validation() {
        assert!(validate_file_extension(Path::new("a.json"), &["json", "toml"]).is_ok());
        assert!(validate_file_extension(Path::new("a.TOML"), &["json", "toml"]).is_ok());
        assert!(validate_file_extension(Path::new("a.txt"), &["json", "toml"]).is_err());
        assert!(validate_file_extension(Path::new("a"), &["json", "toml"]).is_err());
    }
}
