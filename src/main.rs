//! internship-matcher: score internship postings against a student profile

use anyhow::{Context, Result};
use clap::Parser;
use internship_matcher::cli::{self, Cli, Commands, ConfigAction};
use internship_matcher::config::Config;
use internship_matcher::input::manager::InputManager;
use internship_matcher::output::formatter::save_report_to_file;
use internship_matcher::output::{ListingReport, ReportGenerator};
use internship_matcher::{can_apply, classify, MatcherError};
use log::{debug, error, info};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration; reset skips reading so a malformed file can be repaired
    let loaded = match (&cli.command, &cli.config) {
        (
            Commands::Config {
                action: Some(ConfigAction::Reset),
            },
            _,
        ) => Ok(Config::default()),
        (_, Some(path)) => Config::load_from(path),
        (_, None) => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config.as_deref()).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_override: Option<&Path>) -> Result<()> {
    match command {
        Commands::Match {
            profile,
            postings,
            min_tier,
            sort,
            limit,
            detailed,
            output,
            save,
        } => {
            info!("Starting internship matching");

            cli::validate_file_extension(&profile, &["json", "toml"])
                .map_err(|e| MatcherError::InvalidInput(format!("Profile file: {}", e)))?;
            cli::validate_file_extension(&postings, &["json", "toml"])
                .map_err(|e| MatcherError::InvalidInput(format!("Postings file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            // Command-line flags refine the configured listing view
            let mut listing = config.listing.clone();
            if min_tier.is_some() {
                listing.minimum_tier = min_tier;
            }
            if sort {
                listing.sort_by_score = true;
            }
            if limit.is_some() {
                listing.limit = limit;
            }
            let detailed = detailed || config.output.detailed;
            debug!("Listing options: {:?}, format: {:?}", listing, output_format);

            let mut input_manager = InputManager::new();
            let student = input_manager
                .load_profile(&profile)
                .await
                .with_context(|| format!("cannot score postings without a valid profile ({})", profile.display()))?;
            let catalogue = input_manager
                .load_postings(&postings)
                .await
                .with_context(|| format!("failed to load postings from {}", postings.display()))?;

            let report = ListingReport::generate(&student, catalogue, &listing, detailed).with_sources(
                profile.to_string_lossy(),
                postings.to_string_lossy(),
            );
            info!(
                "Scored {} postings, {} eligible, {} skipped",
                report.summary.scored,
                report.summary.eligible,
                report.skipped.len()
            );

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed,
                config.output.pretty_json,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("failed to save report to {}", path.display()))?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Classify { score } => {
            let tier = classify(score);
            println!("Score {}% -> {}", score, tier);
            println!(
                "Apply: {}",
                if can_apply(tier) { "enabled" } else { "disabled" }
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).context("failed to render configuration")?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                let path = config_override
                    .map(Path::to_path_buf)
                    .unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }

            Some(ConfigAction::Reset) => {
                let path = config_override
                    .map(Path::to_path_buf)
                    .unwrap_or_else(Config::config_path);
                Config::reset_at(&path)?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
