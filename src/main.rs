//! Resume parser: extract structured fields from resume documents

use clap::Parser;
use log::{error, info, warn};
use resume_parser::cli::{self, Cli, Commands, ConfigAction};
use resume_parser::config::Config;
use resume_parser::error::{Result, ResumeParserError};
use resume_parser::input::{collect_documents, SkillTaxonomy};
use resume_parser::output::{duration_ms, save_report_to_file, BatchReport, ReportGenerator};
use resume_parser::processing::{BatchRunner, ResumeParser, RuleAnalyzer};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) if matches!(cli.command, Commands::Config { action: Some(ConfigAction::Reset) }) => {
            warn!("Ignoring unreadable configuration: {}", e);
            Config::default()
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Parse {
            path,
            skills,
            output,
            save,
            jobs,
            recursive,
            no_progress,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeParserError::InvalidInput)?,
                None => config.output.format,
            };

            // The taxonomy is loaded before any document is touched.
            let skills_file = skills.or_else(|| config.taxonomy.skills_file.clone()).ok_or_else(|| {
                ResumeParserError::InvalidInput(
                    "No skill taxonomy given; pass --skills or set taxonomy.skills_file".to_string(),
                )
            })?;
            let taxonomy = Arc::new(SkillTaxonomy::from_csv_path(&skills_file)?);

            let documents = collect_documents(&path, recursive || config.batch.recursive)?;
            if documents.is_empty() {
                return Err(ResumeParserError::InvalidInput(format!(
                    "No documents found under {}",
                    path.display()
                )));
            }

            let parser = ResumeParser::from_config(
                &config.extraction,
                Arc::new(RuleAnalyzer::new()),
                Arc::clone(&taxonomy),
            );
            let runner = BatchRunner::new(Arc::new(parser), jobs.unwrap_or(config.batch.max_concurrency))
                .with_progress(!no_progress);

            let started = Instant::now();
            let outcomes = runner.run(documents).await;
            let elapsed_ms = duration_ms(started.elapsed());

            let report = BatchReport::new(outcomes, elapsed_ms, taxonomy.len());
            info!(
                "Parsed {} of {} document(s) in {}ms",
                report.summary.parsed, report.summary.total, elapsed_ms
            );

            // Escape codes stay out of saved files.
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                config.output.pretty_json,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                save_report_to_file(&rendered, &save_path)?;
                info!("Report saved to {}", save_path.display());
            }
        }

        Commands::Config { action } => {
            let path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeParserError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}\n", path.display());
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
