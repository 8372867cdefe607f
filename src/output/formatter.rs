//! Output formatters for parse reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::BatchReport;
use crate::processing::batch::{DocumentFailure, DocumentOutcome, Outcome};
use crate::processing::parser::ParseResult;
use colored::{Color, Colorize};
use std::path::Path;

const MISSING: &str = "not found";

/// Trait for rendering a batch report
pub trait OutputFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String>;
}

/// Terminal output with optional colours
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON for downstream ATS tooling
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_field(&self, label: &str, value: Option<&str>) -> String {
        match value {
            Some(value) => format!("  {:<10} {}\n", label, value),
            None => format!("  {:<10} {}\n", label, self.colorize(MISSING, Color::BrightBlack)),
        }
    }

    fn format_result(&self, result: &ParseResult) -> String {
        let mut output = String::new();
        output.push_str(&self.format_field("Name:", result.name.as_deref()));
        output.push_str(&self.format_field("Phone:", result.phone.as_deref()));
        output.push_str(&self.format_field("Email:", result.email.as_deref()));

        let skills = join_skills(result);
        output.push_str(&self.format_field(
            "Skills:",
            (!skills.is_empty()).then_some(skills.as_str()),
        ));

        if result.education.is_empty() {
            output.push_str(&self.format_field("Education:", None));
        } else {
            output.push_str("  Education:\n");
            for entry in &result.education {
                match &entry.year {
                    Some(year) => output.push_str(&format!("    • {} ({})\n", entry.degree, year)),
                    None => output.push_str(&format!("    • {}\n", entry.degree)),
                }
            }
        }
        output
    }

    fn format_failure(&self, failure: &DocumentFailure) -> String {
        format!(
            "  {} {}\n",
            self.colorize(&format!("[{}]", failure.kind), Color::Red),
            failure.message
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME PARSE RESULTS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms | Skills in taxonomy: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms,
            report.metadata.taxonomy_size
        ));

        for document in &report.documents {
            output.push_str(&self.format_header(&display_name(document), 2));
            match &document.outcome {
                Outcome::Parsed(result) => output.push_str(&self.format_result(result)),
                Outcome::Failed(failure) => output.push_str(&self.format_failure(failure)),
            }
        }

        output.push_str(&self.format_header("Summary", 3));
        output.push_str(&format!(
            "{} document(s): {} parsed, {}\n",
            report.summary.total,
            self.colorize(&report.summary.parsed.to_string(), Color::Green),
            if report.summary.failed > 0 {
                self.colorize(&format!("{} failed", report.summary.failed), Color::Red)
            } else {
                "0 failed".to_string()
            }
        ));

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn format_result(result: &ParseResult) -> String {
        let mut output = String::new();
        output.push_str("| Field | Value |\n");
        output.push_str("|-------|-------|\n");
        output.push_str(&format!("| Name | {} |\n", result.name.as_deref().unwrap_or("-")));
        output.push_str(&format!("| Phone | {} |\n", result.phone.as_deref().unwrap_or("-")));
        output.push_str(&format!("| Email | {} |\n", result.email.as_deref().unwrap_or("-")));

        let skills = join_skills(result);
        output.push_str(&format!(
            "| Skills | {} |\n",
            if skills.is_empty() { "-" } else { skills.as_str() }
        ));
        output.push('\n');

        if !result.education.is_empty() {
            output.push_str("**Education**\n\n");
            for entry in &result.education {
                output.push_str(&format!(
                    "- {} {}\n",
                    entry.degree,
                    entry.year.as_deref().map(|y| format!("({})", y)).unwrap_or_default()
                ));
            }
            output.push('\n');
        }
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Parse Results\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Version:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms,
                report.metadata.tool_version
            ));
        }

        output.push_str(&format!(
            "{} document(s): {} parsed, {} failed\n\n",
            report.summary.total, report.summary.parsed, report.summary.failed
        ));

        for document in &report.documents {
            output.push_str(&format!("## `{}`\n\n", display_name(document)));
            match &document.outcome {
                Outcome::Parsed(result) => output.push_str(&Self::format_result(result)),
                Outcome::Failed(failure) => {
                    output.push_str(&format!("> **{}**: {}\n\n", failure.kind, failure.message))
                }
            }
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &BatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(document: &DocumentOutcome) -> String {
    document.path.display().to_string()
}

fn join_skills(result: &ParseResult) -> String {
    result.skills.iter().cloned().collect::<Vec<_>>().join(", ")
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
