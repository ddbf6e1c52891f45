//! Output formatters for listing reports

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::output::report::{posting_heading, ListingEntry, ListingReport};
use crate::processing::matcher::{DimensionScore, MatchBreakdown};
use crate::processing::tier::MatchTier;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting listing reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ListingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored tiers
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter rendering the listing as a table
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Internship Matches</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 2rem; color: #222; }
        table { border-collapse: collapse; width: 100%; }
        th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid #ddd; text-align: left; }
        .tier { font-weight: bold; padding: 0.1rem 0.5rem; border-radius: 4px; }
        .tier-perfecta { background: #d4edda; color: #155724; }
        .tier-alta { background: #e2f0d9; color: #2e6b1f; }
        .tier-media { background: #fff3cd; color: #856404; }
        .tier-baja { background: #f8d7da; color: #721c24; }
        .apply-yes { color: #155724; }
        .apply-no { color: #888; }
        .skipped { color: #721c24; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Internship Matches</h1>
    <p>{{ student_label }} | Generated: {{ generated_at }}</p>
    <p>Perfecta: {{ perfecta }} | Alta: {{ alta }} | Media: {{ media }} | Baja: {{ baja }} | Eligible: {{ eligible }} of {{ scored }}</p>
    <table>
        <thead>
            <tr><th>Posting</th><th>Score</th><th>Tier</th><th>Apply</th></tr>
        </thead>
        <tbody>
        {% for row in rows %}
            <tr>
                <td>{{ row.heading }}</td>
                <td>{{ row.score }}%</td>
                <td><span class="tier {{ row.tier_class }}">{{ row.tier }}</span></td>
                <td class="{{ row.apply_class }}">{{ row.apply_label }}</td>
            </tr>
        {% endfor %}
        </tbody>
    </table>
    {% if has_skipped %}
    <h2>Skipped postings</h2>
    <ul class="skipped">
    {% for item in skipped %}
        <li>{{ item }}</li>
    {% endfor %}
    </ul>
    {% endif %}
    <footer><p>Generated by internship-matcher v{{ version }}</p></footer>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    student_label: String,
    perfecta: usize,
    alta: usize,
    media: usize,
    baja: usize,
    eligible: usize,
    scored: usize,
    rows: Vec<HtmlRow>,
    skipped: Vec<String>,
    has_skipped: bool,
    version: String,
}

struct HtmlRow {
    heading: String,
    score: u8,
    tier: &'static str,
    tier_class: &'static str,
    apply_class: &'static str,
    apply_label: &'static str,
}

fn tier_color(tier: MatchTier) -> Color {
    match tier {
        MatchTier::Perfecta => Color::Green,
        MatchTier::Alta => Color::BrightGreen,
        MatchTier::Media => Color::Yellow,
        MatchTier::Baja => Color::Red,
    }
}

fn student_label(report: &ListingReport) -> String {
    let student = &report.student;
    match &student.name {
        Some(name) => format!("{} ({}, year {})", name, student.career, student.current_year),
        None => format!("{}, year {}", student.career, student.current_year),
    }
}

fn skipped_label(index: usize, id: Option<&str>, reason: &str) -> String {
    match id {
        Some(id) => format!("#{} ({}): {}", index, id, reason),
        None => format!("#{}: {}", index, reason),
    }
}

fn dimension_label(dimension: &DimensionScore) -> String {
    format!("{}/{}", dimension.points, dimension.total)
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn format_tier_badge(&self, tier: MatchTier) -> String {
        if self.use_colors {
            format!("[{}]", tier.label().color(tier_color(tier)).bold())
        } else {
            format!("[{}]", tier.label())
        }
    }

    fn format_entry(&self, position: usize, entry: &ListingEntry) -> String {
        let posting = &entry.posting;
        let apply = if entry.can_apply {
            self.colorize("apply: enabled", Color::Green)
        } else {
            self.colorize("apply: disabled", Color::BrightBlack)
        };

        let mut output = format!(
            "{:>3}. {:>3}% {} {} ({})\n",
            position,
            posting.match_score,
            self.format_tier_badge(posting.match_tier),
            posting_heading(posting),
            apply
        );

        if self.detailed {
            if let Some(breakdown) = &entry.breakdown {
                output.push_str(&self.format_breakdown(breakdown));
            }
        }
        output
    }

    fn format_breakdown(&self, breakdown: &MatchBreakdown) -> String {
        let mut output = format!(
            "       career {} | year {} | soft {} | technical {} | languages {} | total {}/{}\n",
            dimension_label(&breakdown.career),
            dimension_label(&breakdown.year),
            dimension_label(&breakdown.soft_skills),
            dimension_label(&breakdown.technical_skills),
            dimension_label(&breakdown.languages),
            breakdown.points(),
            breakdown.total()
        );

        let missing = [
            ("soft skills", &breakdown.missing_soft_skills),
            ("technical skills", &breakdown.missing_technical_skills),
            ("languages", &breakdown.missing_languages),
        ];
        for (category, ids) in missing {
            if !ids.is_empty() {
                output.push_str(&format!(
                    "       missing {}: {}\n",
                    category,
                    self.colorize(&ids.join(", "), Color::Yellow)
                ));
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ListingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("INTERNSHIP MATCHES"));
        output.push_str(&format!(
            "Student: {} | Generated: {}\n",
            student_label(report),
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Summary"));
        let tiers: Vec<String> = MatchTier::ALL
            .iter()
            .map(|tier| format!("{} {}", self.format_tier_badge(*tier), report.summary.count(*tier)))
            .collect();
        output.push_str(&format!("{}\n", tiers.join("  ")));
        output.push_str(&format!(
            "Eligible to apply: {} of {} scored postings\n",
            report.summary.eligible, report.summary.scored
        ));

        output.push_str(&self.format_header("Postings"));
        if report.entries.is_empty() {
            output.push_str("No postings to show.\n");
        }
        for (i, entry) in report.entries.iter().enumerate() {
            output.push_str(&self.format_entry(i + 1, entry));
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped postings"));
            for skipped in &report.skipped {
                let line = skipped_label(skipped.index, skipped.id.as_deref(), &skipped.reason);
                output.push_str(&format!("  {}\n", self.colorize(&line, Color::Red)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ListingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ListingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Internship Matches\n\n");
        output.push_str(&format!("**Student:** {}\n\n", student_label(report)));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Version:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.version
            ));
            if let (Some(profile), Some(postings)) =
                (&report.metadata.profile_file, &report.metadata.postings_file)
            {
                output.push_str(&format!("**Profile:** `{}` | **Postings:** `{}`\n\n", profile, postings));
            }
        }

        output.push_str("## Summary\n\n");
        output.push_str("| Tier | Postings |\n");
        output.push_str("|------|----------|\n");
        for tier in MatchTier::ALL {
            output.push_str(&format!("| {} | {} |\n", tier, report.summary.count(tier)));
        }
        output.push_str(&format!(
            "\n**Eligible to apply:** {} of {}\n\n",
            report.summary.eligible, report.summary.scored
        ));

        output.push_str("## Postings\n\n");
        if report.entries.is_empty() {
            output.push_str("_No postings to show._\n");
        } else {
            output.push_str("| # | Posting | Score | Tier | Apply |\n");
            output.push_str("|---|---------|-------|------|-------|\n");
            for (i, entry) in report.entries.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {}% | {} | {} |\n",
                    i + 1,
                    posting_heading(&entry.posting).replace('|', "\\|"),
                    entry.posting.match_score,
                    entry.posting.match_tier,
                    if entry.can_apply { "✅" } else { "—" }
                ));
            }
        }

        if !report.skipped.is_empty() {
            output.push_str("\n## Skipped postings\n\n");
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "- {}\n",
                    skipped_label(skipped.index, skipped.id.as_deref(), &skipped.reason)
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ListingReport) -> HtmlTemplate {
        let rows = report
            .entries
            .iter()
            .map(|entry| {
                let tier = entry.posting.match_tier;
                HtmlRow {
                    heading: posting_heading(&entry.posting),
                    score: entry.posting.match_score,
                    tier: tier.label(),
                    tier_class: match tier {
                        MatchTier::Perfecta => "tier-perfecta",
                        MatchTier::Alta => "tier-alta",
                        MatchTier::Media => "tier-media",
                        MatchTier::Baja => "tier-baja",
                    },
                    apply_class: if entry.can_apply { "apply-yes" } else { "apply-no" },
                    apply_label: if entry.can_apply { "Enabled" } else { "Disabled" },
                }
            })
            .collect();

        let skipped: Vec<String> = report
            .skipped
            .iter()
            .map(|s| skipped_label(s.index, s.id.as_deref(), &s.reason))
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            student_label: student_label(report),
            perfecta: report.summary.perfecta,
            alta: report.summary.alta,
            media: report.summary.media,
            baja: report.summary.baja,
            eligible: report.summary.eligible,
            scored: report.summary.scored,
            rows,
            has_skipped: !skipped.is_empty(),
            skipped,
            version: report.metadata.version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ListingReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| MatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &ListingReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), *format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
