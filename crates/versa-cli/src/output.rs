//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with report types
//! for parsed versions, comparisons and sorted lists.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::io::{self, Write};
use tracing::trace;
use versa_core::{Comparison, Version};

/// Relation between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Less,
    Equal,
    Greater,
    Incomparable,
}

impl Relation {
    /// Symbol used in human output
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Less => "<",
            Relation::Equal => "=",
            Relation::Greater => ">",
            Relation::Incomparable => "<>",
        }
    }

    /// Signed integer form; incomparable has none
    pub fn sign(self) -> Option<i32> {
        match self {
            Relation::Less => Some(-1),
            Relation::Equal => Some(0),
            Relation::Greater => Some(1),
            Relation::Incomparable => None,
        }
    }
}

impl From<Comparison> for Relation {
    fn from(comparison: Comparison) -> Self {
        match comparison {
            Some(Ordering::Less) => Relation::Less,
            Some(Ordering::Equal) => Relation::Equal,
            Some(Ordering::Greater) => Relation::Greater,
            None => Relation::Incomparable,
        }
    }
}

/// A parsed version and its components
#[derive(Debug, Clone, Serialize)]
pub struct VersionReport {
    pub input: String,
    pub version: String,
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
    pub valid: bool,
}

impl VersionReport {
    pub fn new(input: &str, version: &Version) -> Self {
        Self {
            input: input.to_string(),
            version: version.to_string(),
            major: version.major,
            minor: version.minor,
            build: version.build.value(),
            revision: version.revision.value(),
            valid: version.is_valid(),
        }
    }
}

/// Outcome of comparing two operands
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub left: String,
    pub right: String,
    pub relation: Relation,
    pub result: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equal: Option<bool>,
}

impl ComparisonReport {
    pub fn new(left: impl Into<String>, right: impl Into<String>, comparison: Comparison) -> Self {
        let relation = Relation::from(comparison);
        Self {
            left: left.into(),
            right: right.into(),
            relation,
            result: relation.sign(),
            equal: None,
        }
    }

    /// Attach the answer of the separate equality question
    pub fn with_equality(mut self, equal: bool) -> Self {
        self.equal = Some(equal);
        self
    }
}

/// A sorted list of versions
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    pub versions: Vec<String>,
    pub reverse: bool,
}

/// Trait for formatting output with specialized support for report types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format parsed versions
    fn format_versions(&self, reports: &[VersionReport]) -> Result<String>;

    /// Format a comparison outcome
    fn format_comparison(&self, report: &ComparisonReport) -> Result<String>;

    /// Format a sorted list
    fn format_sorted(&self, report: &SortReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_versions(&self, reports: &[VersionReport]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_versions_human(reports)),
            _ => self.format(&reports),
        }
    }

    fn format_comparison(&self, report: &ComparisonReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_comparison_human(report)),
            _ => self.format(report),
        }
    }

    fn format_sorted(&self, report: &SortReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(report.versions.join("\n")),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write parsed versions
    pub fn versions(&mut self, reports: &[VersionReport]) -> Result<()> {
        if self.format == OutputFormat::Human && self.use_color {
            let (headers, rows) = version_rows(reports);
            return self.table(&headers, rows);
        }
        let formatted = self.format.format_versions(reports)?;
        self.emit(&formatted)
    }

    /// Write a comparison outcome
    pub fn comparison(&mut self, report: &ComparisonReport) -> Result<()> {
        let formatted = self.format.format_comparison(report)?;
        if self.format == OutputFormat::Human && self.use_color {
            let colored = match report.relation {
                Relation::Incomparable => formatted.yellow().to_string(),
                Relation::Equal => formatted.green().to_string(),
                _ => formatted.bold().to_string(),
            };
            return self.writeln(&colored);
        }
        self.emit(&formatted)
    }

    /// Write a sorted list
    pub fn sorted(&mut self, report: &SortReport) -> Result<()> {
        let formatted = self.format.format_sorted(report)?;
        self.emit(&formatted)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        let widths = column_widths(headers, &rows);
        let header_row = pad_row(headers.iter().map(|h| h.to_string()), &widths);
        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }
        self.writeln(&separator(&widths))?;

        for row in rows {
            self.writeln(&pad_row(row.into_iter(), &widths))?;
        }

        Ok(())
    }

    /// Machine formats are written as-is; human output gets a trailing newline
    fn emit(&mut self, formatted: &str) -> Result<()> {
        trace!(bytes = formatted.len(), "Writing output");
        match self.format {
            OutputFormat::Human | OutputFormat::Json | OutputFormat::JsonPretty => {
                self.writeln(formatted)
            }
            OutputFormat::Yaml => self.write(formatted),
        }
    }
}

fn version_rows(reports: &[VersionReport]) -> ([&'static str; 7], Vec<Vec<String>>) {
    let headers = ["Input", "Version", "Major", "Minor", "Build", "Revision", "Valid"];
    let rows = reports
        .iter()
        .map(|r| {
            vec![
                r.input.clone(),
                r.version.clone(),
                r.major.to_string(),
                r.minor.to_string(),
                format_component(r.build),
                format_component(r.revision),
                if r.valid { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    (headers, rows)
}

fn format_component(component: Option<u32>) -> String {
    component.map_or_else(|| "-".to_string(), |value| value.to_string())
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }
    widths
}

fn pad_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| match widths.get(i) {
            Some(width) => format!("{:width$}", cell, width = *width),
            None => cell,
        })
        .collect::<Vec<_>>()
        .join(" │ ")
        .trim_end()
        .to_string()
}

fn separator(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─")
}

/// Format parsed versions as a plain table
fn format_versions_human(reports: &[VersionReport]) -> String {
    let (headers, rows) = version_rows(reports);
    let widths = column_widths(&headers, &rows);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(pad_row(headers.iter().map(|h| h.to_string()), &widths));
    lines.push(separator(&widths));
    for row in rows {
        lines.push(pad_row(row.into_iter(), &widths));
    }
    lines.join("\n")
}

/// Format a comparison as `left <op> right`
fn format_comparison_human(report: &ComparisonReport) -> String {
    let mut output = match report.result {
        Some(sign) => format!(
            "{} {} {}  ({})",
            report.left,
            report.relation.symbol(),
            report.right,
            sign
        ),
        None => format!("{} {} {}  (incomparable)", report.left, report.relation.symbol(), report.right),
    };

    if let Some(equal) = report.equal {
        output.push_str(if equal { "\nequal: yes" } else { "\nequal: no" });
    }
    output
}

/// Render a document value on one line, abbreviating large composites
pub fn format_value_compact(value: &JsonValue) -> String {
    match value {
        JsonValue::Array(items) if items.len() > 5 => format!("[{} items]", items.len()),
        JsonValue::Object(map) if map.len() > 5 => format!("{{{} fields}}", map.len()),
        JsonValue::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        other => other.to_string(),
    }
}
