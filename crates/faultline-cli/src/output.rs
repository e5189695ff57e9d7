//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! rendering for messages, template renderings and mapped responses.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use faultline_core::{Message, MessageKind, Rendering, Response};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Serializable view of a template rendering
#[derive(Debug, Clone, Serialize)]
pub struct RenderingReport<'a> {
    pub text: &'a str,
    pub degraded: bool,
    #[serde(skip_serializing_if = "nothing_missing")]
    pub missing: &'a [String],
}

fn nothing_missing(missing: &&[String]) -> bool {
    missing.is_empty()
}

impl<'a> From<&'a Rendering> for RenderingReport<'a> {
    fn from(rendering: &'a Rendering) -> Self {
        Self {
            text: &rendering.text,
            degraded: rendering.is_degraded(),
            missing: &rendering.missing,
        }
    }
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a single message
    fn format_message(&self, message: &Message) -> Result<String>;

    /// Format a template rendering
    fn format_rendering(&self, rendering: &Rendering) -> Result<String>;

    /// Format a mapped response with its status line
    fn format_response(&self, response: &Response) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output falls back to pretty JSON for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_message(&self, message: &Message) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(message.to_string()),
            _ => self.format(message),
        }
    }

    fn format_rendering(&self, rendering: &Rendering) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(rendering.text.clone()),
            _ => self.format(&RenderingReport::from(rendering)),
        }
    }

    fn format_response(&self, response: &Response) -> Result<String> {
        match self {
            OutputFormat::Human => format_response_human(response),
            _ => self.format(response),
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
    /// Create a new output writer
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

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

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

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.writeln(&formatted)
    }

    /// Write a message, colored by kind in human mode
    pub fn message(&mut self, message: &Message) -> Result<()> {
        let formatted = self.format.format_message(message)?;
        if self.format == OutputFormat::Human && self.use_color {
            let colored = match message.kind() {
                MessageKind::Information => formatted.blue(),
                MessageKind::Warning => formatted.yellow(),
                _ => formatted.red(),
            };
            self.writeln(&colored.to_string())
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a template rendering; degraded renders carry a warning line
    pub fn rendering(&mut self, rendering: &Rendering) -> Result<()> {
        let formatted = self.format.format_rendering(rendering)?;
        self.writeln(&formatted)?;

        if rendering.is_degraded() {
            self.warning(&format!(
                "Unresolved tokens: {}",
                rendering.missing.join(", ")
            ))?;
        }
        Ok(())
    }

    /// Write a mapped response
    pub fn response(&mut self, response: &Response) -> Result<()> {
        let formatted = self.format.format_response(response)?;
        if self.format != OutputFormat::Human || !self.use_color {
            return self.writeln(&formatted);
        }

        // Color only the status line
        let (status_line, rest) = formatted
            .split_once('\n')
            .unwrap_or((formatted.as_str(), ""));
        let status_line = if response.is_success() {
            status_line.green().bold()
        } else {
            status_line.red().bold()
        };
        self.writeln(&status_line.to_string())?;
        if !rest.is_empty() {
            self.writeln(rest)?;
        }
        Ok(())
    }
}

/// Reason phrase for the status codes the response mapper produces
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

/// Format a response for human reading
fn format_response_human(response: &Response) -> Result<String> {
    let mut output = format!("HTTP {} {}", response.status, status_reason(response.status))
        .trim_end()
        .to_string();

    if let Some(body) = &response.body {
        output.push('\n');
        output.push_str(&serde_json::to_string_pretty(body)?);
    }

    Ok(output)
}
