//! Printable registration form.
//!
//! A `PrintDocument` is laid out from a form projection, so the same code
//! produces both the filled form and the blank template. A `PrintSurface`
//! takes the finished document; `CommandPrinter` pipes it to the system
//! print command.

use std::fmt::Write as _;
use std::io::Write as _;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

use crate::form::{Projection, RenderMode, Section};

pub const FORM_TITLE: &str = "CAMP REGISTRATION FORM";

/// Printed in place of an empty value so it can be filled in by hand
const BLANK_LINE: &str = "______________________________";

const PAGE_WIDTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct PrintLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintSection {
    pub title: &'static str,
    pub lines: Vec<PrintLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub title: &'static str,
    pub mode: RenderMode,
    pub sections: Vec<PrintSection>,
}

impl PrintDocument {
    pub fn build(projection: Projection<'_>) -> Self {
        let sections = Section::ALL
            .into_iter()
            .map(|section| PrintSection {
                title: section.title(),
                lines: section
                    .fields()
                    .map(|field| PrintLine {
                        label: field.label(),
                        value: projection.display(field).trim().to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: FORM_TITLE,
            mode: projection.mode(),
            sections,
        }
    }

    /// Plain-text rendering handed to the print command
    pub fn to_text(&self) -> String {
        let label_width = self
            .sections
            .iter()
            .flat_map(|s| s.lines.iter())
            .map(|l| l.label.len())
            .max()
            .unwrap_or(0)
            + 1;

        let mut out = String::new();
        let _ = writeln!(out, "{:^width$}", self.title, width = PAGE_WIDTH);
        let _ = writeln!(out, "{}", "=".repeat(PAGE_WIDTH));

        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", section.title.to_uppercase());
            let _ = writeln!(out, "{}", "-".repeat(section.title.len()));
            for line in &section.lines {
                let value = if line.value.is_empty() {
                    BLANK_LINE
                } else {
                    line.value.as_str()
                };
                let label = format!("{}:", line.label);
                let _ = writeln!(out, "{:<width$} {}", label, value, width = label_width);
            }
        }
        out
    }
}

#[derive(Error, Debug)]
pub enum PrintError {
    #[error("No print command configured")]
    NoCommand,

    #[error("Failed to start print command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to send document to printer: {0}")]
    Io(#[from] std::io::Error),

    #[error("Print command failed: {0}")]
    Failed(String),
}

/// Destination for a finished document
pub trait PrintSurface {
    fn print(&self, document: &PrintDocument) -> Result<(), PrintError>;
}

/// Pipes the plain-text document to a command such as `lp` on stdin
pub struct CommandPrinter {
    command: String,
}

impl CommandPrinter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl PrintSurface for CommandPrinter {
    fn print(&self, document: &PrintDocument) -> Result<(), PrintError> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(PrintError::NoCommand)?;

        debug!(command = %self.command, mode = ?document.mode, "Sending form to printer");
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PrintError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(document.to_text().as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(PrintError::Failed(message));
        }

        info!(mode = ?document.mode, "Registration form printed");
        Ok(())
    }
}
