//! Output formatting for CLI commands

use std::io::{self, Write};

use serde::Serialize;

use crate::domain::{Blocker, DraftStore, Gates, Section};
pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers normally render text themselves; pretty JSON is the fallback
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints the draft with its gates
    pub fn draft(&self, store: &DraftStore) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => write_draft(&mut io::stdout().lock(), store),
            OutputFormat::Json => {
                self.data(&draft_json(store));
                Ok(())
            }
        }
    }

    /// Prints the gates and what blocks generation
    pub fn gates(&self, store: &DraftStore) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                let mut out = io::stdout().lock();
                write_gates(&mut out, &store.gates())?;
                write_blockers(&mut out, &store.blockers())
            }
            OutputFormat::Json => {
                self.data(&serde_json::json!({
                    "gates": store.gates(),
                    "blockers": store.blockers(),
                }));
                Ok(())
            }
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Emits a debug event (visible with --verbose)
    pub fn verbose(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    /// Emits a debug event tagged with a context (visible with --verbose)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        tracing::debug!(context, "{}", message);
    }
}

/// JSON view of a store: draft, gates and version
pub fn draft_json(store: &DraftStore) -> serde_json::Value {
    serde_json::json!({
        "draft": store.draft(),
        "gates": store.gates(),
        "version": store.version(),
    })
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn write_section(out: &mut impl Write, section: &Section) -> io::Result<()> {
    let state = if section.is_complete() {
        "complete"
    } else {
        "incomplete"
    };
    writeln!(
        out,
        "[{}] {}  ({})",
        section.id,
        or_placeholder(&section.title, "(untitled)"),
        state
    )?;
    for line in section.content.lines() {
        writeln!(out, "    {}", line)?;
    }
    Ok(())
}

/// Renders a draft as text
pub fn write_draft(out: &mut impl Write, store: &DraftStore) -> io::Result<()> {
    let info = store.document_info();
    writeln!(out, "Title:  {}", or_placeholder(&info.title, "(empty)"))?;
    writeln!(out, "Author: {}", or_placeholder(&info.author, "(empty)"))?;
    writeln!(out)?;

    for section in store.sections() {
        write_section(out, section)?;
    }

    writeln!(out)?;
    write_gates(out, &store.gates())
}

/// Renders gates as text
pub fn write_gates(out: &mut impl Write, gates: &Gates) -> io::Result<()> {
    writeln!(out, "can add section: {}", yes_no(gates.can_add_section))?;
    writeln!(out, "can generate:    {}", yes_no(gates.can_generate))
}

/// Renders generation blockers as a bulleted list
pub fn write_blockers(out: &mut impl Write, blockers: &[Blocker]) -> io::Result<()> {
    for blocker in blockers {
        writeln!(out, "  - {}", blocker)?;
    }
    Ok(())
}
