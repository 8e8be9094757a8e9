//! Generation sinks
//!
//! A sink is whatever receives a finished draft. [`JsonSink`] writes the
//! snapshot to a writer; [`CommandSink`] pipes it to an external program
//! speaking the [`GenerationRequest`]/[`GenerationResponse`] protocol.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

use super::protocol::{GenerationReceipt, GenerationRequest, GenerationResponse};
use crate::domain::{DraftSnapshot, DraftStore, SectionPolicy, SnapshotError};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Blocked(#[from] SnapshotError),

    #[error("Failed to hand off draft to {sink}: {source}")]
    Io {
        sink: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize draft: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Generator {sink} rejected the draft: {message}")]
    Rejected { sink: String, message: String },

    #[error("Invalid response from generator {sink}: {message}")]
    Protocol { sink: String, message: String },
}

/// Receiver of finished drafts
pub trait GenerationSink {
    /// Short name used in logs and receipts
    fn name(&self) -> &str;

    /// Takes a snapshot and passes it on
    fn generate(&mut self, snapshot: &DraftSnapshot) -> Result<GenerationReceipt, GenerateError>;
}

/// Snapshots `store` and hands the snapshot to `sink`.
///
/// Fails without touching the sink while the generate gate is closed. The
/// store is left as is; callers that end the session on success reset it.
pub fn hand_off(
    store: &DraftStore,
    policy: SectionPolicy,
    sink: &mut dyn GenerationSink,
) -> Result<GenerationReceipt, GenerateError> {
    let snapshot = store.snapshot(policy)?;
    debug!(
        sink = sink.name(),
        policy = policy.as_str(),
        sections = snapshot.sections().len(),
        "handing off draft"
    );

    let receipt = sink.generate(&snapshot)?;
    info!(sink = %receipt.sink, sections = receipt.sections, "draft handed off");
    Ok(receipt)
}

/// Writes each snapshot as JSON to a writer
pub struct JsonSink<W: Write> {
    name: String,
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
            pretty: false,
        }
    }

    /// Switches to indented output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new("stdout", io::stdout())
    }
}

impl JsonSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new("stderr", io::stderr())
    }
}

impl<W: Write> GenerationSink for JsonSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&mut self, snapshot: &DraftSnapshot) -> Result<GenerationReceipt, GenerateError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(snapshot)?
        } else {
            serde_json::to_string(snapshot)?
        };

        writeln!(self.writer, "{}", json)
            .and_then(|_| self.writer.flush())
            .map_err(|source| GenerateError::Io {
                sink: self.name.clone(),
                source,
            })?;

        Ok(GenerationReceipt {
            sink: self.name.clone(),
            sections: snapshot.sections().len(),
            response: None,
        })
    }
}

/// Pipes snapshots to an external generator program
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
    args: Vec<String>,
}

impl CommandSink {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn io_error(&self, source: io::Error) -> GenerateError {
        GenerateError::Io {
            sink: self.program.clone(),
            source,
        }
    }

    fn protocol_error(&self, message: impl Into<String>) -> GenerateError {
        GenerateError::Protocol {
            sink: self.program.clone(),
            message: message.into(),
        }
    }
}

impl GenerationSink for CommandSink {
    fn name(&self) -> &str {
        &self.program
    }

    fn generate(&mut self, snapshot: &DraftSnapshot) -> Result<GenerationReceipt, GenerateError> {
        let request_json = serde_json::to_string(&GenerationRequest::generate(snapshot.clone()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.io_error(e))?;

        debug!(program = %self.program, pid = child.id(), "spawned generator");

        // Send request, then close stdin so the generator sees EOF. A write
        // failure is held back: the generator may have answered without
        // reading the whole request.
        let written = match child.stdin.take() {
            Some(mut stdin) => writeln!(stdin, "{}", request_json),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "generator stdin unavailable",
            )),
        };

        let response_line = match child.stdout.take() {
            Some(stdout) => BufReader::new(stdout).lines().next().transpose(),
            None => Ok(None),
        };

        // Always reap the child, whatever happened on the pipes
        let status = child.wait().map_err(|e| self.io_error(e))?;

        let response_line = response_line.map_err(|e| self.io_error(e))?;
        let parsed = response_line
            .as_deref()
            .map(|line| serde_json::from_str::<GenerationResponse>(line));

        let response = match (written, parsed) {
            (_, Some(Ok(response))) => response,
            (Err(e), _) => {
                debug!(program = %self.program, error = %e, "generator did not take the request");
                return Err(self.io_error(e));
            }
            (Ok(()), Some(Err(e))) => return Err(self.protocol_error(e.to_string())),
            (Ok(()), None) if status.success() => return Err(self.protocol_error("no response")),
            (Ok(()), None) => return Err(self.protocol_error(format!("exited with {}", status))),
        };

        if !response.success {
            return Err(GenerateError::Rejected {
                sink: self.program.clone(),
                message: response.error.unwrap_or_else(|| "no reason given".to_string()),
            });
        }

        Ok(GenerationReceipt {
            sink: self.program.clone(),
            sections: snapshot.sections().len(),
            response: response.data,
        })
    }
}
