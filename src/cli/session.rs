//! Interactive editing session
//!
//! Reads one command per line and replies after each. Edits use the command
//! form of [`Edit`]; `show`, `status`, `generate`, `help` and `quit` are
//! handled here. The draft lives only as long as the session.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use super::output::{draft_json, write_blockers, write_draft, write_gates, OutputFormat};
use crate::domain::{Blocker, DraftStore, Edit, Gates, SectionPolicy, MAX_SECTIONS};
use crate::generate::{hand_off, GenerateError, GenerationReceipt, GenerationSink};

const HELP: &str = "\
Edits:
  title <text>                    set the document title
  author <text>                   set the author
  section <id> title <text>       set a section title
  section <id> content <text>     set a section's content
  add                             append a section
  remove <id>                     remove a section
Commands:
  show                            print the draft
  status                          print gates and what blocks generation
  generate                        hand the draft off and start a new one
  help                            print this help
  quit                            end the session";

/// Reply to one session line
#[derive(Debug, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
enum Reply {
    Applied { version: u64 },
    Unchanged { version: u64 },
    Invalid { error: String },
    Refused { reason: &'static str },
    Draft { state: serde_json::Value },
    Status { gates: Gates, blockers: Vec<Blocker> },
    Generated { receipt: GenerationReceipt },
    Blocked { blockers: Vec<Blocker> },
    Failed { error: String },
    Help { text: &'static str },
}

/// A single editing session over one draft
pub struct Session<W: Write> {
    store: DraftStore,
    policy: SectionPolicy,
    sink: Box<dyn GenerationSink>,
    format: OutputFormat,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(
        policy: SectionPolicy,
        sink: Box<dyn GenerationSink>,
        format: OutputFormat,
        out: W,
    ) -> Self {
        Self {
            store: DraftStore::new(),
            policy,
            sink,
            format,
            out,
        }
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    /// Processes lines until `quit` or end of input
    pub fn run(&mut self, input: impl BufRead, prompt: bool) -> Result<()> {
        self.prompt(prompt)?;
        for line in input.lines() {
            let line = line.context("Failed to read session input")?;
            if !self.handle_line(&line)? {
                break;
            }
            self.prompt(prompt)?;
        }
        Ok(())
    }

    fn prompt(&mut self, prompt: bool) -> Result<()> {
        if prompt {
            write!(self.out, "> ")?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Handles one line. Returns false when the session should end.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        let reply = match line.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(true),
            "quit" | "exit" => return Ok(false),
            "help" => Reply::Help { text: HELP },
            "show" => Reply::Draft {
                state: draft_json(&self.store),
            },
            "status" => Reply::Status {
                gates: self.store.gates(),
                blockers: self.store.blockers(),
            },
            "generate" => self.generate(),
            _ => self.edit(line),
        };

        self.write_reply(&reply)?;
        Ok(true)
    }

    fn edit(&mut self, line: &str) -> Reply {
        let edit: Edit = match line.parse() {
            Ok(edit) => edit,
            Err(e) => {
                return Reply::Invalid {
                    error: e.to_string(),
                }
            }
        };

        // The add gate is enforced here; the store only checks the limit
        if edit == Edit::AddSection && !self.store.can_add_section() {
            let reason = if self.store.sections().len() >= MAX_SECTIONS {
                "section limit reached"
            } else {
                "complete a section first"
            };
            return Reply::Refused { reason };
        }

        let before = self.store.version();
        self.store.apply(&edit);
        let version = self.store.version();

        if version != before {
            Reply::Applied { version }
        } else {
            Reply::Unchanged { version }
        }
    }

    fn generate(&mut self) -> Reply {
        match hand_off(&self.store, self.policy, self.sink.as_mut()) {
            Ok(receipt) => {
                // A handed-off draft is finished; start the next one
                self.store.reset();
                Reply::Generated { receipt }
            }
            Err(GenerateError::Blocked(_)) => Reply::Blocked {
                blockers: self.store.blockers(),
            },
            Err(e) => Reply::Failed {
                error: e.to_string(),
            },
        }
    }

    fn write_reply(&mut self, reply: &Reply) -> Result<()> {
        if self.format == OutputFormat::Json {
            let json = serde_json::to_string(reply).context("Failed to serialize reply")?;
            writeln!(self.out, "{}", json)?;
            return Ok(());
        }

        let out = &mut self.out;
        match reply {
            Reply::Applied { .. } => writeln!(out, "ok")?,
            Reply::Unchanged { .. } => writeln!(out, "no change")?,
            Reply::Invalid { error } | Reply::Failed { error } => writeln!(out, "error: {}", error)?,
            Reply::Refused { reason } => writeln!(out, "cannot add a section: {}", reason)?,
            Reply::Draft { .. } => write_draft(out, &self.store)?,
            Reply::Status { gates, blockers } => {
                write_gates(out, gates)?;
                write_blockers(out, blockers)?;
            }
            Reply::Generated { receipt } => writeln!(
                out,
                "generated: {} section(s) handed off to {}; starting a new draft",
                receipt.sections, receipt.sink
            )?,
            Reply::Blocked { blockers } => {
                writeln!(out, "cannot generate yet:")?;
                write_blockers(out, blockers)?;
            }
            Reply::Help { text } => writeln!(out, "{}", text)?,
        }
        Ok(())
    }
}

/// Runs a session on stdin/stdout
pub fn run(policy: SectionPolicy, sink: Box<dyn GenerationSink>, format: OutputFormat) -> Result<()> {
    let stdin = std::io::stdin();
    let prompt = stdin.is_terminal() && format == OutputFormat::Text;

    let mut session = Session::new(policy, sink, format, std::io::stdout());
    session.run(stdin.lock(), prompt)?;

    tracing::debug!(version = session.store().version(), "session ended");
    Ok(())
}
