//! Edit events
//!
//! An [`Edit`] is one user change to a draft. Edits come in two shapes:
//!
//! - JSON, one object per line, tagged by `op`:
//!   `{"op":"set_section","id":1,"field":"title","value":"Intro"}`
//! - A short command line, as typed in an interactive session:
//!   `section 1 title Intro`
//!
//! In the command form the value is everything after the separating space,
//! kept verbatim. A missing value means the empty string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::draft::{DocumentField, SectionField};
use super::id::SectionId;

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("Empty edit")]
    Empty,

    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("Missing argument for '{command}': expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Unexpected argument for '{command}': '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    #[error("Invalid section ID: '{0}'")]
    InvalidId(String),
}

/// A single change to a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Replace a document metadata field
    SetDocument { field: DocumentField, value: String },

    /// Replace a field of one section
    SetSection {
        id: SectionId,
        field: SectionField,
        value: String,
    },

    /// Append an empty section
    AddSection,

    /// Remove a section by id
    RemoveSection { id: SectionId },
}

impl Edit {
    /// Shorthand for setting the document title
    pub fn title(value: impl Into<String>) -> Self {
        Edit::SetDocument {
            field: DocumentField::Title,
            value: value.into(),
        }
    }

    /// Shorthand for setting the document author
    pub fn author(value: impl Into<String>) -> Self {
        Edit::SetDocument {
            field: DocumentField::Author,
            value: value.into(),
        }
    }

    /// Shorthand for setting a section field
    pub fn section(id: SectionId, field: SectionField, value: impl Into<String>) -> Self {
        Edit::SetSection {
            id,
            field,
            value: value.into(),
        }
    }

    /// Returns the operation name used in logs and the JSON `op` tag
    pub fn op(&self) -> &'static str {
        match self {
            Edit::SetDocument { .. } => "set_document",
            Edit::SetSection { .. } => "set_section",
            Edit::AddSection => "add_section",
            Edit::RemoveSection { .. } => "remove_section",
        }
    }
}

/// Splits off the first space-separated word; the remainder is untouched.
fn split_word(s: &str) -> (&str, Option<&str>) {
    match s.split_once(' ') {
        Some((word, rest)) => (word, Some(rest)),
        None => (s, None),
    }
}

impl FromStr for Edit {
    type Err = EditError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Err(EditError::Empty);
        }

        let (command, rest) = split_word(line);

        match command.to_ascii_lowercase().as_str() {
            "title" | "author" => {
                let field: DocumentField = command.parse()?;
                Ok(Edit::SetDocument {
                    field,
                    value: rest.unwrap_or_default().to_string(),
                })
            }
            "section" => {
                let rest = rest.ok_or(EditError::MissingArgument {
                    command: "section",
                    expected: "<id> <title|content> [value]",
                })?;
                let (id, rest) = split_word(rest);
                let id: SectionId = id
                    .parse()
                    .map_err(|_| EditError::InvalidId(id.to_string()))?;

                let rest = rest.filter(|r| !r.trim().is_empty()).ok_or(
                    EditError::MissingArgument {
                        command: "section",
                        expected: "<title|content> [value]",
                    },
                )?;
                let (field, value) = split_word(rest);
                let field: SectionField = field.parse()?;

                Ok(Edit::SetSection {
                    id,
                    field,
                    value: value.unwrap_or_default().to_string(),
                })
            }
            "add" => match rest.map(str::trim).filter(|r| !r.is_empty()) {
                Some(argument) => Err(EditError::UnexpectedArgument {
                    command: "add",
                    argument: argument.to_string(),
                }),
                None => Ok(Edit::AddSection),
            },
            "remove" => {
                let id = rest
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or(EditError::MissingArgument {
                        command: "remove",
                        expected: "<id>",
                    })?;
                let id: SectionId = id
                    .parse()
                    .map_err(|_| EditError::InvalidId(id.to_string()))?;
                Ok(Edit::RemoveSection { id })
            }
            _ => Err(EditError::UnknownCommand(command.to_string())),
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::SetDocument { field, value } => write!(f, "{} {}", field, value),
            Edit::SetSection { id, field, value } => {
                write!(f, "section {} {} {}", id, field, value)
            }
            Edit::AddSection => f.write_str("add"),
            Edit::RemoveSection { id } => write!(f, "remove {}", id),
        }
    }
}
