//! Generation gates and draft snapshots
//!
//! A snapshot is the immutable value handed to a document generator. It is
//! only produced while the generate gate is open.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::draft::{DocumentInfo, Draft, Section};

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("Draft is not ready to generate: {}", format_blockers(.0))]
    Blocked(Vec<Blocker>),
}

fn format_blockers(blockers: &[Blocker]) -> String {
    blockers
        .iter()
        .map(Blocker::describe)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A reason the generate gate is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blocker {
    MissingTitle,
    MissingAuthor,
    NoCompleteSection,
}

impl Blocker {
    /// Returns a human-readable description
    pub fn describe(&self) -> &'static str {
        match self {
            Blocker::MissingTitle => "document title is empty",
            Blocker::MissingAuthor => "author is empty",
            Blocker::NoCompleteSection => "no section has both a title and content",
        }
    }

    /// Lists what keeps `draft` from being generated, in a fixed order
    pub fn for_draft(draft: &Draft) -> Vec<Blocker> {
        let mut blockers = Vec::new();
        if draft.document_info.title.trim().is_empty() {
            blockers.push(Blocker::MissingTitle);
        }
        if draft.document_info.author.trim().is_empty() {
            blockers.push(Blocker::MissingAuthor);
        }
        if !draft.has_complete_section() {
            blockers.push(Blocker::NoCompleteSection);
        }
        blockers
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Derived gates controlling which actions are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gates {
    pub can_add_section: bool,
    pub can_generate: bool,
}

/// Which sections a snapshot carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPolicy {
    /// Every section in document order, complete or not
    #[default]
    All,
    /// Only complete sections, in document order
    Complete,
}

impl SectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionPolicy::All => "all",
            SectionPolicy::Complete => "complete",
        }
    }
}

impl FromStr for SectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(SectionPolicy::All),
            "complete" => Ok(SectionPolicy::Complete),
            _ => Err(format!("unknown section policy '{}' (expected all or complete)", s)),
        }
    }
}

/// Immutable copy of a draft at the moment generation was requested
///
/// Serializes as `{"documentInfo": {...}, "sections": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    document_info: DocumentInfo,
    sections: Vec<Section>,
}

impl DraftSnapshot {
    /// Captures `draft`, keeping the sections `policy` selects
    pub fn capture(draft: &Draft, policy: SectionPolicy) -> Self {
        let sections = match policy {
            SectionPolicy::All => draft.sections.clone(),
            SectionPolicy::Complete => draft.complete_sections().cloned().collect(),
        };

        Self {
            document_info: draft.document_info.clone(),
            sections,
        }
    }

    pub fn document_info(&self) -> &DocumentInfo {
        &self.document_info
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}
