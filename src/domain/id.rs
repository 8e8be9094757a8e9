//! Section identifiers
//!
//! Sections are numbered with plain integers. The first section of a draft is
//! `1`, and every new section takes `max(existing) + 1`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid section ID: expected a non-negative integer, got '{0}'")]
    InvalidSectionId(String),
}

/// Identifier of a section within a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(u64);

impl SectionId {
    /// The id given to the section every new draft starts with
    pub const FIRST: SectionId = SectionId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one
    pub fn next(&self) -> SectionId {
        SectionId(self.0 + 1)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SectionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(SectionId)
            .map_err(|_| IdError::InvalidSectionId(s.to_string()))
    }
}
