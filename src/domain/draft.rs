//! Draft domain model
//!
//! A draft is a document in progress: metadata (title and author) plus an
//! ordered list of titled sections. Section order is document order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::edit::EditError;
use super::id::SectionId;

/// Most sections a draft may hold
pub const MAX_SECTIONS: usize = 4;

/// Fewest sections a draft may hold
pub const MIN_SECTIONS: usize = 1;

/// Document metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

impl DocumentInfo {
    /// Returns the value of a field
    pub fn get(&self, field: DocumentField) -> &str {
        match field {
            DocumentField::Title => &self.title,
            DocumentField::Author => &self.author,
        }
    }

    /// Replaces a field verbatim
    pub fn set(&mut self, field: DocumentField, value: impl Into<String>) {
        match field {
            DocumentField::Title => self.title = value.into(),
            DocumentField::Author => self.author = value.into(),
        }
    }
}

/// Editable fields of [`DocumentInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentField {
    Title,
    Author,
}

impl DocumentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentField::Title => "title",
            DocumentField::Author => "author",
        }
    }
}

impl fmt::Display for DocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(DocumentField::Title),
            "author" => Ok(DocumentField::Author),
            _ => Err(EditError::UnknownField(s.to_string())),
        }
    }
}

/// Editable fields of a [`Section`] (the id is fixed at creation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionField {
    Title,
    Content,
}

impl SectionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionField::Title => "title",
            SectionField::Content => "content",
        }
    }
}

impl fmt::Display for SectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SectionField::Title),
            "content" => Ok(SectionField::Content),
            _ => Err(EditError::UnknownField(s.to_string())),
        }
    }
}

/// A titled block of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub content: String,
}

impl Section {
    /// Creates an empty section
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
        }
    }

    /// Creates a section with the given title and content
    pub fn with_content(id: SectionId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns the value of a field
    pub fn get(&self, field: SectionField) -> &str {
        match field {
            SectionField::Title => &self.title,
            SectionField::Content => &self.content,
        }
    }

    /// Replaces a field verbatim
    pub fn set(&mut self, field: SectionField, value: impl Into<String>) {
        match field {
            SectionField::Title => self.title = value.into(),
            SectionField::Content => self.content = value.into(),
        }
    }

    /// Returns true if both title and content hold non-whitespace text
    pub fn is_complete(&self) -> bool {
        is_section_complete(self)
    }
}

/// Returns true if the section's title and content are both non-blank.
///
/// Whitespace-only text counts as empty.
pub fn is_section_complete(section: &Section) -> bool {
    !section.title.trim().is_empty() && !section.content.trim().is_empty()
}

/// The document being assembled
///
/// Serializes as `{"documentInfo": {...}, "sections": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub document_info: DocumentInfo,
    pub sections: Vec<Section>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            document_info: DocumentInfo::default(),
            sections: vec![Section::new(SectionId::FIRST)],
        }
    }
}

impl Draft {
    /// Creates the initial draft: empty metadata and one empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a section by id
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Iterates over complete sections in document order
    pub fn complete_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_complete())
    }

    /// Returns true if at least one section is complete
    pub fn has_complete_section(&self) -> bool {
        self.sections.iter().any(is_section_complete)
    }

    /// Returns the largest section id, if any section exists
    pub fn max_section_id(&self) -> Option<SectionId> {
        self.sections.iter().map(|s| s.id).max()
    }
}
