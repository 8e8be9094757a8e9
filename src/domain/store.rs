//! Draft store
//!
//! [`DraftStore`] is the single owner of a draft. Every change goes through
//! its mutation methods, which keep these invariants:
//!
//! - a draft holds between [`MIN_SECTIONS`] and [`MAX_SECTIONS`] sections
//! - section ids are unique within the draft
//! - sections stay in creation order
//!
//! Mutations that would break an invariant, or that target an unknown
//! section, are ignored rather than reported. Each mutation returns `true`
//! when it changed the draft. The store's [`version`](DraftStore::version)
//! counts applied mutations so a presentation layer can poll for changes.
//!
//! Gates ([`can_add_section`](DraftStore::can_add_section),
//! [`can_generate`](DraftStore::can_generate)) are recomputed from the
//! current draft on every call.

use tracing::debug;

use super::draft::{
    is_section_complete, DocumentField, DocumentInfo, Draft, Section, SectionField, MAX_SECTIONS,
    MIN_SECTIONS,
};
use super::edit::Edit;
use super::id::SectionId;
use super::snapshot::{Blocker, DraftSnapshot, Gates, SectionPolicy, SnapshotError};

/// Owner of the draft being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftStore {
    draft: Draft,
    version: u64,
}

impl DraftStore {
    /// Creates a store holding the initial draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current draft
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn document_info(&self) -> &DocumentInfo {
        &self.draft.document_info
    }

    pub fn sections(&self) -> &[Section] {
        &self.draft.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.draft.section(id)
    }

    /// Returns the number of applied mutations since the store was created
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Replaces a metadata field verbatim. Always applies.
    pub fn update_document_info(&mut self, field: DocumentField, value: impl Into<String>) -> bool {
        self.draft.document_info.set(field, value);
        self.bump();
        debug!(%field, version = self.version, "document info updated");
        true
    }

    /// Replaces a field of the section with `id`. Unknown ids are ignored.
    pub fn update_section(
        &mut self,
        id: SectionId,
        field: SectionField,
        value: impl Into<String>,
    ) -> bool {
        let Some(section) = self.draft.sections.iter_mut().find(|s| s.id == id) else {
            debug!(%id, %field, "ignoring update: no such section");
            return false;
        };

        section.set(field, value);
        self.bump();
        debug!(%id, %field, version = self.version, "section updated");
        true
    }

    /// Appends an empty section with id `max + 1`. Ignored at [`MAX_SECTIONS`].
    pub fn add_section(&mut self) -> bool {
        if self.draft.sections.len() >= MAX_SECTIONS {
            debug!(count = self.draft.sections.len(), "ignoring add: section limit reached");
            return false;
        }

        let id = self
            .draft
            .max_section_id()
            .map(|max| max.next())
            .unwrap_or(SectionId::FIRST);
        self.draft.sections.push(Section::new(id));
        self.bump();
        debug!(%id, version = self.version, "section added");
        true
    }

    /// Removes the section with `id`. Ignored for unknown ids or when only
    /// [`MIN_SECTIONS`] remain.
    pub fn remove_section(&mut self, id: SectionId) -> bool {
        if self.draft.sections.len() <= MIN_SECTIONS {
            debug!(%id, "ignoring remove: last section");
            return false;
        }

        let before = self.draft.sections.len();
        self.draft.sections.retain(|s| s.id != id);
        if self.draft.sections.len() == before {
            debug!(%id, "ignoring remove: no such section");
            return false;
        }

        self.bump();
        debug!(%id, version = self.version, "section removed");
        true
    }

    /// Applies an edit event to the matching mutation
    pub fn apply(&mut self, edit: &Edit) -> bool {
        let applied = match edit {
            Edit::SetDocument { field, value } => self.update_document_info(*field, value.as_str()),
            Edit::SetSection { id, field, value } => {
                self.update_section(*id, *field, value.as_str())
            }
            Edit::AddSection => self.add_section(),
            Edit::RemoveSection { id } => self.remove_section(*id),
        };
        debug!(op = edit.op(), applied, "edit processed");
        applied
    }

    /// Discards the draft and starts over with the initial one
    pub fn reset(&mut self) {
        self.draft = Draft::new();
        self.bump();
        debug!(version = self.version, "draft reset");
    }

    /// See [`is_section_complete`]
    pub fn is_section_complete(section: &Section) -> bool {
        is_section_complete(section)
    }

    /// True while below the section limit and at least one section is complete
    pub fn can_add_section(&self) -> bool {
        self.draft.sections.len() < MAX_SECTIONS && self.draft.has_complete_section()
    }

    /// True when title and author are non-blank and a section is complete
    pub fn can_generate(&self) -> bool {
        self.blockers().is_empty()
    }

    /// Reasons the generate gate is closed; empty when it is open
    pub fn blockers(&self) -> Vec<Blocker> {
        Blocker::for_draft(&self.draft)
    }

    pub fn gates(&self) -> Gates {
        Gates {
            can_add_section: self.can_add_section(),
            can_generate: self.can_generate(),
        }
    }

    /// Captures the draft for hand-off; fails while the generate gate is closed
    pub fn snapshot(&self, policy: SectionPolicy) -> Result<DraftSnapshot, SnapshotError> {
        let blockers = self.blockers();
        if !blockers.is_empty() {
            return Err(SnapshotError::Blocked(blockers));
        }
        Ok(DraftSnapshot::capture(&self.draft, policy))
    }
}
