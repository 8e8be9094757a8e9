//! Domain models for Inkan
//!
//! Contains the draft state model without any I/O concerns.

mod id;
mod draft;
mod edit;
mod snapshot;
mod store;

pub use id::{IdError, SectionId};
pub use draft::{
    is_section_complete, DocumentField, DocumentInfo, Draft, Section, SectionField, MAX_SECTIONS,
    MIN_SECTIONS,
};
pub use edit::{Edit, EditError};
pub use snapshot::{Blocker, DraftSnapshot, Gates, SectionPolicy, SnapshotError};
pub use store::DraftStore;
