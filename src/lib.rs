//! Inkan - assemble structured document drafts
//!
//! A draft is a title, an author and one to four titled sections, built up
//! through small edits. Derived gates decide when another section may be
//! added and when the draft is ready to hand off to a document generator.

pub mod domain;
pub mod storage;
pub mod generate;
pub mod cli;

pub use domain::{DocumentInfo, Draft, DraftSnapshot, DraftStore, Edit, Section, SectionId};
