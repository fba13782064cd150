//! # Document State Machine
//!
//! The single mutable aggregate behind all three editing surfaces.
//!
//! ## Lifecycle
//!
//! ```text
//! Construct → Viewer ⇄ Rich ⇄ Plain
//!     ↓          (decode on entry to Rich,
//!   text         canonical snapshot on entry to Plain)
//! ```
//!
//! Canonical content is the single source of truth and is valid in every
//! mode. The structured value exists only while the rich surface is active,
//! the plain buffer only while the plain surface is active; both are
//! re-derived from canonical content on every entry, never preserved across
//! a round trip through another mode. Transitions never alter canonical
//! content or the saved snapshot.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vellum_codec::StructuredValue;

use crate::errors::EditorError;

/// Active editing surface. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Viewer,
    Rich,
    Plain,
}

/// File metadata carried alongside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub mtime: DateTime<Utc>,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, mtime: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            mtime,
        }
    }

    /// Stamp the modification time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.mtime = now;
    }
}

/// The document aggregate: mode, buffers, dirty flag, save status.
///
/// Fields mutate only through the operations below; the session layer decides
/// when to call them.
#[derive(Debug)]
pub struct Document {
    mode: EditorMode,
    canonical_content: String,
    structured_value: Option<StructuredValue>,
    plain_buffer: String,
    saved_content: String,
    dirty: bool,
    saving: bool,
    file_info: FileInfo,
}

impl Document {
    /// Construct from an externally supplied initial text. The initial text
    /// is also the saved snapshot, so a fresh document is never dirty.
    pub fn new(initial_text: String, file_info: FileInfo) -> Self {
        Self {
            mode: EditorMode::Viewer,
            canonical_content: initial_text.clone(),
            structured_value: None,
            plain_buffer: initial_text.clone(),
            saved_content: initial_text,
            dirty: false,
            saving: false,
            file_info,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn canonical_content(&self) -> &str {
        &self.canonical_content
    }

    /// The tree the rich surface operates on. `Some` only while `mode == Rich`.
    pub fn structured_value(&self) -> Option<&StructuredValue> {
        self.structured_value.as_ref()
    }

    /// The raw-text working buffer. Meaningful only while `mode == Plain`;
    /// holds the canonical snapshot taken on entry, not subsequent edits.
    pub fn plain_buffer(&self) -> &str {
        &self.plain_buffer
    }

    pub fn saved_content(&self) -> &str {
        &self.saved_content
    }

    /// Eventually consistent within one throttle interval of the last edit.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True only between save-initiated and save-settled.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn file_info(&self) -> &FileInfo {
        &self.file_info
    }

    pub fn file_info_mut(&mut self) -> &mut FileInfo {
        &mut self.file_info
    }

    /// Validate a mode transition without performing it.
    ///
    /// Allowed: `Viewer → Rich`, `Plain → Rich`, `Rich → Plain`,
    /// `Rich → Viewer`. The viewer is only ever entered from the rich
    /// surface (or at construction), and the plain surface only from the
    /// rich one.
    pub fn check_transition(&self, to: EditorMode) -> Result<(), EditorError> {
        let allowed = matches!(
            (self.mode, to),
            (EditorMode::Viewer, EditorMode::Rich)
                | (EditorMode::Plain, EditorMode::Rich)
                | (EditorMode::Rich, EditorMode::Plain)
                | (EditorMode::Rich, EditorMode::Viewer)
        );

        if allowed {
            Ok(())
        } else {
            Err(EditorError::InvalidTransition {
                from: self.mode,
                to,
            })
        }
    }

    /// Enter the rich surface with a value decoded from canonical content.
    pub fn enter_rich(&mut self, value: StructuredValue) -> Result<(), EditorError> {
        self.check_transition(EditorMode::Rich)?;
        self.structured_value = Some(value);
        self.mode = EditorMode::Rich;
        Ok(())
    }

    /// Enter the plain surface. The working buffer is snapshotted from
    /// canonical content; no re-decode happens on this path.
    pub fn enter_plain(&mut self) -> Result<(), EditorError> {
        self.check_transition(EditorMode::Plain)?;
        self.plain_buffer = self.canonical_content.clone();
        self.structured_value = None;
        self.mode = EditorMode::Plain;
        Ok(())
    }

    /// Return to the read-only viewer, discarding the structured value.
    pub fn enter_viewer(&mut self) -> Result<(), EditorError> {
        self.check_transition(EditorMode::Viewer)?;
        self.structured_value = None;
        self.mode = EditorMode::Viewer;
        Ok(())
    }

    pub fn set_canonical_content(&mut self, content: String) {
        self.canonical_content = content;
    }

    pub fn set_structured_value(&mut self, value: StructuredValue) {
        self.structured_value = Some(value);
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    /// Record a successful persist: the saved snapshot becomes the canonical
    /// content *as of settle time*, which may differ from the submitted
    /// payload if edits arrived while the save was in flight.
    pub fn mark_saved(&mut self) {
        self.saved_content = self.canonical_content.clone();
        self.dirty = false;
    }

    /// Reset every buffer to freshly loaded content. The caller re-decodes
    /// the structured value if the rich surface is active.
    pub fn reset_content(&mut self, text: String) {
        self.canonical_content = text.clone();
        self.plain_buffer = text.clone();
        self.saved_content = text;
        self.dirty = false;
    }
}
