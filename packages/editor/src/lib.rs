//! # Vellum Editor
//!
//! Document-editing controller mediating a single markdown text across three
//! mutually exclusive editing surfaces: a read-only viewer, a rich editor on
//! a parsed document tree, and a plain-text editor on raw source.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ codec: canonical text ⇄ structured tree     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: document lifecycle + commands      │
//! │  - Mode transitions (viewer/rich/plain)     │
//! │  - Throttled dirty detection                │
//! │  - Save coordination                        │
//! │  - Unload guard while changes are unsaved   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: canonical text → persistence backend │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Canonical text is source of truth**: every surface's working buffer
//!    is re-derived from it on entry, never preserved across a round trip
//!    through another mode.
//! 2. **Explicit values, not state re-reads**: throttled checks and codec
//!    calls receive the current edit's value as an argument.
//! 3. **Eventually-consistent dirty flag**: recomputed at throttle
//!    boundaries, at most one second behind the last edit.
//! 4. **Optimistic save metadata**: the modification time is stamped when a
//!    save is initiated, not when it settles.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use vellum_editor::{EditorSession, FileInfo, RichChange, OperationKind};
//!
//! let mut session = EditorSession::new(
//!     initial_text,
//!     FileInfo::new("notes.md", "/library/notes.md", mtime),
//!     codec,
//!     store,
//!     notifier,
//!     lifecycle,
//! );
//!
//! // Edit through the rich surface
//! session.open_rich_editor()?;
//! session.edit_rich(RichChange::new(value, vec![OperationKind::InsertText]), Instant::now())?;
//!
//! // Fire due dirty checks, then persist
//! session.tick(Instant::now());
//! session.save().await?;
//! session.close();
//! ```

mod change;
mod document;
mod errors;
mod lifecycle;
mod notify;
mod session;
mod store;
mod throttle;

pub use change::{OperationKind, RichChange};
pub use document::{Document, EditorMode, FileInfo};
pub use errors::EditorError;
pub use lifecycle::{
    ConfirmGuard, DirtyFlag, LifecycleHook, NullLifecycleHook, UNSAVED_CHANGES_MESSAGE,
};
pub use notify::{LogNotifier, NotificationKind, NotificationSink};
pub use session::{EditorSession, SessionConfig, CHECK_INTERVAL};
pub use store::{ContentStore, FsContentStore, StoreError};
pub use throttle::Throttle;

// Re-export the codec contract for convenience
pub use vellum_codec::{Codec, CodecError, StructuredValue};
