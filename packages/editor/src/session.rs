//! # Editor Session
//!
//! The controller root: owns the document aggregate and the injected
//! collaborators, and exposes the named commands a hosting surface drives.
//!
//! ## Ordering model
//!
//! Single-threaded, cooperative. The only suspension point is the persist
//! call inside [`EditorSession::save`]. Logic that needs the *current*
//! edit's value (the throttled dirty check, the codec encode) receives
//! that value as an explicit argument; it never re-reads shared state that
//! an earlier call in the same turn may not have committed yet.
//!
//! The host drives time: edits carry an `Instant`, and [`EditorSession::tick`]
//! runs any dirty recomputation whose throttle window has elapsed.
//! [`EditorSession::next_deadline`] tells an event loop how long it may
//! sleep before the next check is due.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, error, info};
use vellum_codec::{Codec, StructuredValue};

use crate::change::RichChange;
use crate::document::{Document, EditorMode, FileInfo};
use crate::errors::EditorError;
use crate::lifecycle::{ConfirmGuard, DirtyFlag, LifecycleHook, UNSAVED_CHANGES_MESSAGE};
use crate::notify::{NotificationKind, NotificationSink};
use crate::store::ContentStore;
use crate::throttle::Throttle;

/// Minimum interval between dirty-flag recomputations. Encoding a structured
/// tree to text is assumed non-trivial cost and must not run per keystroke;
/// this floor also bounds worst-case dirty-flag staleness.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum interval between dirty-flag recomputations, shared by both
    /// editing surfaces' checks.
    pub check_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_interval: CHECK_INTERVAL,
        }
    }
}

/// Controller for one opened document.
pub struct EditorSession {
    document: Document,
    codec: Arc<dyn Codec>,
    store: Arc<dyn ContentStore>,
    notifier: Arc<dyn NotificationSink>,
    lifecycle: Box<dyn LifecycleHook>,
    dirty_flag: DirtyFlag,
    plain_check: Throttle<String>,
    rich_check: Throttle<StructuredValue>,
    closed: bool,
}

impl EditorSession {
    /// Open a session over an externally supplied initial text.
    ///
    /// Registers the unload guard with the lifecycle hook; the guard reads
    /// the dirty flag at fire time, so it stays registered whether or not
    /// changes exist.
    pub fn new(
        initial_text: impl Into<String>,
        file_info: FileInfo,
        codec: Arc<dyn Codec>,
        store: Arc<dyn ContentStore>,
        notifier: Arc<dyn NotificationSink>,
        lifecycle: Box<dyn LifecycleHook>,
    ) -> Self {
        Self::with_config(
            initial_text,
            file_info,
            codec,
            store,
            notifier,
            lifecycle,
            SessionConfig::default(),
        )
    }

    /// [`new`](Self::new) with an explicit configuration.
    pub fn with_config(
        initial_text: impl Into<String>,
        file_info: FileInfo,
        codec: Arc<dyn Codec>,
        store: Arc<dyn ContentStore>,
        notifier: Arc<dyn NotificationSink>,
        mut lifecycle: Box<dyn LifecycleHook>,
        config: SessionConfig,
    ) -> Self {
        let dirty_flag = DirtyFlag::new();
        let guard: ConfirmGuard = {
            let flag = dirty_flag.clone();
            Arc::new(move || flag.get().then(|| UNSAVED_CHANGES_MESSAGE.to_string()))
        };
        lifecycle.register(guard);

        Self {
            document: Document::new(initial_text.into(), file_info),
            codec,
            store,
            notifier,
            lifecycle,
            dirty_flag,
            plain_check: Throttle::new(config.check_interval),
            rich_check: Throttle::new(config.check_interval),
            closed: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Switch to the rich surface, decoding canonical content into the tree
    /// it operates on. A decode failure fails the transition and leaves mode
    /// and content untouched.
    pub fn open_rich_editor(&mut self) -> Result<(), EditorError> {
        self.document.check_transition(EditorMode::Rich)?;
        let value = self.codec.decode(self.document.canonical_content())?;
        self.document.enter_rich(value)?;
        debug!(mode = ?EditorMode::Rich, "switched editing surface");
        Ok(())
    }

    /// Switch to the plain surface. The working buffer is snapshotted from
    /// canonical content, which the rich edit path keeps up to date.
    pub fn open_plain_editor(&mut self) -> Result<(), EditorError> {
        self.document.enter_plain()?;
        debug!(mode = ?EditorMode::Plain, "switched editing surface");
        Ok(())
    }

    /// Return to the read-only viewer.
    pub fn open_viewer(&mut self) -> Result<(), EditorError> {
        self.document.enter_viewer()?;
        debug!(mode = ?EditorMode::Viewer, "switched editing surface");
        Ok(())
    }

    /// Apply a plain-text edit. Canonical content updates immediately; the
    /// dirty check runs at the next throttle boundary against the exact text
    /// submitted here.
    pub fn edit_plain(
        &mut self,
        new_text: impl Into<String>,
        now: Instant,
    ) -> Result<(), EditorError> {
        if self.document.mode() != EditorMode::Plain {
            return Err(EditorError::WrongSurface {
                expected: EditorMode::Plain,
                actual: self.document.mode(),
            });
        }

        let new_text = new_text.into();
        self.document.set_canonical_content(new_text.clone());
        self.plain_check.submit(new_text, now);
        Ok(())
    }

    /// Apply a rich-surface change.
    ///
    /// The new value always replaces the stored structured value, but
    /// changes whose operations are all non-content (selection movement,
    /// wholesale value resets) never reach the throttler or the codec.
    pub fn edit_rich(&mut self, change: RichChange, now: Instant) -> Result<(), EditorError> {
        if self.document.mode() != EditorMode::Rich {
            return Err(EditorError::WrongSurface {
                expected: EditorMode::Rich,
                actual: self.document.mode(),
            });
        }

        let has_content = change.has_content_ops();
        let RichChange { value, .. } = change;
        self.document.set_structured_value(value.clone());

        if has_content {
            // The surface's own state commit may not be observable yet, so
            // the throttled check captures the change's value here instead
            // of re-reading the document at fire time.
            self.rich_check.submit(value, now);
        }
        Ok(())
    }

    /// Run any dirty recomputation whose throttle window has elapsed.
    ///
    /// Plain check: raw equality of the captured text against the saved
    /// snapshot. Rich check: the captured value is encoded now, canonical
    /// content becomes the fresh encoding, and the comparison trims both
    /// sides. An encode failure leaves canonical content and the dirty flag
    /// unchanged.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.plain_check.poll(now) {
            let dirty = text != self.document.saved_content();
            self.set_dirty(dirty);
            debug!(dirty, "plain dirty check");
        }

        if let Some(value) = self.rich_check.poll(now) {
            match self.codec.encode(&value) {
                Ok(encoded) => {
                    let dirty = encoded.trim() != self.document.saved_content().trim();
                    self.document.set_canonical_content(encoded);
                    self.set_dirty(dirty);
                    debug!(dirty, "rich dirty check");
                }
                Err(err) => {
                    // Canonical content must never be corrupted by a failed
                    // encode; the pending check is simply dropped.
                    error!(%err, "encode failed during dirty check");
                }
            }
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (
            self.plain_check.next_deadline(),
            self.rich_check.next_deadline(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Persist the current content.
    ///
    /// The snapshot is captured synchronously at call time: in rich mode the
    /// current structured value is encoded fresh, since the throttled
    /// canonical update may lag the latest keystrokes; otherwise the
    /// canonical content is submitted as-is. The modification time is
    /// stamped when the save is initiated, before the store settles, and
    /// stays stamped on failure.
    ///
    /// Edits arriving while the persist call is in flight are accepted
    /// normally and belong to the next save.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let snapshot = match (self.document.mode(), self.document.structured_value()) {
            (EditorMode::Rich, Some(value)) => self.codec.encode(value)?,
            _ => self.document.canonical_content().to_string(),
        };

        info!(bytes = snapshot.len(), "saving document");
        self.document.set_saving(true);
        self.document.file_info_mut().touch(Utc::now());

        let store = Arc::clone(&self.store);
        match store.persist(&snapshot).await {
            Ok(()) => {
                self.document.set_saving(false);
                self.document.mark_saved();
                self.dirty_flag.set(false);
                info!("document saved");
                self.notifier.notify(NotificationKind::Success, "File saved");
                Ok(())
            }
            Err(err) => {
                self.document.set_saving(false);
                error!(%err, "failed to persist document");
                self.notifier
                    .notify(NotificationKind::Failure, "Failed to save file");
                Err(err.into())
            }
        }
    }

    /// Replace the document with freshly loaded content, as after an
    /// external (re)load. The loaded text becomes both canonical content and
    /// saved snapshot, pending throttled checks are discarded, and the
    /// structured value is re-decoded if the rich surface is active. A
    /// decode failure fails the reload and leaves state untouched.
    pub fn load_content(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        let text = text.into();

        if self.document.mode() == EditorMode::Rich {
            let value = self.codec.decode(&text)?;
            self.document.reset_content(text);
            self.document.set_structured_value(value);
        } else {
            self.document.reset_content(text);
        }

        self.plain_check.clear();
        self.rich_check.clear();
        self.dirty_flag.set(false);
        Ok(())
    }

    /// Tear the session down, unregistering the unload guard. Idempotent;
    /// also runs on drop.
    pub fn close(&mut self) {
        if !self.closed {
            self.lifecycle.unregister();
            self.closed = true;
        }
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.document.set_dirty(dirty);
        self.dirty_flag.set(dirty);
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.close();
    }
}
