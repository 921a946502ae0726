//! Editor session: buffer, debounced autosave, and document operations
//!
//! The session keeps the visible buffer and the persisted content
//! consistent. Autosave is a debounce, not a throttle: every edit
//! replaces the stored timer handle, so only the last edit in a burst
//! triggers a save, timed from that edit.

use crate::error::{DraftpadError, DraftpadResult};
use crate::session::status::{StatusLine, StatusSignal};
use crate::session::store::DocumentStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Media type for exported documents
pub const EXPORT_MEDIA_TYPE: &str = "text/plain";

/// Save-state of the buffer relative to the persistent store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Buffer matches persisted content
    Clean,
    /// Edit occurred, autosave timer running
    DirtyPending,
    /// Edit occurred, autosave disabled
    DirtyUnsaved,
}

/// A serialized document handed to the environment for export
#[derive(Debug, Clone)]
pub struct DocumentExport {
    pub filename: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

struct Inner {
    buffer: String,
    save_state: SaveState,
    status: StatusLine,
    autosave_enabled: bool,
    autosave_timer: Option<JoinHandle<()>>,
    store: Arc<dyn DocumentStore>,
}

impl Inner {
    /// Cancellation is "replace the stored timer handle": the previous
    /// timer is aborted, never left to fire against a newer edit.
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.autosave_timer.take() {
            timer.abort();
        }
    }
}

/// Write the buffer through to the store and return to `Clean`
async fn flush(inner: &mut Inner, silent: bool) -> DraftpadResult<()> {
    let store = Arc::clone(&inner.store);
    store.save(&inner.buffer).await?;
    inner.save_state = SaveState::Clean;
    if !silent {
        inner.status.raise(StatusSignal::Saved);
    }
    Ok(())
}

/// The client-side persistence and UI-status state machine
pub struct EditorSession {
    inner: Arc<Mutex<Inner>>,
    debounce: Duration,
    export_filename: String,
}

impl EditorSession {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        debounce: Duration,
        autosave_enabled: bool,
        export_filename: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                buffer: String::new(),
                save_state: SaveState::Clean,
                status: StatusLine::new(),
                autosave_enabled,
                autosave_timer: None,
                store,
            })),
            debounce,
            export_filename: export_filename.into(),
        }
    }

    /// Replace the buffer with the persisted content. Called once at
    /// startup; an absent entry is an empty document.
    pub async fn load(&self) -> DraftpadResult<()> {
        let mut inner = self.inner.lock().await;
        let store = Arc::clone(&inner.store);
        inner.buffer = store.load().await?.unwrap_or_default();
        inner.save_state = SaveState::Clean;
        inner.status.raise(StatusSignal::Loaded);
        Ok(())
    }

    /// Apply an edit to the buffer
    pub async fn edit(&self, content: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.buffer = content.into();
        inner.cancel_timer();

        if inner.autosave_enabled {
            inner.save_state = SaveState::DirtyPending;
            inner.status.raise(StatusSignal::Editing);
            self.schedule_autosave(&mut inner);
        } else {
            inner.save_state = SaveState::DirtyUnsaved;
            inner.status.raise(StatusSignal::Unsaved);
        }
    }

    /// Unconditional overwrite save. Supersedes any pending autosave.
    pub async fn save(&self, silent: bool) -> DraftpadResult<()> {
        let mut inner = self.inner.lock().await;
        inner.cancel_timer();
        flush(&mut inner, silent).await
    }

    /// Toggle autosave. Disabling cancels any running timer; enabling
    /// with a dirty buffer schedules a save so edits are not stranded.
    pub async fn set_autosave(&self, enabled: bool) {
        let mut inner = self.inner.lock().await;
        inner.autosave_enabled = enabled;

        if enabled {
            if inner.save_state != SaveState::Clean {
                inner.cancel_timer();
                inner.save_state = SaveState::DirtyPending;
                self.schedule_autosave(&mut inner);
            }
        } else {
            inner.cancel_timer();
            if inner.save_state == SaveState::DirtyPending {
                inner.save_state = SaveState::DirtyUnsaved;
                inner.status.raise(StatusSignal::Unsaved);
            }
        }
    }

    /// Replace the buffer with decoded file content and save.
    /// A decode failure leaves the buffer untouched.
    pub async fn open_file(&self, bytes: &[u8]) -> DraftpadResult<()> {
        let mut inner = self.inner.lock().await;

        let text = match String::from_utf8(bytes.to_vec()) {
            Ok(text) => text,
            Err(e) => {
                inner.status.raise(StatusSignal::OpenFailed);
                return Err(DraftpadError::DecodeFailure(e.utf8_error().to_string()));
            }
        };

        inner.cancel_timer();
        inner.buffer = text;
        flush(&mut inner, true).await?;
        inner.status.raise(StatusSignal::Opened);
        Ok(())
    }

    /// Clear the buffer and persist the empty document. The caller is
    /// responsible for the destructive-action confirmation when the
    /// buffer is non-empty.
    pub async fn new_document(&self) -> DraftpadResult<()> {
        let mut inner = self.inner.lock().await;
        inner.cancel_timer();
        inner.buffer.clear();
        flush(&mut inner, false).await
    }

    /// Clear the buffer AND delete the store entry. Unlike
    /// `new_document`, no persisted entry remains afterwards.
    pub async fn clear_saved(&self) -> DraftpadResult<()> {
        let mut inner = self.inner.lock().await;
        inner.cancel_timer();
        inner.buffer.clear();
        let store = Arc::clone(&inner.store);
        store.clear().await?;
        inner.save_state = SaveState::Clean;
        inner.status.raise(StatusSignal::Cleared);
        Ok(())
    }

    /// Serialize the buffer for user-driven export. Persisted state is
    /// unaffected.
    pub async fn download(&self) -> DocumentExport {
        let mut inner = self.inner.lock().await;
        inner.status.raise(StatusSignal::Downloaded);
        DocumentExport {
            filename: self.export_filename.clone(),
            media_type: EXPORT_MEDIA_TYPE,
            bytes: inner.buffer.clone().into_bytes(),
        }
    }

    pub async fn buffer(&self) -> String {
        self.inner.lock().await.buffer.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.buffer.is_empty()
    }

    pub async fn save_state(&self) -> SaveState {
        self.inner.lock().await.save_state
    }

    pub async fn autosave_enabled(&self) -> bool {
        self.inner.lock().await.autosave_enabled
    }

    pub async fn status(&self) -> Option<StatusSignal> {
        self.inner.lock().await.status.signal()
    }

    pub async fn status_emphasized(&self) -> bool {
        self.inner.lock().await.status.emphasized()
    }

    /// Start the fixed-delay autosave timer. When it fires
    /// uninterrupted, the buffer is saved silently: the "Saved" status
    /// never flashes for an autosave.
    fn schedule_autosave(&self, inner: &mut Inner) {
        let shared = Arc::clone(&self.inner);
        let delay = self.debounce;
        inner.autosave_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = shared.lock().await;
            match flush(&mut inner, true).await {
                Ok(()) => debug!("Autosaved {} bytes", inner.buffer.len()),
                // Edits stay in the buffer; the worst case is an
                // unpersisted session, never a crash.
                Err(e) => warn!("Autosave failed: {}", e),
            }
            inner.autosave_timer = None;
        }));
    }
}
