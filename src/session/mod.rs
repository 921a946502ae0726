//! Editor session: persistence, autosave, status, and install flow

pub mod editor;
pub mod install;
pub mod shortcuts;
pub mod status;
pub mod store;

pub use editor::{DocumentExport, EditorSession, SaveState, EXPORT_MEDIA_TYPE};
pub use install::{InstallDecision, InstallFlow, InstallHost, InstallOffer};
pub use shortcuts::{dispatch, KeyCombo, ShortcutAction, ShortcutBinding};
pub use status::{StatusLine, StatusSignal};
pub use store::{DocumentStore, FileDocumentStore, MemoryDocumentStore};
