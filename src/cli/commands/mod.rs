//! CLI command implementations

pub mod cache;
pub mod config;
pub mod doc;
pub mod init;
pub mod install;

pub use cache::execute as cache;
pub use config::execute as config;
pub use doc::{autosave, clear, export, new, open, show, status, write};
pub use init::execute as init;
pub use install::execute as install;
