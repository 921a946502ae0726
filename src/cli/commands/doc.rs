//! Document commands - show, write, open, new, clear, export, status, autosave

use crate::cache::{DirResourceCache, ResourceCache};
use crate::cli::args::{
    AutosaveArgs, AutosaveState, ClearArgs, ExportArgs, NewArgs, OpenArgs, OutputFormat,
    StatusArgs, WriteArgs,
};
use crate::config::{Config, ConfigManager};
use crate::error::{DraftpadError, DraftpadResult};
use crate::session::{EditorSession, FileDocumentStore, SaveState};
use crate::ui::{self, UiContext};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Build an editor session over the persisted document.
fn open_session(config: &Config) -> EditorSession {
    let store = Arc::new(FileDocumentStore::new(ConfigManager::document_path(config)));
    EditorSession::new(
        store,
        Duration::from_millis(config.editor.autosave_delay_ms),
        config.editor.autosave,
        config.editor.export_filename.clone(),
    )
}

/// Print the saved document to stdout
pub async fn show(config: &Config) -> DraftpadResult<()> {
    let session = open_session(config);
    session.load().await?;

    let buffer = session.buffer().await;
    if !buffer.is_empty() {
        println!("{}", buffer);
    }

    Ok(())
}

/// Replace the document content and save
pub async fn write(args: WriteArgs, config: &Config) -> DraftpadResult<()> {
    let ctx = UiContext::detect();

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|e| DraftpadError::io("reading stdin", e))?;
            buf
        }
    };

    let session = open_session(config);
    session.edit(text).await;
    session.save(false).await?;

    emit_status(&ctx, &session).await;
    Ok(())
}

/// Open a text file into the document
pub async fn open(args: OpenArgs, config: &Config) -> DraftpadResult<()> {
    let ctx = UiContext::detect();

    let bytes = tokio::fs::read(&args.file).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DraftpadError::PathNotFound(args.file.clone())
        } else {
            DraftpadError::io(format!("reading {}", args.file.display()), e)
        }
    })?;

    let session = open_session(config);
    session.load().await?;
    session.open_file(&bytes).await?;

    emit_status(&ctx, &session).await;
    Ok(())
}

/// Start a new empty document. The saved entry persists, but empty.
pub async fn new(args: NewArgs, config: &Config) -> DraftpadResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);

    let session = open_session(config);
    session.load().await?;

    if !session.is_empty().await
        && !ui::confirm(&ctx, "Discard the current document?", false).await?
    {
        ui::step_info(&ctx, "Cancelled");
        return Ok(());
    }

    session.new_document().await?;
    emit_status(&ctx, &session).await;
    Ok(())
}

/// Clear the document and delete the saved entry
pub async fn clear(args: ClearArgs, config: &Config) -> DraftpadResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);

    let session = open_session(config);
    session.load().await?;

    if !session.is_empty().await
        && !ui::confirm(&ctx, "Delete the saved document?", false).await?
    {
        ui::step_info(&ctx, "Cancelled");
        return Ok(());
    }

    session.clear_saved().await?;
    emit_status(&ctx, &session).await;
    Ok(())
}

/// Export the document to a file
pub async fn export(args: ExportArgs, config: &Config) -> DraftpadResult<()> {
    let ctx = UiContext::detect();

    let session = open_session(config);
    session.load().await?;

    let export = session.download().await;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&export.filename));

    tokio::fs::write(&path, &export.bytes)
        .await
        .map_err(|e| DraftpadError::io(format!("writing {}", path.display()), e))?;

    ui::step_ok(
        &ctx,
        &format!("Exported {} bytes to {}", export.bytes.len(), path.display()),
    );
    Ok(())
}

/// Show document and cache state
pub async fn status(args: StatusArgs, config: &Config) -> DraftpadResult<()> {
    let session = open_session(config);
    session.load().await?;

    let document_path = ConfigManager::document_path(config);
    let cache = DirResourceCache::new(ConfigManager::cache_dir(config));

    let report = StatusReport {
        document_bytes: session.buffer().await.len(),
        saved_entry: document_path.exists(),
        autosave: config.editor.autosave,
        autosave_delay_ms: config.editor.autosave_delay_ms,
        cache_generation: config.cache.version_tag.clone(),
        cached_generations: cache.list_generations().await?,
    };

    match args.format {
        OutputFormat::Table => print_status_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_status_plain(&report),
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct StatusReport {
    document_bytes: usize,
    saved_entry: bool,
    autosave: bool,
    autosave_delay_ms: u64,
    cache_generation: String,
    cached_generations: Vec<String>,
}

fn print_status_table(report: &StatusReport) {
    let ctx = UiContext::detect();

    ui::key_value(&ctx, "Document", &format!("{} bytes", report.document_bytes));
    ui::key_value(
        &ctx,
        "Saved entry",
        if report.saved_entry { "present" } else { "absent" },
    );
    ui::key_value(
        &ctx,
        "Autosave",
        &if report.autosave {
            format!("on ({} ms debounce)", report.autosave_delay_ms)
        } else {
            "off".to_string()
        },
    );
    ui::key_value(&ctx, "Cache generation", &report.cache_generation);
    ui::key_value(
        &ctx,
        "Cached generations",
        &if report.cached_generations.is_empty() {
            "none".to_string()
        } else {
            report.cached_generations.join(", ")
        },
    );
}

fn print_status_plain(report: &StatusReport) {
    println!("document_bytes {}", report.document_bytes);
    println!("saved_entry {}", report.saved_entry);
    println!("autosave {}", report.autosave);
    println!("autosave_delay_ms {}", report.autosave_delay_ms);
    println!("cache_generation {}", report.cache_generation);
    for tag in &report.cached_generations {
        println!("cached_generation {}", tag);
    }
}

/// Toggle debounced autosave in the global config
pub async fn autosave(args: AutosaveArgs, manager: &ConfigManager) -> DraftpadResult<()> {
    let ctx = UiContext::detect();

    // Edit the global file directly so a local .draftpad.toml overlay
    // never gets baked into it.
    let mut config = manager.load().await?;
    let enabled = args.state == AutosaveState::On;
    config.editor.autosave = enabled;
    manager.save(&config).await?;

    if enabled {
        ui::step_ok(
            &ctx,
            &format!(
                "Autosave on ({} ms debounce)",
                config.editor.autosave_delay_ms
            ),
        );
    } else {
        ui::step_warn(&ctx, "Autosave off; save explicitly with `draftpad write`");
    }

    Ok(())
}

async fn emit_status(ctx: &UiContext, session: &EditorSession) {
    if let Some(signal) = session.status().await {
        ui::status_line(ctx, signal, session.status_emphasized().await);
    }
    if session.save_state().await == SaveState::DirtyUnsaved {
        ui::step_warn(ctx, "Buffer has unsaved changes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.general.state_dir = Some(dir.to_path_buf());
        config
    }

    #[tokio::test]
    async fn write_then_show_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = temp_config(temp.path());
        ConfigManager::ensure_state_dirs(&config).await.unwrap();

        let args = WriteArgs {
            text: Some("hello".to_string()),
        };
        write(args, &config).await.unwrap();

        let session = open_session(&config);
        session.load().await.unwrap();
        assert_eq!(session.buffer().await, "hello");
    }

    #[tokio::test]
    async fn clear_removes_saved_entry() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = temp_config(temp.path());
        ConfigManager::ensure_state_dirs(&config).await.unwrap();

        let args = WriteArgs {
            text: Some("scratch".to_string()),
        };
        write(args, &config).await.unwrap();
        assert!(ConfigManager::document_path(&config).exists());

        clear(ClearArgs { yes: true }, &config).await.unwrap();
        assert!(!ConfigManager::document_path(&config).exists());
    }

    #[tokio::test]
    async fn new_keeps_empty_entry() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = temp_config(temp.path());
        ConfigManager::ensure_state_dirs(&config).await.unwrap();

        write(
            WriteArgs {
                text: Some("draft".to_string()),
            },
            &config,
        )
        .await
        .unwrap();

        new(NewArgs { yes: true }, &config).await.unwrap();

        let path = ConfigManager::document_path(&config);
        assert!(path.exists());
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");
    }

    #[tokio::test]
    async fn export_writes_requested_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = temp_config(temp.path());
        ConfigManager::ensure_state_dirs(&config).await.unwrap();

        write(
            WriteArgs {
                text: Some("take this offline".to_string()),
            },
            &config,
        )
        .await
        .unwrap();

        let out = temp.path().join("out.txt");
        export(
            ExportArgs {
                output: Some(out.clone()),
            },
            &config,
        )
        .await
        .unwrap();

        assert_eq!(
            tokio::fs::read_to_string(&out).await.unwrap(),
            "take this offline"
        );
    }

    #[tokio::test]
    async fn open_rejects_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = temp_config(temp.path());
        ConfigManager::ensure_state_dirs(&config).await.unwrap();

        let err = open(
            OpenArgs {
                file: temp.path().join("nope.txt"),
            },
            &config,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DraftpadError::PathNotFound(_)));
    }
}
