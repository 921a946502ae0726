//! Init command - create project-local .draftpad.toml

use crate::cli::args::InitArgs;
use crate::config::LOCAL_CONFIG_NAME;
use crate::error::{DraftpadError, DraftpadResult};
use crate::ui::{self, UiContext};
use std::path::Path;
use tokio::fs;

/// Template for project-local config
const INIT_TEMPLATE: &str = r#"# draftpad project configuration
# Settings here override your global config (~/.config/draftpad/config.toml)

[editor]
# autosave = true
# autosave_delay_ms = 800
# export_filename = "document.txt"

[cache]
# version_tag = "v1"
# base_url = "http://localhost:8080"
# assets = ["/index.html", "/styles.css", "/manifest.webmanifest"]
# shell = "/index.html"
"#;

/// Execute the init command
pub async fn execute(args: InitArgs) -> DraftpadResult<()> {
    let ctx = UiContext::detect();

    let target_dir = match args.path {
        Some(ref p) => p.clone(),
        None => std::env::current_dir()
            .map_err(|e| DraftpadError::io("getting current directory", e))?,
    };

    let config_path = target_dir.join(LOCAL_CONFIG_NAME);

    if config_path.exists() && !args.force {
        return Err(DraftpadError::User(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        )));
    }

    ensure_dir(&target_dir).await?;

    fs::write(&config_path, INIT_TEMPLATE)
        .await
        .map_err(|e| DraftpadError::io(format!("writing {}", config_path.display()), e))?;

    ui::step_ok(
        &ctx,
        &format!("Created project config at {}", config_path.display()),
    );

    Ok(())
}

async fn ensure_dir(dir: &Path) -> DraftpadResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| DraftpadError::io(format!("creating directory {}", dir.display()), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn init_creates_config() {
        let temp = TempDir::new().unwrap();
        let args = InitArgs {
            force: false,
            path: Some(temp.path().to_path_buf()),
        };

        execute(args).await.unwrap();

        let content = tokio::fs::read_to_string(temp.path().join(LOCAL_CONFIG_NAME))
            .await
            .unwrap();
        assert!(content.contains("[editor]"));
        assert!(content.contains("[cache]"));
    }

    #[tokio::test]
    async fn init_refuses_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let args = InitArgs {
            force: false,
            path: Some(temp.path().to_path_buf()),
        };
        execute(args).await.unwrap();

        let again = InitArgs {
            force: false,
            path: Some(temp.path().to_path_buf()),
        };
        let err = execute(again).await.unwrap_err();
        assert!(matches!(err, DraftpadError::User(_)));
    }

    #[tokio::test]
    async fn init_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOCAL_CONFIG_NAME);
        tokio::fs::write(&path, "stale").await.unwrap();

        let args = InitArgs {
            force: true,
            path: Some(temp.path().to_path_buf()),
        };
        execute(args).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("[editor]"));
    }
}
