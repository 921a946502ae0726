//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::DraftpadResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    manager: &ConfigManager,
    config: &Config,
) -> DraftpadResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> DraftpadResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn(
            &ctx,
            &format!(
                "Config already exists at {}. Use --force to overwrite.",
                path.display()
            ),
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    ui::step_ok(
        &ctx,
        &format!("Configuration initialized at {}", path.display()),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn config_init_writes_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path.clone());

        init_config(&manager, false).await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert!(loaded.editor.autosave);
        assert_eq!(loaded.cache.version_tag, "v1");
    }

    #[tokio::test]
    async fn config_init_respects_existing_without_force() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "[editor]\nautosave = false\n")
            .await
            .unwrap();

        let manager = ConfigManager::with_path(path.clone());
        init_config(&manager, false).await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert!(!loaded.editor.autosave);
    }
}
