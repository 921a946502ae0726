//! Cache command - warm, activate, inspect, and serve through the asset cache

use crate::cache::{
    AssetFetcher, AssetManifest, CacheWorker, DirResourceCache, Request, ResourceCache,
    ServeSource, UreqFetcher, WorkerPhase,
};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::{Config, ConfigManager};
use crate::error::{DraftpadError, DraftpadResult};
use crate::ui::{self, TaskSpinner, UiContext, WarmProgress};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> DraftpadResult<()> {
    if !crate::cache::is_valid_tag(&config.cache.version_tag) {
        return Err(DraftpadError::InvalidGenerationTag(
            config.cache.version_tag.clone(),
        ));
    }

    let cache: Arc<dyn ResourceCache> =
        Arc::new(DirResourceCache::new(ConfigManager::cache_dir(config)));
    let fetcher: Arc<dyn AssetFetcher> = Arc::new(UreqFetcher::new());

    match args.action {
        CacheAction::Warm => warm(config, cache, fetcher).await,
        CacheAction::Activate => activate(config, cache, fetcher).await,
        CacheAction::Status { format } => status(config, &*cache, format).await,
        CacheAction::Serve { url, accept } => serve(config, cache, fetcher, url, accept).await,
    }
}

fn manifest_for(config: &Config) -> AssetManifest {
    AssetManifest::new(config.cache.assets.clone(), config.cache.shell.clone())
}

/// Fetch every manifest asset into the configured generation.
///
/// All-or-nothing: a single failed fetch leaves no partial generation
/// behind, and an already-populated generation is left untouched.
async fn warm(
    config: &Config,
    cache: Arc<dyn ResourceCache>,
    fetcher: Arc<dyn AssetFetcher>,
) -> DraftpadResult<()> {
    let ctx = UiContext::detect();
    let manifest = manifest_for(config);
    let asset_count = manifest.len() as u64;

    let mut worker = CacheWorker::attach(
        &config.cache.version_tag,
        &config.cache.base_url,
        manifest,
        cache,
        fetcher,
    )
    .await?;

    if worker.phase() != WorkerPhase::Installing {
        ui::step_info(
            &ctx,
            &format!("Generation {} is already populated", worker.tag()),
        );
        return Ok(());
    }

    ui::intro(&ctx, "draftpad cache warm");

    let progress = WarmProgress::new(&ctx, asset_count);
    let result = worker.install_with(|path| progress.on_asset(path)).await;
    progress.finish();

    if let Err(e) = result {
        ui::outro_error(&ctx, "Cache warm failed");
        return Err(e);
    }

    ui::outro_success(
        &ctx,
        &format!(
            "Cached {} assets into generation {}",
            asset_count,
            worker.tag()
        ),
    );
    Ok(())
}

/// Make the configured generation active and prune the rest
async fn activate(
    config: &Config,
    cache: Arc<dyn ResourceCache>,
    fetcher: Arc<dyn AssetFetcher>,
) -> DraftpadResult<()> {
    let ctx = UiContext::detect();

    let mut worker = attach_populated(config, cache, fetcher).await?;

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Activating generation...");
    let pruned = match worker.activate().await {
        Ok(pruned) => pruned,
        Err(e) => {
            spinner.stop_error("Activation failed");
            return Err(e);
        }
    };
    spinner.stop(&format!("Generation {} active", worker.tag()));

    for tag in &pruned {
        ui::step_info(&ctx, &format!("Pruned stale generation {}", tag));
    }

    Ok(())
}

/// List cache generations
async fn status(
    config: &Config,
    cache: &dyn ResourceCache,
    format: OutputFormat,
) -> DraftpadResult<()> {
    let generations = cache.list_generations().await?;
    let current = &config.cache.version_tag;

    match format {
        OutputFormat::Table => {
            if generations.is_empty() {
                println!("No cache generations found.");
                return Ok(());
            }

            println!("{:<20} {:<10}", "GENERATION", "STATE");
            println!("{}", "-".repeat(30));
            for tag in &generations {
                let state = if tag == current { "current" } else { "stale" };
                println!("{:<20} {:<10}", tag, state);
            }
            println!();
            println!("Total: {} generation(s)", generations.len());
        }
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct GenerationJson<'a> {
                tag: &'a str,
                current: bool,
            }

            let rows: Vec<GenerationJson> = generations
                .iter()
                .map(|tag| GenerationJson {
                    tag,
                    current: tag == current,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            for tag in &generations {
                println!("{}", tag);
            }
        }
    }

    Ok(())
}

/// Fetch a URL through the intercept path and write the body to stdout
async fn serve(
    config: &Config,
    cache: Arc<dyn ResourceCache>,
    fetcher: Arc<dyn AssetFetcher>,
    url: String,
    accept: Option<String>,
) -> DraftpadResult<()> {
    let mut worker = attach_populated(config, cache, fetcher).await?;

    // Stdout carries only the response body, so pruning notices go to
    // stderr.
    let pruned = worker.activate().await?;
    for tag in &pruned {
        eprintln!("Pruned stale generation {}", tag);
    }

    let mut request = Request::get(url);
    if let Some(accept) = accept {
        request = request.with_accept(accept);
    }

    let response = worker.intercept(&request).await?;
    match response.source {
        ServeSource::Cache => debug!("Served from cache generation {}", worker.tag()),
        ServeSource::Network => debug!("Cache miss, served from network"),
        ServeSource::Fallback => debug!("Network failed, served the cached shell"),
    }

    std::io::stdout()
        .write_all(&response.body)
        .map_err(|e| DraftpadError::io("writing response body", e))?;
    Ok(())
}

/// Attach to the configured generation, rejecting one that was never warmed
async fn attach_populated(
    config: &Config,
    cache: Arc<dyn ResourceCache>,
    fetcher: Arc<dyn AssetFetcher>,
) -> DraftpadResult<CacheWorker> {
    let worker = CacheWorker::attach(
        &config.cache.version_tag,
        &config.cache.base_url,
        manifest_for(config),
        cache,
        fetcher,
    )
    .await?;

    if worker.phase() == WorkerPhase::Installing {
        return Err(DraftpadError::GenerationNotFound(
            config.cache.version_tag.clone(),
        ));
    }

    Ok(worker)
}
