//! Seed the dish collection from a JSON file.
//!
//! Seed files use the loose legacy dish shape. Every record is normalized
//! before anything is written; records that fail normalization are reported
//! individually and skipped.

use std::path::PathBuf;

use tracing::{error, info};

use nutriplanner_admin::config::{AdminConfig, ConfigError};
use nutriplanner_admin::dishes::DishBook;
use nutriplanner_core::store::{self, JsonFileStore, StateStore, StoreError, keys};
use nutriplanner_core::{Dish, RawDish};

/// Errors raised by the seed command.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// No file argument and `NUTRIPLANNER_SEED_FILE` is unset.
    #[error("no seed file: pass --file or set NUTRIPLANNER_SEED_FILE")]
    NoSeedFile,

    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The seed file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of dish records.
    #[error("invalid dish JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Every record in the file failed normalization.
    #[error("no valid dish records in the seed file")]
    NothingValid,

    /// The store already holds dishes and `--replace` was not given.
    #[error("dish collection already has {0} dishes (use --replace to overwrite)")]
    AlreadySeeded(usize),

    /// The snapshot store could not be opened or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Import dishes from `file` into the snapshot store.
///
/// With `dry_run` the file is read, normalized, and reported, and nothing is
/// written. Without `replace`, seeding over a non-empty collection is an
/// error.
///
/// # Errors
///
/// Returns [`SeedError`] when the file is missing or malformed, when every
/// record is rejected, or when the store cannot be written.
pub async fn dishes(file: Option<PathBuf>, dry_run: bool, replace: bool) -> Result<(), SeedError> {
    let config = AdminConfig::from_env()?;
    let path = file
        .or_else(|| config.seed_file.clone())
        .ok_or(SeedError::NoSeedFile)?;

    info!(path = %path.display(), "Loading dish seed file");
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| SeedError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let records: Vec<RawDish> = serde_json::from_str(&content)?;
    info!(records = records.len(), "Parsed seed file");

    let mut dishes: Vec<Dish> = Vec::with_capacity(records.len());
    let mut rejected = 0usize;
    for (index, raw) in records.into_iter().enumerate() {
        match raw.normalize() {
            Ok(dish) => dishes.push(dish),
            Err(err) => {
                rejected += 1;
                error!("  record {index}: {err}");
            }
        }
    }

    if dishes.is_empty() {
        return Err(SeedError::NothingValid);
    }

    info!("Validation complete");
    info!("  Records accepted: {}", dishes.len());
    info!("  Records rejected: {rejected}");

    if dry_run {
        info!("Dry run: nothing written");
        return Ok(());
    }

    let file_store = JsonFileStore::open(&config.state_dir)?;
    let existing: DishBook = store::load_or_default(&file_store, keys::DISHES);
    if !existing.is_empty() && !replace {
        return Err(SeedError::AlreadySeeded(existing.len()));
    }

    let book = DishBook::from_dishes(dishes);
    let raw = serde_json::to_string(&book)?;
    file_store.save(keys::DISHES, &raw)?;
    info!(
        dishes = book.len(),
        dir = %file_store.dir().display(),
        "Dish collection seeded"
    );

    Ok(())
}
