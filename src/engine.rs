//! Engine facade: top-level API for the guessing game.
//!
//! The `Engine` owns the immutable catalog and the game configuration. It
//! holds no per-session state: every turn takes a [`Session`](crate::game::Session)
//! by value and hands back the updated one, so a single engine can serve any
//! number of concurrent games.

use std::path::Path;
use std::sync::Arc;

use crate::catalog::{Catalog, RawCatalog};
use crate::config::GameConfig;
use crate::error::GuessResult;

/// The guessing engine.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
    config: GameConfig,
}

impl Engine {
    /// Build the catalog tables from raw records.
    pub fn new(raw: &RawCatalog, config: GameConfig) -> Self {
        Self::with_catalog(Arc::new(Catalog::build(raw)), config)
    }

    /// Share an already-built catalog.
    pub fn with_catalog(catalog: Arc<Catalog>, config: GameConfig) -> Self {
        tracing::info!(
            words = catalog.database().len(),
            attributes = catalog.schema().len(),
            total_questions = config.total_questions(),
            max_questions = config.max_questions(),
            "initializing guesswork engine"
        );
        if catalog.is_empty() {
            tracing::warn!("catalog is empty, every game will fail");
        }
        Self { catalog, config }
    }

    /// Load the catalog from a JSON file.
    pub fn from_path(path: &Path, config: GameConfig) -> GuessResult<Self> {
        let raw = RawCatalog::load(path)?;
        Ok(Self::new(&raw, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog.
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn engines_share_one_catalog() {
        let raw = RawCatalog::from_value(json!({"chat": {"vivant": 5}}));
        let a = Engine::new(&raw, GameConfig::default());
        let b = Engine::with_catalog(
            a.shared_catalog(),
            GameConfig {
                total_questions: 8,
                ..Default::default()
            },
        );
        assert!(Arc::ptr_eq(&a.shared_catalog(), &b.shared_catalog()));
        assert_eq!(b.config().total_questions(), 8);
        assert_eq!(a.catalog().database().len(), 1);
    }

    #[test]
    fn missing_catalog_file_fails() {
        let err = Engine::from_path(Path::new("/nonexistent/words.json"), GameConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::GuessError::Catalog(crate::error::CatalogError::Read { .. })
        ));
    }
}
