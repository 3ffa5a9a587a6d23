use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    config::Config,
    db::Cache,
    error::AppResult,
    models::{DishRecord, WineEntry},
    services::{CatalogSource, CsvCatalog, DishSource, GeminiGenerator, MongoDishSource, NarrativeGenerator},
};

/// Identifies the data sources a session snapshot was loaded from
///
/// Built from the sources' connection parameters; a snapshot whose key
/// no longer matches the configured sources is stale and reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub catalog: String,
    pub dishes: String,
}

/// Immutable snapshot of the loaded catalog and dish data
pub struct SessionData {
    pub key: SourceKey,
    pub catalog: Vec<WineEntry>,
    /// Sorted distinct lowercase wine types present in the catalog
    pub wine_types: Vec<String>,
    pub dishes: Vec<DishRecord>,
    pub loaded_at: DateTime<Utc>,
}

impl SessionData {
    /// Sorted distinct dish categories
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.dishes.iter().map(|d| d.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Sorted dish names within a category
    pub fn dishes_in_category(&self, category: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .dishes
            .iter()
            .filter(|d| d.category == category)
            .map(|d| d.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn find_dish(&self, name: &str) -> Option<&DishRecord> {
        self.dishes.iter().find(|d| d.name == name)
    }

    /// The selected wine by name, case-insensitively
    pub fn find_wine(&self, name: &str) -> Option<&WineEntry> {
        let name = name.to_lowercase();
        self.catalog.iter().find(|w| w.wine.to_lowercase() == name)
    }
}

/// Explicit session-wide cache of catalog and dish data
///
/// Replaces implicit process-wide memoization with a cache keyed by the
/// sources' connection parameters and an explicit `invalidate` trigger.
#[derive(Clone)]
pub struct SessionCache {
    catalog_source: Arc<dyn CatalogSource>,
    dish_source: Arc<dyn DishSource>,
    inner: Arc<RwLock<Option<Arc<SessionData>>>>,
}

impl SessionCache {
    pub fn new(catalog_source: Arc<dyn CatalogSource>, dish_source: Arc<dyn DishSource>) -> Self {
        Self {
            catalog_source,
            dish_source,
            inner: Arc::new(RwLock::new(None)),
        }
    }

    fn current_key(&self) -> SourceKey {
        SourceKey {
            catalog: self.catalog_source.describe(),
            dishes: self.dish_source.describe(),
        }
    }

    /// Returns the cached snapshot, loading it on first use or after
    /// invalidation
    pub async fn snapshot(&self) -> AppResult<Arc<SessionData>> {
        let key = self.current_key();

        if let Some(data) = self.inner.read().await.as_ref() {
            if data.key == key {
                return Ok(Arc::clone(data));
            }
        }

        let mut guard = self.inner.write().await;
        // Another request may have loaded while we waited for the lock
        if let Some(data) = guard.as_ref() {
            if data.key == key {
                return Ok(Arc::clone(data));
            }
        }

        let data = Arc::new(self.load(key).await?);
        *guard = Some(Arc::clone(&data));
        Ok(data)
    }

    /// Drops the cached snapshot; the next `snapshot` call reloads
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
        tracing::info!("Session cache invalidated");
    }

    async fn load(&self, key: SourceKey) -> AppResult<SessionData> {
        let catalog = self.catalog_source.load_catalog().await?;
        let dishes = self.dish_source.load_dishes().await?;

        let mut wine_types: Vec<String> =
            catalog.iter().map(|w| w.wine_type.to_lowercase()).collect();
        wine_types.sort();
        wine_types.dedup();

        tracing::info!(
            wines = catalog.len(),
            dishes = dishes.len(),
            wine_types = wine_types.len(),
            "Session data loaded"
        );

        Ok(SessionData {
            key,
            catalog,
            wine_types,
            dishes,
            loaded_at: Utc::now(),
        })
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionCache,
    pub narrator: Arc<dyn NarrativeGenerator>,
    pub cache: Cache,
}

impl AppState {
    /// Wires sources, narrative generator, and caches from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog_source = Arc::new(CsvCatalog::new(&config.catalog_path));
        let dish_source = Arc::new(MongoDishSource::new(
            config.mongodb_url.clone(),
            config.mongodb_database.clone(),
            config.mongodb_collection.clone(),
        ));

        let narrator = Arc::new(GeminiGenerator::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
        ));

        let cache = match &config.redis_url {
            Some(url) => Cache::open(url)?,
            None => {
                tracing::info!("No Redis URL configured, narrative cache disabled");
                Cache::disabled()
            }
        };

        Ok(Self {
            sessions: SessionCache::new(catalog_source, dish_source),
            narrator,
            cache,
        })
    }
}
