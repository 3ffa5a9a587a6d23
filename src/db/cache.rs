use std::fmt::Display;

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Generated narrative for a (dish, wine) pair
    Narrative { dish: String, wine: String },
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Narrative { dish, wine } => {
                write!(f, "narrative:{}:{}", dish.to_lowercase(), wine.to_lowercase())
            }
        }
    }
}

/// Redis-backed cache with a disabled mode
///
/// When no Redis URL is configured the cache runs disabled: gets miss
/// and sets are no-ops, so the service (and its tests) work without a
/// Redis instance.
#[derive(Clone)]
pub enum Cache {
    Redis(Client),
    Disabled,
}

impl Cache {
    /// Opens a Redis-backed cache
    pub fn open(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url)?;
        Ok(Cache::Redis(client))
    }

    /// A cache that never hits and never stores
    pub fn disabled() -> Self {
        Cache::Disabled
    }

    /// Retrieves a cached value by key, `None` on miss
    pub async fn get<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let client = match self {
            Cache::Redis(client) => client,
            Cache::Disabled => return Ok(None),
        };

        let mut conn = client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(key.to_string()).await?;

        match cached {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Stores a value with a TTL in seconds
    pub async fn set<T: serde::Serialize>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: u64,
    ) -> AppResult<()> {
        let client = match self {
            Cache::Redis(client) => client,
            Cache::Disabled => return Ok(()),
        };

        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Cache serialization error: {}", e)))?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key.to_string(), json, ttl).await?;

        tracing::debug!(key = %key, ttl = ttl, "Cached value");
        Ok(())
    }
}
