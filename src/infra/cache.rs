//! Redis-backed counters for the rate limiter.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use crate::config::{Config, CACHE_PREFIX_RATE_LIMIT};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client = Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self { connection }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self { connection })
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    /// Count a request against a fixed rate limit window.
    ///
    /// Returns the current count within the window and whether the request
    /// is still allowed.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        // Check if key exists
        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            // First request in window
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        // Increment counter
        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}
