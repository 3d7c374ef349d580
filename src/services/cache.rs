use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::RankResponse;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier cache of ranked candidate lists, keyed by the ranking user
///
/// L1 (moka) is per instance, L2 (Redis) is shared across instances.
/// Rankings may be briefly stale; a stale entry can at worst offer a
/// candidate whose proposal then fails as a duplicate.
pub struct RankingCache {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1: moka::future::Cache<String, Arc<RankResponse>>,
    ttl_secs: u64,
}

impl RankingCache {
    /// Connect to Redis and size the in-process tier
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1 = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1,
            ttl_secs,
        })
    }

    /// Cached ranking for `user_id`, L1 first, then L2
    pub async fn get(&self, user_id: &str) -> Result<Option<RankResponse>, CacheError> {
        let key = ranking_key(user_id);

        if let Some(hit) = self.l1.get(&key).await {
            tracing::trace!("L1 ranking hit: {}", user_id);
            return Ok(Some(hit.as_ref().clone()));
        }

        let value: Option<String> = {
            let mut conn = self.redis.lock().await;
            redis::cmd("GET").arg(&key).query_async(&mut *conn).await?
        };

        let Some(json) = value else {
            tracing::trace!("Ranking miss: {}", user_id);
            return Ok(None);
        };

        let ranking: RankResponse = serde_json::from_str(&json)?;
        tracing::trace!("L2 ranking hit: {}", user_id);
        self.l1.insert(key, Arc::new(ranking.clone())).await;

        Ok(Some(ranking))
    }

    /// Store a ranking in both tiers under its `user_id`
    pub async fn put(&self, ranking: &RankResponse) -> Result<(), CacheError> {
        let key = ranking_key(&ranking.user_id);
        let json = serde_json::to_string(ranking)?;

        self.l1.insert(key.clone(), Arc::new(ranking.clone())).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(&key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;

        Ok(())
    }

    /// Drop cached rankings for every user in `user_ids`
    pub async fn invalidate(&self, user_ids: &[&str]) -> Result<(), CacheError> {
        if user_ids.is_empty() {
            return Ok(());
        }

        let keys: Vec<String> = user_ids.iter().map(|id| ranking_key(id)).collect();
        for key in &keys {
            self.l1.invalidate(key).await;
        }

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL").arg(&keys).query_async::<()>(&mut *conn).await?;

        tracing::debug!("Invalidated rankings for {:?}", user_ids);
        Ok(())
    }
}

/// Redis key of a user's ranked candidates
pub fn ranking_key(user_id: &str) -> String {
    format!("ranking:{}", user_id)
}
