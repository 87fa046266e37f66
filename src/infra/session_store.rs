//! Server-side session storage.
//!
//! Sessions map an opaque cookie value to a `SessionUser`. Expiry is
//! sliding: each successful lookup pushes it out by the configured TTL.

use async_trait::async_trait;

use super::cache::Cache;
use crate::config::CACHE_PREFIX_SESSION;
use crate::domain::SessionUser;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a session for `ttl_seconds`.
    async fn save(&self, session_id: &str, user: &SessionUser, ttl_seconds: u64) -> AppResult<()>;

    /// Fetch a live session and extend its expiry.
    async fn load_and_refresh(
        &self,
        session_id: &str,
        ttl_seconds: u64,
    ) -> AppResult<Option<SessionUser>>;

    /// Remove a session. Unknown ids are not an error.
    async fn delete(&self, session_id: &str) -> AppResult<()>;

    /// Connectivity check for `/health`.
    async fn ping(&self) -> AppResult<()>;
}

/// Redis-backed session store.
#[derive(Clone)]
pub struct RedisSessionStore {
    cache: Cache,
}

impl RedisSessionStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

pub(crate) fn session_key(session_id: &str) -> String {
    format!("{}{}", CACHE_PREFIX_SESSION, session_id)
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, session_id: &str, user: &SessionUser, ttl_seconds: u64) -> AppResult<()> {
        self.cache
            .set_with_ttl(&session_key(session_id), user, ttl_seconds)
            .await
    }

    async fn load_and_refresh(
        &self,
        session_id: &str,
        ttl_seconds: u64,
    ) -> AppResult<Option<SessionUser>> {
        self.cache
            .get_and_touch(&session_key(session_id), ttl_seconds)
            .await
    }

    async fn delete(&self, session_id: &str) -> AppResult<()> {
        self.cache.delete(&session_key(session_id)).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.cache.ping().await
    }
}
