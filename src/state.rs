use std::sync::Arc;

use crate::{
    auth::TokenService,
    config::Config,
    db::{Cache, MemoryStore, Store},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub cache: Cache,
    pub tokens: TokenService,
    /// Lifetime of cached read responses, in seconds
    pub cache_ttl: u64,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, cache: Cache, config: &Config) -> Self {
        Self {
            store,
            cache,
            tokens: TokenService::new(
                &config.jwt_secret,
                config.access_token_ttl_secs,
                config.refresh_token_ttl_secs,
            ),
            cache_ttl: config.cache_ttl_secs,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// State backed by an empty in-process store with caching disabled
    ///
    /// Uses the cheapest bcrypt cost, which keeps test suites fast.
    pub fn in_memory(jwt_secret: &str) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            cache: Cache::disabled(),
            tokens: TokenService::new(jwt_secret, 300, 86_400),
            cache_ttl: 60,
            bcrypt_cost: 4,
        }
    }
}
