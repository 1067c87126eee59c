use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Instant;

use corpus::{InMemoryCorpusStore, InMemoryParamsStore, InMemoryResultRepository};

use crate::config::ServerConfig;

/// Shared application state.
///
/// The corpus/params/result stores are the in-memory stand-ins from
/// `corpus::in_memory`. The real persisted-state backends named in the
/// external interfaces list are out of scope here, same as the admin CRUD
/// and upload/MIME handling that would populate them.
pub struct ServerState {
    pub config: ServerConfig,

    /// Rate limit tracking: API key -> (count, window_start)
    rate_limiter: Mutex<HashMap<String, (u32, Instant)>>,

    pub params: InMemoryParamsStore,
    pub corpus: InMemoryCorpusStore,
    pub results: InMemoryResultRepository,
    /// Seeded so the server can resolve `GET /health`/`/ready` without a
    /// corpus wired in yet.
    pub seeded: RwLock<bool>,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            rate_limiter: Mutex::new(HashMap::new()),
            params: InMemoryParamsStore::default(),
            corpus: InMemoryCorpusStore::new(),
            results: InMemoryResultRepository::new(),
            seeded: RwLock::new(false),
        }
    }

    /// Stub authentication seam. A real deployment would check a signed
    /// token or a database-backed key table here; this only recognizes the
    /// keys configured at startup.
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut guard = self.rate_limiter.lock().expect("rate limiter lock poisoned");
        let entry = guard.entry(key.to_string()).or_insert((0, now));

        if now.duration_since(entry.1) > window {
            entry.0 = 0;
            entry.1 = now;
        }

        if entry.0 >= limit {
            return false;
        }

        entry.0 += 1;
        true
    }
}
