use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chirpy_db::Store;

use crate::error::StoreCallError;
use crate::filter::ContentFilter;

pub type AppState = Arc<AppStateInner>;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Deployment mode. Only `Dev` may run destructive admin operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Dev,
    Other,
}

impl Platform {
    pub fn from_flag(flag: &str) -> Self {
        if flag == "dev" { Platform::Dev } else { Platform::Other }
    }
}

pub struct AppStateInner {
    pub store: Arc<dyn Store>,
    pub platform: Platform,
    pub filter: ContentFilter,
    pub store_timeout: Duration,
    /// Requests served under `/app`.
    hits: AtomicU64,
}

impl AppStateInner {
    pub fn new(store: Arc<dyn Store>, platform: Platform) -> Self {
        Self {
            store,
            platform,
            filter: ContentFilter::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            hits: AtomicU64::new(0),
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn record_hit(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Run a blocking store operation off the async runtime, bounded by
    /// `store_timeout`.
    ///
    /// On timeout the blocking call keeps running to completion on its pool
    /// thread; its result is dropped.
    pub async fn call_store<F, T>(&self, op: &'static str, f: F) -> Result<T, StoreCallError>
    where
        F: FnOnce(&dyn Store) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        let task = tokio::task::spawn_blocking(move || f(store.as_ref()));

        match tokio::time::timeout(self.store_timeout, task).await {
            Err(_) => Err(StoreCallError::Timeout(op, self.store_timeout)),
            Ok(joined) => joined?.map_err(|e| StoreCallError::Store(op, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirpy_db::MemoryStore;

    fn state() -> AppStateInner {
        AppStateInner::new(Arc::new(MemoryStore::new()), Platform::Dev)
    }

    #[test]
    fn platform_flag_is_exact() {
        assert_eq!(Platform::from_flag("dev"), Platform::Dev);
        assert_eq!(Platform::from_flag("DEV"), Platform::Other);
        assert_eq!(Platform::from_flag(""), Platform::Other);
        assert_eq!(Platform::from_flag("production"), Platform::Other);
    }

    #[test]
    fn hits_start_at_zero() {
        let s = state();
        assert_eq!(s.hits(), 0);
        assert_eq!(s.record_hit(), 1);
        assert_eq!(s.record_hit(), 2);
        assert_eq!(s.hits(), 2);
    }

    #[tokio::test]
    async fn call_store_passes_results_and_errors() {
        let s = state();
        let user = s.call_store("create_user", |st| st.create_user("a@example.com")).await.unwrap();
        assert_eq!(user.email, "a@example.com");

        let dup = s.call_store("create_user", |st| st.create_user("a@example.com")).await;
        assert!(matches!(dup, Err(StoreCallError::Store("create_user", _))));
    }

    #[tokio::test]
    async fn call_store_times_out() {
        let s = state().with_store_timeout(Duration::from_millis(20));
        let res = s
            .call_store("slow", |_| {
                std::thread::sleep(Duration::from_millis(200));
                Ok(())
            })
            .await;
        assert!(matches!(res, Err(StoreCallError::Timeout("slow", _))));
    }
}
