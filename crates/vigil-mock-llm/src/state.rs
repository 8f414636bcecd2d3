//! Application state for the mock completion service.

use std::collections::HashSet;
use std::sync::Mutex;

/// Shared state: the set of live conversation threads.
pub struct AppState {
    threads: Mutex<HashSet<String>>,

    /// Server start time (for health checks)
    start_time: std::time::Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            threads: Mutex::new(HashSet::new()),
            start_time: std::time::Instant::now(),
        }
    }

    /// Register a thread id, minting a fresh one when the caller has none.
    pub fn ensure_thread(&self, requested: Option<String>) -> String {
        let id = requested.unwrap_or_else(|| format!("thread-{}", uuid::Uuid::new_v4()));
        self.threads.lock().unwrap().insert(id.clone());
        id
    }

    /// Remove a thread. Returns false when the id was never issued (or was
    /// already released).
    pub fn release_thread(&self, id: &str) -> bool {
        self.threads.lock().unwrap().remove(id)
    }

    pub fn live_threads(&self) -> usize {
        self.threads.lock().unwrap().len()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_thread_mints_and_reuses_ids() {
        let state = AppState::new();

        let fresh = state.ensure_thread(None);
        assert!(fresh.starts_with("thread-"));
        assert_eq!(state.live_threads(), 1);

        let reused = state.ensure_thread(Some(fresh.clone()));
        assert_eq!(reused, fresh);
        assert_eq!(state.live_threads(), 1);
    }

    #[test]
    fn release_is_single_shot() {
        let state = AppState::new();
        let id = state.ensure_thread(None);

        assert!(state.release_thread(&id));
        assert!(!state.release_thread(&id));
        assert_eq!(state.live_threads(), 0);
    }
}
