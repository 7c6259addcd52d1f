//! Mock directory client for testing.

use super::traits::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// Address reported by the mock directory.
pub const MOCK_ADDRESS: &str = "0x00000000000000000000000000000000000000aa";

/// In-memory directory for tests.
#[derive(Clone)]
pub struct MockDirectory {
    state: Arc<Mutex<MockState>>,
}

struct MockState {
    entries: HashMap<String, Vec<u8>>,
    available: bool,
    reject_writes: bool,
    /// Keys whose reads fail with a backend error.
    failing_reads: Vec<String>,
    /// Every successful `set`, in order.
    writes: Vec<String>,
    /// Barrier that reads of a particular key wait on (race reproduction).
    read_barrier: Option<(String, Arc<Barrier>)>,
}

impl MockDirectory {
    /// Create new, available, empty mock directory.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                entries: HashMap::new(),
                available: true,
                reject_writes: false,
                failing_reads: Vec::new(),
                writes: Vec::new(),
                read_barrier: None,
            })),
        }
    }

    /// Put a raw payload (for test setup, e.g. corrupt JSON).
    pub fn put_raw(&self, key: &str, value: &[u8]) {
        let mut s = self.state.lock().unwrap();
        s.entries.insert(key.to_string(), value.to_vec());
    }

    /// Raw payload currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().entries.get(key).cloned()
    }

    /// Toggle the readiness check result.
    pub fn set_available(&self, available: bool) {
        self.state.lock().unwrap().available = available;
    }

    /// Make every subsequent write fail.
    pub fn reject_writes(&self, reject: bool) {
        self.state.lock().unwrap().reject_writes = reject;
    }

    /// Make reads of `key` fail with a backend error.
    pub fn fail_reads_of(&self, key: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_reads
            .push(key.to_string());
    }

    /// Hold reads of `key` until `parties` readers have arrived.
    ///
    /// Used to line up concurrent read-modify-write cycles deterministically.
    pub fn hold_reads_of(&self, key: &str, parties: usize) {
        self.state.lock().unwrap().read_barrier =
            Some((key.to_string(), Arc::new(Barrier::new(parties))));
    }

    /// Keys written so far, in write order.
    pub fn writes(&self) -> Vec<String> {
        self.state.lock().unwrap().writes.clone()
    }
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryClient for MockDirectory {
    async fn is_available(&self) -> DirectoryResult<bool> {
        Ok(self.state.lock().unwrap().available)
    }

    async fn get(&self, key: &str) -> DirectoryResult<Vec<u8>> {
        let barrier = {
            let state = self.state.lock().unwrap();
            if state.failing_reads.iter().any(|k| k == key) {
                return Err(DirectoryError::Backend(format!("read of {} failed", key)));
            }
            state
                .read_barrier
                .as_ref()
                .filter(|(k, _)| k == key)
                .map(|(_, b)| b.clone())
        };

        // Snapshot first, then wait: every held reader sees the same value.
        let value = self
            .state
            .lock()
            .unwrap()
            .entries
            .get(key)
            .cloned()
            .unwrap_or_default();

        if let Some(barrier) = barrier {
            barrier.wait().await;
            // One-shot: later reads go straight through.
            self.state.lock().unwrap().read_barrier = None;
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> DirectoryResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.reject_writes {
            return Err(DirectoryError::WriteRejected(
                "mock directory is read-only".to_string(),
            ));
        }
        state.entries.insert(key.to_string(), value.to_vec());
        state.writes.push(key.to_string());
        Ok(())
    }

    async fn address(&self) -> DirectoryResult<String> {
        Ok(MOCK_ADDRESS.to_string())
    }
}
