//! File-backed directory.
//!
//! A local ledger for the CLI: one JSON file mapping each key to the hex of
//! its payload. Every write holds an exclusive `flock` on a sidecar
//! `<ledger>.lock` for the whole load → insert → store cycle, then replaces
//! the ledger atomically (per-writer temp file + rename). Writes to different
//! keys therefore never clobber each other, across tasks or processes. Reads
//! take no lock; the rename guarantees they see a whole ledger.
//!
//! Callers that read a key, modify it, and write it back (the Index append)
//! still race with each other: the lock covers one `set`, not a caller's
//! read-modify-write.

use super::traits::{DirectoryClient, DirectoryError, DirectoryResult};
use async_trait::async_trait;
use fs2::FileExt;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;

type Entries = BTreeMap<String, String>;

/// Distinguishes temp files of concurrent writers within one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Directory stored in a single JSON file.
pub struct FileDirectory {
    path: PathBuf,
    address: String,
}

impl FileDirectory {
    /// Open (or lazily create) a ledger at `path`.
    ///
    /// Without an explicit address one is derived from the path, so the same
    /// ledger always reports the same address.
    pub fn new(path: impl Into<PathBuf>, address: Option<String>) -> Self {
        let path = path.into();
        let address = address.unwrap_or_else(|| derive_address(&path));
        Self { path, address }
    }

    /// Ledger file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar lock file serializing writers.
    pub fn lock_path(&self) -> PathBuf {
        sidecar(&self.path, "lock")
    }
}

/// `<ledger file name>.<suffix>` next to the ledger.
fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("ledger"));
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn parse_entries(path: &Path, bytes: &[u8]) -> DirectoryResult<Entries> {
    if bytes.is_empty() {
        return Ok(Entries::new());
    }
    serde_json::from_slice(bytes).map_err(|e| {
        DirectoryError::Backend(format!("ledger '{}' is corrupt: {}", path.display(), e))
    })
}

fn load_blocking(path: &Path) -> DirectoryResult<Entries> {
    match std::fs::read(path) {
        Ok(bytes) => parse_entries(path, &bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
        Err(e) => Err(e.into()),
    }
}

fn store_blocking(path: &Path, entries: &Entries) -> DirectoryResult<()> {
    let contents = serde_json::to_vec_pretty(entries)
        .map_err(|e| DirectoryError::Backend(format!("Failed to encode ledger: {}", e)))?;

    let tmp = sidecar(
        path,
        &format!(
            "{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ),
    );
    std::fs::write(&tmp, contents)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Insert one entry under the exclusive ledger lock.
fn insert_locked(path: &Path, key: String, payload: String) -> DirectoryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let lock_path = sidecar(path, "lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| {
            DirectoryError::Io(format!(
                "failed to open ledger lock {}: {}",
                lock_path.display(),
                e
            ))
        })?;
    FileExt::lock_exclusive(&lock_file).map_err(|e| {
        DirectoryError::Io(format!(
            "failed to lock ledger {}: {}",
            lock_path.display(),
            e
        ))
    })?;

    let mut entries = load_blocking(path)?;
    entries.insert(key, payload);
    let result = store_blocking(path, &entries);

    // Closing the descriptor releases the flock.
    drop(lock_file);
    result
}

/// `0x` + first 20 bytes of SHA-256 over the ledger path.
fn derive_address(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    format!("0x{}", hex::encode(&digest[..20]))
}

#[async_trait]
impl DirectoryClient for FileDirectory {
    async fn is_available(&self) -> DirectoryResult<bool> {
        if fs::try_exists(&self.path).await? {
            return Ok(true);
        }
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::try_exists(parent).await?),
            _ => Ok(true),
        }
    }

    async fn get(&self, key: &str) -> DirectoryResult<Vec<u8>> {
        let entries = match fs::read(&self.path).await {
            Ok(bytes) => parse_entries(&self.path, &bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(e.into()),
        };

        match entries.get(key) {
            Some(encoded) => hex::decode(encoded).map_err(|e| {
                DirectoryError::Backend(format!("entry '{}' is not hex: {}", key, e))
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> DirectoryResult<()> {
        let path = self.path.clone();
        let owned_key = key.to_string();
        let payload = hex::encode(value);

        // flock blocks the calling thread.
        tokio::task::spawn_blocking(move || insert_locked(&path, owned_key, payload))
            .await
            .map_err(|e| DirectoryError::Backend(format!("ledger write task failed: {}", e)))??;

        tracing::debug!(key, bytes = value.len(), ledger = %self.path.display(), "directory write");
        Ok(())
    }

    async fn address(&self) -> DirectoryResult<String> {
        Ok(self.address.clone())
    }
}
