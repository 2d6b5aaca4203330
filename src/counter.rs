//! Visit counter and the active-users display figure.
//!
//! The counter sits behind [`VisitCounter`] so the lookup path never touches storage
//! directly. The file-backed implementation is a plain read-increment-write; writes
//! from this process are serialized, other processes are not coordinated.
use crate::errors::AppError;
use axum::async_trait;
use rand::Rng;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Upper bound of the simulated active-users figure.
pub const MAX_ACTIVE_USERS: u32 = 50;

#[async_trait]
pub trait VisitCounter: Send + Sync {
    /// Adds one visit and returns the new total.
    async fn increment(&self) -> Result<u64, AppError>;

    /// Current total.
    async fn get(&self) -> Result<u64, AppError>;
}

/// Process-local counter. Resets on restart.
#[derive(Debug, Default)]
pub struct MemoryVisitCounter {
    count: AtomicU64,
}

impl MemoryVisitCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitCounter for MemoryVisitCounter {
    async fn increment(&self) -> Result<u64, AppError> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn get(&self) -> Result<u64, AppError> {
        Ok(self.count.load(Ordering::SeqCst))
    }
}

/// Counter persisted in a JSON object file, one entry per key.
///
/// A missing file, unreadable JSON or a non-numeric entry all read as zero.
pub struct FileVisitCounter {
    path: PathBuf,
    key: String,
    lock: Mutex<()>,
}

impl FileVisitCounter {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Map<String, Value>, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                _ => {
                    tracing::warn!(
                        "Counter file {} is not a JSON object, starting from zero",
                        self.path.display()
                    );
                    Map::new()
                }
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn read_count(&self, entries: &Map<String, Value>) -> u64 {
        match entries.get(&self.key) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

#[async_trait]
impl VisitCounter for FileVisitCounter {
    async fn increment(&self) -> Result<u64, AppError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.load().await?;
        let count = self.read_count(&entries) + 1;
        entries.insert(self.key.clone(), Value::from(count));

        let content = serde_json::to_string_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, content).await?;

        tracing::debug!("Visit counter {} is now {}", self.key, count);
        Ok(count)
    }

    async fn get(&self) -> Result<u64, AppError> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(self.read_count(&entries))
    }
}

/// Simulated number of users currently online, uniform in `1..=50`.
pub fn active_users() -> u32 {
    rand::thread_rng().gen_range(1..=MAX_ACTIVE_USERS)
}
