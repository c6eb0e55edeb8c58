// Cache store for previously-notified items.
// Handles JSON persistence, lazy expiration on load, and membership checks.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::steam::WishlistItem;

/// Cache handle shared between the poller (reads) and the notification worker
/// (writes). The mutex guards the read-modify-write of the map plus the save.
pub type SharedCache = Arc<Mutex<CacheStore>>;

/// Persisted record of items that already triggered a notification.
///
/// Expiration is lazy: entries are only dropped when the store is loaded,
/// never actively swept while the process runs.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    items: HashMap<String, WishlistItem>,
}

impl CacheStore {
    /// Load the cache from disk, dropping entries whose eviction time has
    /// passed. A missing file is an empty store, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "cache file not found, starting empty");
            return Ok(Self {
                path,
                items: HashMap::new(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        let stored: HashMap<String, WishlistItem> = serde_json::from_str(&contents)?;

        let now = Utc::now().timestamp();
        let total = stored.len();
        let items: HashMap<String, WishlistItem> = stored
            .into_iter()
            .filter(|(_, item)| item.expiration_date > now)
            .collect();

        tracing::debug!(
            path = %path.display(),
            kept = items.len(),
            expired = total - items.len(),
            "loaded cache"
        );
        Ok(Self { path, items })
    }

    /// True iff an entry with the same name exists and is value-equal to
    /// `item`. Changed offers under an unchanged name do not count as cached,
    /// so the item can notify again.
    pub fn contains(&self, item: &WishlistItem) -> bool {
        self.items.get(&item.name).is_some_and(|stored| stored == item)
    }

    /// Insert or overwrite the entry for this item's name, then persist the
    /// whole store immediately.
    pub fn add(&mut self, item: WishlistItem) -> Result<()> {
        tracing::debug!(name = %item.name, "caching notified item");
        self.items.insert(item.name.clone(), item);
        self.save()
    }

    /// Write every stored item to disk as pretty JSON (full rewrite).
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.items)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Number of unexpired entries currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no entries are held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
