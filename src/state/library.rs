use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::Outfit;
use super::kv::KeyValueStore;
use crate::error::{Error, Result};
use crate::media::remove_if_exists;

/// Default key the outfit collection is stored under
pub const OUTFITS_KEY: &str = "fitcheck_outfits";

/// The OutfitLibrary persists outfit records.
///
/// The whole collection is stored as one JSON array under a single
/// namespaced key. Mutations hold `write_lock` across their
/// read-modify-write cycle so concurrent callers never lose an update.
pub struct OutfitLibrary {
    store: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl OutfitLibrary {
    /// Create a library over `store` using the default key
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, OUTFITS_KEY)
    }

    /// Create a library storing its collection under `key`
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        OutfitLibrary {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Storage key of the collection
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get all outfits in insertion order.
    /// Read or parse failures are logged and yield an empty list.
    pub async fn get_all(&self) -> Vec<Outfit> {
        match self.read_collection().await {
            Ok(outfits) => outfits,
            Err(e) => {
                tracing::error!("Failed to get outfits: {}", e);
                Vec::new()
            }
        }
    }

    /// Get one outfit by id (best-effort, like `get_all`)
    pub async fn get(&self, id: &str) -> Option<Outfit> {
        self.get_all().await.into_iter().find(|o| o.id == id)
    }

    /// Number of stored outfits
    pub async fn count(&self) -> usize {
        self.get_all().await.len()
    }

    /// Append an outfit to the collection.
    /// Fails if the id is already stored or the write fails.
    pub async fn save(&self, outfit: Outfit) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut outfits = self.read_collection().await?;
        if outfits.iter().any(|o| o.id == outfit.id) {
            return Err(Error::DuplicateId(outfit.id));
        }

        tracing::debug!("Saving outfit {}", outfit.id);
        outfits.push(outfit);
        self.write_collection(&outfits).await
    }

    /// Delete an outfit and its photo file.
    /// Returns the removed record, or None if no outfit has this id.
    pub async fn delete(&self, id: &str) -> Result<Option<Outfit>> {
        let _guard = self.write_lock.lock().await;

        let mut outfits = self.read_collection().await?;
        let Some(index) = outfits.iter().position(|o| o.id == id) else {
            tracing::debug!("Delete requested for unknown outfit {}", id);
            return Ok(None);
        };

        let removed = outfits.remove(index);
        self.write_collection(&outfits).await?;

        // Photo goes only once the record is gone
        remove_if_exists(Path::new(&removed.image_path)).await?;

        tracing::info!("Deleted outfit {}", id);
        Ok(Some(removed))
    }

    /// Log one wear: wear count +1 and last-worn set to now.
    /// Returns the updated record, or None if no outfit has this id.
    pub async fn increment_wear_count(&self, id: &str) -> Result<Option<Outfit>> {
        let _guard = self.write_lock.lock().await;

        let mut outfits = self.read_collection().await?;
        let Some(outfit) = outfits.iter_mut().find(|o| o.id == id) else {
            tracing::debug!("Wear logged for unknown outfit {}", id);
            return Ok(None);
        };

        outfit.record_wear(Utc::now());
        let updated = outfit.clone();
        self.write_collection(&outfits).await?;

        tracing::info!("Outfit {} worn {} times", id, updated.wear_count);
        Ok(Some(updated))
    }

    /// Outfits dated within `[start, end]`, inclusive.
    /// Failures are logged and yield an empty list.
    pub async fn query_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Outfit> {
        match self.read_collection().await {
            Ok(outfits) => outfits
                .into_iter()
                .filter(|o| o.date >= start && o.date <= end)
                .collect(),
            Err(e) => {
                tracing::error!("Failed to get outfits by date range: {}", e);
                Vec::new()
            }
        }
    }

    /// Load and decode the stored collection; a missing key is an empty one
    async fn read_collection(&self) -> Result<Vec<Outfit>> {
        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let raw = tokio::task::spawn_blocking(move || store.get(&key)).await??;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Encode and store the whole collection
    async fn write_collection(&self, outfits: &[Outfit]) -> Result<()> {
        let json = serde_json::to_string(outfits)?;
        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || store.set(&key, &json)).await??;
        Ok(())
    }
}

impl std::fmt::Debug for OutfitLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutfitLibrary")
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::kv::MemoryStore;
    use chrono::{Duration, TimeZone};

    /// Store whose reads and writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::InvalidInput("read failed".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::InvalidInput("write failed".to_string()))
        }
    }

    /// Reads from a seeded collection, rejects every write
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::InvalidInput("write failed".to_string()))
        }
    }

    fn library() -> OutfitLibrary {
        OutfitLibrary::new(Arc::new(MemoryStore::new()))
    }

    fn outfit(id: &str, day: u32) -> Outfit {
        let date = Utc.with_ymd_and_hms(2026, 5, day, 12, 0, 0).unwrap();
        Outfit::new(id, format!("Outfit {}", id), format!("/nonexistent/{}.jpg", id), date)
    }

    #[tokio::test]
    async fn test_empty_library() {
        let library = library();
        assert!(library.get_all().await.is_empty());
        assert_eq!(library.count().await, 0);
    }

    #[tokio::test]
    async fn test_save_keeps_insertion_order() {
        let library = library();
        library.save(outfit("b", 2)).await.unwrap();
        library.save(outfit("a", 1)).await.unwrap();
        library.save(outfit("c", 3)).await.unwrap();

        let ids: Vec<String> = library.get_all().await.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_id() {
        let library = library();
        library.save(outfit("a", 1)).await.unwrap();

        let result = library.save(outfit("a", 2)).await;
        assert!(matches!(result, Err(Error::DuplicateId(id)) if id == "a"));
        assert_eq!(library.count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let library = library();
        library.save(outfit("a", 1)).await.unwrap();

        let removed = library.delete("missing").await.unwrap();
        assert!(removed.is_none());
        assert_eq!(library.get_all().await, vec![outfit("a", 1)]);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_photo() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("outfit_a.jpg");
        std::fs::write(&photo, b"jpeg").unwrap();

        let library = library();
        let mut record = outfit("a", 1);
        record.image_path = photo.to_string_lossy().to_string();
        library.save(record).await.unwrap();
        library.save(outfit("b", 2)).await.unwrap();

        let removed = library.delete("a").await.unwrap().unwrap();
        assert_eq!(removed.id, "a");
        assert!(!photo.exists());

        let ids: Vec<String> = library.get_all().await.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_photo() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("outfit_a.jpg");
        std::fs::write(&photo, b"jpeg").unwrap();

        let mut record = outfit("a", 1);
        record.image_path = photo.to_string_lossy().to_string();
        let seeded = MemoryStore::new();
        seeded
            .set(OUTFITS_KEY, &serde_json::to_string(&vec![record.clone()]).unwrap())
            .unwrap();
        let library = OutfitLibrary::new(Arc::new(ReadOnlyStore(seeded)));

        assert!(library.delete("a").await.is_err());
        assert!(photo.exists());
        assert_eq!(library.get_all().await, vec![record]);
    }

    #[tokio::test]
    async fn test_increment_wear_count() {
        let library = library();
        library.save(outfit("a", 1)).await.unwrap();

        let before = Utc::now();
        let mut last = None;
        for _ in 0..3 {
            last = library.increment_wear_count("a").await.unwrap();
        }
        let after = Utc::now();

        let last = last.unwrap();
        assert_eq!(last.wear_count, 3);

        let stored = library.get("a").await.unwrap();
        assert_eq!(stored.wear_count, 3);
        assert_eq!(stored.last_worn, last.last_worn);
        let worn = stored.last_worn.unwrap();
        assert!(worn >= before && worn <= after);
    }

    #[tokio::test]
    async fn test_increment_unknown_id_is_noop() {
        let library = library();
        library.save(outfit("a", 1)).await.unwrap();

        assert!(library.increment_wear_count("zzz").await.unwrap().is_none());
        assert_eq!(library.get("a").await.unwrap().wear_count, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_wear_updates_are_not_lost() {
        let library = Arc::new(library());
        library.save(outfit("a", 1)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let library = Arc::clone(&library);
            handles.push(tokio::spawn(async move {
                library.increment_wear_count("a").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(library.get("a").await.unwrap().wear_count, 20);
    }

    #[tokio::test]
    async fn test_query_by_date_range_is_inclusive() {
        let library = library();
        for (id, day) in [("a", 1), ("b", 5), ("c", 10), ("d", 15)] {
            library.save(outfit(id, day)).await.unwrap();
        }

        let start = outfit("x", 5).date;
        let end = outfit("x", 10).date;
        let ids: Vec<String> = library
            .query_by_date_range(start, end)
            .await
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);

        let empty = library
            .query_by_date_range(end + Duration::days(30), end + Duration::days(31))
            .await;
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_read_failures_are_swallowed() {
        let library = OutfitLibrary::new(Arc::new(BrokenStore));
        assert!(library.get_all().await.is_empty());
        assert!(library.get("a").await.is_none());
        let now = Utc::now();
        assert!(library.query_by_date_range(now, now).await.is_empty());
    }

    #[tokio::test]
    async fn test_write_failures_propagate() {
        let library = OutfitLibrary::new(Arc::new(BrokenStore));
        assert!(library.save(outfit("a", 1)).await.is_err());
        assert!(library.delete("a").await.is_err());
        assert!(library.increment_wear_count("a").await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_collection() {
        let store = Arc::new(MemoryStore::new());
        store.set(OUTFITS_KEY, "{not json").unwrap();
        let library = OutfitLibrary::new(store);

        assert!(library.get_all().await.is_empty());
        // Writes refuse to clobber a collection they cannot read
        assert!(matches!(
            library.save(outfit("a", 1)).await,
            Err(Error::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_key() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let library = OutfitLibrary::with_key(Arc::clone(&store), "other_outfits");
        library.save(outfit("a", 1)).await.unwrap();

        assert_eq!(library.key(), "other_outfits");
        assert!(store.get(OUTFITS_KEY).unwrap().is_none());
        assert!(store.get("other_outfits").unwrap().is_some());
    }
}
