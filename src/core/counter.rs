use crate::domain::model::StatsRecord;
use crate::domain::ports::StatsBackend;
use crate::utils::error::Result;
use chrono::Utc;

/// Families-served counter with the same semantics over any backend.
///
/// Reads never fail: when the backend cannot be reached the caller gets
/// [`StatsRecord::fallback`] and a diagnostic is logged.
pub struct CounterStore<B: StatsBackend> {
    backend: B,
}

impl<B: StatsBackend> CounterStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current record, created with defaults on first access.
    pub async fn get_stats(&self) -> StatsRecord {
        match self.load_or_init().await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    "Stats store unavailable, serving defaults: {} ({})",
                    e,
                    e.recovery_suggestion()
                );
                StatsRecord::fallback()
            }
        }
    }

    /// Adds one family. A failed read returns the default record without writing;
    /// a failed write returns the unincremented record.
    pub async fn increment_families_count(&self) -> StatsRecord {
        let current = match self.load_or_init().await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Cannot read stats before increment, skipping write: {}", e);
                return StatsRecord::fallback();
            }
        };

        let updated = current.incremented(Utc::now());
        match self.backend.save(&updated).await {
            Ok(stored) => {
                tracing::info!("Families count is now {}", stored.families_count);
                stored
            }
            Err(e) => {
                tracing::error!(
                    "Failed to persist families count {}: {}",
                    updated.families_count,
                    e
                );
                current
            }
        }
    }

    /// Overwrites the record with defaults. Administrative use only.
    pub async fn reset_stats(&self) -> StatsRecord {
        let initial = StatsRecord::initial(Utc::now());
        match self.backend.save(&initial).await {
            Ok(stored) => {
                tracing::info!("Stats reset to defaults");
                stored
            }
            Err(e) => {
                tracing::error!("Failed to reset stats: {}", e);
                initial
            }
        }
    }

    async fn load_or_init(&self) -> Result<StatsRecord> {
        if let Some(record) = self.backend.load().await? {
            return Ok(record);
        }
        self.backend
            .create_if_absent(&StatsRecord::initial(Utc::now()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DEFAULT_FAMILIES_COUNT, FOUNDING_YEAR};
    use crate::utils::error::CareError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    /// Backend whose reads and writes can be made to fail independently.
    struct FlakyBackend {
        record: Mutex<Option<StatsRecord>>,
        fail_reads: bool,
        fail_writes: bool,
        writes: AtomicUsize,
    }

    impl FlakyBackend {
        fn new(record: Option<StatsRecord>, fail_reads: bool, fail_writes: bool) -> Self {
            Self {
                record: Mutex::new(record),
                fail_reads,
                fail_writes,
                writes: AtomicUsize::new(0),
            }
        }

        fn unavailable() -> CareError {
            CareError::StorageUnavailable {
                message: "offline".to_string(),
            }
        }
    }

    #[async_trait]
    impl StatsBackend for FlakyBackend {
        async fn load(&self) -> Result<Option<StatsRecord>> {
            if self.fail_reads {
                return Err(Self::unavailable());
            }
            Ok(self.record.lock().await.clone())
        }

        async fn create_if_absent(&self, default: &StatsRecord) -> Result<StatsRecord> {
            if self.fail_writes {
                return Err(Self::unavailable());
            }
            let mut record = self.record.lock().await;
            Ok(record.get_or_insert_with(|| default.clone()).clone())
        }

        async fn save(&self, record: &StatsRecord) -> Result<StatsRecord> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(Self::unavailable());
            }
            *self.record.lock().await = Some(record.clone());
            Ok(record.clone())
        }
    }

    fn record_with(count: u64) -> StatsRecord {
        StatsRecord {
            families_count: count,
            ..StatsRecord::fallback()
        }
    }

    #[tokio::test]
    async fn test_get_stats_initializes_defaults() {
        let store = CounterStore::new(FlakyBackend::new(None, false, false));

        let stats = store.get_stats().await;

        assert_eq!(stats.families_count, DEFAULT_FAMILIES_COUNT);
        assert_eq!(stats.founding_year, FOUNDING_YEAR);
        assert!(store.backend().record.lock().await.is_some());
    }

    #[tokio::test]
    async fn test_get_stats_falls_back_when_reads_fail() {
        let store = CounterStore::new(FlakyBackend::new(Some(record_with(300)), true, false));

        let stats = store.get_stats().await;

        assert_eq!(stats.families_count, DEFAULT_FAMILIES_COUNT);
        assert_eq!(stats.founding_year, FOUNDING_YEAR);
    }

    #[tokio::test]
    async fn test_increment_adds_exactly_one() {
        let before = record_with(95);
        let store = CounterStore::new(FlakyBackend::new(Some(before.clone()), false, false));

        let after = store.increment_families_count().await;

        assert_eq!(after.families_count, 96);
        assert!(after.last_updated > before.last_updated);
        assert_eq!(store.backend().writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_increment_returns_previous_record_when_write_fails() {
        let store = CounterStore::new(FlakyBackend::new(Some(record_with(120)), false, true));

        let result = store.increment_families_count().await;

        assert_eq!(result.families_count, 120);
        assert_eq!(store.backend().writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_increment_skips_write_when_read_fails() {
        let store = CounterStore::new(FlakyBackend::new(Some(record_with(120)), true, false));

        let result = store.increment_families_count().await;

        assert_eq!(result.families_count, DEFAULT_FAMILIES_COUNT);
        assert_eq!(store.backend().writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let store = CounterStore::new(FlakyBackend::new(Some(record_with(500)), false, false));

        let reset = store.reset_stats().await;

        assert_eq!(reset.families_count, DEFAULT_FAMILIES_COUNT);
        assert_eq!(store.get_stats().await.families_count, DEFAULT_FAMILIES_COUNT);
    }
}
