//! Backends over a device-scoped key/value store.
//!
//! Layout: key `stats` holds the JSON stats record, key `testimonials` a JSON array.

use crate::domain::model::{NewTestimonial, StatsRecord, Testimonial};
use crate::domain::ports::{KeyValueStorage, StatsBackend, TestimonialBackend};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

pub const STATS_KEY: &str = "stats";
pub const TESTIMONIALS_KEY: &str = "testimonials";

pub struct LocalStatsBackend<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> LocalStatsBackend<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    async fn write(&self, record: &StatsRecord) -> Result<StatsRecord> {
        let json = serde_json::to_string(record)?;
        self.storage.set(STATS_KEY, &json).await?;
        Ok(record.clone())
    }
}

#[async_trait]
impl<S: KeyValueStorage> StatsBackend for LocalStatsBackend<S> {
    async fn load(&self) -> Result<Option<StatsRecord>> {
        let Some(json) = self.storage.get(STATS_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<StatsRecord>(&json) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // Unparseable documents are replaced by the default on the next create.
                tracing::warn!("Discarding unreadable '{}' document: {}", STATS_KEY, e);
                Ok(None)
            }
        }
    }

    async fn create_if_absent(&self, default: &StatsRecord) -> Result<StatsRecord> {
        if let Some(existing) = self.load().await? {
            return Ok(existing);
        }
        tracing::info!(
            "Initializing '{}' with families_count={}",
            STATS_KEY,
            default.families_count
        );
        self.write(default).await
    }

    async fn save(&self, record: &StatsRecord) -> Result<StatsRecord> {
        self.write(record).await
    }
}

pub struct LocalTestimonialBackend<S: KeyValueStorage> {
    storage: S,
    // Serializes read-append-write so two local submissions cannot reuse an id.
    write_lock: Mutex<()>,
}

impl<S: KeyValueStorage> LocalTestimonialBackend<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<Testimonial>> {
        match self.storage.get(TESTIMONIALS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl<S: KeyValueStorage> TestimonialBackend for LocalTestimonialBackend<S> {
    async fn list(&self) -> Result<Vec<Testimonial>> {
        self.read_all().await
    }

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.read_all().await?.is_empty())
    }

    async fn insert(&self, candidate: NewTestimonial, date: DateTime<Utc>) -> Result<Testimonial> {
        let _guard = self.write_lock.lock().await;

        let mut testimonials = self.read_all().await?;
        let id = testimonials.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let testimonial = candidate.into_testimonial(id, date);

        testimonials.push(testimonial.clone());
        let json = serde_json::to_string(&testimonials)?;
        self.storage.set(TESTIMONIALS_KEY, &json).await?;

        tracing::debug!("Stored testimonial {} ({} total)", id, testimonials.len());
        Ok(testimonial)
    }
}
