use crate::domain::model::{NewTestimonial, StatsRecord, Testimonial};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Device-scoped key/value persistence. A missing key is `Ok(None)`.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str)
        -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Raw access to the singleton stats record. Fallback policy lives in `CounterStore`.
#[async_trait]
pub trait StatsBackend: Send + Sync {
    async fn load(&self) -> Result<Option<StatsRecord>>;

    /// Stores `default` only if no record exists yet and returns whichever record is stored.
    async fn create_if_absent(&self, default: &StatsRecord) -> Result<StatsRecord>;

    async fn save(&self, record: &StatsRecord) -> Result<StatsRecord>;
}

#[async_trait]
pub trait TestimonialBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Testimonial>>;

    async fn is_empty(&self) -> Result<bool>;

    /// Appends the candidate and returns it with the backend-assigned id.
    async fn insert(&self, candidate: NewTestimonial, date: DateTime<Utc>) -> Result<Testimonial>;
}
