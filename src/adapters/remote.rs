//! Backends over a hosted table API (PostgREST dialect, as exposed by Supabase).
//!
//! - `stats`: one row, primary key constant `1`
//! - `testimonials`: auto-increment `id`, newest first by `date`
//!
//! The increment is a plain read-modify-write. Two sessions incrementing at the same
//! time can lose one of the increments (last write wins).

use crate::domain::model::{NewTestimonial, StatsRecord, Testimonial};
use crate::domain::ports::{StatsBackend, TestimonialBackend};
use crate::utils::error::{CareError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const STATS_TABLE: &str = "stats";
pub const TESTIMONIALS_TABLE: &str = "testimonials";
pub const STATS_ROW_ID: u64 = 1;

const PREFER_INSERT_IGNORE: &str = "resolution=ignore-duplicates,return=representation";
const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";
const PREFER_RETURN: &str = "return=representation";

#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Remote store response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CareError::RemoteError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[derive(Serialize)]
struct StatsRow<'a> {
    id: u64,
    #[serde(flatten)]
    record: &'a StatsRecord,
}

#[derive(Serialize)]
struct TestimonialRow<'a> {
    #[serde(flatten)]
    candidate: &'a NewTestimonial,
    date: DateTime<Utc>,
}

pub struct RemoteStatsBackend {
    client: RemoteClient,
}

impl RemoteStatsBackend {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    async fn post_row(&self, record: &StatsRecord, prefer: &str) -> Result<Vec<StatsRecord>> {
        let row = StatsRow {
            id: STATS_ROW_ID,
            record,
        };
        let request = self
            .client
            .request(Method::POST, STATS_TABLE)
            .query(&[("on_conflict", "id")])
            .header("Prefer", prefer)
            .json(&row);
        self.client.send_json(request).await
    }
}

#[async_trait]
impl StatsBackend for RemoteStatsBackend {
    async fn load(&self) -> Result<Option<StatsRecord>> {
        let id_filter = format!("eq.{}", STATS_ROW_ID);
        let request = self
            .client
            .request(Method::GET, STATS_TABLE)
            .query(&[("id", id_filter.as_str()), ("select", "*")]);
        let rows: Vec<StatsRecord> = self.client.send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn create_if_absent(&self, default: &StatsRecord) -> Result<StatsRecord> {
        // Insert-or-ignore on the primary key instead of check-then-insert.
        let inserted = self.post_row(default, PREFER_INSERT_IGNORE).await?;
        if let Some(record) = inserted.into_iter().next() {
            tracing::info!("Created stats row {} in remote store", STATS_ROW_ID);
            return Ok(record);
        }

        self.load().await?.ok_or_else(|| CareError::StorageUnavailable {
            message: format!("stats row {} missing after insert", STATS_ROW_ID),
        })
    }

    async fn save(&self, record: &StatsRecord) -> Result<StatsRecord> {
        let rows = self.post_row(record, PREFER_UPSERT).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| CareError::StorageUnavailable {
                message: "upsert of stats row returned no representation".to_string(),
            })
    }
}

pub struct RemoteTestimonialBackend {
    client: RemoteClient,
}

impl RemoteTestimonialBackend {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TestimonialBackend for RemoteTestimonialBackend {
    async fn list(&self) -> Result<Vec<Testimonial>> {
        let request = self
            .client
            .request(Method::GET, TESTIMONIALS_TABLE)
            .query(&[("select", "*"), ("order", "date.desc")]);
        self.client.send_json(request).await
    }

    async fn is_empty(&self) -> Result<bool> {
        let request = self
            .client
            .request(Method::GET, TESTIMONIALS_TABLE)
            .query(&[("select", "id"), ("limit", "1")]);
        let rows: Vec<serde_json::Value> = self.client.send_json(request).await?;
        Ok(rows.is_empty())
    }

    async fn insert(&self, candidate: NewTestimonial, date: DateTime<Utc>) -> Result<Testimonial> {
        let row = TestimonialRow {
            candidate: &candidate,
            date,
        };
        let request = self
            .client
            .request(Method::POST, TESTIMONIALS_TABLE)
            .header("Prefer", PREFER_RETURN)
            .json(&row);
        let rows: Vec<Testimonial> = self.client.send_json(request).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| CareError::StorageUnavailable {
                message: "insert of testimonial returned no representation".to_string(),
            })
    }
}
