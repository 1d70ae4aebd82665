use crate::domain::model::{NewTestimonial, Testimonial, MAX_RATING, MIN_RATING};
use crate::domain::ports::TestimonialBackend;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

impl Validate for NewTestimonial {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("text", &self.text)?;
        validate_range("rating", self.rating, MIN_RATING, MAX_RATING)?;
        Ok(())
    }
}

/// Append-only testimonial collection over any backend.
pub struct TestimonialStore<B: TestimonialBackend> {
    backend: B,
    seed: Vec<(NewTestimonial, DateTime<Utc>)>,
    seeded: AtomicBool,
}

impl<B: TestimonialBackend> TestimonialStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            seed: Vec::new(),
            seeded: AtomicBool::new(true),
        }
    }

    /// Writes `seed` into the backend on first access if the collection is empty.
    pub fn with_seed(mut self, seed: Vec<(NewTestimonial, DateTime<Utc>)>) -> Self {
        self.seeded = AtomicBool::new(seed.is_empty());
        self.seed = seed;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All testimonials, newest first. Empty when the backend cannot be read.
    pub async fn list_testimonials(&self) -> Vec<Testimonial> {
        self.ensure_seeded().await;

        match self.backend.list().await {
            Ok(mut testimonials) => {
                // Equal dates: higher id (later insert) first.
                testimonials.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
                testimonials
            }
            Err(e) => {
                tracing::warn!("Testimonial store unavailable, serving none: {}", e);
                Vec::new()
            }
        }
    }

    /// Validates and appends a testimonial. Validation and storage errors are returned.
    pub async fn add_testimonial(&self, candidate: NewTestimonial) -> Result<Testimonial> {
        candidate.validate()?;
        self.ensure_seeded().await;

        let stored = self.backend.insert(candidate, Utc::now()).await.map_err(|e| {
            tracing::error!("Failed to store testimonial: {}", e);
            e
        })?;

        tracing::info!(
            "Added testimonial {} from {} ({} stars)",
            stored.id,
            stored.name,
            stored.rating
        );
        Ok(stored)
    }

    /// Runs first-access seeding now. Returns how many seed entries were written.
    pub async fn initialize(&self) -> Result<usize> {
        if self.seeded.load(Ordering::Acquire) {
            return Ok(0);
        }

        if !self.backend.is_empty().await? {
            self.seeded.store(true, Ordering::Release);
            return Ok(0);
        }

        for (candidate, date) in &self.seed {
            self.backend.insert(candidate.clone(), *date).await?;
        }
        self.seeded.store(true, Ordering::Release);

        tracing::info!("Seeded {} example testimonials", self.seed.len());
        Ok(self.seed.len())
    }

    async fn ensure_seeded(&self) {
        if let Err(e) = self.initialize().await {
            // Retried on the next access.
            tracing::warn!("Could not seed testimonials: {}", e);
        }
    }
}
