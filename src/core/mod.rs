pub mod aggregator;
pub mod confirmation;
pub mod counter;
pub mod poller;
pub mod testimonials;

pub use crate::domain::model::{NewTestimonial, StatItem, StatsRecord, StatsSnapshot, Testimonial};
pub use crate::domain::ports::{KeyValueStorage, StatsBackend, TestimonialBackend};
pub use crate::utils::error::Result;
