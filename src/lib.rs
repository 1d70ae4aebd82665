pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, TestimonialCommand};
pub use config::{BackendKind, TomlConfig};

pub use adapters::{
    FileStorage, LocalStatsBackend, LocalTestimonialBackend, MemoryStorage, RemoteClient,
    RemoteStatsBackend, RemoteTestimonialBackend,
};
pub use crate::core::{aggregator, counter::CounterStore, testimonials::TestimonialStore};
pub use domain::model::{NewTestimonial, StatItem, StatsRecord, StatsSnapshot, Testimonial};
pub use utils::error::{CareError, Result};
