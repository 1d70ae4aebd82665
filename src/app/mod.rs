pub mod commands;

use crate::adapters::{
    FileStorage, LocalStatsBackend, LocalTestimonialBackend, RemoteClient, RemoteStatsBackend,
    RemoteTestimonialBackend,
};
use crate::config::cli::Command;
use crate::config::toml_config::{BackendKind, TomlConfig};
use crate::core::counter::CounterStore;
use crate::core::testimonials::TestimonialStore;
use crate::domain::model::seed_testimonials;
use crate::domain::ports::TestimonialBackend;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

pub use commands::execute;

/// Builds the stores for the configured backend and runs `command` against them.
pub async fn run(settings: &TomlConfig, command: Command) -> Result<String> {
    match settings.storage.backend {
        BackendKind::Local => {
            tracing::info!("Using local store at {}", settings.local.data_dir);
            let storage = FileStorage::new(&settings.local.data_dir);
            let counter = CounterStore::new(LocalStatsBackend::new(storage.clone()));
            let testimonials = testimonial_store(LocalTestimonialBackend::new(storage), settings);
            execute(command, &counter, &testimonials, settings).await
        }
        BackendKind::Remote => {
            let remote = validate_required_field("remote", &settings.remote)?;
            tracing::info!("Using remote store at {}", remote.url);
            let client = RemoteClient::new(&remote.url, &remote.api_key, remote.timeout())?;
            let counter = CounterStore::new(RemoteStatsBackend::new(client.clone()));
            let testimonials =
                testimonial_store(RemoteTestimonialBackend::new(client), settings);
            execute(command, &counter, &testimonials, settings).await
        }
    }
}

fn testimonial_store<T: TestimonialBackend>(
    backend: T,
    settings: &TomlConfig,
) -> TestimonialStore<T> {
    let store = TestimonialStore::new(backend);
    if settings.testimonials.seed_defaults {
        store.with_seed(seed_testimonials())
    } else {
        store
    }
}
