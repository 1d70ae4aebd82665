// Adapters layer: concrete storage backends (device-local key/value, hosted tables).

pub mod local;
pub mod remote;
pub mod storage;

pub use local::{LocalStatsBackend, LocalTestimonialBackend};
pub use remote::{RemoteClient, RemoteStatsBackend, RemoteTestimonialBackend};
pub use storage::{FileStorage, MemoryStorage};
