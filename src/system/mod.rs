pub mod collector;
pub mod error;
pub mod host;
pub mod platform;
pub mod process;
pub mod provider;
pub mod snapshot;

pub use collector::{CPU_SAMPLE_WINDOW, Collector};
pub use error::CollectionError;
pub use host::HostProvider;
pub use provider::MetricsProvider;
pub use snapshot::{SnapshotResponse, SystemSnapshot};
