//! Hit/miss/eviction accounting and export.
//!
//! Recording ([`CacheStats`], owned by each store), snapshotting
//! ([`StatsSnapshot`]) and publishing ([`MetricsExporter`]) are kept apart so
//! callers that only need a hit ratio never touch the export path.

pub mod exporter;
pub mod snapshot;
pub mod stats;

pub use exporter::{MetricsExporter, PrometheusTextExporter};
pub use snapshot::StatsSnapshot;
pub use stats::CacheStats;
