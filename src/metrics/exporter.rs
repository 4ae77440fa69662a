use std::io::{self, Write};
use std::sync::Mutex;

use crate::metrics::snapshot::StatsSnapshot;

/// Publishes snapshots to a monitoring sink.
pub trait MetricsExporter {
    fn export(&self, snapshot: &StatsSnapshot) -> io::Result<()>;
}

/// Writes snapshots in the Prometheus text exposition format.
///
/// Every series carries a `policy` label taken from the snapshot.
///
/// ```
/// use evictkit::metrics::{MetricsExporter, PrometheusTextExporter};
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CacheStore;
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, "a");
/// cache.get(&1);
///
/// let exporter = PrometheusTextExporter::new("pages", Vec::new());
/// exporter.export(&cache.snapshot()).unwrap();
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("pages_hits_total{policy=\"lru\"} 1"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }

    fn write_series(
        writer: &mut W,
        name: &str,
        kind: &str,
        policy: &str,
        value: impl std::fmt::Display,
    ) -> io::Result<()> {
        writeln!(writer, "# TYPE {} {}", name, kind)?;
        writeln!(writer, "{}{{policy=\"{}\"}} {}", name, policy, value)
    }
}

impl<W: Write> MetricsExporter for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &StatsSnapshot) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let policy = snapshot.policy;

        let counters = [
            ("hits_total", snapshot.hits),
            ("misses_total", snapshot.misses),
            ("evictions_total", snapshot.evictions),
        ];
        for (suffix, value) in counters {
            Self::write_series(&mut *writer, &self.metric_name(suffix), "counter", policy, value)?;
        }

        Self::write_series(
            &mut *writer,
            &self.metric_name("hit_ratio"),
            "gauge",
            policy,
            snapshot.hit_ratio(),
        )?;
        Self::write_series(&mut *writer, &self.metric_name("len"), "gauge", policy, snapshot.len)?;
        Self::write_series(
            &mut *writer,
            &self.metric_name("capacity"),
            "gauge",
            policy,
            snapshot.capacity,
        )?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::stats::CacheStats;

    fn render(prefix: &str, snapshot: &StatsSnapshot) -> String {
        let exporter = PrometheusTextExporter::new(prefix, Vec::new());
        exporter.export(snapshot).unwrap();
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn renders_all_series() {
        let snap = StatsSnapshot::new(
            "hybrid",
            CacheStats {
                hits: 1,
                misses: 3,
                evictions: 2,
            },
            4,
            4,
        );
        let text = render("sim", &snap);

        assert!(text.contains("# TYPE sim_hits_total counter\n"));
        assert!(text.contains("sim_hits_total{policy=\"hybrid\"} 1\n"));
        assert!(text.contains("sim_misses_total{policy=\"hybrid\"} 3\n"));
        assert!(text.contains("sim_evictions_total{policy=\"hybrid\"} 2\n"));
        assert!(text.contains("# TYPE sim_hit_ratio gauge\n"));
        assert!(text.contains("sim_hit_ratio{policy=\"hybrid\"} 0.25\n"));
        assert!(text.contains("sim_len{policy=\"hybrid\"} 4\n"));
        assert!(text.contains("sim_capacity{policy=\"hybrid\"} 4\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let snap = StatsSnapshot::new("lru", CacheStats::default(), 0, 8);
        let text = render("", &snap);
        assert!(text.starts_with("# TYPE hits_total counter\nhits_total{policy=\"lru\"} 0\n"));
        assert!(text.contains("hit_ratio{policy=\"lru\"} 0\n"));
    }
}
