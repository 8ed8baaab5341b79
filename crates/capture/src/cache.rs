use powerdeck_model::Chart;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
struct CacheKey {
    fingerprint: u64,
    export_clean: bool,
}

struct CacheEntry {
    stored_at: Instant,
    chart: Arc<Chart>,
}

/// Expiring memo of charts prepared for display.
///
/// Keyed by a fingerprint of the serialized chart plus the export-clean flag.
/// Entries older than the TTL read as absent and are rebuilt.
pub struct RenderCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl RenderCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the display-ready chart, stripped of on-screen controls when
    /// `export_clean` is set.
    pub fn prepare(&self, chart: &Chart, export_clean: bool) -> Arc<Chart> {
        let key = CacheKey {
            fingerprint: fingerprint(chart),
            export_clean,
        };

        if let Ok(entries) = self.entries.read() {
            if let Some(entry) = entries.get(&key) {
                if entry.stored_at.elapsed() < self.ttl {
                    return Arc::clone(&entry.chart);
                }
            }
        }

        let prepared = Arc::new(if export_clean {
            chart.without_controls()
        } else {
            chart.clone()
        });

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key,
                CacheEntry {
                    stored_at: Instant::now(),
                    chart: Arc::clone(&prepared),
                },
            );
        } else {
            log::warn!("Render cache lock poisoned; serving uncached chart");
        }
        prepared
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        if let Ok(mut entries) = self.entries.write() {
            let ttl = self.ttl;
            entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut c) = self.entries.write() {
            c.clear();
        }
    }
}

fn fingerprint(chart: &Chart) -> u64 {
    let mut hasher = DefaultHasher::new();
    match serde_json::to_vec(chart) {
        Ok(bytes) => bytes.hash(&mut hasher),
        // Serialization of the model cannot fail in practice; fall back to the debug form.
        Err(_) => format!("{:?}", chart).hash(&mut hasher),
    }
    hasher.finish()
}
