//! Translation metrics.
//!
//! Counts catalog lookups made by a translator: direct hits, hits found
//! through locale fallback, and misses.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters for one translator.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Messages found in the requested locale
    hits: AtomicUsize,

    /// Messages found in a fallback locale
    fallbacks: AtomicUsize,

    /// Messages found in no locale of the fallback chain
    misses: AtomicUsize,

    /// Objects handed to the translator
    objects: AtomicUsize,
}

impl TranslationMetrics {
    /// Create a metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message found in the requested locale.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a message found through a fallback locale.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a message found in no locale of the chain.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an object handed to the translator.
    pub fn record_object(&self) {
        self.objects.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current direct hit count.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get the current fallback hit count.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Get the current miss count.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get the number of translated objects.
    pub fn objects(&self) -> usize {
        self.objects.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallbacks = self.fallbacks();
        let misses = self.misses();
        let lookups = hits + fallbacks + misses;
        let hit_rate = if lookups > 0 {
            ((hits + fallbacks) as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            fallbacks,
            misses,
            hit_rate,
            objects: self.objects(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.objects.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of translation counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub hits: usize,
    pub fallbacks: usize,
    pub misses: usize,

    /// Share of lookups that produced a message, as a percentage (0-100)
    pub hit_rate: f64,

    pub objects: usize,
}
