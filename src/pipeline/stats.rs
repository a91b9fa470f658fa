use atomic_float::AtomicF64;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Shading throughput counters, owned by the caller and shared by reference
/// with every worker of a shading pass.
#[derive(Debug, Default)]
pub struct ShadingStats {
    polygons: AtomicUsize,
    vertices: AtomicUsize,
    sorted: AtomicUsize,
    seconds: AtomicF64,
}

/// Plain copy of the counters at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSnapshot {
    pub polygons: usize,
    pub vertices: usize,
    pub sorted: usize,
    pub seconds: f64,
}

impl StatsSnapshot {
    pub fn polygons_per_second(&self) -> f64 {
        if self.seconds > 0.0 {
            self.polygons as f64 / self.seconds
        } else {
            0.0
        }
    }
}

impl ShadingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_polygon(&self, vertex_count: usize, needs_sorting: bool) {
        self.polygons.fetch_add(1, Ordering::Relaxed);
        self.vertices.fetch_add(vertex_count, Ordering::Relaxed);
        if needs_sorting {
            self.sorted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_elapsed(&self, elapsed: Duration) {
        self.seconds.fetch_add(elapsed.as_secs_f64(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            polygons: self.polygons.load(Ordering::Relaxed),
            vertices: self.vertices.load(Ordering::Relaxed),
            sorted: self.sorted.load(Ordering::Relaxed),
            seconds: self.seconds.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.polygons.store(0, Ordering::Relaxed);
        self.vertices.store(0, Ordering::Relaxed);
        self.sorted.store(0, Ordering::Relaxed);
        self.seconds.store(0.0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts_and_rate() {
        let stats = ShadingStats::new();
        stats.record_polygon(3, false);
        stats.record_polygon(4, true);
        stats.record_elapsed(Duration::from_millis(500));

        let snap = stats.snapshot();
        assert_eq!(snap.polygons, 2);
        assert_eq!(snap.vertices, 7);
        assert_eq!(snap.sorted, 1);
        assert_relative_eq!(snap.polygons_per_second(), 4.0);

        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
