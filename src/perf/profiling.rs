/// Instrumentation for the rendering pipeline: cheap atomic counters that
/// compile away unless the `profiling` feature is enabled.
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters covering the per-frame pipeline stages.
pub struct PipelineCounters {
    // Frame / submission counters
    pub render_frame_calls: AtomicU64,
    pub instances_submitted: AtomicU64,
    pub framebuffer_clear_calls: AtomicU64,

    // Triangle counters
    pub triangles_processed: AtomicU64,
    pub triangles_clipped_away: AtomicU64,
    pub triangles_culled: AtomicU64,

    // Pixel counters
    pub pixels_tested: AtomicU64,
    pub depth_test_passed: AtomicU64,
    pub depth_test_failed: AtomicU64,
}

impl PipelineCounters {
    pub const fn new() -> Self {
        Self {
            render_frame_calls: AtomicU64::new(0),
            instances_submitted: AtomicU64::new(0),
            framebuffer_clear_calls: AtomicU64::new(0),
            triangles_processed: AtomicU64::new(0),
            triangles_clipped_away: AtomicU64::new(0),
            triangles_culled: AtomicU64::new(0),
            pixels_tested: AtomicU64::new(0),
            depth_test_passed: AtomicU64::new(0),
            depth_test_failed: AtomicU64::new(0),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.render_frame_calls.store(0, Ordering::Relaxed);
        self.instances_submitted.store(0, Ordering::Relaxed);
        self.framebuffer_clear_calls.store(0, Ordering::Relaxed);
        self.triangles_processed.store(0, Ordering::Relaxed);
        self.triangles_clipped_away.store(0, Ordering::Relaxed);
        self.triangles_culled.store(0, Ordering::Relaxed);
        self.pixels_tested.store(0, Ordering::Relaxed);
        self.depth_test_passed.store(0, Ordering::Relaxed);
        self.depth_test_failed.store(0, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            render_frame_calls: self.render_frame_calls.load(Ordering::Relaxed),
            instances_submitted: self.instances_submitted.load(Ordering::Relaxed),
            framebuffer_clear_calls: self.framebuffer_clear_calls.load(Ordering::Relaxed),
            triangles_processed: self.triangles_processed.load(Ordering::Relaxed),
            triangles_clipped_away: self.triangles_clipped_away.load(Ordering::Relaxed),
            triangles_culled: self.triangles_culled.load(Ordering::Relaxed),
            pixels_tested: self.pixels_tested.load(Ordering::Relaxed),
            depth_test_passed: self.depth_test_passed.load(Ordering::Relaxed),
            depth_test_failed: self.depth_test_failed.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of counter values at a point in time.
#[derive(Debug, Clone, Copy)]
pub struct CounterSnapshot {
    pub render_frame_calls: u64,
    pub instances_submitted: u64,
    pub framebuffer_clear_calls: u64,
    pub triangles_processed: u64,
    pub triangles_clipped_away: u64,
    pub triangles_culled: u64,
    pub pixels_tested: u64,
    pub depth_test_passed: u64,
    pub depth_test_failed: u64,
}

impl CounterSnapshot {
    /// Print formatted report.
    pub fn print_report(&self) {
        println!("\n=== Pipeline Counters Report ===");
        println!("\nFrames:");
        println!("  render_frame calls:    {:12}", self.render_frame_calls);
        println!("  instances submitted:   {:12}", self.instances_submitted);
        println!("  framebuffer clears:    {:12}", self.framebuffer_clear_calls);

        println!("\nTriangles:");
        println!("  processed:             {:12}", self.triangles_processed);
        println!("  clipped away:          {:12}", self.triangles_clipped_away);
        println!("  back-face culled:      {:12}", self.triangles_culled);

        println!("\nPixels:");
        println!("  tested:                {:12}", self.pixels_tested);
        println!("  depth test passed:     {:12}", self.depth_test_passed);
        println!("  depth test failed:     {:12}", self.depth_test_failed);
        if self.pixels_tested > 0 {
            let pass_rate = (self.depth_test_passed as f64 / self.pixels_tested as f64) * 100.0;
            println!("  depth pass rate:       {:11.2}%", pass_rate);
        }

        println!();
    }
}

/// Global pipeline counters instance.
pub static PIPELINE_COUNTERS: PipelineCounters = PipelineCounters::new();

/// Increment a counter (only when the profiling feature is enabled).
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

/// Add to a counter (only when the profiling feature is enabled).
#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value, std::sync::atomic::Ordering::Relaxed);
        }
    };
}
