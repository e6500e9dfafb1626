pub mod profiling;

pub use profiling::{CounterSnapshot, PipelineCounters, PIPELINE_COUNTERS};
