//! Scenario log rendering and output

pub mod formatter;
pub mod sink;

pub use formatter::{format_step_results, render_lines, step_label};
pub use sink::{emit, ConsoleSink, LogSink, MemorySink};
