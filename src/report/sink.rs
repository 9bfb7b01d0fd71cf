//! Destinations for the scenario log
//!
//! A finished scenario writes its formatted lines to a [`LogSink`]. The
//! default [`ConsoleSink`] prints to standard output and colours the outcome
//! tag when the terminal supports it; [`MemorySink`] keeps the lines for
//! inspection, and any `Fn(&str)` closure can be used directly.
//!
//! # Example
//!
//! ```
//! use scenario_pipe::report::{LogSink, MemorySink};
//!
//! let sink = MemorySink::new();
//! sink.write_line("Scenario: Example");
//! assert_eq!(sink.lines(), vec!["Scenario: Example".to_string()]);
//! ```

use console::style;
use std::sync::Mutex;

/// Receives formatted log lines, one call per line
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn write_line(&self, line: &str) {
        self(line)
    }
}

/// Prints lines to standard output
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    colored: bool,
}

impl ConsoleSink {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Plain output regardless of terminal support
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn render(&self, line: &str) -> String {
        if !self.colored {
            return line.to_string();
        }

        let Some((head, tag)) = line.rsplit_once(" [") else {
            return line.to_string();
        };
        let outcome = tag.trim_end_matches(']');
        let styled = match outcome {
            "Passed" => style(outcome).green(),
            "Failed" => style(outcome).red(),
            "Inconclusive" => style(outcome).yellow(),
            _ => style(outcome).dim(),
        }
        .force_styling(true);

        format!("{} [{}]", head, styled)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(console::colors_enabled())
    }
}

impl LogSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        println!("{}", self.render(line));
    }
}

/// Collects lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        let mut lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.push(line.to_string());
    }
}

/// Write every line of a finished scenario to `sink`
pub fn emit(lines: &[String], sink: &dyn LogSink) {
    for line in lines {
        sink.write_line(line);
    }
}
