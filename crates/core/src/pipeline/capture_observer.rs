use std::collections::HashMap;
use std::time::Instant;

use crate::capture::domain::capture_sequencer::SequencerEvent;
use crate::capture::domain::captured_frame::CapturedFrame;

/// Receives the session's outward-facing output: the status event stream
/// and each completed capture.
pub trait CaptureObserver: Send {
    fn status(&mut self, event: &SequencerEvent);

    fn captured(&mut self, capture: &CapturedFrame);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all output. Used in tests and headless runs.
pub struct NullCaptureObserver;

impl CaptureObserver for NullCaptureObserver {
    fn status(&mut self, _event: &SequencerEvent) {}
    fn captured(&mut self, _capture: &CapturedFrame) {}
}

/// Writes status changes to `log` and keeps session statistics.
///
/// The gate reports a status every poll tick, so consecutive duplicate
/// events are counted but logged only once. Counts are keyed by
/// [`SequencerEvent::category`].
pub struct LogCaptureObserver {
    status_counts: HashMap<String, usize>,
    last_status: Option<SequencerEvent>,
    captures: usize,
    start_time: Instant,
}

impl LogCaptureObserver {
    pub fn new() -> Self {
        Self {
            status_counts: HashMap::new(),
            last_status: None,
            captures: 0,
            start_time: Instant::now(),
        }
    }

    pub fn captures(&self) -> usize {
        self.captures
    }

    pub fn status_count(&self, category: &str) -> usize {
        self.status_counts.get(category).copied().unwrap_or(0)
    }

    /// Returns the formatted summary, or `None` if nothing was observed.
    pub fn summary_string(&self) -> Option<String> {
        if self.status_counts.is_empty() && self.captures == 0 {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Capture session summary ({} captures, {elapsed:.1}s):",
            self.captures
        )];

        let mut categories: Vec<_> = self.status_counts.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (category, count) in categories {
            lines.push(format!("  {count:6}x  {category}"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogCaptureObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureObserver for LogCaptureObserver {
    fn status(&mut self, event: &SequencerEvent) {
        *self.status_counts.entry(event.category()).or_default() += 1;
        if self.last_status.as_ref() != Some(event) {
            log::info!("{event}");
            self.last_status = Some(event.clone());
        }
    }

    fn captured(&mut self, capture: &CapturedFrame) {
        self.captures += 1;
        let regions = if capture.regions().is_some() {
            "with regions"
        } else {
            "without regions"
        };
        log::info!(
            "Captured photo {} ({}x{}, {regions})",
            capture.sequence(),
            capture.canvas().width(),
            capture.canvas().height()
        );
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
