//! Frame-rate measurement
//!
//! Counts frames over a rolling window and reports the rate each time a
//! window closes. The monitor only measures; deciding that a rate is too
//! low and dropping fidelity is the controller's call.

use std::time::Instant;

use tracing::debug;

/// Windowed frame counter, off until started
#[derive(Clone, Debug, Default)]
pub struct FrameRateMonitor {
    enabled: bool,
    window_start: Option<Instant>,
    frames: u32,
}

impl FrameRateMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin measuring; the first sampled frame opens the window
    pub fn start(&mut self) {
        self.enabled = true;
        self.window_start = None;
        self.frames = 0;
    }

    pub fn stop(&mut self) {
        self.enabled = false;
        self.window_start = None;
        self.frames = 0;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Count one frame at `now`.
    ///
    /// Returns the measured frames-per-second when a window of at least
    /// `window_ms` closes, normalized to the window's actual length.
    pub fn sample(&mut self, now: Instant, window_ms: f32) -> Option<u32> {
        if !self.enabled {
            return None;
        }
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return None;
        };

        self.frames += 1;
        let elapsed_ms = now.saturating_duration_since(start).as_secs_f32() * 1000.0;
        if elapsed_ms < window_ms.max(1.0) {
            return None;
        }

        let fps = (self.frames as f32 * 1000.0 / elapsed_ms).round() as u32;
        debug!(fps, frames = self.frames, elapsed_ms, "frame-rate window closed");

        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let mut monitor = FrameRateMonitor::new();
        let t0 = Instant::now();
        for i in 0..200 {
            assert_eq!(monitor.sample(t0 + Duration::from_millis(16 * i), 1000.0), None);
        }
    }

    #[test]
    fn test_window_reports_measured_rate() {
        let mut monitor = FrameRateMonitor::new();
        monitor.start();
        let t0 = Instant::now();

        // Opens the window
        assert_eq!(monitor.sample(t0, 1000.0), None);

        // 10 frames at 100ms apart: the last one closes the window at 10fps
        let mut report = None;
        for i in 1..=10u64 {
            report = monitor.sample(t0 + Duration::from_millis(100 * i), 1000.0);
            if i < 10 {
                assert_eq!(report, None);
            }
        }
        assert_eq!(report, Some(10));
    }

    #[test]
    fn test_window_resets_after_report() {
        let mut monitor = FrameRateMonitor::new();
        monitor.start();
        let t0 = Instant::now();

        monitor.sample(t0, 1000.0);
        for i in 1..=10u64 {
            monitor.sample(t0 + Duration::from_millis(100 * i), 1000.0);
        }

        // Next window counts fresh from the closing frame: 60 frames in
        // the second second
        let t1 = t0 + Duration::from_millis(1000);
        let mut report = None;
        for i in 1..=60u64 {
            report = monitor.sample(t1 + Duration::from_millis(1000 * i / 60), 1000.0);
        }
        assert_eq!(report, Some(60));
    }

    #[test]
    fn test_stop_discards_partial_window() {
        let mut monitor = FrameRateMonitor::new();
        monitor.start();
        let t0 = Instant::now();
        monitor.sample(t0, 1000.0);
        monitor.sample(t0 + Duration::from_millis(16), 1000.0);

        monitor.stop();
        assert!(!monitor.is_enabled());
        assert_eq!(monitor.sample(t0 + Duration::from_secs(5), 1000.0), None);

        // Restart opens a brand-new window
        monitor.start();
        let t1 = t0 + Duration::from_secs(10);
        assert_eq!(monitor.sample(t1, 1000.0), None);
        assert_eq!(
            monitor.sample(t1 + Duration::from_millis(500), 1000.0),
            None
        );
    }
}
