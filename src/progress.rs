//! Progress and ETA reporting for the live translation pass.

use std::fmt;
use std::time::{Duration, Instant};

/// A progress milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Completed share of the pass, floored to a whole percent
    pub percent: u32,
    pub completed: usize,
    pub total: usize,
    pub elapsed: Duration,
    /// Linear estimate: elapsed / completed * (total - completed)
    pub eta: Duration,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% ({}/{}) elapsed {}, ETA {}",
            self.percent,
            self.completed,
            self.total,
            format_duration(self.elapsed),
            format_duration(self.eta)
        )
    }
}

/// Counts visited leaves against a precomputed total and reports each
/// granularity boundary once.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    granularity: u32,
    completed: usize,
    last_boundary: u32,
    started: Instant,
}

impl ProgressTracker {
    /// `granularity` is a percentage step, clamped to 1..=100.
    pub fn new(total: usize, granularity: u32) -> Self {
        Self {
            total,
            granularity: granularity.clamp(1, 100),
            completed: 0,
            last_boundary: 0,
            started: Instant::now(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Record one visited leaf; returns an event when a new boundary is reached.
    pub fn record_leaf(&mut self) -> Option<ProgressEvent> {
        if self.completed >= self.total {
            return None;
        }
        self.completed += 1;

        let percent = (self.completed * 100 / self.total) as u32;
        let boundary = percent / self.granularity * self.granularity;
        if boundary == 0 || boundary <= self.last_boundary {
            return None;
        }
        self.last_boundary = boundary;

        let elapsed = self.started.elapsed();
        Some(ProgressEvent {
            percent,
            completed: self.completed,
            total: self.total,
            elapsed,
            eta: estimate_remaining(elapsed, self.completed, self.total),
        })
    }
}

fn estimate_remaining(elapsed: Duration, completed: usize, total: usize) -> Duration {
    if completed == 0 || completed >= total {
        return Duration::ZERO;
    }
    elapsed.mul_f64((total - completed) as f64 / completed as f64)
}

/// Compact `1h02m03s` / `2m05s` / `4.2s` rendering for log lines.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundaries(total: usize, granularity: u32) -> Vec<(u32, usize)> {
        let mut tracker = ProgressTracker::new(total, granularity);
        (0..total)
            .filter_map(|_| tracker.record_leaf())
            .map(|event| (event.percent, event.completed))
            .collect()
    }

    #[test]
    fn test_twenty_leaves_every_five_percent() {
        let events = boundaries(20, 5);
        let expected: Vec<(u32, usize)> = (1..=20).map(|i| (i as u32 * 5, i)).collect();
        assert_eq!(events, expected);
    }

    #[test]
    fn test_coarse_granularity_fires_once_per_boundary() {
        // 3 leaves at 10%: 33%, 66%, 100%
        assert_eq!(boundaries(3, 10), vec![(33, 1), (66, 2), (100, 3)]);
    }

    #[test]
    fn test_many_leaves_ten_percent() {
        let events = boundaries(1000, 10);
        assert_eq!(events.len(), 10);
        assert_eq!(events[0], (10, 100));
        assert_eq!(events[9], (100, 1000));
    }

    #[test]
    fn test_no_events_below_first_boundary() {
        let mut tracker = ProgressTracker::new(200, 10);
        for _ in 0..19 {
            assert!(tracker.record_leaf().is_none());
        }
        assert_eq!(tracker.record_leaf().map(|e| e.percent), Some(10));
    }

    #[test]
    fn test_zero_total_emits_nothing() {
        let mut tracker = ProgressTracker::new(0, 5);
        assert!(tracker.record_leaf().is_none());
        assert_eq!(tracker.completed(), 0);
    }

    #[test]
    fn test_extra_records_past_total_are_ignored() {
        let mut tracker = ProgressTracker::new(2, 50);
        assert!(tracker.record_leaf().is_some());
        assert!(tracker.record_leaf().is_some());
        assert!(tracker.record_leaf().is_none());
        assert_eq!(tracker.completed(), 2);
    }

    #[test]
    fn test_granularity_is_clamped() {
        assert_eq!(boundaries(4, 0).len(), 4);
        assert_eq!(boundaries(4, 250), vec![(100, 4)]);
    }

    #[test]
    fn test_estimate_remaining_is_linear() {
        let eta = estimate_remaining(Duration::from_secs(10), 5, 20);
        assert_eq!(eta, Duration::from_secs(30));
        assert_eq!(estimate_remaining(Duration::from_secs(10), 20, 20), Duration::ZERO);
    }

    #[test]
    fn test_last_event_has_zero_eta() {
        let mut tracker = ProgressTracker::new(1, 10);
        let event = tracker.record_leaf().expect("event");
        assert_eq!(event.percent, 100);
        assert_eq!(event.eta, Duration::ZERO);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(4200)), "4.2s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m05s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h02m03s");
    }

    #[test]
    fn test_event_display() {
        let event = ProgressEvent {
            percent: 50,
            completed: 10,
            total: 20,
            elapsed: Duration::from_secs(5),
            eta: Duration::from_secs(5),
        };
        assert_eq!(event.to_string(), "50% (10/20) elapsed 5.0s, ETA 5.0s");
    }
}
