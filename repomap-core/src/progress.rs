//! Fetch progress reporting
//!
//! Progress flows from the fetch task to its consumer as discrete, versioned
//! events over a channel, decoupling request sequencing from UI consumption.
//! `total` is a running estimate and may grow as directories are discovered;
//! `completed` and `seq` are monotonic, so consumers can treat
//! `completed/total` as an approaching-but-re-scalable ratio.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Phase of the fetch that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchPhase {
    Metadata,
    Contents,
    Branches,
    Contributors,
    Readme,
    Complete,
}

impl FetchPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FetchPhase::Metadata => "repository metadata",
            FetchPhase::Contents => "directory contents",
            FetchPhase::Branches => "branches",
            FetchPhase::Contributors => "contributors",
            FetchPhase::Readme => "readme",
            FetchPhase::Complete => "complete",
        }
    }
}

/// One progress update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Strictly increasing event version; consumers drop stale events by seq
    pub seq: u64,
    /// Remote calls completed so far; never decreases
    pub completed: usize,
    /// Current estimate of total remote calls; never below `completed`
    pub total: usize,
    pub phase: FetchPhase,
}

impl ProgressEvent {
    /// Completion ratio in `[0.0, 1.0]`
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Sending half of a progress channel.
///
/// The reporter owns the monotonicity invariants: callers may only advance
/// `completed` and extend `total`, and every emitted event carries a fresh
/// sequence number. A closed or absent receiver is not an error; events are
/// simply dropped.
#[derive(Debug)]
pub struct ProgressReporter {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
    seq: u64,
    completed: usize,
    total: usize,
}

/// Create a connected reporter/receiver pair
pub fn progress_channel() -> (ProgressReporter, mpsc::UnboundedReceiver<ProgressEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ProgressReporter {
            tx: Some(tx),
            seq: 0,
            completed: 0,
            total: 0,
        },
        rx,
    )
}

impl ProgressReporter {
    /// A reporter that discards every event
    pub fn disabled() -> Self {
        Self {
            tx: None,
            seq: 0,
            completed: 0,
            total: 0,
        }
    }

    /// Raise the total estimate by `additional` pending calls
    pub fn extend_total(&mut self, additional: usize) {
        self.total += additional;
    }

    /// Record one finished remote call and emit an event
    pub fn advance(&mut self, phase: FetchPhase) {
        self.completed += 1;
        if self.total < self.completed {
            self.total = self.completed;
        }
        self.emit(phase);
    }

    /// Collapse the estimate onto the actual count and emit the final event
    pub fn finish(&mut self) {
        self.total = self.completed;
        self.emit(FetchPhase::Complete);
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn emit(&mut self, phase: FetchPhase) {
        self.seq += 1;
        if let Some(tx) = &self.tx {
            let _ = tx.send(ProgressEvent {
                seq: self.seq,
                completed: self.completed,
                total: self.total,
                phase,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_is_monotonic_under_total_revisions() {
        let (mut reporter, mut rx) = progress_channel();

        reporter.extend_total(2);
        reporter.advance(FetchPhase::Metadata);
        // Discovering new directories mid-fetch grows the estimate
        reporter.extend_total(5);
        reporter.advance(FetchPhase::Contents);
        reporter.advance(FetchPhase::Contents);
        reporter.finish();
        drop(reporter);

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        assert_eq!(events.len(), 4);
        for pair in events.windows(2) {
            assert!(pair[1].completed >= pair[0].completed);
            assert!(pair[1].seq > pair[0].seq);
        }
        for event in &events {
            assert!(event.total >= event.completed);
        }
        let last = events.last().unwrap();
        assert_eq!(last.phase, FetchPhase::Complete);
        assert_eq!(last.completed, last.total);
    }

    #[test]
    fn total_never_trails_completed() {
        let mut reporter = ProgressReporter::disabled();
        // More calls complete than were ever estimated
        reporter.advance(FetchPhase::Contents);
        reporter.advance(FetchPhase::Contents);
        assert_eq!(reporter.total(), reporter.completed());
    }

    #[test]
    fn ratio_is_zero_before_any_estimate() {
        let event = ProgressEvent {
            seq: 1,
            completed: 0,
            total: 0,
            phase: FetchPhase::Metadata,
        };
        assert_eq!(event.ratio(), 0.0);
    }
}
