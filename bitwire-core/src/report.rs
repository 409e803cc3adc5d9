//! Acknowledgement failure reporting
//!
//! A missing acknowledgement is handed to a [`FailureReport`] with enough
//! context to find it afterwards: the engine time it happened at, which byte
//! of the sequence it was and what that byte held. Whether the transaction
//! then carries on is decided separately by [`crate::NackPolicy`].

use heapless::Vec;

/// Part of a transaction a written byte belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Byte of a write transaction
    Write,
    /// Address/command byte written ahead of a read
    ReadPrefix,
}

/// A written byte the target did not acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AckFailure {
    /// Engine time (accumulated wait units) when the ack bit was sampled
    pub time: u64,
    /// Position of the byte in the written sequence
    pub index: usize,
    /// Value of the byte
    pub byte: u8,
    /// Transaction stage
    pub stage: Stage,
}

impl AckFailure {
    /// Message attached to every acknowledgement failure
    pub const MESSAGE: &'static str = "Expected an ack";

    /// Human-readable description
    pub fn message(&self) -> &'static str {
        Self::MESSAGE
    }
}

/// Receiver of acknowledgement failures
pub trait FailureReport {
    /// Record one failure
    fn report(&mut self, failure: &AckFailure);
}

impl<F: FnMut(&AckFailure)> FailureReport for F {
    fn report(&mut self, failure: &AckFailure) {
        self(failure)
    }
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReport;

impl FailureReport for NoReport {
    fn report(&mut self, _failure: &AckFailure) {}
}

/// Keeps the first `N` failures
#[derive(Debug, Clone, Default)]
pub struct FailureLog<const N: usize> {
    entries: Vec<AckFailure, N>,
    /// Failures that arrived after the log filled up
    dropped: usize,
}

impl<const N: usize> FailureLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            dropped: 0,
        }
    }

    /// Recorded failures, oldest first
    pub fn entries(&self) -> &[AckFailure] {
        &self.entries
    }

    /// Number of failures seen, including dropped ones
    pub fn total(&self) -> usize {
        self.entries.len() + self.dropped
    }

    /// Number of failures that did not fit
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Check if no failure was seen
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.entries.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> FailureReport for FailureLog<N> {
    fn report(&mut self, failure: &AckFailure) {
        if self.entries.push(*failure).is_err() {
            self.dropped += 1;
        }
    }
}
