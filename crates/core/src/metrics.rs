//! Accuracy and timing measurements.
//!
//! - Bit error rate (BER) between an original and a received sequence
//! - Message success rate (exact match or not)
//! - A start/stop [`Timer`] for throughput reporting

use crate::bitio::Bit;
use crate::error::{InvalidParameter, Result};
use std::time::{Duration, Instant};

fn check_lengths(original: &[Bit], received: &[Bit]) -> Result<()> {
    if original.len() != received.len() {
        return Err(InvalidParameter::LengthMismatch {
            original: original.len(),
            received: received.len(),
        }
        .into());
    }
    Ok(())
}

/// Count positions where the two sequences differ.
///
/// # Errors
/// `InvalidParameter::LengthMismatch` when lengths differ.
pub fn count_bit_errors(original: &[Bit], received: &[Bit]) -> Result<usize> {
    check_lengths(original, received)?;
    Ok(original
        .iter()
        .zip(received)
        .filter(|(a, b)| a != b)
        .count())
}

/// Fraction of positions where the two sequences differ.
///
/// Returns 0.0 for empty inputs.
///
/// # Errors
/// `InvalidParameter::LengthMismatch` when lengths differ.
pub fn calculate_ber(original: &[Bit], received: &[Bit]) -> Result<f64> {
    let errors = count_bit_errors(original, received)?;
    if original.is_empty() {
        return Ok(0.0);
    }
    Ok(errors as f64 / original.len() as f64)
}

/// 1.0 when the sequences are identical, 0.0 otherwise.
///
/// Empty inputs count as identical.
///
/// # Errors
/// `InvalidParameter::LengthMismatch` when lengths differ.
pub fn calculate_success_rate(original: &[Bit], received: &[Bit]) -> Result<f64> {
    check_lengths(original, received)?;
    Ok(if original == received { 1.0 } else { 0.0 })
}

/// Throughput in megabits per second for `bits` processed in `elapsed`.
///
/// Returns 0.0 for a zero-length interval.
pub fn throughput_mbps(bits: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        0.0
    } else {
        bits as f64 / secs / 1e6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle,
    Running { start: Instant },
    Stopped { start: Instant, end: Instant },
}

/// Wall-clock stopwatch.
///
/// Transitions idle -> running -> stopped. Elapsed time is measured against
/// the current instant while running and is frozen once stopped. Starting
/// again restarts the measurement. An idle timer reports zero.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    state: TimerState,
}

impl Timer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    /// Create a timer that is already running.
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    /// Start (or restart) timing.
    pub fn start(&mut self) {
        self.state = TimerState::Running {
            start: Instant::now(),
        };
    }

    /// Stop timing. Has no effect unless running.
    pub fn stop(&mut self) {
        if let TimerState::Running { start } = self.state {
            self.state = TimerState::Stopped {
                start,
                end: Instant::now(),
            };
        }
    }

    /// Whether the timer is currently running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Elapsed time: live while running, frozen after stop.
    pub fn elapsed(&self) -> Duration {
        match self.state {
            TimerState::Idle => Duration::ZERO,
            TimerState::Running { start } => start.elapsed(),
            TimerState::Stopped { start, end } => end.duration_since(start),
        }
    }

    /// Elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Elapsed time in milliseconds.
    pub fn elapsed_milliseconds(&self) -> f64 {
        self.elapsed_seconds() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
