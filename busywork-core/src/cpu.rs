//! CPU consumption simulation

use std::hint::black_box;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::{SimulationError, SimulationResult};

/// Work units counted down per caller-supplied iteration
pub const WORK_UNITS_PER_ITERATION: u64 = 20_000;

/// Pause taken every time the countdown crosses a whole iteration
pub const PAUSE: Duration = Duration::from_millis(20);

/// Outcome of a CPU burn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuReport {
    /// Magnitude as supplied by the caller
    pub iterations: i64,
    /// Total countdown length
    pub work_units: u64,
    /// Number of 20ms pauses taken
    pub pauses: u64,
    pub elapsed: Duration,
}

/// Countdown length for a magnitude. Non-positive magnitudes do no work.
pub fn work_units_for(iterations: i64) -> u64 {
    if iterations <= 0 {
        return 0;
    }
    (iterations as u64).saturating_mul(WORK_UNITS_PER_ITERATION)
}

/// Count down `iterations * 20_000` work units, sleeping the current thread
/// for [`PAUSE`] whenever the remaining count is a multiple of 20,000.
///
/// This blocks the calling thread; async callers go through
/// [`crate::Simulator::cpu`]. The token is checked before every pause and a
/// cancelled token aborts the run with [`SimulationError::Cancelled`].
pub fn burn_cpu(iterations: i64, cancel: &CancellationToken) -> SimulationResult<CpuReport> {
    let work_units = work_units_for(iterations);
    let mut remaining = work_units;
    let mut pauses = 0;

    let start = Instant::now();
    while remaining > 0 {
        if remaining % WORK_UNITS_PER_ITERATION == 0 {
            if cancel.is_cancelled() {
                tracing::debug!(iterations, remaining, "CPU simulation cancelled");
                return Err(SimulationError::Cancelled);
            }
            std::thread::sleep(PAUSE);
            pauses += 1;
        }
        remaining = black_box(remaining) - 1;
    }
    let elapsed = start.elapsed();

    Ok(CpuReport {
        iterations,
        work_units,
        pauses,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_units_scaling() {
        assert_eq!(work_units_for(10), 200_000);
        assert_eq!(work_units_for(1), 20_000);
        assert_eq!(work_units_for(0), 0);
        assert_eq!(work_units_for(-3), 0);
        assert_eq!(work_units_for(i64::MAX), u64::MAX);
    }

    #[test]
    fn test_one_pause_per_iteration() {
        let token = CancellationToken::new();
        let report = burn_cpu(3, &token).unwrap();

        assert_eq!(report.iterations, 3);
        assert_eq!(report.work_units, 60_000);
        assert_eq!(report.pauses, 3);
        assert!(report.elapsed >= PAUSE * 3);
    }

    #[test]
    fn test_zero_and_negative_are_no_ops() {
        let token = CancellationToken::new();

        let report = burn_cpu(0, &token).unwrap();
        assert_eq!(report.pauses, 0);
        assert_eq!(report.work_units, 0);

        let report = burn_cpu(-7, &token).unwrap();
        assert_eq!(report.iterations, -7);
        assert_eq!(report.pauses, 0);
        assert!(report.elapsed < PAUSE);
    }

    #[test]
    fn test_cancelled_token_aborts_before_sleeping() {
        let token = CancellationToken::new();
        token.cancel();

        let started = Instant::now();
        let result = burn_cpu(50, &token);

        assert!(matches!(result, Err(SimulationError::Cancelled)));
        assert!(started.elapsed() < PAUSE * 50);
    }
}
