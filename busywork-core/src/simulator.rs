//! Async entry point for the simulations
//!
//! Both simulations block their thread, so they run on tokio's blocking pool
//! and only ever hold up the request that started them.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cpu::{burn_cpu, CpuReport};
use crate::error::{SimulationError, SimulationResult};
use crate::memory::{burn_memory, MemoryReport};

/// Runs CPU and memory simulations off the async executor
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    max_bites: Option<i64>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject memory simulations above `max_bites` megabytes
    pub fn with_max_bites(mut self, max_bites: Option<i64>) -> Self {
        self.max_bites = max_bites;
        self
    }

    /// Burn CPU for `iterations` whole iterations.
    ///
    /// If the returned future is dropped before completion (for example the
    /// client disconnected) the countdown stops at its next pause.
    pub async fn cpu(&self, iterations: i64) -> SimulationResult<CpuReport> {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();

        debug!(iterations, "Starting CPU simulation");
        let report = tokio::task::spawn_blocking(move || burn_cpu(iterations, &token))
            .await
            .map_err(SimulationError::from)??;
        guard.disarm();

        debug!(iterations, elapsed_ns = report.elapsed.as_nanos() as u64, "CPU simulation done");
        Ok(report)
    }

    /// Allocate and touch `bites` megabytes
    pub async fn memory(&self, bites: i64) -> SimulationResult<MemoryReport> {
        if let Some(max) = self.max_bites {
            if bites > max {
                return Err(SimulationError::LimitExceeded { requested: bites, max });
            }
        }

        debug!(bites, "Starting memory simulation");
        let report = tokio::task::spawn_blocking(move || burn_memory(bites))
            .await
            .map_err(SimulationError::from)??;

        debug!(bites, chunks = report.chunks, "Memory simulation done");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::PAUSE;
    use crate::memory::BYTES_PER_BITE;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_cpu_runs_on_blocking_pool() {
        let simulator = Simulator::new();
        let report = simulator.cpu(2).await.unwrap();

        assert_eq!(report.pauses, 2);
        assert!(report.elapsed >= PAUSE * 2);
    }

    #[tokio::test]
    async fn test_memory_simulation() {
        let simulator = Simulator::new();
        let report = simulator.memory(1).await.unwrap();

        assert_eq!(report.bytes_touched, BYTES_PER_BITE);
        assert_eq!(report.chunks, 128);
    }

    #[tokio::test]
    async fn test_memory_limit_is_opt_in() {
        let unbounded = Simulator::new();
        assert!(unbounded.memory(2).await.is_ok());

        let bounded = Simulator::new().with_max_bites(Some(1));
        let err = bounded.memory(2).await.unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(err, SimulationError::LimitExceeded { requested: 2, max: 1 }));

        assert!(bounded.memory(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_simulations_are_independent() {
        let simulator = Simulator::new();
        let (cpu, memory) = tokio::join!(simulator.cpu(1), simulator.memory(1));

        assert_eq!(cpu.unwrap().pauses, 1);
        assert_eq!(memory.unwrap().bites, 1);
    }

    #[test]
    fn test_dropped_cpu_request_releases_its_worker() {
        // One blocking thread: the follow-up simulation can only start once
        // the abandoned countdown has stopped.
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(1)
            .enable_time()
            .build()
            .unwrap();

        runtime.block_on(async {
            let simulator = Simulator::new();

            // 500 iterations would keep the worker busy for over 10 seconds
            let abandoned = tokio::time::timeout(Duration::from_millis(30), simulator.cpu(500)).await;
            assert!(abandoned.is_err());

            let started = Instant::now();
            let next = tokio::time::timeout(Duration::from_secs(2), simulator.memory(0)).await;
            assert!(next.is_ok(), "blocking worker still running the dropped countdown");
            assert!(started.elapsed() < PAUSE * 25);
        });
    }
}
