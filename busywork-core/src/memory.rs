//! Memory consumption simulation
//!
//! Memory is requested in megabytes ("bites"), allocated in fixed 8 KiB
//! chunks kept alive in a map keyed by byte offset, and then every byte is
//! written so the pages are physically touched.
//!
//! There is no upper bound on the magnitude here. A large enough request
//! will exhaust the host; the REST layer can be configured with a guard.
//! Every allocation is fallible, so a request the allocator refuses fails
//! on its own instead of aborting the process.

use std::collections::{HashMap, TryReserveError};
use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::error::{SimulationError, SimulationResult};

/// Bytes in one chunk
pub const CHUNK_SIZE: usize = 8192;

/// Bytes in one "bite" (a megabyte)
pub const BYTES_PER_BITE: usize = 1024 * 1024;

const TOUCH_BYTE: u8 = b'0';

/// Outcome of a memory burn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryReport {
    /// Magnitude as supplied by the caller
    pub bites: i64,
    pub chunks: usize,
    pub bytes_touched: usize,
    pub elapsed: Duration,
}

/// Total bytes for a magnitude. Non-positive magnitudes allocate nothing.
pub fn bytes_for(bites: i64) -> usize {
    if bites <= 0 {
        return 0;
    }
    usize::try_from(bites)
        .unwrap_or(usize::MAX)
        .saturating_mul(BYTES_PER_BITE)
}

/// Chunks held for the duration of one memory simulation
#[derive(Debug, Default)]
pub struct MemoryHunger {
    chunks: HashMap<usize, Box<[u8]>>,
}

impl MemoryHunger {
    /// Allocate `ceil(bytes_for(bites) / CHUNK_SIZE)` chunks
    pub fn allocate(bites: i64) -> SimulationResult<Self> {
        let total = bytes_for(bites);
        let mut chunks = HashMap::new();
        chunks
            .try_reserve(total.div_ceil(CHUNK_SIZE))
            .map_err(|e| out_of_memory(bites, e))?;

        for offset in (0..total).step_by(CHUNK_SIZE) {
            let chunk = zeroed_chunk().map_err(|e| out_of_memory(bites, e))?;
            chunks.insert(offset, chunk);
        }

        Ok(Self { chunks })
    }

    /// Write the ASCII `'0'` into every byte of every chunk
    pub fn touch(&mut self) -> usize {
        let mut touched = 0;
        for chunk in self.chunks.values_mut() {
            chunk.fill(TOUCH_BYTE);
            black_box(&chunk);
            touched += chunk.len();
        }
        touched
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    #[cfg(test)]
    fn total_bytes(&self) -> usize {
        self.chunks.values().map(|chunk| chunk.len()).sum()
    }

    #[cfg(test)]
    fn is_touched(&self) -> bool {
        self.chunks
            .values()
            .all(|chunk| chunk.iter().all(|byte| *byte == TOUCH_BYTE))
    }

    #[cfg(test)]
    fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks.keys().copied()
    }
}

fn zeroed_chunk() -> Result<Box<[u8]>, TryReserveError> {
    let mut chunk = Vec::new();
    chunk.try_reserve_exact(CHUNK_SIZE)?;
    chunk.resize(CHUNK_SIZE, 0u8);
    Ok(chunk.into_boxed_slice())
}

fn out_of_memory(bites: i64, err: TryReserveError) -> SimulationError {
    tracing::warn!(bites, error = %err, "Memory simulation allocation refused");
    SimulationError::OutOfMemory {
        bites,
        reason: err.to_string(),
    }
}

/// Allocate and touch `bites` megabytes, then release them.
///
/// Blocks the calling thread for as long as the allocator and the page
/// faults take; async callers go through [`crate::Simulator::memory`].
/// Chunks allocated before a refused allocation are released before the
/// error is returned.
pub fn burn_memory(bites: i64) -> SimulationResult<MemoryReport> {
    let start = Instant::now();
    let mut hunger = MemoryHunger::allocate(bites)?;
    let bytes_touched = hunger.touch();
    let elapsed = start.elapsed();

    let report = MemoryReport {
        bites,
        chunks: hunger.chunk_count(),
        bytes_touched,
        elapsed,
    };
    drop(hunger);

    Ok(report)
}
