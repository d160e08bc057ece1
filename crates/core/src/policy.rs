use std::num::NonZeroUsize;

use thiserror::Error;

/// Returned when a policy is asked for a worker count of zero.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("max workers must be at least 1")]
pub struct InvalidWorkerCount;

/// Immutable configuration for one scan call.
///
/// Built once by the caller, then consulted read-only by every recursive
/// step. The `with_*` combinators consume and return the value, so a policy
/// never changes underneath a running scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPolicy {
    include_hidden: bool,
    parallel: bool,
    max_workers: NonZeroUsize,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanPolicy {
    /// Defaults: hidden entries excluded, sequential execution, worker count
    /// equal to the host's available parallelism.
    pub fn new() -> Self {
        Self {
            include_hidden: false,
            parallel: false,
            max_workers: default_workers(),
        }
    }

    pub fn with_hidden(self, include_hidden: bool) -> Self {
        Self {
            include_hidden,
            ..self
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    /// Bound the worker pool. A zero count is rejected outright, not clamped.
    pub fn with_max_workers(self, max_workers: usize) -> Result<Self, InvalidWorkerCount> {
        let max_workers = NonZeroUsize::new(max_workers).ok_or(InvalidWorkerCount)?;
        Ok(Self {
            max_workers,
            ..self
        })
    }

    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn max_workers(&self) -> NonZeroUsize {
        self.max_workers
    }
}

fn default_workers() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}
