/// Result type for scan operations.
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Errors reported by the scan entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Worker count is zero or exceeds the sequence length. Rejected before
    /// any thread or channel is created.
    #[error("invalid configuration: {workers} workers for a sequence of length {len}")]
    InvalidConfiguration { workers: usize, len: usize },

    /// A worker failed; the whole run is discarded. When several workers
    /// fail, the lowest partition id is reported (downstream failures are
    /// cascade effects of it).
    #[error("worker {pid} failed: {source}")]
    WorkerFailure {
        pid: usize,
        #[source]
        source: WorkerError,
    },
}

/// Faults that can occur inside a single worker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
    /// A checked addition overflowed while scanning or applying a carry.
    #[error("integer overflow while accumulating at index {index}")]
    Overflow { index: usize },

    /// The predecessor dropped its carry sender without publishing.
    #[error("carry for boundary {boundary} was never published")]
    CarryUnavailable { boundary: usize },

    /// The worker thread panicked.
    #[error("worker thread panicked")]
    Panicked,
}
