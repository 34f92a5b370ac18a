mod chunker;
mod readiness;
mod upload;
mod worker_pool;

#[rustfmt::skip]
pub use {
    chunker::{chunk, DEFAULT_PART_SIZE},
    readiness::{ReadinessPollServiceImpl, DEFAULT_POLL_INTERVAL},
    upload::UploadServiceImpl,
    worker_pool::{PoolReport, TaskExecutor, WorkerPool, DEFAULT_CONCURRENCY},
};
