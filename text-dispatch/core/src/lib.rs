// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod error;
pub use error::{PoolError, ProcessError, TaskError};

mod pool_config;
pub use pool_config::PoolConfig;

mod pool_region;
pub use pool_region::PoolStats;

mod worker_runtime;
pub use worker_runtime::{ThreadRuntime, WorkerRuntime};

mod task;
pub use task::TaskId;

mod completion;
pub use completion::Completion;

mod worker_message;

mod worker_handle;

mod dispatcher;

mod worker_pool;
pub use worker_pool::WorkerPool;

mod chunk_transform;
pub use chunk_transform::{ChunkTransform, Identity, Merge, Uppercase};

mod chunk_job;

mod processed_text;
pub use processed_text::ProcessedText;

mod text;
pub use text::Text;
