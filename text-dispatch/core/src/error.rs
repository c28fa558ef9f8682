// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::TaskId;

/// Errors raised while building or using a [`crate::WorkerPool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pool must own at least one worker
    InvalidSize,

    /// A worker thread failed to start or never completed its handshake.
    /// Construction is all-or-nothing, so no pool is returned.
    Spawn { worker: usize, reason: String },
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::InvalidSize => write!(f, "Worker pool size must be at least 1"),
            PoolError::Spawn { worker, reason } => {
                write!(f, "Worker {} failed to start: {}", worker, reason)
            }
        }
    }
}

impl std::error::Error for PoolError {}

/// Outcome of a single submitted task that did not complete normally
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task body panicked on its worker
    Fault { task: TaskId, reason: String },

    /// The pool was torn down before the task reported completion
    PoolClosed,
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskError::Fault { task, reason } => write!(f, "{} faulted: {}", task, reason),
            TaskError::PoolClosed => write!(f, "Worker pool closed before the task completed"),
        }
    }
}

impl std::error::Error for TaskError {}

/// Errors rejecting a single [`crate::Text::process`] call.
/// The pool stays usable after any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// Concurrency below 1; nothing was dispatched
    Config { concurrency: usize },

    /// The chunk at `index` faulted while executing
    ChunkFailure { index: usize, reason: String },

    /// The pool was torn down before every chunk completed
    PoolClosed,
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessError::Config { concurrency } => {
                write!(f, "Concurrency must be at least 1 (got {})", concurrency)
            }
            ProcessError::ChunkFailure { index, reason } => {
                write!(f, "Chunk {} failed: {}", index, reason)
            }
            ProcessError::PoolClosed => write!(f, "Worker pool closed during processing"),
        }
    }
}

impl std::error::Error for ProcessError {}
