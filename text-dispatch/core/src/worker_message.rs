// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion::CompletionSender;
use crate::pool_region::PoolRegion;
use crate::task::Task;
use crate::{TaskError, TaskId};
use std::sync::Arc;

/// Message types received by workers
#[derive(Debug)]
pub(crate) enum WorkerMessage {
    /// Bootstrap message carrying the pool's shared region and the handshake task
    Initialize {
        region: Arc<PoolRegion>,
        handshake: Task,
    },
    /// Work assignment
    Work(Task),
}

/// Events processed one at a time by the pool dispatcher
#[derive(Debug)]
pub(crate) enum PoolEvent {
    Submit {
        task: Task,
        completion: CompletionSender,
    },
    Completed {
        worker: usize,
        task: TaskId,
        outcome: Result<(), TaskError>,
    },
    Shutdown,
}
