// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion::CompletionSender;
use crate::pool_region::PoolRegion;
use crate::task::{invoke, Task};
use crate::worker_message::{PoolEvent, WorkerMessage};
use crate::{PoolConfig, PoolError, TaskError, TaskId, WorkerRuntime};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// A worker only ever holds the task it is running
const WORK_QUEUE_DEPTH: usize = 1;

pub(crate) enum WorkerState {
    Idle,
    Busy {
        task: TaskId,
        completion: CompletionSender,
    },
    Stopped,
}

/// One persistent worker thread, owned exclusively by the dispatcher
pub(crate) struct WorkerHandle<R: WorkerRuntime> {
    id: usize,
    pub(crate) state: WorkerState,
    work_tx: Option<mpsc::Sender<WorkerMessage>>,
    thread: Option<R::Handle>,
    runtime: Arc<R>,
}

impl<R: WorkerRuntime> WorkerHandle<R> {
    pub(crate) fn spawn(
        id: usize,
        config: &PoolConfig,
        runtime: Arc<R>,
        events: mpsc::UnboundedSender<PoolEvent>,
    ) -> Result<Self, PoolError> {
        let (work_tx, work_rx) = mpsc::channel(WORK_QUEUE_DEPTH);
        let thread = runtime
            .spawn(config.worker_name(id), move || worker_main(id, work_rx, events))
            .map_err(|e| PoolError::Spawn {
                worker: id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            state: WorkerState::Idle,
            work_tx: Some(work_tx),
            thread: Some(thread),
            runtime,
        })
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    /// Hands the shared region and the handshake task to a freshly spawned worker
    pub(crate) fn initialize(
        &self,
        region: Arc<PoolRegion>,
        handshake: Task,
    ) -> Result<(), PoolError> {
        self.send(WorkerMessage::Initialize { region, handshake })
            .map_err(|_| PoolError::Spawn {
                worker: self.id,
                reason: "worker exited before bootstrap".to_string(),
            })
    }

    /// Returns the message back when the worker can no longer accept it
    pub(crate) fn send(&self, message: WorkerMessage) -> Result<(), WorkerMessage> {
        match &self.work_tx {
            Some(tx) => tx.try_send(message).map_err(|e| e.into_inner()),
            None => Err(message),
        }
    }
}

impl<R: WorkerRuntime> Drop for WorkerHandle<R> {
    fn drop(&mut self) {
        // Closing the channel lets the worker finish its current task and exit
        self.work_tx.take();
        self.state = WorkerState::Stopped;
        if let Some(thread) = self.thread.take() {
            match self.runtime.join(thread) {
                Ok(()) => debug!(worker = self.id, "worker joined"),
                Err(reason) => warn!(worker = self.id, %reason, "worker exited abnormally"),
            }
        }
    }
}

fn worker_main(
    id: usize,
    mut work_rx: mpsc::Receiver<WorkerMessage>,
    events: mpsc::UnboundedSender<PoolEvent>,
) {
    let region = match work_rx.blocking_recv() {
        Some(WorkerMessage::Initialize { region, handshake }) => {
            if let Err(e) = invoke(handshake) {
                warn!(worker = id, error = %e, "handshake failed");
                return;
            }
            region
        }
        Some(WorkerMessage::Work(task)) => {
            warn!(worker = id, task = %task.id(), "work received before bootstrap");
            return;
        }
        None => return,
    };
    debug!(worker = id, "worker ready");

    while let Some(message) = work_rx.blocking_recv() {
        let task = match message {
            WorkerMessage::Work(task) => task,
            WorkerMessage::Initialize { .. } => {
                warn!(worker = id, "ignoring repeated bootstrap");
                continue;
            }
        };

        let task_id = task.id();
        trace!(worker = id, task = %task_id, "running task");
        let outcome = invoke(task);
        if let Err(TaskError::Fault { reason, .. }) = &outcome {
            warn!(worker = id, task = %task_id, %reason, "task faulted");
        }
        region.task_finished(outcome.is_err());

        let completed = PoolEvent::Completed {
            worker: id,
            task: task_id,
            outcome,
        };
        if events.send(completed).is_err() {
            trace!(worker = id, "dispatcher gone, completion dropped");
        }
    }

    region.worker_exited();
    debug!(worker = id, "worker stopped");
}
