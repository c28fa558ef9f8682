// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion::CompletionSender;
use crate::pool_region::PoolRegion;
use crate::task::Task;
use crate::worker_handle::{WorkerHandle, WorkerState};
use crate::worker_message::{PoolEvent, WorkerMessage};
use crate::{TaskError, TaskId, WorkerRuntime};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, trace, warn};

struct PendingTask {
    task: Task,
    completion: CompletionSender,
}

/// Owns the idle/busy bookkeeping and the FIFO queue of the pool.
/// All of it is mutated from one thread, one event at a time.
pub(crate) struct Dispatcher<R: WorkerRuntime> {
    workers: Vec<WorkerHandle<R>>,
    idle: VecDeque<usize>,
    pending: VecDeque<PendingTask>,
    events: mpsc::UnboundedReceiver<PoolEvent>,
    region: Arc<PoolRegion>,
}

impl<R: WorkerRuntime> Dispatcher<R> {
    pub(crate) fn new(
        workers: Vec<WorkerHandle<R>>,
        events: mpsc::UnboundedReceiver<PoolEvent>,
        region: Arc<PoolRegion>,
    ) -> Self {
        let idle = workers.iter().map(|worker| worker.id()).collect();
        Self {
            workers,
            idle,
            pending: VecDeque::new(),
            events,
            region,
        }
    }

    /// Runs until a shutdown event arrives. Dropping the dispatcher afterwards
    /// rejects everything outstanding and joins the workers.
    pub(crate) fn run(mut self) {
        debug!(workers = self.workers.len(), "dispatcher started");
        while let Some(event) = self.events.blocking_recv() {
            match event {
                PoolEvent::Submit { task, completion } => self.submit(task, completion),
                PoolEvent::Completed {
                    worker,
                    task,
                    outcome,
                } => self.complete(worker, task, outcome),
                PoolEvent::Shutdown => break,
            }
        }
        debug!(queued = self.pending.len(), "dispatcher shutting down");
    }

    fn submit(&mut self, task: Task, completion: CompletionSender) {
        let pending = PendingTask { task, completion };
        match self.idle.pop_front() {
            Some(worker) => self.dispatch(worker, pending),
            None => {
                trace!(
                    task = %pending.task.id(),
                    queued = self.pending.len() + 1,
                    "no idle worker, task queued"
                );
                self.pending.push_back(pending);
            }
        }
    }

    fn dispatch(&mut self, worker: usize, pending: PendingTask) {
        let PendingTask { task, completion } = pending;
        let task_id = task.id();
        let handle = &mut self.workers[worker];

        match handle.send(WorkerMessage::Work(task)) {
            Ok(()) => {
                handle.state = WorkerState::Busy {
                    task: task_id,
                    completion,
                };
                self.region.task_dispatched();
                trace!(worker, task = %task_id, "task dispatched");
            }
            Err(_) => {
                // The record is dropped here without running; the worker stays out of the idle set
                error!(worker, task = %task_id, "worker no longer accepts work");
                handle.state = WorkerState::Stopped;
                let _ = completion.send(Err(TaskError::PoolClosed));
            }
        }
    }

    fn complete(&mut self, worker: usize, task: TaskId, outcome: Result<(), TaskError>) {
        let Some(handle) = self.workers.get_mut(worker) else {
            warn!(worker, task = %task, "completion from unknown worker");
            return;
        };

        match std::mem::replace(&mut handle.state, WorkerState::Idle) {
            WorkerState::Busy {
                task: running,
                completion,
            } if running == task => {
                // The submitter may have stopped listening; the result is simply discarded
                let _ = completion.send(outcome);
            }
            previous => {
                warn!(worker, task = %task, "unexpected completion");
                handle.state = previous;
                return;
            }
        }

        match self.pending.pop_front() {
            Some(next) => self.dispatch(worker, next),
            None => self.idle.push_back(worker),
        }
    }
}

impl<R: WorkerRuntime> Drop for Dispatcher<R> {
    fn drop(&mut self) {
        let rejected = self.pending.len();
        // Queued tasks were never dispatched: their records are reclaimed here
        // and their completions resolve to PoolClosed.
        self.pending.clear();
        self.idle.clear();
        // Busy completions are dropped with the handles; each handle joins its worker.
        self.workers.clear();
        debug!(rejected, "dispatcher stopped");
    }
}
