// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Region shared by the pool and every worker.
/// Created once by the pool and handed to each worker at bootstrap.
#[derive(Debug, Default)]
pub(crate) struct PoolRegion {
    workers_ready: AtomicUsize,
    workers_exited: AtomicUsize,
    tasks_dispatched: AtomicUsize,
    tasks_completed: AtomicUsize,
    tasks_faulted: AtomicUsize,
}

impl PoolRegion {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn worker_ready(&self) {
        self.workers_ready.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn worker_exited(&self) {
        self.workers_exited.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn task_dispatched(&self) {
        self.tasks_dispatched.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn task_finished(&self, faulted: bool) {
        if faulted {
            self.tasks_faulted.fetch_add(1, Ordering::SeqCst);
        } else {
            self.tasks_completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub(crate) fn snapshot(&self, workers: usize) -> PoolStats {
        PoolStats {
            workers,
            workers_ready: self.workers_ready.load(Ordering::SeqCst),
            workers_exited: self.workers_exited.load(Ordering::SeqCst),
            tasks_dispatched: self.tasks_dispatched.load(Ordering::SeqCst),
            tasks_completed: self.tasks_completed.load(Ordering::SeqCst),
            tasks_faulted: self.tasks_faulted.load(Ordering::SeqCst),
        }
    }
}

/// Point-in-time counters of a worker pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub workers: usize,
    pub workers_ready: usize,
    pub workers_exited: usize,
    pub tasks_dispatched: usize,
    pub tasks_completed: usize,
    pub tasks_faulted: usize,
}
