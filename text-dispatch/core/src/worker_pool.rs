// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::dispatcher::Dispatcher;
use crate::pool_region::PoolRegion;
use crate::task::Task;
use crate::worker_handle::WorkerHandle;
use crate::worker_message::PoolEvent;
use crate::{Completion, PoolConfig, PoolError, PoolStats, TaskId, ThreadRuntime, WorkerRuntime};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc as std_mpsc, Arc, Mutex};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Fixed-size pool of persistent worker threads.
///
/// Workers are spawned once, never recycled, and all terminated by
/// [`WorkerPool::teardown`] (or on drop). Submitted tasks go to an idle
/// worker, or wait in a FIFO queue until one frees.
pub struct WorkerPool<R: WorkerRuntime = ThreadRuntime> {
    size: usize,
    events: mpsc::UnboundedSender<PoolEvent>,
    region: Arc<PoolRegion>,
    closed: AtomicBool,
    next_task: AtomicU64,
    dispatcher: Mutex<Option<R::Handle>>,
    runtime: Arc<R>,
}

impl WorkerPool<ThreadRuntime> {
    /// Spawns `size` worker threads and waits for every handshake
    pub fn new(size: usize) -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::new(size))
    }

    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        Self::with_runtime(config, ThreadRuntime)
    }
}

impl<R: WorkerRuntime> WorkerPool<R> {
    /// Builds the pool on a custom runtime. All-or-nothing: if any worker
    /// fails to start or to complete its handshake, every worker already
    /// started is shut down and joined before the error is returned.
    pub fn with_runtime(config: PoolConfig, runtime: R) -> Result<Self, PoolError> {
        if config.size == 0 {
            return Err(PoolError::InvalidSize);
        }

        let runtime = Arc::new(runtime);
        let region = Arc::new(PoolRegion::new());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = std_mpsc::channel();
        let mut next_task = 1;

        let mut workers = Vec::with_capacity(config.size);
        for id in 0..config.size {
            let worker =
                WorkerHandle::spawn(id, &config, Arc::clone(&runtime), events_tx.clone())?;

            let ready = ready_tx.clone();
            let shared = Arc::clone(&region);
            // Counted before the ready signal
            let signal_ready = move |worker: usize| {
                shared.worker_ready();
                let _ = ready.send(worker);
            };
            let handshake = Task::new(TaskId(next_task), signal_ready, id);
            next_task += 1;

            // On error `workers` is dropped, which joins every worker started so far
            worker.initialize(Arc::clone(&region), handshake)?;
            workers.push(worker);
        }
        drop(ready_tx);

        wait_for_handshakes(&config, &ready_rx)?;
        info!(workers = config.size, "worker pool ready");

        let dispatcher = Dispatcher::new(workers, events_rx, Arc::clone(&region));
        // A failed spawn drops the dispatcher with the closure, which joins the workers
        let dispatcher = runtime
            .spawn(config.dispatcher_name(), move || dispatcher.run())
            .map_err(|e| PoolError::Spawn {
                worker: config.size,
                reason: format!("dispatcher: {}", e),
            })?;

        Ok(Self {
            size: config.size,
            events: events_tx,
            region,
            closed: AtomicBool::new(false),
            next_task: AtomicU64::new(next_task),
            dispatcher: Mutex::new(Some(dispatcher)),
            runtime,
        })
    }

    /// Number of workers; fixed for the pool's lifetime
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> PoolStats {
        self.region.snapshot(self.size)
    }

    /// Submits `entry(context)` to run exactly once on some worker.
    ///
    /// The context is moved into the task record and owned by the worker from
    /// dispatch on. The returned future resolves when that worker reports
    /// completion, or with [`crate::TaskError::PoolClosed`] if the pool is
    /// (or gets) torn down first.
    pub fn submit<E, C>(&self, entry: E, context: C) -> Completion
    where
        E: FnOnce(C) + Send + 'static,
        C: Send + 'static,
    {
        let id = TaskId(self.next_task.fetch_add(1, Ordering::SeqCst));
        let (completion_tx, completion) = Completion::channel(id);

        if self.is_closed() {
            debug!(task = %id, "submit on closed pool");
            return completion;
        }

        let task = Task::new(id, entry, context);
        let event = PoolEvent::Submit {
            task,
            completion: completion_tx,
        };
        if self.events.send(event).is_err() {
            debug!(task = %id, "dispatcher gone, task dropped");
        }
        completion
    }

    /// Terminates every worker. Idempotent.
    ///
    /// Queued tasks are dropped without running and, like tasks still in
    /// flight, their completions resolve to `PoolClosed`. A task already
    /// running cannot be interrupted: this call waits for it to finish and
    /// discards its result.
    pub fn teardown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let _ = self.events.send(PoolEvent::Shutdown);
        let dispatcher = match self.dispatcher.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(dispatcher) = dispatcher {
            if let Err(reason) = self.runtime.join(dispatcher) {
                warn!(%reason, "dispatcher exited abnormally");
            }
        }
        info!(workers = self.size, "worker pool torn down");
    }
}

impl<R: WorkerRuntime> Drop for WorkerPool<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn wait_for_handshakes(
    config: &PoolConfig,
    ready_rx: &std_mpsc::Receiver<usize>,
) -> Result<(), PoolError> {
    let deadline = Instant::now() + config.handshake_timeout;
    let mut ready = vec![false; config.size];
    let mut remaining = config.size;

    while remaining > 0 {
        let wait = deadline.saturating_duration_since(Instant::now());
        match ready_rx.recv_timeout(wait) {
            Ok(worker) => {
                if let Some(flag) = ready.get_mut(worker) {
                    if !*flag {
                        *flag = true;
                        remaining -= 1;
                    }
                }
            }
            Err(e) => {
                let worker = ready.iter().position(|flag| !flag).unwrap_or(0);
                return Err(PoolError::Spawn {
                    worker,
                    reason: format!("handshake not completed: {}", e),
                });
            }
        }
    }
    Ok(())
}
