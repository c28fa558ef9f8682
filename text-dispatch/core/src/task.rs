// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::TaskError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Identity of one dispatched unit of work. Never reused within a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// An owned task record: the entry function bound to its context.
/// Moving it into a worker is the ownership transfer; the submitter keeps nothing.
pub(crate) struct Task {
    id: TaskId,
    body: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    pub(crate) fn new<E, C>(id: TaskId, entry: E, context: C) -> Self
    where
        E: FnOnce(C) + Send + 'static,
        C: Send + 'static,
    {
        Self {
            id,
            body: Box::new(move || entry(context)),
        }
    }

    pub(crate) fn id(&self) -> TaskId {
        self.id
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("id", &self.id).finish()
    }
}

/// The single entry point a worker runs tasks through.
///
/// Consumes the record, runs the body once and frees it before returning,
/// so a record can never be invoked twice. A panicking body is reported as
/// [`TaskError::Fault`] instead of unwinding through the worker.
pub(crate) fn invoke(task: Task) -> Result<(), TaskError> {
    let Task { id, body } = task;
    panic::catch_unwind(AssertUnwindSafe(body)).map_err(|payload| TaskError::Fault {
        task: id,
        reason: panic_message(&*payload),
    })
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
