// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{TaskError, TaskId};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

pub(crate) type CompletionSender = oneshot::Sender<Result<(), TaskError>>;

/// Future resolving when the worker running a submitted task signals completion.
///
/// Resolves to [`TaskError::PoolClosed`] when the pool drops the task's
/// completion signal, i.e. on teardown or when submitted to a closed pool.
#[derive(Debug)]
pub struct Completion {
    task: TaskId,
    rx: oneshot::Receiver<Result<(), TaskError>>,
}

impl Completion {
    pub(crate) fn channel(task: TaskId) -> (CompletionSender, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { task, rx })
    }

    pub fn task_id(&self) -> TaskId {
        self.task
    }
}

impl Future for Completion {
    type Output = Result<(), TaskError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|signal| match signal {
            Ok(outcome) => outcome,
            Err(_) => Err(TaskError::PoolClosed),
        })
    }
}
