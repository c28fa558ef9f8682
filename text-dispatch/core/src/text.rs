// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chunk_job::ChunkJob;
use crate::{ChunkTransform, ProcessError, ProcessedText, TaskError, WorkerPool, WorkerRuntime};
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable input text. Chunk jobs share it by reference count and only
/// carry byte ranges, so dispatching never copies the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    inner: Arc<str>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            inner: Arc::from(content.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.inner.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Splits the text into `concurrency` contiguous byte ranges.
    ///
    /// Pieces are balanced by character count: they differ by at most one
    /// character, the first `len % concurrency` being the longer ones, and no
    /// boundary ever falls inside a multi-byte character. With more pieces
    /// than characters the trailing pieces are empty.
    pub fn partition(&self, concurrency: usize) -> Result<Vec<Range<usize>>, ProcessError> {
        if concurrency == 0 {
            return Err(ProcessError::Config { concurrency });
        }

        let total = self.char_len();
        let base = total / concurrency;
        let extra = total % concurrency;

        let mut chars = self.inner.char_indices();
        let mut ranges = Vec::with_capacity(concurrency);
        let mut start = 0;
        for piece in 0..concurrency {
            let count = base + usize::from(piece < extra);
            let end = match count.checked_sub(1).and_then(|skip| chars.nth(skip)) {
                Some((offset, c)) => offset + c.len_utf8(),
                None => start,
            };
            ranges.push(start..end);
            start = end;
        }
        Ok(ranges)
    }

    /// Splits the text into `concurrency` chunks, runs `transform` on each
    /// through `pool`, and returns the outputs in chunk order.
    ///
    /// Suspends only while awaiting the chunk completions. When chunks fault,
    /// every completion is still awaited and the lowest faulting index is
    /// reported; results of the other chunks are discarded.
    pub async fn process<T, R>(
        &self,
        concurrency: usize,
        pool: &WorkerPool<R>,
        transform: T,
    ) -> Result<ProcessedText<T::Output>, ProcessError>
    where
        T: ChunkTransform,
        R: WorkerRuntime,
    {
        let ranges = self.partition(concurrency)?;
        info!(
            chunks = concurrency,
            bytes = self.inner.len(),
            workers = pool.size(),
            "processing text"
        );

        let transform = Arc::new(transform);
        let mut slots = Vec::with_capacity(concurrency);
        let mut completions = Vec::with_capacity(concurrency);
        for (index, range) in ranges.into_iter().enumerate() {
            let (job, slot) =
                ChunkJob::new(index, Arc::clone(&self.inner), range, Arc::clone(&transform));
            slots.push(slot);
            completions.push(pool.submit(ChunkJob::run, job));
        }

        let mut failure = None;
        for (index, completion) in completions.into_iter().enumerate() {
            let outcome = completion.await;
            if failure.is_some() {
                continue;
            }
            match outcome {
                Ok(()) => {}
                Err(TaskError::Fault { reason, .. }) => {
                    debug!(index, %reason, "chunk faulted");
                    failure = Some(ProcessError::ChunkFailure { index, reason });
                }
                Err(TaskError::PoolClosed) => failure = Some(ProcessError::PoolClosed),
            }
        }
        if let Some(error) = failure {
            return Err(error);
        }

        let parts = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.take().ok_or_else(|| ProcessError::ChunkFailure {
                    index,
                    reason: "result slot was never written".to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(chunks = parts.len(), "chunks merged");
        Ok(ProcessedText::new(parts))
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}
