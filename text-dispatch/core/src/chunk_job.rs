// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ChunkTransform;
use std::ops::Range;
use std::sync::{Arc, OnceLock};

/// Write-once output cell owned by exactly one chunk job
pub(crate) struct ResultSlot<T> {
    cell: Arc<OnceLock<T>>,
}

impl<T> ResultSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }

    fn writer(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }

    fn write(&self, value: T) -> bool {
        self.cell.set(value).is_ok()
    }

    /// Takes the value once the job holding the writer has been dropped
    pub(crate) fn take(self) -> Option<T> {
        Arc::into_inner(self.cell).and_then(OnceLock::into_inner)
    }
}

/// Context record of one chunk task: a borrowed-by-range view of the input
/// plus the slot it alone writes.
pub(crate) struct ChunkJob<T: ChunkTransform> {
    index: usize,
    text: Arc<str>,
    range: Range<usize>,
    transform: Arc<T>,
    slot: ResultSlot<T::Output>,
}

impl<T: ChunkTransform> ChunkJob<T> {
    pub(crate) fn new(
        index: usize,
        text: Arc<str>,
        range: Range<usize>,
        transform: Arc<T>,
    ) -> (Self, ResultSlot<T::Output>) {
        let slot = ResultSlot::new();
        let job = Self {
            index,
            text,
            range,
            transform,
            slot: slot.writer(),
        };
        (job, slot)
    }

    /// Task entry: applies the transform to this job's range and fills its slot
    pub(crate) fn run(self) {
        let chunk = &self.text[self.range.clone()];
        let output = self.transform.apply(self.index, chunk);
        let written = self.slot.write(output);
        debug_assert!(written, "chunk {} result slot written twice", self.index);
    }
}
