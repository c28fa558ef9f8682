// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Per-chunk computation run on a worker.
///
/// Must be a pure function of the chunk: it sees only its own slice of the
/// input and its position, never another chunk's data or result.
pub trait ChunkTransform: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    fn apply(&self, index: usize, chunk: &str) -> Self::Output;
}

/// Combines per-chunk results, given in chunk-index order, into one value
pub trait Merge: Sized {
    fn merge(parts: Vec<Self>) -> Self;
}

impl Merge for String {
    fn merge(parts: Vec<Self>) -> Self {
        parts.concat()
    }
}

/// Returns each chunk unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ChunkTransform for Identity {
    type Output = String;

    fn apply(&self, _index: usize, chunk: &str) -> String {
        chunk.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Uppercase;

impl ChunkTransform for Uppercase {
    type Output = String;

    fn apply(&self, _index: usize, chunk: &str) -> String {
        chunk.to_uppercase()
    }
}
