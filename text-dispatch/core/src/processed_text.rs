// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Merge;

/// Result of one `process` call: per-chunk outputs in original chunk order,
/// regardless of the order in which workers finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedText<T> {
    parts: Vec<T>,
}

impl<T> ProcessedText<T> {
    pub(crate) fn new(parts: Vec<T>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[T] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<T> {
        self.parts
    }

    /// Number of chunks the input was split into
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<T: Merge> ProcessedText<T> {
    pub fn merged(self) -> T {
        T::merge(self.parts)
    }
}
