// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CharMap, Frequencies};
use text_dispatch_core::ChunkTransform;

/// Counts alphabetic characters, folding ASCII letters to lower case
pub fn frequency_in_string(input: &str) -> Frequencies {
    let mut map = CharMap::new();
    for c in input.chars().filter(|c| c.is_alphabetic()) {
        *map.entry(c.to_ascii_lowercase()).or_default() += 1;
    }
    Frequencies::new(map)
}

/// Baseline that counts every line on the calling thread
pub fn frequency_single_threaded(lines: &[&str]) -> Frequencies {
    let mut map = CharMap::new();
    for line in lines {
        for c in line.chars().filter(|c| c.is_alphabetic()) {
            *map.entry(c.to_ascii_lowercase()).or_default() += 1;
        }
    }
    Frequencies::new(map)
}

/// Chunk transform producing per-chunk [`Frequencies`]; merged by summing counts
#[derive(Debug, Clone, Copy, Default)]
pub struct CharFrequency;

impl ChunkTransform for CharFrequency {
    type Output = Frequencies;

    fn apply(&self, _index: usize, chunk: &str) -> Frequencies {
        frequency_in_string(chunk)
    }
}
