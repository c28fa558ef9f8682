// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Serialize;
use std::collections::BTreeMap;
use text_dispatch_core::Merge;

pub type CharMap = BTreeMap<char, usize>;

/// Character counts of a text or of one chunk of it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frequencies(CharMap);

impl Frequencies {
    pub fn new(map: CharMap) -> Self {
        Self(map)
    }

    pub fn get(&self, c: char) -> usize {
        self.0.get(&c).copied().unwrap_or(0)
    }

    /// Total number of counted characters
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    /// The `n` most frequent characters, ties broken alphabetically
    pub fn top(&self, n: usize) -> Vec<(char, usize)> {
        let mut sorted: Vec<(char, usize)> =
            self.0.iter().map(|(c, count)| (*c, *count)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        sorted.truncate(n);
        sorted
    }

    pub fn as_map(&self) -> &CharMap {
        &self.0
    }

    pub fn into_map(self) -> CharMap {
        self.0
    }
}

impl Merge for Frequencies {
    fn merge(parts: Vec<Self>) -> Self {
        let mut merged = CharMap::new();
        for part in parts {
            for (c, count) in part.0 {
                *merged.entry(c).or_default() += count;
            }
        }
        Self(merged)
    }
}
