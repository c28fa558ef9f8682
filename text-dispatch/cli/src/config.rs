// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cli::{Args, TransformKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workers: Option<usize>,
    pub concurrency: Option<usize>,
    pub num_strings: usize,
    pub max_string_length: usize,
    pub transform: TransformKind,
    pub timeout_ms: Option<u64>,
    pub top: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            concurrency: None,
            num_strings: 200_000,
            max_string_length: 12,
            transform: TransformKind::Frequency,
            timeout_ms: None,
            top: 10,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Command-line arguments win over the file
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if args.workers.is_some() {
            self.workers = args.workers;
        }
        if args.concurrency.is_some() {
            self.concurrency = args.concurrency;
        }
        if let Some(transform) = args.transform {
            self.transform = transform;
        }
        if args.timeout_ms.is_some() {
            self.timeout_ms = args.timeout_ms;
        }
        self
    }

    pub fn workers(&self, hardware_threads: usize) -> usize {
        self.workers.unwrap_or(hardware_threads).max(1)
    }

    /// Requested concurrency clamped to `[1, hardware_threads]`
    pub fn concurrency(&self, hardware_threads: usize) -> usize {
        let requested = self.concurrency.unwrap_or(hardware_threads);
        let clamped = requested.clamp(1, hardware_threads.max(1));
        if clamped != requested {
            warn!(requested, clamped, "concurrency out of range");
        }
        clamped
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
