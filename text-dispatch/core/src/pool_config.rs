// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

/// Construction parameters for a [`crate::WorkerPool`]
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads, fixed for the pool's lifetime
    pub size: usize,
    /// Worker threads are named `<prefix>-<index>`
    pub thread_name_prefix: String,
    /// How long construction waits for every worker to finish its handshake
    pub handshake_timeout: Duration,
}

impl PoolConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            thread_name_prefix: "text-worker".to_string(),
            handshake_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    pub(crate) fn worker_name(&self, id: usize) -> String {
        format!("{}-{}", self.thread_name_prefix, id)
    }

    pub(crate) fn dispatcher_name(&self) -> String {
        format!("{}-dispatcher", self.thread_name_prefix)
    }
}
