// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::task::panic_message;
use std::thread::JoinHandle;

/// Trait for abstracting how worker threads are started and joined
pub trait WorkerRuntime: Send + Sync + 'static {
    type Handle: Send + 'static;

    /// Start a named execution context running `f`
    fn spawn<F>(&self, name: String, f: F) -> std::io::Result<Self::Handle>
    where
        F: FnOnce() + Send + 'static;

    /// Wait for the execution context to exit
    fn join(&self, handle: Self::Handle) -> Result<(), String>;
}

/// OS thread runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRuntime;

impl WorkerRuntime for ThreadRuntime {
    type Handle = JoinHandle<()>;

    fn spawn<F>(&self, name: String, f: F) -> std::io::Result<Self::Handle>
    where
        F: FnOnce() + Send + 'static,
    {
        std::thread::Builder::new().name(name).spawn(f)
    }

    fn join(&self, handle: Self::Handle) -> Result<(), String> {
        handle.join().map_err(|payload| panic_message(&*payload))
    }
}
