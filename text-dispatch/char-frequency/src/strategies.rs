// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ad-hoc threading strategies that spawn fresh threads per call.
//! The CLI times them against the persistent worker pool.

use crate::{frequency_single_threaded, CharMap, Frequencies};
use std::panic;
use std::sync::{Mutex, PoisonError};
use std::thread;
use text_dispatch_core::Merge;
use tokio::sync::mpsc;

/// Splits `lines` into at most `workers` runs of whole lines
fn slices<'a>(lines: &'a [&'a str], workers: usize) -> impl Iterator<Item = &'a [&'a str]> {
    let size = (lines.len() / workers.max(1)).max(1);
    lines.chunks(size)
}

fn add_into(target: &mut CharMap, part: Frequencies) {
    for (c, count) in part.into_map() {
        *target.entry(c).or_default() += count;
    }
}

/// One thread per slice; each returns its counts and the caller sums them on join
pub fn frequency_multithreaded(lines: &[&str], workers: usize) -> Frequencies {
    thread::scope(|scope| {
        let handles: Vec<_> = slices(lines, workers)
            .map(|slice| scope.spawn(move || frequency_single_threaded(slice)))
            .collect();

        let parts = handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect();
        Frequencies::merge(parts)
    })
}

/// One thread per slice; counts travel back over a channel.
///
/// Blocks on the receiver, so call it from a plain or blocking thread, never
/// from inside an async task.
pub fn frequency_channels(lines: &[&str], workers: usize) -> Frequencies {
    let (tx, mut rx) = mpsc::unbounded_channel();
    thread::scope(|scope| {
        for slice in slices(lines, workers) {
            let tx = tx.clone();
            scope.spawn(move || {
                let _ = tx.send(frequency_single_threaded(slice));
            });
        }
        // The receiver ends once every sender thread has finished
        drop(tx);

        let mut total = CharMap::new();
        while let Some(part) = rx.blocking_recv() {
            add_into(&mut total, part);
        }
        Frequencies::new(total)
    })
}

/// One thread per slice; every thread adds its counts into one shared map
pub fn frequency_mutex(lines: &[&str], workers: usize) -> Frequencies {
    let total = Mutex::new(CharMap::new());
    thread::scope(|scope| {
        for slice in slices(lines, workers) {
            let total = &total;
            scope.spawn(move || {
                let part = frequency_single_threaded(slice);
                let mut guard = total.lock().unwrap_or_else(PoisonError::into_inner);
                add_into(&mut guard, part);
            });
        }
    });
    Frequencies::new(total.into_inner().unwrap_or_else(PoisonError::into_inner))
}
