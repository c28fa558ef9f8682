// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Serialize;
use text_dispatch_char_frequency::Frequencies;
use text_dispatch_core::PoolStats;

const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobResult {
    Frequencies(Frequencies),
    Text(String),
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub chunks: usize,
    pub workers: usize,
    pub elapsed_ms: f64,
    pub result: JobResult,
    pub stats: PoolStats,
}

pub fn print_json(summary: &Summary) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

pub fn print_summary(summary: &Summary, top: usize) {
    println!("\n=== RESULTS ===");
    match &summary.result {
        JobResult::Frequencies(frequencies) => {
            for (c, count) in frequencies.top(top) {
                println!("{}: {}", c, count);
            }
            if frequencies.distinct() > top {
                println!("... ({} more characters)", frequencies.distinct() - top);
            }
            println!("\nTotal characters counted: {}", frequencies.total());
        }
        JobResult::Text(text) => {
            let preview: String = text.chars().take(PREVIEW_CHARS).collect();
            println!("{}", preview);
            let length = text.chars().count();
            if length > PREVIEW_CHARS {
                println!("... ({} more characters)", length - PREVIEW_CHARS);
            }
        }
    }

    println!("\n=== POOL ===");
    println!("  - Workers: {}", summary.stats.workers);
    println!("  - Tasks dispatched: {}", summary.stats.tasks_dispatched);
    println!("  - Tasks completed: {}", summary.stats.tasks_completed);
    println!("  - Tasks faulted: {}", summary.stats.tasks_faulted);
    println!(
        "\nProcessed {} chunks on {} workers in {:.2}ms",
        summary.chunks, summary.workers, summary.elapsed_ms
    );
}
