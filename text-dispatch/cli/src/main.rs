// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod cli;
mod config;
mod input;
mod logging;
mod report;

use clap::Parser;
use cli::{Args, TransformKind};
use config::Config;
use report::{JobResult, Summary};
use std::time::{Duration, Instant};
use text_dispatch_char_frequency::{
    frequency_channels, frequency_multithreaded, frequency_mutex, frequency_single_threaded,
    CharFrequency, Frequencies,
};
use text_dispatch_core::{
    ChunkTransform, Identity, PoolConfig, ProcessError, ProcessedText, Text, Uppercase,
    WorkerPool,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

enum JobOutcome<T> {
    Done(T),
    TimedOut,
    Cancelled,
}

impl<T> JobOutcome<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> JobOutcome<U> {
        match self {
            JobOutcome::Done(value) => JobOutcome::Done(f(value)),
            JobOutcome::TimedOut => JobOutcome::TimedOut,
            JobOutcome::Cancelled => JobOutcome::Cancelled,
        }
    }
}

/// Runs one `process` call, raced against the optional timeout and Ctrl+C.
/// Losing the race abandons the job: chunks already running finish on their
/// workers and their results are discarded.
async fn run_job<T: ChunkTransform>(
    text: &Text,
    concurrency: usize,
    pool: &WorkerPool,
    transform: T,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<JobOutcome<ProcessedText<T::Output>>, ProcessError> {
    let job = text.process(concurrency, pool, transform);
    let limited = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, job).await.ok(),
            None => Some(job.await),
        }
    };

    tokio::select! {
        result = limited => match result {
            Some(result) => result.map(JobOutcome::Done),
            None => Ok(JobOutcome::TimedOut),
        },
        _ = cancel.cancelled() => Ok(JobOutcome::Cancelled),
    }
}

async fn run_transform(
    kind: TransformKind,
    text: &Text,
    concurrency: usize,
    pool: &WorkerPool,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<JobOutcome<JobResult>, ProcessError> {
    let outcome = match kind {
        TransformKind::Frequency => run_job(text, concurrency, pool, CharFrequency, timeout, cancel)
            .await?
            .map(|processed| JobResult::Frequencies(processed.merged())),
        TransformKind::Identity => run_job(text, concurrency, pool, Identity, timeout, cancel)
            .await?
            .map(|processed| JobResult::Text(processed.merged())),
        TransformKind::Uppercase => run_job(text, concurrency, pool, Uppercase, timeout, cancel)
            .await?
            .map(|processed| JobResult::Text(processed.merged())),
    };
    Ok(outcome)
}

/// Tears the pool down on a blocking thread. Chunks already running cannot be
/// interrupted, so this resolves only once they have finished.
async fn shut_down(pool: WorkerPool) {
    if let Err(e) = tokio::task::spawn_blocking(move || pool.teardown()).await {
        warn!(error = %e, "pool teardown did not complete");
    }
}

type Strategy = fn(&[&str], usize) -> Frequencies;

/// Times the thread-per-call strategies against the pool result
fn compare_strategies(content: &str, workers: usize, pooled: &Frequencies) {
    let lines: Vec<&str> = content.lines().collect();
    let strategies: [(&str, Strategy); 4] = [
        ("single-threaded", |lines, _| frequency_single_threaded(lines)),
        ("thread per slice", frequency_multithreaded),
        ("channels", frequency_channels),
        ("mutex", frequency_mutex),
    ];

    println!("\n=== COMPARISON ===");
    for (name, strategy) in strategies {
        let start = Instant::now();
        let counts = strategy(&lines, workers);
        let elapsed = start.elapsed();
        println!("  - {:<17} {:.2}ms", name, elapsed.as_secs_f64() * 1000.0);
        if &counts != pooled {
            warn!(strategy = name, "result differs from the worker pool result");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = Config::load_or_default(&args.config).with_overrides(&args);
    let hardware_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let workers = config.workers(hardware_threads);
    let concurrency = config.concurrency(hardware_threads);

    let content = match &args.input {
        Some(path) => input::read_text(path)?,
        None => input::generate_text(config.num_strings, config.max_string_length),
    };
    let text = Text::new(content);

    if !args.json {
        println!("=== TEXT DISPATCH ===");
        println!("Configuration:");
        println!("  - Workers: {}", workers);
        println!("  - Concurrency: {}", concurrency);
        println!("  - Transform: {:?}", config.transform);
        println!("  - Input: {} characters", text.char_len());
    }

    let pool = WorkerPool::with_config(PoolConfig::new(workers))?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, abandoning job");
            ctrl_c.cancel();
        }
    });

    let start = Instant::now();
    let outcome = run_transform(
        config.transform,
        &text,
        concurrency,
        &pool,
        config.timeout(),
        &cancel,
    )
    .await;
    let elapsed = start.elapsed();

    let result = match outcome {
        Ok(JobOutcome::Done(result)) => result,
        Ok(JobOutcome::TimedOut) => {
            warn!(elapsed_ms = elapsed.as_millis() as u64, "job abandoned after timeout");
            shut_down(pool).await;
            return Ok(());
        }
        Ok(JobOutcome::Cancelled) => {
            shut_down(pool).await;
            return Ok(());
        }
        Err(e) => {
            shut_down(pool).await;
            return Err(e.into());
        }
    };

    let summary = Summary {
        chunks: concurrency,
        workers,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        result,
        stats: pool.stats(),
    };
    shut_down(pool).await;

    if args.json {
        report::print_json(&summary)?;
        return Ok(());
    }
    report::print_summary(&summary, config.top);

    if let JobResult::Frequencies(pooled) = summary.result {
        let content = text.clone();
        tokio::task::spawn_blocking(move || compare_strategies(content.as_str(), workers, &pooled))
            .await?;
    }

    println!("\n=== PROGRAM COMPLETE ===");
    Ok(())
}
