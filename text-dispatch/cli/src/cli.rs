// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Per-chunk computation selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Count alphabetic characters
    #[default]
    Frequency,
    /// Return every chunk unchanged
    Identity,
    /// Upper-case every chunk
    Uppercase,
}

#[derive(Debug, Parser)]
#[command(
    name = "text-dispatch",
    about = "Process text in parallel chunks across a fixed pool of worker threads"
)]
pub struct Args {
    /// JSON configuration file; missing files fall back to defaults
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Number of worker threads (defaults to the hardware thread count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Number of chunks, between 1 and the hardware thread count
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Read the text from a file instead of generating it
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub transform: Option<TransformKind>,

    /// Abandon the job if it has not finished after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
