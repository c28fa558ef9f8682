// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use text_dispatch_core::{
    ChunkTransform, Identity, ProcessError, Text, Uppercase, WorkerPool,
};

/// Tags each chunk with its index after sleeping a random amount,
/// so workers finish in an arbitrary order
struct Jittered;

impl ChunkTransform for Jittered {
    type Output = String;

    fn apply(&self, index: usize, chunk: &str) -> String {
        std::thread::sleep(Duration::from_millis(fastrand::u64(0..15)));
        format!("[{}:{}]", index, chunk)
    }
}

/// Holds its worker for a fixed time before returning the chunk
struct Slow(Duration);

impl ChunkTransform for Slow {
    type Output = String;

    fn apply(&self, _index: usize, chunk: &str) -> String {
        std::thread::sleep(self.0);
        chunk.to_string()
    }
}

/// Panics on the listed chunk indices
struct FailOn(Vec<usize>);

impl ChunkTransform for FailOn {
    type Output = String;

    fn apply(&self, index: usize, chunk: &str) -> String {
        if self.0.contains(&index) {
            panic!("chunk {} rejected", index);
        }
        chunk.to_string()
    }
}

// ============================================================
// partition
// ============================================================

#[test]
fn test_partition_pieces_are_balanced_and_cover_input() {
    let inputs = [
        "",
        "a",
        "hello world",
        "héllo wörld, ünïcode",
        "日本語のテキストを分割する",
        "mixed 🎉 emoji 🚀 and ascii",
    ];

    for input in inputs {
        let text = Text::new(input);
        let total = text.char_len();

        for concurrency in 1..=24 {
            let ranges = text.partition(concurrency).unwrap();
            assert_eq!(ranges.len(), concurrency);

            let lengths: Vec<usize> = ranges
                .iter()
                .map(|range| input[range.clone()].chars().count())
                .collect();
            assert_eq!(lengths.iter().sum::<usize>(), total, "pieces cover '{}'", input);

            let longest = lengths.iter().max().copied().unwrap_or(0);
            let shortest = lengths.iter().min().copied().unwrap_or(0);
            assert!(longest - shortest <= 1, "pieces of '{}' differ by at most one", input);

            let mut expected_start = 0;
            for range in &ranges {
                assert_eq!(range.start, expected_start, "pieces are contiguous");
                assert!(input.is_char_boundary(range.start));
                assert!(input.is_char_boundary(range.end));
                expected_start = range.end;
            }
            assert_eq!(expected_start, input.len());
        }
    }
}

#[test]
fn test_partition_rejects_zero_concurrency() {
    let text = Text::new("hello");
    assert_eq!(
        text.partition(0),
        Err(ProcessError::Config { concurrency: 0 })
    );
}

#[test]
fn test_partition_longer_pieces_come_first() {
    let text = Text::new("abcdefg");
    let ranges = text.partition(3).unwrap();
    assert_eq!(ranges, vec![0..3, 3..5, 5..7]);
}

// ============================================================
// process
// ============================================================

#[tokio::test]
async fn test_hello_world_splits_into_two_pieces() {
    let pool = WorkerPool::new(2).unwrap();
    let text = Text::new("hello world");

    let processed = text.process(2, &pool, Identity).await.unwrap();

    assert_eq!(processed.parts(), ["hello ", "world"]);
    assert_eq!(processed.merged(), "hello world");
}

#[tokio::test]
async fn test_oversubscription_queues_excess_chunks() {
    let pool = WorkerPool::new(4).unwrap();
    let text = Text::new("the quick brown fox jumps over the lazy dog");

    let processed = text.process(8, &pool, Identity).await.unwrap();

    assert_eq!(processed.len(), 8);
    assert_eq!(processed.merged(), text.as_str());
    assert_eq!(pool.stats().tasks_dispatched, 8);
}

#[tokio::test]
async fn test_merge_is_deterministic_under_random_completion_order() {
    let pool = WorkerPool::new(4).unwrap();
    let text = Text::new("To be or Not to Be, that is the question.");
    let expected: String = text
        .partition(6)
        .unwrap()
        .into_iter()
        .enumerate()
        .map(|(index, range)| format!("[{}:{}]", index, &text.as_str()[range]))
        .collect();

    for _ in 0..8 {
        let processed = text.process(6, &pool, Jittered).await.unwrap();
        assert_eq!(processed.merged(), expected);
    }
}

#[tokio::test]
async fn test_multibyte_text_is_never_split_inside_a_character() {
    let pool = WorkerPool::new(3).unwrap();
    let text = Text::new("straße über café");

    let processed = text.process(5, &pool, Uppercase).await.unwrap();

    assert_eq!(processed.merged(), "STRASSE ÜBER CAFÉ");
}

#[tokio::test]
async fn test_more_chunks_than_characters_yields_empty_chunks() {
    let pool = WorkerPool::new(2).unwrap();
    let text = Text::new("abc");

    let processed = text.process(5, &pool, Identity).await.unwrap();

    assert_eq!(processed.parts(), ["a", "b", "c", "", ""]);
}

#[tokio::test]
async fn test_zero_concurrency_dispatches_nothing() {
    let pool = WorkerPool::new(2).unwrap();
    let text = Text::new("hello");

    let result = text.process(0, &pool, Identity).await;

    assert_eq!(result, Err(ProcessError::Config { concurrency: 0 }));
    assert_eq!(pool.stats().tasks_dispatched, 0);
}

#[tokio::test]
async fn test_chunk_fault_rejects_with_its_index() {
    let pool = WorkerPool::new(2).unwrap();
    let text = Text::new("abcdefgh");

    let result = text.process(4, &pool, FailOn(vec![2])).await;

    match result {
        Err(ProcessError::ChunkFailure { index, reason }) => {
            assert_eq!(index, 2);
            assert_eq!(reason, "chunk 2 rejected");
        }
        other => panic!("Expected chunk failure, got {:?}", other),
    }

    let stats = pool.stats();
    assert_eq!(stats.tasks_faulted, 1);
    assert_eq!(stats.tasks_completed, 3, "other chunks still ran");
}

#[tokio::test]
async fn test_lowest_faulting_chunk_is_reported() {
    let pool = WorkerPool::new(4).unwrap();
    let text = Text::new("abcdefgh");

    let result = text.process(4, &pool, FailOn(vec![3, 1])).await;

    assert!(matches!(
        result,
        Err(ProcessError::ChunkFailure { index: 1, .. })
    ));
}

#[tokio::test]
async fn test_pool_stays_usable_after_chunk_failure() {
    let pool = WorkerPool::new(2).unwrap();
    let text = Text::new("hello world");

    assert!(text.process(2, &pool, FailOn(vec![0])).await.is_err());

    let processed = text.process(2, &pool, Identity).await.unwrap();
    assert_eq!(processed.merged(), "hello world");
}

#[tokio::test]
async fn test_process_on_closed_pool_is_rejected() {
    let pool = WorkerPool::new(2).unwrap();
    pool.teardown();
    let text = Text::new("hello world");

    let result = text.process(2, &pool, Identity).await;

    assert_eq!(result, Err(ProcessError::PoolClosed));
}

#[tokio::test]
async fn test_teardown_during_process_rejects_with_pool_closed() {
    let pool = Arc::new(WorkerPool::new(2).unwrap());
    let text = Text::new("abcdefgh");

    let closer = {
        let pool = Arc::clone(&pool);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            pool.teardown();
        })
    };

    // Two chunks are running and two are queued when the pool closes
    let result = text.process(4, &*pool, Slow(Duration::from_millis(200))).await;
    closer.join().unwrap();

    assert_eq!(result, Err(ProcessError::PoolClosed));
    assert!(pool.is_closed());
    assert_eq!(pool.stats().tasks_dispatched, 2, "queued chunks never ran");
}

#[tokio::test(flavor = "current_thread")]
async fn test_process_does_not_block_the_executor() {
    let pool = WorkerPool::new(2).unwrap();
    let text = Text::new("hello world");
    let done = AtomicBool::new(false);
    let ticks = AtomicUsize::new(0);

    let processing = async {
        let result = text.process(2, &pool, Slow(Duration::from_millis(150))).await;
        done.store(true, Ordering::SeqCst);
        result
    };
    let ticking = async {
        while !done.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(5)).await;
            ticks.fetch_add(1, Ordering::SeqCst);
        }
    };
    let (result, ()) = tokio::join!(processing, ticking);

    assert_eq!(result.unwrap().merged(), "hello world");
    assert!(
        ticks.load(Ordering::SeqCst) >= 5,
        "other tasks kept running while chunks were processed"
    );
}
