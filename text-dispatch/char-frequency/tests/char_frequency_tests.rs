// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use text_dispatch_char_frequency::{
    frequency_channels, frequency_in_string, frequency_multithreaded, frequency_mutex,
    frequency_single_threaded, CharFrequency, Frequencies,
};
use text_dispatch_core::{Merge, Text, WorkerPool};

const HAMLET: &str = "To be or Not to Be, that is the question. Said the guy named Hamlet before he set out to take revenge on his uncle.";

#[test]
fn test_counts_only_alphabetic_characters() {
    let frequencies = frequency_in_string("Aa b! 42 ?");

    assert_eq!(frequencies.get('a'), 2);
    assert_eq!(frequencies.get('b'), 1);
    assert_eq!(frequencies.get('4'), 0);
    assert_eq!(frequencies.total(), 3);
    assert_eq!(frequencies.distinct(), 2);
}

#[test]
fn test_non_ascii_letters_are_counted_as_is() {
    let frequencies = frequency_in_string("Éé");

    assert_eq!(frequencies.get('É'), 1);
    assert_eq!(frequencies.get('é'), 1);
}

#[test]
fn test_merge_sums_counts_per_character() {
    let merged = Frequencies::merge(vec![
        frequency_in_string("abc"),
        frequency_in_string("bcd"),
        frequency_in_string(""),
    ]);

    assert_eq!(merged, frequency_in_string("abcbcd"));
}

#[test]
fn test_top_orders_by_count_then_character() {
    let frequencies = frequency_in_string("ccbbbaadd");

    assert_eq!(frequencies.top(3), vec![('b', 3), ('a', 2), ('c', 2)]);
}

#[test]
fn test_single_threaded_matches_whole_string_count() {
    let lines = [HAMLET; 4];

    assert_eq!(
        frequency_single_threaded(&lines),
        frequency_in_string(&lines.concat())
    );
}

#[test]
fn test_serializes_as_plain_map() {
    let json = serde_json::to_string(&frequency_in_string("aab")).unwrap();
    assert_eq!(json, r#"{"a":2,"b":1}"#);
}

#[tokio::test]
async fn test_parallel_count_matches_single_threaded_baseline() {
    let pool = WorkerPool::new(4).unwrap();
    let lines = [HAMLET; 32];
    let text = Text::new(lines.concat());

    for concurrency in [1, 3, 4, 9] {
        let processed = text.process(concurrency, &pool, CharFrequency).await.unwrap();
        assert_eq!(processed.merged(), frequency_single_threaded(&lines));
    }
}

#[test]
fn test_thread_strategies_match_single_threaded_baseline() {
    let lines: Vec<&str> = [HAMLET, "Straße über CAFÉ", "", "xyz 123"]
        .iter()
        .copied()
        .cycle()
        .take(37)
        .collect();
    let baseline = frequency_single_threaded(&lines);

    for workers in [1, 2, 8, 64] {
        assert_eq!(
            frequency_multithreaded(&lines, workers),
            baseline,
            "multithreaded, {} workers",
            workers
        );
        assert_eq!(frequency_channels(&lines, workers), baseline, "channels, {} workers", workers);
        assert_eq!(frequency_mutex(&lines, workers), baseline, "mutex, {} workers", workers);
    }
}

#[test]
fn test_thread_strategies_handle_empty_input_and_zero_workers() {
    let empty: [&str; 0] = [];
    assert_eq!(frequency_multithreaded(&empty, 4), Frequencies::default());
    assert_eq!(frequency_channels(&empty, 4), Frequencies::default());
    assert_eq!(frequency_mutex(&empty, 4), Frequencies::default());

    let lines = [HAMLET; 3];
    assert_eq!(frequency_mutex(&lines, 0), frequency_single_threaded(&lines));
}
