// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rand::Rng;
use std::fs;
use std::path::Path;

pub fn generate_random_string(rng: &mut impl Rng, max_length: usize) -> String {
    let length = rng.random_range(1..=max_length.max(1));
    (0..length)
        .map(|_| {
            let c = rng.random_range(b'a'..=b'z');
            c as char
        })
        .collect()
}

/// Space-separated random words
pub fn generate_text(num_strings: usize, max_string_length: usize) -> String {
    let mut rng = rand::rng();
    (0..num_strings)
        .map(|_| generate_random_string(&mut rng, max_string_length))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn read_text(path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path)
}
