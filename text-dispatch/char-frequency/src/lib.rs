// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod frequencies;
pub use frequencies::{CharMap, Frequencies};

mod char_frequency;
pub use char_frequency::{frequency_in_string, frequency_single_threaded, CharFrequency};

mod strategies;
pub use strategies::{frequency_channels, frequency_multithreaded, frequency_mutex};
