// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Word splitting shared by indexing and querying.

/// Splits `text` on single spaces and lower-cases each word, skipping the
/// empty words produced by leading, trailing or repeated spaces.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}
