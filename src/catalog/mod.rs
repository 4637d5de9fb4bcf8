// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Movie catalog: the record type and the readers that stream it.

mod file_reader;
mod movie;
mod reader;

pub use file_reader::MovieFileReader;
pub use movie::Movie;
pub use reader::{MemoryMovieReader, MovieReader, ReaderResult};

#[cfg(test)]
pub(crate) use reader::MockMovieReader;
