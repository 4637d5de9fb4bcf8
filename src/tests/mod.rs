// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Test modules for Pueo.
//!
//! Unit tests live next to the code they cover. This module holds the
//! cross-component suites:
//! - Configuration loading and layering
//! - The error framework and global reporter
//! - Query properties of the movie index checked against a linear scan

pub mod error_tests;

pub use test_utils::{movie_strategy, query_strategy, TestFixture};
