// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Data structures for Pueo.
//!
//! This module contains the concurrent structures the index is built on.
//! Unsafe code is confined to pointer handling inside each structure and is
//! documented where it appears.

pub mod koa_ternary_tree;

pub use koa_ternary_tree::KoaTernaryTree;
