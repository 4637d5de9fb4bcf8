// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Index configuration module.
//!
//! This module defines configuration for the ingestion side of the movie
//! index, chiefly the size of the worker pool.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Returns the default ingestion pool size: one less than the available
/// hardware parallelism, never below one.
pub fn default_worker_threads() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Number of worker threads running ingestion batches
    pub worker_threads: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
        }
    }
}

impl Validate for IndexConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.worker_threads == 0 {
            return Err(ConfigError::ValidationError(
                "worker_threads must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
