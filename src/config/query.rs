// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Query configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Number of results printed per `query` directive unless configured otherwise.
pub const DEFAULT_QUERY_LIMIT: usize = 10;

/// Query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum number of results returned per query directive
    pub limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl Validate for QueryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.limit == 0 {
            return Err(ConfigError::ValidationError(
                "limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
