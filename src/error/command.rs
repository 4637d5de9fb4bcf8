// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Command error module.
//!
//! This module defines error types raised by the directive loop that reads
//! from standard input.

use std::io;
use thiserror::Error;

/// Errors that can occur while processing directives.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The directive is not one of `process-file`, `query` or `quit`.
    #[error("Invalid directive: {0}")]
    InvalidDirective(String),

    /// The directive needs an argument that was not supplied.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Error when reading from the command input.
    #[error("Command input read error: {0}")]
    Input(#[source] io::Error),

    /// Error when writing to the command output.
    #[error("Command output write error: {0}")]
    Output(#[source] io::Error),
}
