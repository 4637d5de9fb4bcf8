// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Parsing of single directive lines.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CommandError;

/// One line of input to the command loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `process-file <path>`: ingest the file at `path` in the background
    ProcessFile(PathBuf),

    /// `query <text>`: print the movies matching `text`
    Query(String),

    /// `quit`: stop reading input
    Quit,
}

impl FromStr for Directive {
    type Err = CommandError;

    /// Splits the line at the first space into a directive name and its
    /// argument. Everything after that space is the argument, spaces included.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, argument) = line.split_once(' ').unwrap_or((line, ""));

        match name {
            "process-file" if argument.is_empty() => Err(CommandError::MissingArgument("path")),
            "process-file" => Ok(Self::ProcessFile(PathBuf::from(argument))),
            "query" => Ok(Self::Query(argument.to_string())),
            "quit" => Ok(Self::Quit),
            _ => Err(CommandError::InvalidDirective(line.to_string())),
        }
    }
}
