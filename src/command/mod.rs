// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Line-oriented directive loop driving a [`MovieIndex`].
//!
//! Each input line is echoed to the output before it is executed. Files are
//! ingested in the background; query results are written one movie per line
//! as `year<TAB>country<TAB>title`.

mod directive;

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::catalog::MovieFileReader;
use crate::error::CommandError;
use crate::index::{IndexHandle, MovieIndex};

pub use directive::Directive;

/// Result type for the command loop.
pub type CommandResult<T> = Result<T, CommandError>;

/// How a [`CommandLoop::run`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A `quit` directive was read. Batches still running were not awaited.
    Quit,

    /// The input ran out and every submitted batch has finished.
    EndOfInput,
}

/// Reads directives from an input and executes them against an index.
#[derive(Debug)]
pub struct CommandLoop<'a> {
    index: &'a MovieIndex,
    limit: usize,
    pending: Vec<IndexHandle>,
}

impl<'a> CommandLoop<'a> {
    /// Creates a loop answering queries with at most `limit` movies.
    pub fn new(index: &'a MovieIndex, limit: usize) -> Self {
        Self {
            index,
            limit,
            pending: Vec::new(),
        }
    }

    /// Runs until `quit`, the end of `input`, or the first invalid line.
    ///
    /// # Errors
    ///
    /// An unrecognized directive, a `process-file` without a path, or a
    /// failure to read input or write output ends the loop with an error.
    pub fn run<I, O>(&mut self, input: I, mut output: O) -> CommandResult<Outcome>
    where
        I: BufRead,
        O: Write,
    {
        for line in input.lines() {
            let line = line.map_err(CommandError::Input)?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            writeln!(output, "{line}").map_err(CommandError::Output)?;

            match line.parse::<Directive>()? {
                Directive::ProcessFile(path) => {
                    let handle = self.index.index(MovieFileReader::new(&path));
                    debug!(batch = handle.batch(), path = %path.display(), "File submitted");
                    self.pending.push(handle);
                }
                Directive::Query(text) => {
                    for movie in self.index.query(&text, self.limit) {
                        writeln!(output, "{movie}").map_err(CommandError::Output)?;
                    }
                }
                Directive::Quit => {
                    output.flush().map_err(CommandError::Output)?;
                    info!(in_flight = self.pending.len(), "Quit requested");
                    return Ok(Outcome::Quit);
                }
            }

            output.flush().map_err(CommandError::Output)?;
        }

        self.drain();
        Ok(Outcome::EndOfInput)
    }

    /// Waits for every submitted batch.
    fn drain(&mut self) {
        for handle in self.pending.drain(..) {
            let batch = handle.batch();
            match handle.wait() {
                Ok(report) => info!(
                    batch,
                    records = report.records,
                    malformed = report.malformed,
                    "Batch finished"
                ),
                // Already reported by the worker.
                Err(error) => debug!(batch, %error, "Batch failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemoryMovieReader, Movie};
    use crate::config::IndexConfig;
    use std::io::{Cursor, Write as _};
    use tempfile::NamedTempFile;

    fn iron_man_index() -> MovieIndex {
        let index = MovieIndex::with_config(&IndexConfig { worker_threads: 1 }).unwrap();
        index
            .index(MemoryMovieReader::new(vec![
                Movie::new("Iron Man", "US", 2008),
                Movie::new("Iron Man 2", "US", 2010),
            ]))
            .wait()
            .unwrap();
        index
    }

    fn run(index: &MovieIndex, limit: usize, input: &str) -> (CommandResult<Outcome>, String) {
        let mut output = Vec::new();
        let outcome = CommandLoop::new(index, limit).run(Cursor::new(input), &mut output);
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_query_echoes_and_prints_results() {
        let index = iron_man_index();
        let (outcome, output) = run(&index, 10, "query iron\n");

        assert_eq!(outcome.unwrap(), Outcome::EndOfInput);
        assert_eq!(
            output,
            "query iron\n2008\tUS\tIron Man\n2010\tUS\tIron Man 2\n"
        );
    }

    #[test]
    fn test_query_respects_limit() {
        let index = iron_man_index();
        let (_, output) = run(&index, 1, "query iron\n");

        assert_eq!(output, "query iron\n2008\tUS\tIron Man\n");
    }

    #[test]
    fn test_bare_query_prints_nothing() {
        let index = iron_man_index();
        let (outcome, output) = run(&index, 10, "query\nquery  \n");

        assert_eq!(outcome.unwrap(), Outcome::EndOfInput);
        assert_eq!(output, "query\nquery  \n");
    }

    #[test]
    fn test_carriage_returns_are_stripped() {
        let index = iron_man_index();
        let (_, output) = run(&index, 10, "query man 2\r\n");

        assert_eq!(output, "query man 2\n2010\tUS\tIron Man 2\n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let index = iron_man_index();
        let (outcome, output) = run(&index, 10, "quit\nquery iron\n");

        assert_eq!(outcome.unwrap(), Outcome::Quit);
        assert_eq!(output, "quit\n");
    }

    #[test]
    fn test_invalid_directive_is_fatal() {
        let index = iron_man_index();
        let (outcome, output) = run(&index, 10, "search iron\nquery iron\n");

        assert!(matches!(outcome, Err(CommandError::InvalidDirective(line)) if line == "search iron"));
        assert_eq!(output, "search iron\n");
    }

    #[test]
    fn test_process_file_without_path_is_fatal() {
        let index = iron_man_index();
        let (outcome, _) = run(&index, 10, "process-file\n");

        assert!(matches!(outcome, Err(CommandError::MissingArgument("path"))));
    }

    #[test]
    fn test_end_of_input_waits_for_files() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1999\tUS\tThe Matrix").unwrap();
        writeln!(file, "2003\tUS\tThe Matrix Reloaded").unwrap();
        file.flush().unwrap();

        let index = MovieIndex::with_config(&IndexConfig { worker_threads: 1 }).unwrap();
        let input = format!("process-file {}\n", file.path().display());
        let (outcome, output) = run(&index, 10, &input);

        assert_eq!(outcome.unwrap(), Outcome::EndOfInput);
        assert_eq!(output, input);
        assert_eq!(index.query("matrix", 10).len(), 2);
    }

    #[test]
    fn test_missing_file_does_not_stop_loop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let index = iron_man_index();
        let input = format!("process-file {}\nquery iron 2\n", missing.display());
        let (outcome, output) = run(&index, 10, &input);

        assert_eq!(outcome.unwrap(), Outcome::EndOfInput);
        assert!(output.ends_with("query iron 2\n2010\tUS\tIron Man 2\n"));
    }
}
