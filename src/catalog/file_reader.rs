// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! File-backed movie reader.
//!
//! Catalog files are line oriented, one record per line in the form
//! `year<TAB>country<TAB>title`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::reader::{MovieReader, ReaderResult};
use super::Movie;
use crate::error::IngestError;

/// Streams [`Movie`] records from a tab-separated catalog file.
#[derive(Debug)]
pub struct MovieFileReader {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    /// Line read ahead by `has_next` and not yet handed out
    peeked: Option<String>,
    /// One-based number of the last line read
    line_number: usize,
}

impl MovieFileReader {
    /// Creates a reader for the file at `path`. Nothing is opened until
    /// [`MovieReader::open`] is called.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            reader: None,
            peeked: None,
            line_number: 0,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the next line into `peeked` unless one is already buffered.
    fn fill(&mut self) -> ReaderResult<bool> {
        if self.peeked.is_some() {
            return Ok(true);
        }

        let reader = self.reader.as_mut().ok_or(IngestError::NotOpen)?;
        let mut buf = Vec::new();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;

        while matches!(buf.last(), Some(&(b'\n' | b'\r'))) {
            buf.pop();
        }
        // Invalid UTF-8 is replaced rather than failing the whole source.
        self.peeked = Some(String::from_utf8_lossy(&buf).into_owned());
        Ok(true)
    }
}

impl MovieReader for MovieFileReader {
    fn open(&mut self) -> ReaderResult<()> {
        let file = File::open(&self.path).map_err(|source| IngestError::Open {
            path: self.path.clone(),
            source: Arc::new(source),
        })?;
        self.reader = Some(BufReader::new(file));
        self.peeked = None;
        self.line_number = 0;
        Ok(())
    }

    fn has_next(&mut self) -> ReaderResult<bool> {
        self.fill()
    }

    fn next(&mut self) -> ReaderResult<Movie> {
        if !self.fill()? {
            return Err(IngestError::Exhausted);
        }

        let content = self.peeked.take().unwrap_or_default();
        content.parse::<Movie>().map_err(|reason| IngestError::Malformed {
            line: self.line_number,
            content,
            reason,
        })
    }

    fn close(&mut self) {
        self.reader = None;
        self.peeked = None;
    }
}
