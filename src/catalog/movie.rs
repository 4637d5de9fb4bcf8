// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The movie record indexed by title.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseMovieError;

/// An immutable catalog entry.
///
/// Equality and hashing are value-based, so two movies with the same title,
/// country code and release year are the same record to the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Movie {
    title: String,
    country_code: String,
    release_year: i32,
}

impl Movie {
    /// Creates a new movie record.
    pub fn new<T: Into<String>, C: Into<String>>(
        title: T,
        country_code: C,
        release_year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            country_code: country_code.into(),
            release_year,
        }
    }

    /// The title, as written in the source.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The country code, as written in the source.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// The year of release.
    pub fn release_year(&self) -> i32 {
        self.release_year
    }
}

/// Renders the catalog line layout: `year<TAB>country<TAB>title`.
impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.release_year, self.country_code, self.title)
    }
}

/// Parses one catalog line: `year<TAB>country<TAB>title`.
impl FromStr for Movie {
    type Err = ParseMovieError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split('\t').collect();
        let [year, country_code, title] = fields.as_slice() else {
            return Err(ParseMovieError::FieldCount(fields.len()));
        };

        if title.is_empty() {
            return Err(ParseMovieError::EmptyTitle);
        }

        Ok(Self::new(*title, *country_code, year.parse()?))
    }
}
