// SPDX-License-Identifier: Apache-2.0
// Copyright 2024, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::Error;

/// A CSV record type, one per line of a vendor file.
pub trait Record<'a>: Sized {
    /// Parse this record type from a single CSV line.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or invalid.
    fn parse(line: &'a str) -> Result<Self, Error>;
}

/// A cursor over the comma-separated columns of one CSV line.
///
/// Unlike ARINC 424's fixed-width fields, a column here can be empty (two
/// consecutive commas); `next` returns `""` in that case and the caller
/// decides whether that's valid for the column in question.
pub struct Fields<'a> {
    record: &'static str,
    columns: Vec<&'a str>,
    index: usize,
}

impl<'a> Fields<'a> {
    pub fn new(record: &'static str, line: &'a str) -> Self {
        Self {
            record,
            columns: line.split(',').map(str::trim).collect(),
            index: 0,
        }
    }

    /// Returns the next column as a raw string slice, or `""` past the end.
    pub fn next_str(&mut self) -> &'a str {
        let value = self.columns.get(self.index).copied().unwrap_or("");
        self.index += 1;
        value
    }

    /// Returns the next column, failing if it is empty.
    pub fn next_required(&mut self, field: &'static str) -> Result<&'a str, Error> {
        let value = self.next_str();
        if value.is_empty() {
            Err(Error::MissingField {
                record: self.record,
                field,
            })
        } else {
            Ok(value)
        }
    }

    /// Returns the next column as `None` when empty, parsed otherwise.
    pub fn next_opt<T, E>(&mut self, parse: impl FnOnce(&'a str) -> Result<T, E>) -> Result<Option<T>, E> {
        let value = self.next_str();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(parse(value)?))
        }
    }
}
