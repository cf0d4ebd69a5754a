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

use std::error;
use std::fmt;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Error {
    MissingField {
        record: &'static str,
        field: &'static str,
    },
    InvalidVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    NotANumber {
        field: &'static str,
        value: String,
    },
    InvalidCoordinate {
        value: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { record, field } => {
                write!(f, "{record} is missing required field {field}")
            }
            Self::InvalidVariant {
                field,
                value,
                expected,
            } => {
                write!(f, "found \"{value}\" in {field} but should be {expected}")
            }
            Self::NotANumber { field, value } => {
                write!(f, "{field} should be a number but is \"{value}\"")
            }
            Self::InvalidCoordinate { value } => {
                write!(f, "\"{value}\" is not a valid coordinate")
            }
        }
    }
}

impl error::Error for Error {}
