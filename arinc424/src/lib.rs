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

//! ARINC-424-style navigation data record grammar.
//!
//! The real ARINC 424 is a fixed-width, 132-byte-per-line format. The vendor
//! files this crate reads use the same record vocabulary (leg types,
//! restriction kinds, sec/sub codes) but encode every record as a
//! comma-separated line, which is the grammar [`records`] and [`fields`]
//! implement.
//!
//! ```text
//! CF,KLO,473030N,0084500E,0,KLO,090,,253,5.2,1,4000,,0,0,,,0,0,,,,,
//! ```
//!
//! is a `CF` leg to `KLO` with a magnetic course of 253° for 5.2 nm and an
//! `AT` altitude restriction of 4000 ft; see [`records::ProcedureLegRecord`]
//! for the full column layout.

mod error;
mod record;

pub mod fields;
pub mod records;

pub use error::Error;
pub use record::{Fields, Record};
