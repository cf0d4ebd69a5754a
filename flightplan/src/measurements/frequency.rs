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

use super::{Measurement, UnitOfMeasure};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FrequencyUnit {
    Khz,
    Mhz,
}

impl UnitOfMeasure for FrequencyUnit {
    fn symbol(&self) -> &'static str {
        match self {
            Self::Khz => "kHz",
            Self::Mhz => "MHz",
        }
    }

    fn to_si(self, value: f64) -> f64 {
        match self {
            Self::Khz => value * 1_000.0,
            Self::Mhz => value * 1_000_000.0,
        }
    }

    fn from_si(self, value: f64) -> f64 {
        match self {
            Self::Khz => value / 1_000.0,
            Self::Mhz => value / 1_000_000.0,
        }
    }
}

/// A navaid frequency, stored internally as whole hertz.
pub type Frequency = Measurement<FrequencyUnit>;

impl Frequency {
    pub fn khz(value: f64) -> Self {
        Self::new(value, FrequencyUnit::Khz, 1)
    }

    pub fn mhz(value: f64) -> Self {
        Self::new(value, FrequencyUnit::Mhz, 1)
    }

    pub fn as_khz(&self) -> f64 {
        self.get(FrequencyUnit::Khz)
    }

    pub fn as_mhz(&self) -> f64 {
        self.get(FrequencyUnit::Mhz)
    }
}
