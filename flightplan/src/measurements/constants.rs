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

pub const FEET_IN_METER: f64 = 0.3048;
pub const METERS_IN_FEET: f64 = 1.0 / FEET_IN_METER;
pub const METERS_IN_NAUTICAL_MILE: f64 = 1852.0;
pub const NAUTICAL_MILES_IN_METER: f64 = 1.0 / METERS_IN_NAUTICAL_MILE;

/// Ellipsoidal quadratic mean radius of the earth, in meters, used for all
/// great-circle geodesy in this crate.
pub const EARTH_RADIUS_M: f64 = 6_372_800.0;

/// One third of an arc-minute, in degrees: the internal angular unit used
/// by [`crate::geom::Position`] so that latitude/longitude equality is
/// exact rather than float-fuzzy.
pub const THIRD_MINUTE_DEG: f64 = 1.0 / 180.0;
