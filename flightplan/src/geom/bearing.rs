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

use crate::measurements::Angle;

/// A bearing measured from true north. Never compared directly against a
/// [`MagneticBearing`] — convert one to the other first via the WMM.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TrueBearing(pub Angle);

/// A bearing measured from magnetic north at a specific position and
/// epoch; the declination that produced it is not retained, so converting
/// back to true requires the WMM again.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct MagneticBearing(pub Angle);

impl TrueBearing {
    pub fn degrees(value: f64) -> Self {
        Self(Angle::degrees(value))
    }

    /// Converts to magnetic using `declination` (positive = east) at the
    /// bearing's position, as supplied by the World Magnetic Model.
    pub fn to_magnetic(self, declination_deg: f64) -> MagneticBearing {
        MagneticBearing(Angle::degrees(self.0.as_degrees() - declination_deg))
    }
}

impl MagneticBearing {
    pub fn degrees(value: f64) -> Self {
        Self(Angle::degrees(value))
    }

    pub fn to_true(self, declination_deg: f64) -> TrueBearing {
        TrueBearing(Angle::degrees(self.0.as_degrees() + declination_deg))
    }
}
