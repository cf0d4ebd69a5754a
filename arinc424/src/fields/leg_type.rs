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

/// The two-letter ARINC 424 path terminator vocabulary.
///
/// First letter denotes the terminator family (`C`=course, `V`=heading,
/// `F`=from-fix, `D`=direct, `T`=track, `A`=arc, `R`=radius-to-fix,
/// `I`=initial, `H`=hold, `P`=procedure-turn); second letter denotes
/// termination (`F`=fix, `A`=altitude, `M`=manual, `D`=DME-distance,
/// `R`=radial, `I`=intercept, `C`=course-distance).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LegType {
    If,
    Tf,
    Cf,
    Df,
    Fa,
    Fm,
    Fc,
    Fd,
    Ca,
    Ci,
    Cd,
    Cr,
    Va,
    Vi,
    Vd,
    Vr,
    Vm,
    Af,
    Rf,
    Pi,
    Hf,
    Ha,
    Hm,
    /// Manual discontinuity, not a published leg type but used by the
    /// assembler to mark a break in the leg list.
    Zz,
}

impl LegType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::If => "IF",
            Self::Tf => "TF",
            Self::Cf => "CF",
            Self::Df => "DF",
            Self::Fa => "FA",
            Self::Fm => "FM",
            Self::Fc => "FC",
            Self::Fd => "FD",
            Self::Ca => "CA",
            Self::Ci => "CI",
            Self::Cd => "CD",
            Self::Cr => "CR",
            Self::Va => "VA",
            Self::Vi => "VI",
            Self::Vd => "VD",
            Self::Vr => "VR",
            Self::Vm => "VM",
            Self::Af => "AF",
            Self::Rf => "RF",
            Self::Pi => "PI",
            Self::Hf => "HF",
            Self::Ha => "HA",
            Self::Hm => "HM",
            Self::Zz => "ZZ",
        }
    }
}

impl std::str::FromStr for LegType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_uppercase().as_str() {
            "IF" => Ok(Self::If),
            "TF" => Ok(Self::Tf),
            "CF" => Ok(Self::Cf),
            "DF" => Ok(Self::Df),
            "FA" => Ok(Self::Fa),
            "FM" => Ok(Self::Fm),
            "FC" => Ok(Self::Fc),
            "FD" => Ok(Self::Fd),
            "CA" => Ok(Self::Ca),
            "CI" => Ok(Self::Ci),
            "CD" => Ok(Self::Cd),
            "CR" => Ok(Self::Cr),
            "VA" => Ok(Self::Va),
            "VI" => Ok(Self::Vi),
            "VD" => Ok(Self::Vd),
            "VR" => Ok(Self::Vr),
            "VM" => Ok(Self::Vm),
            "AF" => Ok(Self::Af),
            "RF" => Ok(Self::Rf),
            "PI" => Ok(Self::Pi),
            "HF" => Ok(Self::Hf),
            "HA" => Ok(Self::Ha),
            "HM" => Ok(Self::Hm),
            "ZZ" => Ok(Self::Zz),
            other => Err(Error::InvalidVariant {
                field: "leg_type",
                value: other.to_string(),
                expected: "one of the 22 ARINC 424 path terminators",
            }),
        }
    }
}

impl std::fmt::Display for LegType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
