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

//! Typed columns shared by the [procedure](crate::records) and
//! [navdata](crate::records) record grammars.

mod coordinate;
mod leg_type;

pub use coordinate::Coordinate;
pub use leg_type::LegType;

use crate::Error;

macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn from_code(field: &'static str, s: &str) -> Result<Self, Error> {
                match s.trim() {
                    $(stringify!($code) => Ok(Self::$variant),)+
                    other => Err(Error::InvalidVariant {
                        field,
                        value: other.to_string(),
                        expected: concat!($(stringify!($code), " "),+),
                    }),
                }
            }
        }
    };
}

coded_enum!(
    /// Turn direction as coded on a procedure leg record.
    TurnDirection {
        Short = 0,
        Left = 1,
        Right = 2,
    }
);

coded_enum!(
    /// Altitude (or airspeed) restriction kind, shared by both columns.
    RestrictionCode {
        No = 0,
        At = 1,
        Ab = 2,
        Bl = 3,
        Bt = 4,
    }
);

coded_enum!(
    /// The waypoint's role, as coded in the "special-flag" column.
    SpecialFlag {
        No = 0,
        Iaf = 1,
        Faf = 2,
        Map = 3,
    }
);

coded_enum!(
    /// Whether a holding leg's length is coded as a distance or a time.
    HoldDistanceType {
        Distance = 0,
        Seconds = 1,
    }
);

coded_enum!(
    /// The aircraft class an airspeed restriction applies to.
    AircraftClass {
        All = 0,
        Jet = 1,
        Tbp = 2,
        Oth = 3,
        Non = 4,
    }
);
