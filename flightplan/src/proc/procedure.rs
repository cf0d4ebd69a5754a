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

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::proc::leg::ProcedureLeg;
use crate::proc::record::{self, CompiledLeg};
use crate::proc::restriction::Restriction;

/// The approach type an `appr_letter` decodes to (§6).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ApproachType {
    Vdm,
    Vor,
    Tac,
    Ndb,
    Ndm,
    Lbc,
    Igs,
    Ils,
    Loc,
    Lda,
    Rnp,
    Gls,
    Gps,
    Rnv,
    Fms,
    Mls,
    Sdf,
}

impl ApproachType {
    pub fn from_letter(letter: char) -> Result<Self> {
        Ok(match letter.to_ascii_uppercase() {
            'D' => Self::Vdm,
            'S' | 'V' => Self::Vor,
            'T' => Self::Tac,
            'N' => Self::Ndb,
            'Q' => Self::Ndm,
            'B' => Self::Lbc,
            'G' => Self::Igs,
            'I' => Self::Ils,
            'L' => Self::Loc,
            'X' => Self::Lda,
            'H' => Self::Rnp,
            'J' => Self::Gls,
            'P' => Self::Gps,
            'R' => Self::Rnv,
            'F' => Self::Fms,
            'M' | 'W' | 'Y' => Self::Mls,
            'U' => Self::Sdf,
            other => {
                return Err(Error::InvalidRoute(format!("unknown approach letter '{other}'")));
            }
        })
    }

    /// Used by §4.D.3's RNAV-FAF detection (`approach type ∈ {GLS, RNAV}`).
    pub fn is_rnav_family(self) -> bool {
        matches!(self, Self::Gls | Self::Rnv | Self::Gps | Self::Fms)
    }
}

/// The procedure-type tag, combining departure/arrival role with the
/// runway/segment/enroute combination §3 describes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ProcedureType {
    /// Runway-specific, built-in transition legs appended.
    Sid1,
    /// Runway-specific, segment alone.
    Sid2,
    /// Runway-specific, segment → enroute.
    Sid3,
    /// Runway-agnostic, built-in transition legs appended.
    Sid4,
    /// Runway-agnostic, segment alone.
    Sid5,
    /// Runway-agnostic, segment → enroute.
    Sid6,
    Star1,
    Star2,
    Star3,
    Star4,
    Star5,
    Star6,
    Star7,
    Star8,
    Star9,
    ApprTrans,
    Final,
}

impl ProcedureType {
    /// Recode rule (§6): SID types 2/5 become 1/4, STAR types 2/5/8
    /// become 3/6/9, unless `rwy_or_trans == "ALL"`.
    pub fn from_seg_type(is_sid: bool, seg_type: u8, rwy_or_trans: &str) -> Result<Self> {
        let all = rwy_or_trans.eq_ignore_ascii_case("ALL");
        Ok(if is_sid {
            match (seg_type, all) {
                (1, _) => Self::Sid1,
                (2, false) => Self::Sid1,
                (2, true) => Self::Sid2,
                (3, _) => Self::Sid3,
                (4, _) => Self::Sid4,
                (5, false) => Self::Sid4,
                (5, true) => Self::Sid5,
                (6, _) => Self::Sid6,
                other => return Err(Error::InvalidRoute(format!("unknown SID seg_type {}", other.0))),
            }
        } else {
            match (seg_type, all) {
                (1, _) => Self::Star1,
                (2, false) => Self::Star3,
                (2, true) => Self::Star2,
                (3, _) => Self::Star3,
                (4, _) => Self::Star4,
                (5, false) => Self::Star6,
                (5, true) => Self::Star5,
                (6, _) => Self::Star6,
                (7, _) => Self::Star7,
                (8, false) => Self::Star9,
                (8, true) => Self::Star8,
                (9, _) => Self::Star9,
                other => return Err(Error::InvalidRoute(format!("unknown STAR seg_type {}", other.0))),
            }
        })
    }

    pub fn is_runway_specific_sid(self) -> bool {
        matches!(self, Self::Sid1 | Self::Sid4)
    }

    pub fn is_runway_agnostic_sid(self) -> bool {
        matches!(self, Self::Sid2 | Self::Sid5)
    }

    pub fn is_sid(self) -> bool {
        matches!(self, Self::Sid1 | Self::Sid2 | Self::Sid3 | Self::Sid4 | Self::Sid5 | Self::Sid6)
    }

    pub fn is_star(self) -> bool {
        matches!(
            self,
            Self::Star1
                | Self::Star2
                | Self::Star3
                | Self::Star4
                | Self::Star5
                | Self::Star6
                | Self::Star7
                | Self::Star8
                | Self::Star9
        )
    }

    /// STARs whose runway-specific form carries a built-in runway-agnostic
    /// prefix (`proc.transition.star`), per §4.D.2.
    pub fn has_star_prefix(self) -> bool {
        matches!(self, Self::Star3 | Self::Star6 | Self::Star9)
    }

    pub fn requires_runway(self) -> bool {
        matches!(self, Self::Star3 | Self::Star6 | Self::Star9)
    }
}

/// One compiled leg inside a procedure, carrying its restriction and
/// writer-visible text alongside the leg primitive itself.
#[derive(Clone, PartialEq, Debug)]
pub struct ProcLeg {
    pub leg: ProcedureLeg,
    pub restriction: Restriction,
    pub identifier: String,
    pub description: String,
}

impl From<CompiledLeg> for ProcLeg {
    fn from(c: CompiledLeg) -> Self {
        Self { leg: c.leg, restriction: c.restriction, identifier: c.identifier, description: c.description }
    }
}

/// A departure/arrival procedure, lazily materialized from raw text.
#[derive(PartialEq)]
pub struct Procedure {
    pub name: String,
    pub proc_type: ProcedureType,
    pub approach_type: Option<ApproachType>,
    pub runway_id: Option<String>,
    raw_text: RefCell<Option<String>>,
    legs: RefCell<Vec<ProcLeg>>,
    missed_approach_legs: RefCell<Vec<ProcLeg>>,
    pub transitions: RefCell<Vec<Rc<Procedure>>>,
    /// Runway-agnostic STAR prefix, populated for `Star3/6/9` parents.
    pub star_prefix: RefCell<Option<Rc<Procedure>>>,
    opened: RefCell<bool>,
}

impl Procedure {
    pub fn new(name: impl Into<String>, proc_type: ProcedureType, raw_text: String) -> Self {
        Self {
            name: name.into(),
            proc_type,
            approach_type: None,
            runway_id: None,
            raw_text: RefCell::new(Some(raw_text)),
            legs: RefCell::new(Vec::new()),
            missed_approach_legs: RefCell::new(Vec::new()),
            transitions: RefCell::new(Vec::new()),
            star_prefix: RefCell::new(None),
            opened: RefCell::new(false),
        }
    }

    pub fn is_opened(&self) -> bool {
        *self.opened.borrow()
    }

    /// Materializes `proclegs`/`mapplegs` from the raw text, freeing it
    /// afterward. Idempotent: a second call is a no-op.
    pub fn open(&self) -> Result<()> {
        if *self.opened.borrow() {
            return Ok(());
        }
        let text = self.raw_text.borrow_mut().take().unwrap_or_default();
        let mut legs = Vec::new();
        let mut missed = Vec::new();
        let mut in_missed = false;
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.eq_ignore_ascii_case("MAPP") {
                in_missed = true;
                continue;
            }
            let rec = arinc424::records::ProcedureLegRecord::parse(line)?;
            let compiled: ProcLeg = record::compile(&rec)?.into();
            if in_missed {
                missed.push(compiled);
            } else {
                legs.push(compiled);
            }
        }
        *self.legs.borrow_mut() = legs;
        *self.missed_approach_legs.borrow_mut() = missed;
        *self.opened.borrow_mut() = true;
        Ok(())
    }

    pub fn legs(&self) -> std::cell::Ref<'_, Vec<ProcLeg>> {
        self.legs.borrow()
    }

    pub fn missed_approach_legs(&self) -> std::cell::Ref<'_, Vec<ProcLeg>> {
        self.missed_approach_legs.borrow()
    }
}

impl std::fmt::Debug for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .field("proc_type", &self.proc_type)
            .field("opened", &self.is_opened())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recodes_runway_agnostic_sid_segtype() {
        let ty = ProcedureType::from_seg_type(true, 2, "ALL").unwrap();
        assert_eq!(ty, ProcedureType::Sid2);
        let ty = ProcedureType::from_seg_type(true, 2, "04L").unwrap();
        assert_eq!(ty, ProcedureType::Sid1);
    }

    #[test]
    fn opens_procedure_legs_once() {
        let proc = Procedure::new(
            "ALBI1D",
            ProcedureType::Sid2,
            "TF,ALBI,N47.30,E008.40,0,,,,,,0,,,0,0,,,0,0,,,,,,\n".to_string(),
        );
        proc.open().unwrap();
        assert_eq!(proc.legs().len(), 1);
        proc.open().unwrap();
        assert_eq!(proc.legs().len(), 1);
    }
}
