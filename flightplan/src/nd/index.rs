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

/// A resumable cursor into a sorted lookup list.
///
/// `get_waypoint`/`get_airway` accept one of these by mutable reference
/// so a caller can ask "find the next airway also named N871" without
/// the database re-scanning from the start or the caller tracking raw
/// indices itself.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Index(pub(crate) usize);

impl Index {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
