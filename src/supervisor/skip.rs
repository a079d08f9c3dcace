// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Display-skip policy
//!
//! Games set FRMCYC to show each rendered frame for several display
//! refreshes. The host mirrors that by presenting only every (N+1)-th core
//! step, where N is the FRMCYC low byte.

/// Skip counter that persists across loop iterations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySkip {
    counter: u32,
}

impl DisplaySkip {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter value
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Advance the policy by one iteration
    ///
    /// # Arguments
    ///
    /// * `threshold` - FRMCYC low byte
    ///
    /// # Returns
    ///
    /// `true` if a frame should be presented this iteration. The counter is
    /// reset to zero whenever this returns `true`.
    pub fn tick(&mut self, threshold: u8) -> bool {
        if self.counter < u32::from(threshold) {
            self.counter += 1;
            false
        } else {
            self.counter = 0;
            true
        }
    }
}
