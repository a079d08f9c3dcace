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

//! Frame pacing
//!
//! The Virtual Boy refreshes at roughly 50 Hz. When the core finishes a step
//! early, the loop sleeps for the rest of the frame budget; when it runs
//! late, the loop carries on immediately. The reference timestamp is taken
//! after the sleep, so each paced iteration lasts at least one budget.

use std::time::{Duration, Instant};

/// Wall-clock budget of one emulated frame
pub const FRAME_BUDGET: Duration = Duration::from_millis(20);

/// Monotonic time source with a coarse sleep
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;

    /// Block the thread for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// [`Clock`] backed by [`Instant`] and [`std::thread::sleep`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Sleeps away whatever is left of the frame budget
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
    reference: Duration,
}

impl FramePacer {
    /// Create a pacer with the given frame budget
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            reference: Duration::ZERO,
        }
    }

    /// Frame budget
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Timestamp the next iteration is measured from
    pub fn reference(&self) -> Duration {
        self.reference
    }

    /// Set the reference timestamp (start of the first iteration)
    pub fn reset(&mut self, now: Duration) {
        self.reference = now;
    }

    /// Wait out the remainder of the budget
    ///
    /// # Returns
    ///
    /// The time slept, or `None` if the iteration already used its budget.
    pub fn pace(&mut self, clock: &mut dyn Clock) -> Option<Duration> {
        let elapsed = clock.now().saturating_sub(self.reference);
        let slept = if elapsed < self.budget {
            let remaining = self.budget - elapsed;
            clock.sleep(remaining);
            Some(remaining)
        } else {
            None
        };

        self.reference = clock.now();
        slept
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(FRAME_BUDGET)
    }
}
