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

//! Per-iteration telemetry block

use std::fmt;
use std::time::Duration;

/// Snapshot rendered to the debug surface after each iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    /// Frames per second implied by the last iteration's duration
    pub fps: f64,
    /// Completed core steps
    pub frame: u64,
    /// Core program counter
    pub pc: u32,
    /// Translation cache occupancy, 0.0 to 1.0
    pub cache_usage: f32,
    /// Frames presented to the host display
    pub rendered: u64,
    /// Display-skip threshold (FRMCYC low byte) seen this iteration
    pub skip_threshold: u8,
    /// Append the rendered count and skip threshold
    pub verbose: bool,
}

impl Telemetry {
    /// Frames per second for an iteration lasting `elapsed`
    ///
    /// Zero-length iterations report 0.
    pub fn fps_for(elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FPS: {:.2}\nFrame: {}\nPC: 0x{:x}\nDRC cache: {:.2}%",
            self.fps,
            self.frame,
            self.pc,
            self.cache_usage * 100.0
        )?;
        if self.verbose {
            write!(
                f,
                "\nRendered: {}\nFRMCYC: {}",
                self.rendered, self.skip_threshold
            )?;
        }
        Ok(())
    }
}
