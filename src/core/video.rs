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

//! Video controller (VIP) state consumed by the supervisor
//!
//! Only two registers matter outside the video emulation:
//!
//! - `FRMCYC` (0x0005F82E): frame repeat count. The low byte is the number
//!   of display frames to skip before the host presents a new one.
//! - `DPCTRL` (0x0005F822): display control. Bit 1 (`DISP`) enables output.

use bitflags::bitflags;

bitflags! {
    /// DPCTRL display control bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DisplayControl: u16 {
        /// Display reset
        const DPRST = 1 << 0;
        /// Display enable
        const DISP = 1 << 1;
        /// Refresh in progress
        const RE = 1 << 8;
        /// Frame clock sync
        const SYNCE = 1 << 9;
        /// Column table address lock
        const LOCK = 1 << 10;
    }
}

/// Snapshot of the VIP registers read by the supervisor each iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoRegisters {
    /// FRMCYC register
    pub frmcyc: u16,
    /// DPCTRL register
    pub dpctrl: DisplayControl,
}

impl VideoRegisters {
    /// Display-skip threshold: the masked low byte of FRMCYC
    pub fn skip_threshold(&self) -> u8 {
        (self.frmcyc & 0x00FF) as u8
    }

    /// True if the DISP bit is set
    pub fn display_enabled(&self) -> bool {
        self.dpctrl.contains(DisplayControl::DISP)
    }
}
