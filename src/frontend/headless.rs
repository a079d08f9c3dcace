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

//! Headless host and stand-in core

use super::shutdown;
use crate::core::error::CoreFault;
use crate::core::loader::PatchedRom;
use crate::core::video::{DisplayControl, VideoRegisters};
use crate::supervisor::{
    AudioOutput, Display, EmulationCore, InputSource, Keys, MenuAction, MenuOverlay, Subsystem,
};

/// V810 reset vector
pub const RESET_VECTOR: u32 = 0xFFFF_FFF0;

/// Core stand-in that owns a patched ROM but runs no code
///
/// Each step completes one display frame instantly. The program counter
/// stays at the reset vector.
pub struct HeadlessCore {
    rom: PatchedRom,
    pc: u32,
    frames: u64,
    video: VideoRegisters,
    fault: Option<(u64, CoreFault)>,
}

impl HeadlessCore {
    /// Wrap a patched ROM
    ///
    /// Only a [`PatchedRom`] is accepted, so the core never sees an image
    /// the patch engine has not processed.
    pub fn new(rom: PatchedRom) -> Self {
        Self {
            rom,
            pc: RESET_VECTOR,
            frames: 0,
            video: Self::power_on_video(),
            fault: None,
        }
    }

    /// Fail with `fault` on the step after `frames` successful ones
    pub fn with_fault_after(mut self, frames: u64, fault: CoreFault) -> Self {
        self.fault = Some((frames, fault));
        self
    }

    /// Override the VIP registers reported to the supervisor
    pub fn with_video(mut self, video: VideoRegisters) -> Self {
        self.video = video;
        self
    }

    /// ROM the core was built from
    pub fn rom(&self) -> &PatchedRom {
        &self.rom
    }

    /// Frames completed since reset
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn power_on_video() -> VideoRegisters {
        VideoRegisters {
            frmcyc: 0,
            dpctrl: DisplayControl::DISP | DisplayControl::SYNCE,
        }
    }
}

impl Subsystem for HeadlessCore {
    fn name(&self) -> &'static str {
        "headless core"
    }

    fn shutdown(&mut self) {
        log::debug!("Headless core stopped after {} frames", self.frames);
    }
}

impl EmulationCore for HeadlessCore {
    fn reset(&mut self) {
        self.pc = RESET_VECTOR;
        self.frames = 0;
    }

    fn step(&mut self) -> Result<(), CoreFault> {
        if let Some((after, fault)) = self.fault {
            if self.frames >= after {
                return Err(fault);
            }
        }
        self.frames += 1;
        Ok(())
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn cache_usage(&self) -> f32 {
        0.0
    }

    fn video(&self) -> VideoRegisters {
        self.video
    }

    fn debug_dump(&self) -> String {
        format!(
            "ROM {} ({} bytes)\nPC=0x{:08X} frames={}\nFRMCYC=0x{:04X} DPCTRL=0x{:04X}",
            self.rom.identity(),
            self.rom.len(),
            self.pc,
            self.frames,
            self.video.frmcyc,
            self.video.dpctrl.bits()
        )
    }
}

/// Display that counts presented frames
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    presented: u64,
    stereo: bool,
}

impl HeadlessDisplay {
    /// Mono display with nothing presented yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// True if stereoscopic output was requested
    pub fn is_stereo(&self) -> bool {
        self.stereo
    }
}

impl Subsystem for HeadlessDisplay {
    fn name(&self) -> &'static str {
        "headless display"
    }

    fn shutdown(&mut self) {
        log::debug!("Headless display presented {} frames", self.presented);
    }
}

impl Display for HeadlessDisplay {
    fn set_stereo(&mut self, enabled: bool) {
        self.stereo = enabled;
    }

    fn render_frame(&mut self) {
        self.presented += 1;
    }
}

/// Silent audio output
#[derive(Debug, Default)]
pub struct NullAudio {
    paused: bool,
}

impl NullAudio {
    /// Audio output in the playing state
    pub fn new() -> Self {
        Self::default()
    }

    /// True between `pause` and `resume`
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Subsystem for NullAudio {
    fn name(&self) -> &'static str {
        "null audio"
    }

    fn shutdown(&mut self) {}
}

impl AudioOutput for NullAudio {
    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }
}

/// Input that requests quit after a number of polls, or on a signal
#[derive(Debug, Default)]
pub struct FrameLimitInput {
    limit: Option<u64>,
    polls: u64,
}

impl FrameLimitInput {
    /// Quit after `limit` polls; `None` runs until a termination signal
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit, polls: 0 }
    }

    /// Number of polls answered so far
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl InputSource for FrameLimitInput {
    fn poll(&mut self) -> Keys {
        let limit_reached = self.limit.is_some_and(|limit| self.polls >= limit);
        self.polls += 1;
        if limit_reached || shutdown::should_quit() {
            Keys::QUIT
        } else {
            Keys::empty()
        }
    }

    fn wait_for_any(&mut self) {
        // Nobody to press a key
        log::info!("Headless: acknowledging halt");
    }
}

/// Menu that closes immediately and resumes the game
#[derive(Debug, Default)]
pub struct AutoResumeMenu;

impl MenuOverlay for AutoResumeMenu {
    fn open(&mut self) -> MenuAction {
        MenuAction::Resume
    }
}
