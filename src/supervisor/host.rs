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

//! Interfaces to the collaborators the supervisor drives
//!
//! The supervisor owns no emulation state. Everything it touches (the core,
//! the host display and audio, input, the menu overlay and the debug
//! console) sits behind one of these traits so that a platform frontend or a
//! test harness can supply its own implementation.

use crate::core::error::CoreFault;
use crate::core::video::VideoRegisters;
use bitflags::bitflags;
use std::io;

/// A resource acquired at startup and released at shutdown
pub trait Subsystem {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Release the resource
    ///
    /// Called exactly once, after which the subsystem is not used again.
    fn shutdown(&mut self);
}

/// Control interface of the emulation core
pub trait EmulationCore: Subsystem {
    /// Reset the emulated machine to its power-on state
    fn reset(&mut self);

    /// Run until the next display-relevant boundary
    ///
    /// # Errors
    ///
    /// Returns a [`CoreFault`] if the core cannot continue. The supervisor
    /// never calls `step` again after a fault.
    fn step(&mut self) -> Result<(), CoreFault>;

    /// Current program counter
    fn pc(&self) -> u32;

    /// Fraction of the translation cache in use, 0.0 to 1.0
    fn cache_usage(&self) -> f32;

    /// Video controller registers as of the last step
    fn video(&self) -> VideoRegisters;

    /// Free-form diagnostic dump shown after a fault
    fn debug_dump(&self) -> String {
        String::new()
    }
}

/// Host video output
pub trait Display: Subsystem {
    /// Enable or disable stereoscopic output
    fn set_stereo(&mut self, enabled: bool);

    /// Present the current emulated framebuffer
    fn render_frame(&mut self);
}

/// Host audio output
pub trait AudioOutput: Subsystem {
    /// Stop playback while the emulation is suspended
    fn pause(&mut self);

    /// Restart playback
    fn resume(&mut self);
}

bitflags! {
    /// Inputs the supervisor reacts to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u32 {
        /// Open the menu overlay (touch screen on the handheld)
        const MENU = 1 << 0;
        /// Platform asked the application to quit
        const QUIT = 1 << 1;
    }
}

/// Input polling
pub trait InputSource {
    /// Keys newly pressed since the previous poll
    fn poll(&mut self) -> Keys;

    /// Block until any key is pressed
    fn wait_for_any(&mut self);
}

/// What the menu overlay asked for when it closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Return to the game
    Resume,
    /// End the session
    Exit,
}

/// Blocking menu overlay
pub trait MenuOverlay {
    /// Show the menu and return once the user closes it
    fn open(&mut self) -> MenuAction;
}

/// Text console for telemetry and diagnostics
///
/// Write failures are reported but never stop the emulation.
pub trait DebugSurface {
    /// Replace the status block (telemetry)
    fn status(&mut self, text: &str) -> io::Result<()>;

    /// Append a line of diagnostic output
    fn print(&mut self, text: &str) -> io::Result<()>;
}
