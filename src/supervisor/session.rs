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

//! Session resources and teardown
//!
//! Resources are acquired in a fixed order (display, audio, core) and
//! released in the reverse order (core, audio, display). Release happens
//! exactly once whichever way the session ends: explicitly when the
//! supervisor reaches `Exiting`, or from `Drop` if the loop unwinds early.
//!
//! A failed acquisition drops the [`SessionBuilder`], which releases
//! everything acquired so far, so the supervisor is never constructed.
//!
//! # Example
//!
//! ```no_run
//! # use vbrx::core::error::Result;
//! # use vbrx::supervisor::host::{AudioOutput, Display, EmulationCore};
//! # use vbrx::supervisor::session::SessionBuilder;
//! # fn open_display() -> Result<Box<dyn Display>> { unimplemented!() }
//! # fn open_audio() -> Result<Box<dyn AudioOutput>> { unimplemented!() }
//! # fn open_core() -> Result<Box<dyn EmulationCore>> { unimplemented!() }
//! # fn main() -> Result<()> {
//! let session = SessionBuilder::new()
//!     .display(open_display)?
//!     .audio(open_audio)?
//!     .core(open_core)?
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::host::{AudioOutput, Display, EmulationCore, Subsystem};
use crate::core::error::{EmulatorError, Result};

/// Acquires session resources in order
#[derive(Default)]
pub struct SessionBuilder {
    display: Option<Box<dyn Display>>,
    audio: Option<Box<dyn AudioOutput>>,
    core: Option<Box<dyn EmulationCore>>,
}

impl SessionBuilder {
    /// Start with nothing acquired
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the host display
    pub fn display<F>(mut self, open: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Box<dyn Display>>,
    {
        let display = open()?;
        log::info!("Acquired {}", display.name());
        self.display = Some(display);
        Ok(self)
    }

    /// Acquire host audio (requires the display)
    pub fn audio<F>(mut self, open: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Box<dyn AudioOutput>>,
    {
        if self.display.is_none() {
            return Err(EmulatorError::IncompleteSession("display"));
        }
        let audio = open()?;
        log::info!("Acquired {}", audio.name());
        self.audio = Some(audio);
        Ok(self)
    }

    /// Acquire and reset the emulation core (requires audio)
    pub fn core<F>(mut self, open: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Box<dyn EmulationCore>>,
    {
        if self.audio.is_none() {
            return Err(EmulatorError::IncompleteSession("audio"));
        }
        let mut core = open()?;
        core.reset();
        log::info!("Acquired {} (reset)", core.name());
        self.core = Some(core);
        Ok(self)
    }

    /// Finish acquisition
    ///
    /// # Errors
    ///
    /// Returns `EmulatorError::IncompleteSession` if any resource is missing;
    /// whatever was acquired is released.
    pub fn build(mut self) -> Result<Session> {
        let display = self
            .display
            .take()
            .ok_or(EmulatorError::IncompleteSession("display"))?;
        let audio = match self.audio.take() {
            Some(audio) => audio,
            None => {
                self.display = Some(display);
                return Err(EmulatorError::IncompleteSession("audio"));
            }
        };
        let core = match self.core.take() {
            Some(core) => core,
            None => {
                self.display = Some(display);
                self.audio = Some(audio);
                return Err(EmulatorError::IncompleteSession("core"));
            }
        };

        Ok(Session {
            display,
            audio,
            core,
            released: false,
        })
    }
}

impl Drop for SessionBuilder {
    fn drop(&mut self) {
        // Reverse acquisition order
        let core = self.core.take().map(|c| c as Box<dyn Subsystem>);
        let audio = self.audio.take().map(|a| a as Box<dyn Subsystem>);
        let display = self.display.take().map(|d| d as Box<dyn Subsystem>);
        for mut subsystem in [core, audio, display].into_iter().flatten() {
            log::info!("Releasing {} (incomplete session)", subsystem.name());
            subsystem.shutdown();
        }
    }
}

/// Resources held for the lifetime of one emulation session
pub struct Session {
    display: Box<dyn Display>,
    audio: Box<dyn AudioOutput>,
    core: Box<dyn EmulationCore>,
    released: bool,
}

impl Session {
    /// Emulation core
    pub fn core(&self) -> &dyn EmulationCore {
        &*self.core
    }

    /// Emulation core (mutable)
    pub fn core_mut(&mut self) -> &mut dyn EmulationCore {
        &mut *self.core
    }

    /// Host display
    pub fn display_mut(&mut self) -> &mut dyn Display {
        &mut *self.display
    }

    /// Host audio
    pub fn audio_mut(&mut self) -> &mut dyn AudioOutput {
        &mut *self.audio
    }

    /// True once [`Session::release`] has run
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release core, audio and display, in that order
    ///
    /// Subsequent calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        log::info!("Releasing {}", self.core.name());
        self.core.shutdown();
        log::info!("Releasing {}", self.audio.name());
        self.audio.shutdown();
        log::info!("Releasing {}", self.display.name());
        self.display.shutdown();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}
