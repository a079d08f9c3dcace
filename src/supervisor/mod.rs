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

//! Execution supervisor
//!
//! Owns the top-level loop of an emulation session, from the first core
//! step to shutdown. Each iteration:
//!
//! 1. Poll input; a quit signal ends the session, the menu key hands control
//!    to the menu overlay until it returns
//! 2. Step the core once
//! 3. On success, apply the display-skip policy and count the frame
//! 4. On a fault, dump diagnostics and wait for acknowledgement, then exit
//! 5. Unless fast-forwarding, sleep out the rest of the frame budget
//! 6. Write telemetry to the debug surface
//!
//! The loop is an explicit state machine (see [`state`]); every exit path
//! goes through `Exiting`, which releases the session.
//!
//! # Example
//!
//! ```no_run
//! # use vbrx::core::config::RuntimeConfig;
//! # use vbrx::supervisor::{Host, Supervisor};
//! # use vbrx::supervisor::session::Session;
//! # fn session() -> Session { unimplemented!() }
//! # fn host() -> Host { unimplemented!() }
//! let supervisor = Supervisor::new(RuntimeConfig::default(), session(), host());
//! let summary = supervisor.run().unwrap();
//! println!("{:?} after {} frames", summary.exit, summary.frames);
//! ```

pub mod host;
pub mod pacing;
pub mod session;
pub mod skip;
pub mod state;
pub mod telemetry;

pub use host::{
    AudioOutput, DebugSurface, Display, EmulationCore, InputSource, Keys, MenuAction,
    MenuOverlay, Subsystem,
};
pub use pacing::{Clock, FramePacer, SystemClock, FRAME_BUDGET};
pub use session::{Session, SessionBuilder};
pub use skip::DisplaySkip;
pub use state::{Event, ExitReason, SupervisorState};
pub use telemetry::Telemetry;

use crate::core::config::RuntimeConfig;
use crate::core::error::{CoreFault, Result};

/// Non-owned collaborators the loop talks to
pub struct Host {
    /// Input polling
    pub input: Box<dyn InputSource>,
    /// Menu overlay
    pub menu: Box<dyn MenuOverlay>,
    /// Telemetry and diagnostics console
    pub debug: Box<dyn DebugSurface>,
    /// Time source for pacing and FPS
    pub clock: Box<dyn Clock>,
}

/// Loop bookkeeping that outlives a single iteration
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    /// Pacing reference
    pub pacer: FramePacer,
    /// Display-skip counter
    pub skip: DisplaySkip,
    /// Completed core steps
    pub frames: u64,
    /// Frames presented to the host display
    pub rendered: u64,
}

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// What ended the session
    pub exit: ExitReason,
    /// Completed core steps
    pub frames: u64,
    /// Frames presented to the host display
    pub rendered: u64,
}

/// Top-level emulation loop
pub struct Supervisor {
    config: RuntimeConfig,
    session: Session,
    host: Host,
    state: SupervisorState,
    frame_clock: FrameClock,
}

impl Supervisor {
    /// Create a supervisor for an acquired session
    ///
    /// Applies the configured display mode; the core was reset when the
    /// session acquired it.
    pub fn new(config: RuntimeConfig, mut session: Session, host: Host) -> Self {
        session
            .display_mut()
            .set_stereo(config.display_mode.is_stereo());

        Self {
            config,
            session,
            host,
            state: SupervisorState::Init,
            frame_clock: FrameClock::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Loop bookkeeping
    pub fn frame_clock(&self) -> &FrameClock {
        &self.frame_clock
    }

    /// Run until the session terminates
    ///
    /// # Returns
    ///
    /// - `Ok(RunSummary)` once the session reached `Terminated`
    /// - `Err(EmulatorError::InvalidTransition)` if the state machine was
    ///   driven out of order; the session is still released on drop
    pub fn run(mut self) -> Result<RunSummary> {
        log::info!("Supervisor: starting");
        loop {
            match self.state {
                SupervisorState::Init => {
                    self.transition(Event::Start)?;
                    self.frame_clock.pacer.reset(self.host.clock.now());
                }
                SupervisorState::Running => self.iterate()?,
                SupervisorState::MenuOverlay => self.service_menu()?,
                SupervisorState::ErrorHalt(fault) => self.halt_on_fault(fault)?,
                SupervisorState::Exiting(reason) => {
                    log::info!("Supervisor: exiting ({:?})", reason);
                    self.session.release();
                    self.transition(Event::Released)?;
                }
                SupervisorState::Terminated(exit) => {
                    log::info!(
                        "Supervisor: terminated after {} frames ({} rendered)",
                        self.frame_clock.frames,
                        self.frame_clock.rendered
                    );
                    return Ok(RunSummary {
                        exit,
                        frames: self.frame_clock.frames,
                        rendered: self.frame_clock.rendered,
                    });
                }
            }
        }
    }

    fn transition(&mut self, event: Event) -> Result<()> {
        self.state = self.state.transition(event)?;
        Ok(())
    }

    /// One pass of the Running state
    fn iterate(&mut self) -> Result<()> {
        let started = self.host.clock.now();

        let keys = self.host.input.poll();
        if keys.contains(Keys::QUIT) {
            return self.transition(Event::QuitRequested);
        }
        if keys.contains(Keys::MENU) {
            self.transition(Event::MenuRequested)?;
            self.service_menu()?;
            if self.state != SupervisorState::Running {
                return Ok(());
            }
        }

        if let Err(fault) = self.session.core_mut().step() {
            log::error!("{}", fault);
            return self.transition(Event::Faulted(fault));
        }

        let video = self.session.core().video();
        if self.frame_clock.skip.tick(video.skip_threshold()) && video.display_enabled() {
            self.session.display_mut().render_frame();
            self.frame_clock.rendered += 1;
        }
        self.frame_clock.frames += 1;

        if !self.config.fast_forward {
            self.frame_clock.pacer.pace(&mut *self.host.clock);
        }

        let elapsed = self.host.clock.now().saturating_sub(started);
        self.render_telemetry(Telemetry::fps_for(elapsed));
        Ok(())
    }

    fn service_menu(&mut self) -> Result<()> {
        self.session.audio_mut().pause();
        let action = self.host.menu.open();
        log::info!("Menu closed: {:?}", action);
        if action == MenuAction::Resume {
            self.session.audio_mut().resume();
        }
        self.transition(Event::MenuClosed(action))
    }

    fn halt_on_fault(&mut self, fault: CoreFault) -> Result<()> {
        self.session.audio_mut().pause();

        let core = self.session.core();
        let mut report = vec![
            format!("[DRC]: error #{} @ PC=0x{:08X}", fault.code, fault.pc),
            "Dumping debug info...".to_string(),
        ];
        let dump = core.debug_dump();
        if !dump.is_empty() {
            report.push(dump);
        }
        report.push(format!("DRC cache: {:.2}%", core.cache_usage() * 100.0));
        report.push("Press any key to exit".to_string());

        for line in &report {
            if let Err(e) = self.host.debug.print(line) {
                log::warn!("Debug surface write failed: {}", e);
            }
        }

        self.host.input.wait_for_any();
        self.transition(Event::Acknowledged)
    }

    fn render_telemetry(&mut self, fps: f64) {
        let core = self.session.core();
        let telemetry = Telemetry {
            fps,
            frame: self.frame_clock.frames,
            pc: core.pc(),
            cache_usage: core.cache_usage(),
            rendered: self.frame_clock.rendered,
            skip_threshold: core.video().skip_threshold(),
            verbose: self.config.debug,
        };
        if let Err(e) = self.host.debug.status(&telemetry.to_string()) {
            log::debug!("Telemetry write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests;
