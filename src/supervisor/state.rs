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

//! Supervisor state machine
//!
//! ```text
//!          Start            MenuRequested
//!   Init ────────► Running ◄─────────────► MenuOverlay
//!                   │  │   MenuClosed(Resume)    │
//!          Faulted  │  │ QuitRequested           │ MenuClosed(Exit)
//!                   ▼  └──────────┐              │
//!               ErrorHalt         ▼              │
//!                   │ Acknowledged Exiting ◄─────┘
//!                   └────────────► │
//!                                  │ Released
//!                                  ▼
//!                             Terminated
//! ```
//!
//! Every path into `Terminated` passes through `Exiting`, which is where the
//! session releases its resources. Transitions not in the diagram are errors.

use super::host::MenuAction;
use crate::core::error::{CoreFault, EmulatorError, Result};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Platform quit signal
    Quit,
    /// User chose exit from the menu overlay
    Menu,
    /// The core faulted and the user acknowledged the report
    Fault(CoreFault),
}

/// Supervisor states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// Session acquired, loop not started
    Init,
    /// Stepping the core
    Running,
    /// Menu overlay holds control
    MenuOverlay,
    /// Core faulted; waiting for acknowledgement
    ErrorHalt(CoreFault),
    /// Releasing resources
    Exiting(ExitReason),
    /// Final state
    Terminated(ExitReason),
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Enter the main loop
    Start,
    /// Open-menu input observed
    MenuRequested,
    /// Menu overlay returned
    MenuClosed(MenuAction),
    /// Core step returned a fault
    Faulted(CoreFault),
    /// User acknowledged the fault report
    Acknowledged,
    /// Platform quit signal observed
    QuitRequested,
    /// Resources released
    Released,
}

impl SupervisorState {
    /// Compute the state that follows `event`
    ///
    /// # Errors
    ///
    /// Returns `EmulatorError::InvalidTransition` for any pair not in the
    /// state diagram, including every event received in `Terminated`.
    pub fn transition(self, event: Event) -> Result<Self> {
        use SupervisorState::*;

        let next = match (self, event) {
            (Init, Event::Start) => Running,
            (Running, Event::MenuRequested) => MenuOverlay,
            (Running, Event::Faulted(fault)) => ErrorHalt(fault),
            (Running, Event::QuitRequested) => Exiting(ExitReason::Quit),
            (MenuOverlay, Event::MenuClosed(MenuAction::Resume)) => Running,
            (MenuOverlay, Event::MenuClosed(MenuAction::Exit)) => Exiting(ExitReason::Menu),
            (ErrorHalt(fault), Event::Acknowledged) => Exiting(ExitReason::Fault(fault)),
            (Exiting(reason), Event::Released) => Terminated(reason),
            (state, event) => {
                return Err(EmulatorError::InvalidTransition {
                    state: format!("{:?}", state),
                    event: format!("{:?}", event),
                })
            }
        };

        log::debug!("Supervisor: {:?} --{:?}--> {:?}", self, event, next);
        Ok(next)
    }

    /// True once the session has fully ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, SupervisorState::Terminated(_))
    }
}
