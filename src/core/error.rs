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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("No ROM selected")]
    NoRomSelected,

    #[error("ROM file not found: {0}")]
    RomNotFound(String),

    #[error("Invalid ROM size: {got} bytes (expected a power of two between {min} and {max})")]
    InvalidRomSize { got: usize, min: usize, max: usize },

    #[error("Invalid game ID {0:?}: expected 6 bytes as printable ASCII or \\xNN escapes")]
    InvalidGameId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to acquire {subsystem}: {reason}")]
    SubsystemInit {
        subsystem: &'static str,
        reason: String,
    },

    #[error("Session is missing {0}")]
    IncompleteSession(&'static str),

    #[error("Invalid supervisor transition: {event} while {state}")]
    InvalidTransition { state: String, event: String },
}

/// Fatal fault reported by the emulation core
///
/// Produced by a core step when the emulated machine reaches a state the
/// core cannot continue from. The supervisor never retries after one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("core error #{code} @ PC=0x{pc:08X}")]
pub struct CoreFault {
    /// Core-specific error code
    pub code: i32,
    /// Program counter at the time of the fault
    pub pc: u32,
}

impl CoreFault {
    /// Create a new core fault
    pub fn new(code: i32, pc: u32) -> Self {
        Self { code, pc }
    }
}
