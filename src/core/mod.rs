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

//! Core components shared by the supervisor and the load path
//!
//! This module contains:
//! - ROM image and cartridge header
//! - ROM patch engine and the shipped patch table
//! - Game loading (read, identify, patch)
//! - Runtime configuration
//! - Video controller state read by the supervisor
//! - Error types

pub mod config;
pub mod error;
pub mod loader;
pub mod patches;
pub mod rom;
pub mod video;

// Re-export commonly used types
pub use config::{DisplayMode, RuntimeConfig};
pub use error::{CoreFault, EmulatorError, Result};
pub use loader::{LoadedGame, PatchedRom};
pub use patches::{apply_patches, PatchEntry, PatchRegistry};
pub use rom::{GameIdentity, RomImage};
pub use video::{DisplayControl, VideoRegisters};
