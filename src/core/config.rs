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

//! Runtime configuration
//!
//! Options are read once at startup and passed to the supervisor by value.
//! The on-disk format is TOML:
//!
//! ```toml
//! debug = false
//! fast_forward = false
//! display_mode = "3d"
//! rom_name = "sdmc:/vb/wario.vb"
//! game_id = "01VWCJ"
//! ```
//!
//! Every field is optional; missing fields take their default value.

use super::error::Result;
use super::rom::GameIdentity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stereo output mode of the host display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Same image to both eyes
    #[default]
    #[serde(rename = "2d")]
    Mono,
    /// Separate left/right images (parallax barrier enabled)
    #[serde(rename = "3d")]
    Stereo,
}

impl DisplayMode {
    /// True if stereoscopic output should be enabled
    pub fn is_stereo(self) -> bool {
        self == DisplayMode::Stereo
    }
}

/// Options consumed by the supervisor and load path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Add rendered-frame and skip-threshold lines to telemetry
    pub debug: bool,
    /// Skip frame pacing
    pub fast_forward: bool,
    /// Host display stereo mode
    pub display_mode: DisplayMode,
    /// ROM to load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rom_name: Option<PathBuf>,
    /// Identity used for patch lookup instead of the header's
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameIdentity>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            debug: false,
            fast_forward: false,
            display_mode: DisplayMode::Mono,
            rom_name: None,
            game_id: None,
        }
    }
}

impl RuntimeConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize configuration to TOML text
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Write configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load configuration, writing defaults first if the file does not exist
    ///
    /// # Returns
    ///
    /// - `Ok(RuntimeConfig)` loaded from `path`, or the defaults if it was missing
    /// - `Err(EmulatorError)` if the file exists but cannot be read or parsed,
    ///   or the defaults cannot be written
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::load(path)?;
            log::info!("Loaded options from {}", path.display());
            return Ok(config);
        }

        let config = Self::default();
        config.save(path)?;
        log::info!("Wrote default options to {}", path.display());
        Ok(config)
    }
}
