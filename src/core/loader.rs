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

//! Game loading for the Virtual Boy
//!
//! This module turns a ROM path into an image the emulation core may run.
//!
//! # Load Sequence
//!
//! 1. Read the ROM file named by the runtime configuration
//! 2. Validate the image size and parse the trailing cartridge header
//! 3. Resolve the game identity (configured override, else the header)
//! 4. Apply the patch registry for that identity
//! 5. Hand the patched image to the core
//!
//! Step 4 is enforced by the types: the core is built from a [`PatchedRom`],
//! and the only way to obtain one is through [`PatchedRom::new`], which runs
//! the registry first. No core step can ever observe a pre-patch image.
//!
//! # Example
//!
//! ```no_run
//! use vbrx::core::config::RuntimeConfig;
//! use vbrx::core::loader::load_game;
//! use vbrx::core::patches::PatchRegistry;
//!
//! let config = RuntimeConfig {
//!     rom_name: Some("wario.vb".into()),
//!     ..RuntimeConfig::default()
//! };
//! let game = load_game(&config, PatchRegistry::builtin()).unwrap();
//! println!("{} ({} patches applied)", game.header.title, game.report.applied());
//! ```

use super::config::RuntimeConfig;
use super::error::{EmulatorError, Result};
use super::patches::{PatchRegistry, PatchReport};
use super::rom::{GameIdentity, RomHeader, RomImage};
use std::path::Path;

/// ROM image that has been through the patch engine
///
/// Read-only from here on. Cores take ownership of this type rather than a
/// bare [`RomImage`].
#[derive(Debug, Clone)]
pub struct PatchedRom {
    image: RomImage,
    identity: GameIdentity,
}

impl PatchedRom {
    /// Apply `registry` to `image` for `identity` and seal the result
    pub fn new(
        mut image: RomImage,
        identity: GameIdentity,
        registry: &PatchRegistry,
    ) -> (Self, PatchReport) {
        let report = registry.apply_with_report(&mut image, &identity);
        (Self { image, identity }, report)
    }

    /// Identity the patches were selected with
    pub fn identity(&self) -> GameIdentity {
        self.identity
    }

    /// Patched ROM bytes
    pub fn bytes(&self) -> &[u8] {
        self.image.bytes()
    }

    /// Image size in bytes
    pub fn len(&self) -> usize {
        self.image.len()
    }

    /// Always false for a validated image
    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }

    /// Release the underlying image
    pub fn into_image(self) -> RomImage {
        self.image
    }
}

/// A ROM ready to run
#[derive(Debug, Clone)]
pub struct LoadedGame {
    /// Patched image
    pub rom: PatchedRom,
    /// Header as read from the file (before patching)
    pub header: RomHeader,
    /// Per-entry patch results
    pub report: PatchReport,
}

/// Load the ROM named by `config` and apply `registry`
///
/// # Returns
///
/// - `Ok(LoadedGame)` with the patched image
/// - `Err(EmulatorError::NoRomSelected)` if `config.rom_name` is unset
/// - `Err(EmulatorError)` if the file cannot be read or is not a valid ROM
pub fn load_game(config: &RuntimeConfig, registry: &PatchRegistry) -> Result<LoadedGame> {
    let path = config
        .rom_name
        .as_deref()
        .ok_or(EmulatorError::NoRomSelected)?;
    load_rom_file(path, config.game_id, registry)
}

/// Load a ROM file and apply `registry`
///
/// # Arguments
///
/// * `path` - ROM file
/// * `identity_override` - Identity to use for patch lookup instead of the header's
/// * `registry` - Patches to apply
pub fn load_rom_file<P: AsRef<Path>>(
    path: P,
    identity_override: Option<GameIdentity>,
    registry: &PatchRegistry,
) -> Result<LoadedGame> {
    let path = path.as_ref();
    log::info!("Loading ROM from: {}", path.display());

    let image = RomImage::load(path)?;
    Ok(prepare(image, identity_override, registry))
}

/// Patch an in-memory image and collect its header
pub fn prepare(
    image: RomImage,
    identity_override: Option<GameIdentity>,
    registry: &PatchRegistry,
) -> LoadedGame {
    let header = image.header();
    let identity = identity_override.unwrap_or(header.identity);
    if identity != header.identity {
        log::info!(
            "Game ID override: {} (header says {})",
            identity,
            header.identity
        );
    }

    log::info!(
        "ROM: \"{}\" [{}] v{} ({} KiB)",
        header.title,
        identity,
        header.version,
        image.len() / 1024
    );

    let (rom, report) = PatchedRom::new(image, identity, registry);
    if report.applied() > 0 {
        log::info!("Applied {} patch(es) for {}", report.applied(), identity);
    }

    LoadedGame {
        rom,
        header,
        report,
    }
}
