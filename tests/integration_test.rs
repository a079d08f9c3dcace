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

//! End-to-end load, patch and run tests

mod common;

use common::assertions::{assert_only_changed, assert_rom_bytes};
use common::fixtures::{
    fast_config, headless_host, headless_session, poke, rom_bytes, rom_file, rom_image,
};
use vbrx::core::config::RuntimeConfig;
use vbrx::core::error::{CoreFault, EmulatorError, Result};
use vbrx::core::loader::{load_game, load_rom_file, prepare};
use vbrx::core::patches::{PatchOutcome, PatchRegistry};
use vbrx::core::rom::GameIdentity;
use vbrx::frontend::HeadlessCore;
use vbrx::supervisor::{ExitReason, Supervisor};

const TELEROBOXER_SITE: usize = 0x2E9DC;
const INNSMOUTH_SITE: usize = 0x19040;

fn teleroboxer() -> Vec<u8> {
    let mut data = rom_bytes(0x40000, "TELEROBOXER", b"01VTBJ");
    poke(&mut data, TELEROBOXER_SITE, &[0x61, 0x45]);
    data
}

#[test]
fn test_load_patches_known_game() -> Result<()> {
    let before = teleroboxer();
    let file = rom_file(&before);
    let config = RuntimeConfig {
        rom_name: Some(file.path().to_path_buf()),
        ..RuntimeConfig::default()
    };

    let game = load_game(&config, PatchRegistry::builtin())?;

    assert_eq!(game.header.title, "TELEROBOXER");
    assert_eq!(game.report.applied(), 1);
    assert_rom_bytes(game.rom.bytes(), TELEROBOXER_SITE, &[0x00, 0x00]);
    assert_only_changed(&before, game.rom.bytes(), TELEROBOXER_SITE..TELEROBOXER_SITE + 2);
    Ok(())
}

#[test]
fn test_reloading_patched_rom_is_noop() -> Result<()> {
    let first = prepare(rom_image(teleroboxer()), None, PatchRegistry::builtin());
    let patched = first.rom.bytes().to_vec();

    let second = prepare(rom_image(patched.clone()), None, PatchRegistry::builtin());

    assert_eq!(second.rom.bytes(), patched.as_slice());
    assert_eq!(second.report.results[0].outcome, PatchOutcome::AlreadyPatched);
    Ok(())
}

#[test]
fn test_unknown_game_untouched() {
    let before = rom_bytes(0x40000, "HOMEBREW", b"ZZVHBE");
    let game = prepare(rom_image(before.clone()), None, PatchRegistry::builtin());

    assert_eq!(game.rom.bytes(), before.as_slice());
    assert!(game.report.results.is_empty());
}

#[test]
fn test_other_revision_untouched() {
    let mut before = rom_bytes(0x20000, "INNSMOUTH", b"8FVIMJ");
    poke(&mut before, INNSMOUTH_SITE, &[0x12, 0x34]);
    let game = prepare(rom_image(before.clone()), None, PatchRegistry::builtin());

    assert_eq!(game.rom.bytes(), before.as_slice());
    assert_eq!(game.report.skipped(), 1);
}

#[test]
fn test_innsmouth_busy_wait_shortened() {
    let mut data = rom_bytes(0x20000, "INNSMOUTH", b"8FVIME");
    poke(&mut data, INNSMOUTH_SITE, &[0x44, 0x85]);
    let game = prepare(rom_image(data), None, PatchRegistry::builtin());

    assert_rom_bytes(game.rom.bytes(), INNSMOUTH_SITE, &[0xF0, 0x85]);
}

#[test]
fn test_game_id_override_selects_patches() {
    let mut data = rom_bytes(0x40000, "TELEROBOXER", b"XXXXXX");
    poke(&mut data, TELEROBOXER_SITE, &[0x61, 0x45]);
    let id: GameIdentity = "01VTBJ".parse().unwrap();

    let game = prepare(rom_image(data), Some(id), PatchRegistry::builtin());

    assert_eq!(game.rom.identity(), id);
    assert_rom_bytes(game.rom.bytes(), TELEROBOXER_SITE, &[0x00, 0x00]);
}

#[test]
fn test_patch_beyond_small_image_skipped() {
    // Wario Land's patch site lies past the end of a 1 MiB image
    let before = rom_bytes(0x10_0000, "VB WARIO LAND", b"01VWCJ");
    let game = prepare(rom_image(before.clone()), None, PatchRegistry::builtin());

    assert_eq!(game.rom.bytes(), before.as_slice());
    assert_eq!(game.report.results[0].outcome, PatchOutcome::OutOfRange);
}

#[test]
fn test_config_file_drives_load() -> Result<()> {
    let rom = rom_file(&teleroboxer());
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("vbrx.toml");
    std::fs::write(
        &config_path,
        format!(
            "fast_forward = true\ndisplay_mode = \"3d\"\nrom_name = {:?}\n",
            rom.path().display().to_string()
        ),
    )?;

    let config = RuntimeConfig::load_or_init(&config_path)?;
    assert!(config.fast_forward);
    assert!(config.display_mode.is_stereo());

    let game = load_game(&config, PatchRegistry::builtin())?;
    assert_eq!(game.report.applied(), 1);
    Ok(())
}

#[test]
fn test_missing_rom_file() {
    let err = load_rom_file("/nonexistent/teleroboxer.vb", None, PatchRegistry::builtin())
        .unwrap_err();
    assert!(matches!(err, EmulatorError::RomNotFound(_)));
}

#[test]
fn test_headless_run_end_to_end() -> Result<()> {
    let game = prepare(rom_image(teleroboxer()), None, PatchRegistry::builtin());
    let core = HeadlessCore::new(game.rom);

    let summary = Supervisor::new(fast_config(), headless_session(core), headless_host(50)).run()?;

    assert_eq!(summary.exit, ExitReason::Quit);
    assert_eq!(summary.frames, 50);
    assert_eq!(summary.rendered, 50);
    Ok(())
}

#[test]
fn test_headless_fault_end_to_end() -> Result<()> {
    let game = prepare(rom_image(teleroboxer()), None, PatchRegistry::builtin());
    let fault = CoreFault::new(-3, 0x0702_E9DC);
    let core = HeadlessCore::new(game.rom).with_fault_after(10, fault);

    let summary = Supervisor::new(fast_config(), headless_session(core), headless_host(50)).run()?;

    assert_eq!(summary.exit, ExitReason::Fault(fault));
    assert_eq!(summary.frames, 10);
    Ok(())
}
