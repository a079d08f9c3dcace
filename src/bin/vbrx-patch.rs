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

//! ROM patch tool
//!
//! Applies the shipped patch table to a ROM file and reports what happened
//! to each entry.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use vbrx::core::error::{EmulatorError, Result};
use vbrx::core::loader::load_rom_file;
use vbrx::core::patches::{PatchOutcome, PatchRegistry};
use vbrx::core::rom::GameIdentity;

/// Virtual Boy ROM patcher
#[derive(Parser)]
#[command(name = "vbrx-patch")]
#[command(about = "Apply known compatibility patches to a Virtual Boy ROM", long_about = None)]
struct Args {
    /// Path to ROM file (.vb)
    #[arg(required_unless_present = "list")]
    rom: Option<PathBuf>,

    /// Write the patched image here
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Game ID used for patch lookup instead of the header's
    #[arg(short = 'g', long)]
    game_id: Option<GameIdentity>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// List every registered patch and exit
    #[arg(short = 'l', long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let registry = PatchRegistry::builtin();

    if args.list {
        let mut identities: Vec<_> = registry.identities().collect();
        identities.sort();
        for id in identities {
            for entry in registry.entries_for(id) {
                println!("{}  0x{:06X}  {} byte(s)", id, entry.address, entry.len());
            }
        }
        return Ok(());
    }

    let rom = args.rom.as_deref().ok_or(EmulatorError::NoRomSelected)?;
    let game = load_rom_file(rom, args.game_id, registry).inspect_err(|e| {
        error!("Failed to load ROM: {}", e);
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.report)?);
    } else {
        println!("{} [{}] v{}", game.header.title, game.report.identity, game.header.version);
        if game.report.results.is_empty() {
            println!("  no patches registered");
        }
        for result in &game.report.results {
            let outcome = match result.outcome {
                PatchOutcome::Applied => "applied",
                PatchOutcome::AlreadyPatched => "already patched",
                PatchOutcome::Mismatch => "skipped (bytes differ)",
                PatchOutcome::OutOfRange => "skipped (outside image)",
            };
            println!("  0x{:06X} ({} bytes): {}", result.address, result.len, outcome);
        }
    }

    if let Some(output) = &args.output {
        std::fs::write(output, game.rom.bytes())?;
        info!("Wrote {}", output.display());
    }

    Ok(())
}
