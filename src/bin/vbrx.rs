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

//! Headless Virtual Boy runner
//!
//! Loads and patches a ROM, then drives it through the supervisor with the
//! headless frontend. Telemetry goes to the terminal.

use clap::{Parser, ValueEnum};
use log::{error, info};
use std::path::PathBuf;
use vbrx::core::config::{DisplayMode, RuntimeConfig};
use vbrx::core::error::Result;
use vbrx::core::loader::load_game;
use vbrx::core::patches::PatchRegistry;
use vbrx::core::rom::GameIdentity;
use vbrx::frontend::{
    shutdown, AutoResumeMenu, FrameLimitInput, HeadlessCore, HeadlessDisplay, NullAudio,
    NullSurface, TerminalSurface,
};
use vbrx::supervisor::{
    AudioOutput, DebugSurface, Display, EmulationCore, ExitReason, Host, SessionBuilder,
    Supervisor, SystemClock,
};

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    #[value(name = "2d")]
    Mono,
    #[value(name = "3d")]
    Stereo,
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mono => DisplayMode::Mono,
            ModeArg::Stereo => DisplayMode::Stereo,
        }
    }
}

/// Virtual Boy emulator (headless)
#[derive(Parser)]
#[command(name = "vbrx")]
#[command(about = "Virtual Boy emulator runtime", long_about = None)]
struct Args {
    /// Path to ROM file (.vb); overrides the configured ROM
    rom: Option<PathBuf>,

    /// Options file (created with defaults if missing)
    #[arg(short = 'c', long, default_value = "vbrx.toml")]
    config: PathBuf,

    /// Run without frame pacing
    #[arg(short = 'f', long)]
    fast_forward: bool,

    /// Host display mode
    #[arg(short = 'm', long, value_enum)]
    display_mode: Option<ModeArg>,

    /// Show rendered count and skip threshold in telemetry
    #[arg(short = 'd', long)]
    debug: bool,

    /// Game ID used for patch lookup instead of the header's
    #[arg(short = 'g', long)]
    game_id: Option<GameIdentity>,

    /// Quit after this many frames (runs until Ctrl-C when omitted)
    #[arg(short = 'n', long)]
    frames: Option<u64>,

    /// Suppress the telemetry display
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Args {
    fn apply(&self, config: &mut RuntimeConfig) {
        if let Some(rom) = &self.rom {
            config.rom_name = Some(rom.clone());
        }
        if let Some(id) = self.game_id {
            config.game_id = Some(id);
        }
        if let Some(mode) = self.display_mode {
            config.display_mode = mode.into();
        }
        config.fast_forward |= self.fast_forward;
        config.debug |= self.debug;
    }
}

fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("vbrx v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = RuntimeConfig::load_or_init(&args.config)?;
    args.apply(&mut config);

    let game = load_game(&config, PatchRegistry::builtin()).inspect_err(|e| {
        error!("Failed to load ROM: {}", e);
    })?;

    let display: Box<dyn Display> = Box::new(HeadlessDisplay::new());
    let audio: Box<dyn AudioOutput> = Box::new(NullAudio::new());
    let core: Box<dyn EmulationCore> = Box::new(HeadlessCore::new(game.rom));
    let session = SessionBuilder::new()
        .display(|| Ok(display))?
        .audio(|| Ok(audio))?
        .core(|| Ok(core))?
        .build()?;

    let debug: Box<dyn DebugSurface> = if args.quiet {
        Box::new(NullSurface)
    } else {
        Box::new(TerminalSurface::stdout())
    };
    let host = Host {
        input: Box::new(FrameLimitInput::new(args.frames)),
        menu: Box::new(AutoResumeMenu),
        debug,
        clock: Box::new(SystemClock::default()),
    };

    shutdown::install();

    let summary = Supervisor::new(config, session, host).run()?;

    info!(
        "Session ended: {:?} after {} frames ({} rendered)",
        summary.exit, summary.frames, summary.rendered
    );
    if let ExitReason::Fault(fault) = summary.exit {
        error!("{}", fault);
        std::process::exit(1);
    }
    Ok(())
}
