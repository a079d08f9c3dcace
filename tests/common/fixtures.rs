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

//! Test fixtures for common test scenarios

use std::io::Write;
use tempfile::{Builder, NamedTempFile};
use vbrx::core::config::RuntimeConfig;
use vbrx::core::rom::RomImage;
use vbrx::frontend::{
    AutoResumeMenu, FrameLimitInput, HeadlessCore, HeadlessDisplay, NullAudio, NullSurface,
};
use vbrx::supervisor::{
    AudioOutput, Display, EmulationCore, Host, Session, SessionBuilder, SystemClock,
};

/// Build a zero-filled ROM image of `size` bytes with `id` in the header
#[allow(dead_code)]
pub fn rom_bytes(size: usize, title: &str, id: &[u8; 6]) -> Vec<u8> {
    let mut data = vec![0u8; size];
    let title_start = size - 0x220;
    let title = title.as_bytes();
    data[title_start..title_start + title.len()].copy_from_slice(title);
    let id_start = size - 0x207;
    data[id_start..id_start + 6].copy_from_slice(id);
    data
}

/// Write `bytes` at `address` of a ROM buffer
#[allow(dead_code)]
pub fn poke(data: &mut [u8], address: usize, bytes: &[u8]) {
    data[address..address + bytes.len()].copy_from_slice(bytes);
}

/// Wrap ROM bytes in a validated image
#[allow(dead_code)]
pub fn rom_image(data: Vec<u8>) -> RomImage {
    RomImage::from_bytes(data).expect("fixture ROM should be valid")
}

/// Write ROM bytes to a temporary `.vb` file
#[allow(dead_code)]
pub fn rom_file(data: &[u8]) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(".vb")
        .tempfile()
        .expect("Failed to create temp ROM");
    file.write_all(data).expect("Failed to write temp ROM");
    file
}

/// Session over the headless host with the given core
#[allow(dead_code)]
pub fn headless_session(core: HeadlessCore) -> Session {
    let display: Box<dyn Display> = Box::new(HeadlessDisplay::new());
    let audio: Box<dyn AudioOutput> = Box::new(NullAudio::new());
    let core: Box<dyn EmulationCore> = Box::new(core);
    SessionBuilder::new()
        .display(|| Ok(display))
        .and_then(|b| b.audio(|| Ok(audio)))
        .and_then(|b| b.core(|| Ok(core)))
        .and_then(SessionBuilder::build)
        .expect("headless session should build")
}

/// Headless host that quits after `frames` iterations
#[allow(dead_code)]
pub fn headless_host(frames: u64) -> Host {
    Host {
        input: Box::new(FrameLimitInput::new(Some(frames))),
        menu: Box::new(AutoResumeMenu),
        debug: Box::new(NullSurface),
        clock: Box::new(SystemClock::default()),
    }
}

/// Unpaced configuration for fast tests
#[allow(dead_code)]
pub fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        fast_forward: true,
        ..RuntimeConfig::default()
    }
}
