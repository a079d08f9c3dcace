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

//! Headless frontend
//!
//! Host implementations for running a session without a platform UI: a
//! display that only counts presented frames, silent audio, an input source
//! that quits after a frame limit or on SIGINT/SIGTERM, and a debug surface
//! writing to a terminal.
//!
//! [`HeadlessCore`] stands in for the recompiling core. It owns the patched
//! ROM and models the VIP registers the supervisor reads, but executes no
//! V810 instructions.

mod console;
mod headless;
pub mod shutdown;

pub use console::{NullSurface, TerminalSurface};
pub use headless::{
    AutoResumeMenu, FrameLimitInput, HeadlessCore, HeadlessDisplay, NullAudio, RESET_VECTOR,
};
