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

//! Termination signal handling
//!
//! Signal handlers only set a flag; the input source picks it up on its
//! next poll and turns it into a quit request.

use std::sync::atomic::{AtomicBool, Ordering};

static QUIT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// True once a termination signal has arrived
pub fn should_quit() -> bool {
    QUIT_REQUESTED.load(Ordering::SeqCst)
}

/// Ask the running session to quit
pub fn request_quit() {
    QUIT_REQUESTED.store(true, Ordering::SeqCst);
}

/// Route SIGINT and SIGTERM to [`request_quit`]
#[cfg(unix)]
pub fn install() {
    use std::os::raw::c_int;
    const SIGINT: c_int = 2;
    const SIGTERM: c_int = 15;

    extern "C" fn handler(_sig: c_int) {
        request_quit();
    }

    unsafe extern "C" {
        fn signal(sig: c_int, handler: extern "C" fn(c_int)) -> usize;
    }

    // SAFETY: the handler only stores to an atomic
    unsafe {
        let _ = signal(SIGINT, handler);
        let _ = signal(SIGTERM, handler);
    }
}

/// No signal routing on this platform; the frame limit still ends the run
#[cfg(not(unix))]
pub fn install() {}
