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

//! Debug surfaces

use crate::supervisor::DebugSurface;
use std::io::{self, Write};

/// ANSI: clear to the top of the screen and home the cursor
const CLEAR_STATUS: &str = "\x1b[1J\x1b[0;0H";

/// Debug surface backed by a terminal (or any writer)
///
/// Status blocks redraw in place at the top of the screen; diagnostic lines
/// are appended.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<io::Stdout> {
    /// Surface writing to standard output
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Surface writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the surface and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DebugSurface for TerminalSurface<W> {
    fn status(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}{}", CLEAR_STATUS, text)?;
        self.out.flush()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

/// Debug surface that discards everything
#[derive(Debug, Default)]
pub struct NullSurface;

impl DebugSurface for NullSurface {
    fn status(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn print(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}
