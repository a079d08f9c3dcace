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

//! Virtual Boy cartridge ROM image
//!
//! A Virtual Boy ROM is mirrored across the 0x07000000-0x07FFFFFF region, so
//! the cartridge header always sits at the very end of the image:
//!
//! ```text
//! len-0x220: Game title (20 bytes, Shift-JIS)
//! len-0x20C: Reserved (5 bytes)
//! len-0x207: Maker code (2 bytes ASCII)
//! len-0x205: Game code (4 bytes ASCII)
//! len-0x201: Version
//! len-0x200: Interrupt vectors
//! len-0x010: Reset vector (0xFFFFFFF0)
//! ```
//!
//! The maker code followed by the game code forms the 6-byte
//! [`GameIdentity`] used to key ROM patches.
//!
//! # Example
//!
//! ```
//! use vbrx::core::rom::{GameIdentity, RomImage};
//!
//! let mut data = vec![0u8; 0x1000];
//! let id_offset = data.len() - 0x207;
//! data[id_offset..id_offset + 6].copy_from_slice(b"01VTBJ");
//!
//! let rom = RomImage::from_bytes(data).unwrap();
//! assert_eq!(rom.identity(), "01VTBJ".parse::<GameIdentity>().unwrap());
//! ```

use super::error::{EmulatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Size of the trailing cartridge header region
pub const HEADER_SIZE: usize = 0x220;

/// Offset of the game title, measured back from the end of the image
const TITLE_FROM_END: usize = HEADER_SIZE;
const TITLE_LEN: usize = 20;

/// Offset of the maker code, measured back from the end of the image
const IDENTITY_FROM_END: usize = 0x207;

/// Offset of the version byte, measured back from the end of the image
const VERSION_FROM_END: usize = 0x201;

/// Smallest accepted ROM image (1 KiB)
pub const MIN_ROM_SIZE: usize = 0x400;

/// Largest accepted ROM image (16 MiB, the size of the ROM address space)
pub const MAX_ROM_SIZE: usize = 0x0100_0000;

/// Game identity (maker code + game code)
///
/// Six bytes taken verbatim from the cartridge header. Comparison is exact
/// byte equality over all six bytes.
///
/// The text form (used by `Display`, `FromStr` and serde) writes printable
/// ASCII as-is and every other byte as `\xNN`, so headers with binary
/// identities still round-trip through config files and JSON reports.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameIdentity([u8; GameIdentity::LEN]);

impl GameIdentity {
    /// Length of an identity in bytes
    pub const LEN: usize = 6;

    /// Create an identity from raw header bytes
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Raw identity bytes
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Two-character maker code
    pub fn maker_code(&self) -> &[u8] {
        &self.0[..2]
    }

    /// Four-character game code
    pub fn game_code(&self) -> &[u8] {
        &self.0[2..]
    }
}

impl FromStr for GameIdentity {
    type Err = EmulatorError;

    /// Parse the text form written by `Display`
    ///
    /// Printable ASCII stands for itself; any other byte (and the backslash)
    /// is written `\xNN`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EmulatorError::InvalidGameId(s.to_string());
        let mut bytes = [0u8; Self::LEN];
        let mut len = 0;
        let mut rest = s.as_bytes();

        while let Some((&b, tail)) = rest.split_first() {
            let (byte, tail) = match b {
                b'\\' => {
                    let hex = tail
                        .get(..3)
                        .filter(|h| h[0] == b'x' && h[1..].iter().all(u8::is_ascii_hexdigit))
                        .and_then(|h| std::str::from_utf8(&h[1..]).ok())
                        .and_then(|h| u8::from_str_radix(h, 16).ok())
                        .ok_or_else(invalid)?;
                    (hex, &tail[3..])
                }
                b if b.is_ascii_graphic() => (b, tail),
                _ => return Err(invalid()),
            };
            *bytes.get_mut(len).ok_or_else(invalid)? = byte;
            len += 1;
            rest = tail;
        }

        if len != Self::LEN {
            return Err(invalid());
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for GameIdentity {
    type Error = EmulatorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<GameIdentity> for String {
    fn from(id: GameIdentity) -> Self {
        id.to_string()
    }
}

impl fmt::Display for GameIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() && b != b'\\' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for GameIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameIdentity(\"{}\")", self)
    }
}

/// Parsed cartridge header fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomHeader {
    /// Game title (lossily decoded, trailing padding removed)
    pub title: String,
    /// Maker code + game code
    pub identity: GameIdentity,
    /// ROM version byte
    pub version: u8,
}

/// Loaded cartridge image
///
/// Owns the ROM bytes for the session. Only the patch engine is handed
/// mutable access, via [`RomImage::bytes_mut`].
#[derive(Clone)]
pub struct RomImage {
    data: Vec<u8>,
}

impl RomImage {
    /// Wrap raw ROM bytes
    ///
    /// # Arguments
    ///
    /// * `data` - Complete cartridge image
    ///
    /// # Returns
    ///
    /// - `Ok(RomImage)` if the size is a power of two within the ROM address space
    /// - `Err(EmulatorError::InvalidRomSize)` otherwise
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        if !len.is_power_of_two() || !(MIN_ROM_SIZE..=MAX_ROM_SIZE).contains(&len) {
            return Err(EmulatorError::InvalidRomSize {
                got: len,
                min: MIN_ROM_SIZE,
                max: MAX_ROM_SIZE,
            });
        }
        Ok(Self { data })
    }

    /// Read a ROM image from disk
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vbrx::core::rom::RomImage;
    ///
    /// let rom = RomImage::load("wario.vb").unwrap();
    /// println!("{}", rom.header().title);
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EmulatorError::RomNotFound(path.display().to_string()),
            _ => EmulatorError::Io(e),
        })?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(data)
    }

    /// Image size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a validated image
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the image
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the image, for the patch engine
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Game identity stored in the header
    pub fn identity(&self) -> GameIdentity {
        let start = self.data.len() - IDENTITY_FROM_END;
        let mut id = [0u8; GameIdentity::LEN];
        id.copy_from_slice(&self.data[start..start + GameIdentity::LEN]);
        GameIdentity(id)
    }

    /// Parse the cartridge header
    pub fn header(&self) -> RomHeader {
        let start = self.data.len() - TITLE_FROM_END;
        let raw_title = &self.data[start..start + TITLE_LEN];
        let title = String::from_utf8_lossy(raw_title)
            .trim_end_matches(['\0', ' '])
            .to_string();

        RomHeader {
            title,
            identity: self.identity(),
            version: self.data[self.data.len() - VERSION_FROM_END],
        }
    }

    /// Consume the image and return its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Debug for RomImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RomImage")
            .field("len", &self.data.len())
            .field("identity", &self.identity())
            .finish()
    }
}
