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

//! ROM patch engine
//!
//! Some games depend on timing the emulator does not reproduce exactly
//! (VRAM copies spanning frames, busy-wait loops that defeat idle detection).
//! Rather than special-casing those games in the core, a small set of byte
//! patches rewrites the offending instructions once at load time.
//!
//! # Application rule
//!
//! An entry is applied to a ROM if and only if:
//! 1. the ROM's [`GameIdentity`] equals the entry's identity, and
//! 2. the bytes at the entry's address equal the entry's original bytes.
//!
//! After application the bytes equal the patched bytes, so running the
//! engine again is a no-op. A mismatch is never an error.
//!
//! # Example
//!
//! ```
//! use vbrx::core::patches::{PatchEntry, PatchRegistry};
//! use vbrx::core::rom::{GameIdentity, RomImage};
//!
//! let entry = PatchEntry::new(b"AAAAAA", 0x100, &[0x21, 0x40], &[0x23, 0x40]);
//! let registry = PatchRegistry::from_entries([entry]);
//!
//! let mut data = vec![0u8; 0x1000];
//! data[0x100..0x102].copy_from_slice(&[0x21, 0x40]);
//! let mut rom = RomImage::from_bytes(data).unwrap();
//!
//! let id: GameIdentity = "AAAAAA".parse().unwrap();
//! registry.apply(&mut rom, &id);
//! assert_eq!(&rom.bytes()[0x100..0x102], &[0x23, 0x40]);
//! ```

mod known;

pub use known::KNOWN_PATCHES;

use super::rom::{GameIdentity, RomImage};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

/// A single corrective byte patch scoped to one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchEntry {
    /// Game the patch belongs to
    pub identity: GameIdentity,
    /// Offset into the ROM image
    pub address: u32,
    /// Bytes expected at `address` before patching
    pub original: Cow<'static, [u8]>,
    /// Replacement bytes
    pub patched: Cow<'static, [u8]>,
}

/// Result of checking one entry against a ROM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    /// Original bytes matched and were replaced
    Applied,
    /// Patched bytes were already present
    AlreadyPatched,
    /// Neither original nor patched bytes found (different revision)
    Mismatch,
    /// Entry range lies outside the image
    OutOfRange,
}

impl PatchEntry {
    /// Build a patch from static byte sequences
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a const context) if `original`
    /// and `patched` differ in length.
    pub const fn new(
        identity: &[u8; GameIdentity::LEN],
        address: u32,
        original: &'static [u8],
        patched: &'static [u8],
    ) -> Self {
        assert!(
            original.len() == patched.len(),
            "original and patched bytes must have the same length"
        );
        Self {
            identity: GameIdentity::new(*identity),
            address,
            original: Cow::Borrowed(original),
            patched: Cow::Borrowed(patched),
        }
    }

    /// Build a patch from owned byte sequences
    ///
    /// Returns `None` if the sequences differ in length or are empty.
    pub fn owned(
        identity: GameIdentity,
        address: u32,
        original: Vec<u8>,
        patched: Vec<u8>,
    ) -> Option<Self> {
        if original.len() != patched.len() || original.is_empty() {
            return None;
        }
        Some(Self {
            identity,
            address,
            original: Cow::Owned(original),
            patched: Cow::Owned(patched),
        })
    }

    /// Number of bytes the patch covers
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// True for a zero-length patch
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// ROM byte range covered by the patch
    pub fn range(&self) -> Range<usize> {
        let start = self.address as usize;
        start..start + self.len()
    }

    /// True if both patches cover at least one common byte
    pub fn overlaps(&self, other: &PatchEntry) -> bool {
        let (a, b) = (self.range(), other.range());
        a.start < b.end && b.start < a.end
    }

    /// Apply this entry to raw ROM bytes, ignoring identity
    ///
    /// Writes only when the current bytes equal the original sequence.
    pub fn apply_to(&self, rom: &mut [u8]) -> PatchOutcome {
        let Some(target) = rom.get_mut(self.range()) else {
            return PatchOutcome::OutOfRange;
        };

        if *target == *self.original {
            target.copy_from_slice(&self.patched);
            PatchOutcome::Applied
        } else if *target == *self.patched {
            PatchOutcome::AlreadyPatched
        } else {
            PatchOutcome::Mismatch
        }
    }
}

/// Per-entry result within a [`PatchReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchResult {
    /// Entry address
    pub address: u32,
    /// Entry length in bytes
    pub len: usize,
    /// What happened
    pub outcome: PatchOutcome,
}

/// Summary of one patch pass over a ROM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// Identity the registry was queried with
    pub identity: GameIdentity,
    /// Results for every entry registered under `identity`
    pub results: Vec<PatchResult>,
}

impl PatchReport {
    /// Number of entries written during this pass
    pub fn applied(&self) -> usize {
        self.count(PatchOutcome::Applied)
    }

    /// Number of entries found already in place
    pub fn already_patched(&self) -> usize {
        self.count(PatchOutcome::AlreadyPatched)
    }

    /// Number of entries whose guard did not match
    pub fn skipped(&self) -> usize {
        self.results.len() - self.applied() - self.already_patched()
    }

    fn count(&self, outcome: PatchOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// Patch entries indexed by game identity
///
/// Lookup hashes the identity once, so games without patches pay
/// nothing beyond that.
#[derive(Debug, Clone, Default)]
pub struct PatchRegistry {
    by_identity: HashMap<GameIdentity, Vec<PatchEntry>>,
}

impl PatchRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a set of entries
    pub fn from_entries<I: IntoIterator<Item = PatchEntry>>(entries: I) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.insert(entry);
        }
        registry
    }

    /// Registry containing every shipped patch
    pub fn builtin() -> &'static PatchRegistry {
        static BUILTIN: OnceLock<PatchRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::from_entries(KNOWN_PATCHES.iter().cloned()))
    }

    /// Register an entry
    pub fn insert(&mut self, entry: PatchEntry) {
        self.by_identity
            .entry(entry.identity)
            .or_default()
            .push(entry);
    }

    /// Entries registered for a game
    pub fn entries_for(&self, identity: &GameIdentity) -> &[PatchEntry] {
        self.by_identity
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.by_identity.values().map(Vec::len).sum()
    }

    /// True if no entries are registered
    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    /// Identities that have at least one entry
    pub fn identities(&self) -> impl Iterator<Item = &GameIdentity> {
        self.by_identity.keys()
    }

    /// Apply every entry registered for `identity` to `rom`
    ///
    /// Never fails. Entries whose guard does not match leave the ROM untouched.
    pub fn apply(&self, rom: &mut RomImage, identity: &GameIdentity) {
        self.apply_with_report(rom, identity);
    }

    /// Apply entries and report the outcome of each
    pub fn apply_with_report(&self, rom: &mut RomImage, identity: &GameIdentity) -> PatchReport {
        let bytes = rom.bytes_mut();
        let results = self
            .entries_for(identity)
            .iter()
            .map(|entry| {
                let outcome = entry.apply_to(bytes);
                match outcome {
                    PatchOutcome::Applied => log::debug!(
                        "Patched {} at 0x{:06X} ({} bytes)",
                        identity,
                        entry.address,
                        entry.len()
                    ),
                    _ => log::trace!(
                        "Patch for {} at 0x{:06X}: {:?}",
                        identity,
                        entry.address,
                        outcome
                    ),
                }
                PatchResult {
                    address: entry.address,
                    len: entry.len(),
                    outcome,
                }
            })
            .collect();

        PatchReport {
            identity: *identity,
            results,
        }
    }
}

/// Apply the shipped patches for `identity` to `rom`
///
/// Convenience wrapper over [`PatchRegistry::builtin`].
pub fn apply_patches(rom: &mut RomImage, identity: &GameIdentity) {
    PatchRegistry::builtin().apply(rom, identity);
}

#[cfg(test)]
mod tests;
