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

//! Patch engine tests
//!
//! Tests are grouped by concern: single-entry application, registry lookup
//! and the shipped table, and randomized properties.


use super::*;

/// Build a 4 KiB ROM with the given identity in its header
pub(super) fn rom_with_identity(id: &[u8; 6]) -> RomImage {
    rom_sized_with_identity(0x1000, id)
}

/// Build a ROM of `size` bytes with the given identity in its header
pub(super) fn rom_sized_with_identity(size: usize, id: &[u8; 6]) -> RomImage {
    let mut data = vec![0u8; size];
    let start = size - 0x207;
    data[start..start + 6].copy_from_slice(id);
    RomImage::from_bytes(data).unwrap()
}

/// The example entry used throughout the tests
pub(super) fn example_entry() -> PatchEntry {
    PatchEntry::new(b"AAAAAA", 0x100, &[0x21, 0x40], &[0x23, 0x40])
}
