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

//! Shipped patch table
//!
//! Instruction encodings are V810 halfwords in little-endian byte order.

use super::PatchEntry;

/// `mov 1,r1`
const MOV_1_R1: &[u8] = &[0x21, 0x40];
/// `mov 3,r1`
const MOV_3_R1: &[u8] = &[0x23, 0x40];
/// `be -0xbc`
const BE_MINUS_BC: &[u8] = &[0x44, 0x85];
/// `be -0x10`
const BE_MINUS_10: &[u8] = &[0xF0, 0x85];
/// `add 1,r11`
const ADD_1_R11: &[u8] = &[0x61, 0x45];
/// `mov r0,r0`
const NOP: &[u8] = &[0x00, 0x00];

/// Every patch shipped with the emulator
pub static KNOWN_PATCHES: &[PatchEntry] = &[
    // Jack Bros. expects a level transition to end exactly when a large VRAM
    // copy finishes. Our copies complete within one frame, so the next
    // transition flashes for a frame. Lengthen the wait by two frames.
    PatchEntry::new(b"EBVJBE", 0x13714, MOV_1_R1, MOV_3_R1),
    PatchEntry::new(b"EBVJBJ", 0x136E2, MOV_1_R1, MOV_3_R1),
    // Innsmouth no Yakata: most of the busy-wait loop body can be skipped.
    PatchEntry::new(b"8FVIMJ", 0x19040, BE_MINUS_BC, BE_MINUS_10),
    PatchEntry::new(b"8FVIME", 0x19040, BE_MINUS_BC, BE_MINUS_10),
    // Teleroboxer bumps an otherwise unused counter while busy-waiting,
    // which hides the loop from idle detection.
    PatchEntry::new(b"01VTBJ", 0x2E9DC, ADD_1_R11, NOP),
    // Virtual Boy Wario Land, same counter.
    PatchEntry::new(b"01VWCJ", 0x1C2CDA, ADD_1_R11, NOP),
];
