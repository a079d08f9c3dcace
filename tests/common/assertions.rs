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

//! Custom assertions for ROM patch testing

/// Assert ROM bytes at `address` equal `expected`
#[allow(dead_code)]
pub fn assert_rom_bytes(rom: &[u8], address: usize, expected: &[u8]) {
    let actual = &rom[address..address + expected.len()];
    assert_eq!(
        actual, expected,
        "ROM at 0x{:06X} mismatch: expected {:02X?}, got {:02X?}",
        address, expected, actual
    );
}

/// Assert two images differ only inside `range`
#[allow(dead_code)]
pub fn assert_only_changed(before: &[u8], after: &[u8], range: std::ops::Range<usize>) {
    assert_eq!(before.len(), after.len(), "ROM size changed");
    for (i, (a, b)) in before.iter().zip(after).enumerate() {
        if !range.contains(&i) {
            assert_eq!(a, b, "Unexpected change at 0x{:06X}: {:02X} -> {:02X}", i, a, b);
        }
    }
}
