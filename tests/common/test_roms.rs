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

//! Real ROM discovery for ignored tests

/// Get ROM path from environment or default location
#[allow(dead_code)]
pub fn get_rom_path() -> Option<String> {
    std::env::var("VBRX_ROM_PATH").ok().or_else(|| {
        let default_path = "test.vb";
        if std::path::Path::new(default_path).exists() {
            Some(default_path.to_string())
        } else {
            None
        }
    })
}

/// Check if a ROM is available for testing
#[allow(dead_code)]
pub fn is_rom_available() -> bool {
    get_rom_path().is_some()
}
