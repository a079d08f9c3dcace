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

//! Virtual Boy emulator runtime
//!
//! This library provides the load-time ROM patch engine and the execution
//! supervisor that drives an emulation core, together with a headless
//! frontend for running sessions without a platform UI.
//!
//! # Example
//!
//! ```
//! use vbrx::core::patches::PatchRegistry;
//! use vbrx::core::rom::GameIdentity;
//!
//! let registry = PatchRegistry::builtin();
//! let wario: GameIdentity = "01VWCJ".parse().unwrap();
//! assert_eq!(registry.entries_for(&wario).len(), 1);
//! ```

pub mod core;
pub mod frontend;
pub mod supervisor;
