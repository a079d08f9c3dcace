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

//! Resource acquisition and teardown tests

use super::mocks::*;
use super::super::*;
use crate::core::config::DisplayMode;
use crate::core::error::EmulatorError;

#[test]
fn test_quit_releases_in_reverse_order() {
    let harness = Harness::new();
    harness.run_idle(steps_of(1, 3), 3);
    assert_eq!(harness.shutdowns(), RELEASE_ORDER);
}

#[test]
fn test_menu_exit_releases_once() {
    let harness = Harness::new();
    harness
        .supervisor(
            RuntimeConfig::default(),
            Vec::new(),
            vec![Keys::MENU],
            vec![MenuAction::Exit],
        )
        .run()
        .unwrap();
    assert_eq!(harness.shutdowns(), RELEASE_ORDER);
}

#[test]
fn test_fault_releases_once() {
    let harness = Harness::new();
    harness.run_idle(vec![StepScript::Fault(CoreFault::new(4, 0))], 2);
    assert_eq!(harness.shutdowns(), RELEASE_ORDER);
}

#[test]
fn test_core_reset_on_acquire() {
    let harness = Harness::new();
    let _session = harness.session(Vec::new());

    let events = harness.events();
    assert_eq!(events, vec!["reset core".to_string()]);
}

#[test]
fn test_failed_core_acquisition_releases_audio_and_display() {
    let harness = Harness::new();
    let err = SessionBuilder::new()
        .display(|| Ok(harness.display()))
        .and_then(|b| b.audio(|| Ok(harness.audio())))
        .and_then(|b| {
            b.core(|| {
                Err(EmulatorError::SubsystemInit {
                    subsystem: "core",
                    reason: "no recompiler cache".to_string(),
                })
            })
        })
        .err()
        .unwrap();

    assert!(matches!(err, EmulatorError::SubsystemInit { subsystem: "core", .. }));
    assert_eq!(harness.shutdowns(), vec!["shutdown audio", "shutdown display"]);
}

#[test]
fn test_failed_audio_acquisition_releases_display() {
    let harness = Harness::new();
    let result = SessionBuilder::new()
        .display(|| Ok(harness.display()))
        .and_then(|b| {
            b.audio(|| {
                Err(EmulatorError::SubsystemInit {
                    subsystem: "audio",
                    reason: "device busy".to_string(),
                })
            })
        });

    assert!(result.is_err());
    assert_eq!(harness.shutdowns(), vec!["shutdown display"]);
}

#[test]
fn test_out_of_order_acquisition_rejected() {
    let harness = Harness::new();
    let err = SessionBuilder::new()
        .audio(|| Ok(harness.audio()))
        .err()
        .unwrap();

    assert!(matches!(err, EmulatorError::IncompleteSession("display")));
    // The opener never ran, so nothing was acquired
    assert!(harness.shutdowns().is_empty());
}

#[test]
fn test_incomplete_build_releases_acquired() {
    let harness = Harness::new();
    let err = SessionBuilder::new()
        .display(|| Ok(harness.display()))
        .and_then(|b| b.audio(|| Ok(harness.audio())))
        .and_then(SessionBuilder::build)
        .err()
        .unwrap();

    assert!(matches!(err, EmulatorError::IncompleteSession("core")));
    assert_eq!(harness.shutdowns(), vec!["shutdown audio", "shutdown display"]);
}

#[test]
fn test_dropped_supervisor_releases_once() {
    let harness = Harness::new();
    let supervisor = harness.supervisor(RuntimeConfig::default(), Vec::new(), idle(1), Vec::new());
    drop(supervisor);
    assert_eq!(harness.shutdowns(), RELEASE_ORDER);
}

#[test]
fn test_explicit_release_is_idempotent() {
    let harness = Harness::new();
    let mut session = harness.session(Vec::new());
    session.release();
    session.release();
    assert!(session.is_released());
    drop(session);
    assert_eq!(harness.shutdowns(), RELEASE_ORDER);
}

#[test]
fn test_display_mode_applied_at_start() {
    let harness = Harness::new();
    let config = RuntimeConfig {
        display_mode: DisplayMode::Stereo,
        ..RuntimeConfig::default()
    };
    let _supervisor = harness.supervisor(config, Vec::new(), idle(0), Vec::new());
    assert_eq!(harness.stereo.get(), Some(true));

    let harness = Harness::new();
    let _supervisor = harness.supervisor(RuntimeConfig::default(), Vec::new(), idle(0), Vec::new());
    assert_eq!(harness.stereo.get(), Some(false));
}
