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

//! Core fault handling tests

use super::mocks::*;
use super::super::*;
use std::time::Duration;

fn script_with_fault(fault: CoreFault) -> Vec<StepScript> {
    let mut script = steps_of(1, 2);
    script.push(StepScript::Fault(fault));
    script.extend(steps_of(1, 5));
    script
}

#[test]
fn test_fault_stops_stepping() {
    let fault = CoreFault::new(7, 0x0700_0123);
    let harness = Harness::new();
    let summary = harness.run_idle(script_with_fault(fault), 10);

    assert_eq!(summary.exit, ExitReason::Fault(fault));
    assert_eq!(harness.steps.get(), 3);
    assert_eq!(summary.frames, 2);
}

#[test]
fn test_fault_report_written_before_ack() {
    let fault = CoreFault::new(7, 0x0700_0123);
    let harness = Harness::new();
    harness.run_idle(script_with_fault(fault), 10);

    let prints = harness.prints.borrow();
    assert_eq!(prints[0], "[DRC]: error #7 @ PC=0x07000123");
    assert_eq!(prints[1], "Dumping debug info...");
    assert!(prints.iter().any(|l| l.contains("r1=00000000")));
    assert!(prints.iter().any(|l| l == "DRC cache: 50.00%"));
    assert_eq!(prints.last().unwrap(), "Press any key to exit");
}

#[test]
fn test_fault_waits_for_ack_then_releases() {
    let harness = Harness::new();
    harness.run_idle(script_with_fault(CoreFault::new(1, 0)), 10);

    let events = harness.events();
    let ack = events.iter().position(|e| e == "ack").unwrap();
    let last_step = events.iter().rposition(|e| e == "step").unwrap();
    let first_shutdown = events.iter().position(|e| e.starts_with("shutdown")).unwrap();

    assert!(last_step < ack);
    assert!(ack < first_shutdown);
    assert_eq!(harness.shutdowns(), RELEASE_ORDER);
}

#[test]
fn test_fault_iteration_not_paced() {
    let harness = Harness::new();
    harness.run_idle(vec![StepScript::Fault(CoreFault::new(2, 0))], 5);

    assert!(harness.sleeps.borrow().is_empty());
    assert_eq!(harness.now.get(), Duration::ZERO);
}

#[test]
fn test_fault_on_first_step() {
    let harness = Harness::new();
    let fault = CoreFault::new(9, 0xFFFF_FFF0);
    let summary = harness.run_idle(vec![StepScript::Fault(fault)], 5);

    assert_eq!(summary.exit, ExitReason::Fault(fault));
    assert_eq!(summary.frames, 0);
    assert_eq!(harness.renders.get(), 0);
}

#[test]
fn test_fault_with_broken_debug_surface_still_exits() {
    let mut harness = Harness::new();
    harness.failing_surface = true;
    let summary = harness.run_idle(script_with_fault(CoreFault::new(3, 0)), 10);

    assert!(matches!(summary.exit, ExitReason::Fault(_)));
    assert!(harness.prints.borrow().is_empty());
    assert_eq!(harness.shutdowns(), RELEASE_ORDER);
}
