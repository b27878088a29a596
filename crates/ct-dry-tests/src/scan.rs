// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scan drivers for integration tests.

use ct_scan_core::{tick, ObjectModel, ScanEvent, SimulationContext, TickInput};

/// Frame length that advances the gantry exactly 1° at scan speed 1.
pub const ONE_DEGREE_DT: f64 = 0.1;

/// Ticks a started scan until it stops or `max_ticks` is reached, collecting
/// every event.
pub fn run_until_stopped(
    ctx: &mut SimulationContext,
    objects: &ObjectModel,
    input: TickInput,
    max_ticks: usize,
) -> Vec<ScanEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        if !ctx.state().is_scanning {
            break;
        }
        events.extend(tick(ctx, objects, input));
    }
    events
}

/// Starts a fresh scan and runs it at 1° per tick (360 ticks).
pub fn run_fine_scan(objects: &ObjectModel, density: i32) -> (SimulationContext, Vec<ScanEvent>) {
    let mut ctx = SimulationContext::new();
    let mut events = ctx.start_scan();
    let input = TickInput {
        dt_sec: ONE_DEGREE_DT,
        scan_speed: 1,
        density,
    };
    events.extend(run_until_stopped(&mut ctx, objects, input, 400));
    (ctx, events)
}
