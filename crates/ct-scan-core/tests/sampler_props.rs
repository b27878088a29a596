// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use proptest::prelude::*;

use ct_dry_tests::ObjectModelBuilder;
use ct_scan_core::{
    average_attenuation, sample_attenuation, tick, ObjectKind, ScanEvent, SimulationContext,
    TickInput,
};

fn scene() -> impl Strategy<Value = ct_scan_core::ObjectModel> {
    let coord = -2.5f64..2.5;
    let scale = 0.3f64..3.0;
    (coord.clone(), coord.clone(), scale.clone(), coord.clone(), coord, scale).prop_map(
        |(cx, cz, cs, bx, bz, bs)| {
            ObjectModelBuilder::new()
                .at(ObjectKind::Cylinder, cx, cz)
                .scale(ObjectKind::Cylinder, cs)
                .at(ObjectKind::Block, bx, bz)
                .scale(ObjectKind::Block, bs)
                .build()
        },
    )
}

proptest! {
    #[test]
    fn attenuation_stays_in_unit_range(
        angle in 0.0f64..360.0,
        pos in 0.0f64..=1.0,
        density in 0i32..=10,
        model in scene(),
    ) {
        let a = sample_attenuation(angle, pos, &model.shapes(), density);
        prop_assert!((0.0..=1.0).contains(&a), "attenuation {a}");
        let avg = average_attenuation(angle, &model.shapes(), density);
        prop_assert!((0.0..=1.0).contains(&avg), "average {avg}");
    }

    #[test]
    fn zero_density_is_transparent(
        angle in 0.0f64..360.0,
        pos in 0.0f64..=1.0,
        model in scene(),
    ) {
        prop_assert_eq!(sample_attenuation(angle, pos, &model.shapes(), 0), 0.0);
    }

    #[test]
    fn sampler_is_deterministic(
        angle in 0.0f64..360.0,
        pos in 0.0f64..=1.0,
        model in scene(),
    ) {
        let shapes = model.shapes();
        prop_assert_eq!(
            sample_attenuation(angle, pos, &shapes, 5),
            sample_attenuation(angle, pos, &shapes, 5)
        );
    }

    #[test]
    fn angle_is_monotonic_until_wrap(
        dts in prop::collection::vec(0.0f64..0.2, 1..200),
        speed in 1u32..=20,
    ) {
        let objects = ct_scan_core::ObjectModel::default();
        let mut ctx = SimulationContext::new();
        ctx.start_scan();
        let mut prev = 0.0;
        for dt in dts {
            let events = tick(&mut ctx, &objects, TickInput { dt_sec: dt, scan_speed: speed, density: 5 });
            if events.contains(&ScanEvent::ScanCompleted) || !ctx.state().is_scanning {
                break;
            }
            let angle = ctx.state().current_angle_deg;
            prop_assert!(angle >= prev);
            prop_assert!(angle < 360.0);
            let expected = angle / 360.0 * 100.0;
            prop_assert!((ctx.state().scan_progress_pct - expected).abs() < 1e-9);
            prev = angle;
        }
    }
}
