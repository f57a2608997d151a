use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use clicktech_core::types::Aabb;

use crate::controller::{
    clamp_to_field, evaluate, idle_step, select_target, wants_to_fire, PursuitContext,
};
use crate::profiles::PursuitProfile;

/// Unit triangle bounds at the bottom of the defense scene, centered on `x`.
fn unit_at(x: f32) -> Aabb {
    Aabb::new(x - 16.0, 410.0, x + 16.0, 440.0)
}

fn hazard_at(x: f32, bottom: f32) -> Aabb {
    Aabb::new(x - 15.0, bottom - 30.0, x + 15.0, bottom)
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

#[test]
fn test_hazard_above_dead_zone_holds() {
    let hazards = [hazard_at(305.0, 200.0)];
    let ctx = PursuitContext {
        unit: unit_at(300.0),
        held_step: 5.0,
        hazards: &hazards,
    };
    let update = evaluate(&ctx, &PursuitProfile::default(), &mut rng());
    assert_eq!(update.step, 0.0);
    assert_eq!(update.target.map(|t| t.center_x), Some(305.0));
}

#[test]
fn test_hazard_left_moves_left() {
    let hazards = [hazard_at(100.0, 200.0)];
    let ctx = PursuitContext {
        unit: unit_at(300.0),
        held_step: 0.0,
        hazards: &hazards,
    };
    let update = evaluate(&ctx, &PursuitProfile::default(), &mut rng());
    assert!(update.step < 0.0);
}

#[test]
fn test_hazard_right_moves_right() {
    let hazards = [hazard_at(500.0, 200.0)];
    let ctx = PursuitContext {
        unit: unit_at(300.0),
        held_step: 0.0,
        hazards: &hazards,
    };
    let update = evaluate(&ctx, &PursuitProfile::default(), &mut rng());
    assert!(update.step > 0.0);
}

#[test]
fn test_nearest_overhead_hazard_wins() {
    let unit = unit_at(300.0);
    let hazards = [
        hazard_at(100.0, 100.0),
        hazard_at(500.0, 380.0),
        hazard_at(50.0, 300.0),
    ];
    let target = select_target(&unit, &hazards).unwrap();
    assert_eq!(target.center_x, 500.0);
    assert_eq!(target.distance, 30.0);
}

#[test]
fn test_ties_keep_first_in_scan_order() {
    let unit = unit_at(300.0);
    let hazards = [hazard_at(100.0, 300.0), hazard_at(500.0, 300.0)];
    let target = select_target(&unit, &hazards).unwrap();
    assert_eq!(target.center_x, 100.0);
}

#[test]
fn test_hazards_level_with_or_below_unit_are_ignored() {
    let unit = unit_at(300.0);
    // Lower edge exactly at the unit's upper edge is no longer incoming.
    let hazards = [hazard_at(100.0, 410.0), hazard_at(200.0, 480.0)];
    assert!(select_target(&unit, &hazards).is_none());
}

#[test]
fn test_idle_drift_is_persisted() {
    let profile = PursuitProfile {
        drift_chance: 0.0,
        ..PursuitProfile::default()
    };
    let mut rng = rng();
    for _ in 0..100 {
        assert_eq!(idle_step(5.0, &profile, &mut rng), 5.0);
    }
}

#[test]
fn test_idle_drift_rerolls_within_candidates() {
    let profile = PursuitProfile {
        drift_chance: 1.0,
        ..PursuitProfile::default()
    };
    let mut rng = rng();
    for _ in 0..100 {
        let step = idle_step(0.0, &profile, &mut rng);
        assert!(profile.drift_steps.contains(&step));
    }
}

#[test]
fn test_idle_without_hazards_keeps_step_mostly() {
    let ctx = PursuitContext {
        unit: unit_at(300.0),
        held_step: -5.0,
        hazards: &[],
    };
    let mut rng = rng();
    let held = (0..1000)
        .filter(|_| evaluate(&ctx, &PursuitProfile::default(), &mut rng).step == -5.0)
        .count();
    // Re-rolls happen ~5% of the time and can land on -5 again.
    assert!(held > 900, "held {held}/1000");
}

#[test]
fn test_clamp_left_edge_flips_step_positive() {
    let unit = Aabb::new(-4.0, 410.0, 28.0, 440.0);
    let clamp = clamp_to_field(&unit, -5.0, 0.0, 600.0).unwrap();
    assert_eq!(clamp.correction, 4.0);
    assert_eq!(clamp.step, 5.0);
}

#[test]
fn test_clamp_right_edge_flips_step_negative() {
    let unit = Aabb::new(572.0, 410.0, 604.0, 440.0);
    let clamp = clamp_to_field(&unit, 5.0, 0.0, 600.0).unwrap();
    assert_eq!(clamp.correction, -4.0);
    assert_eq!(clamp.step, -5.0);
}

#[test]
fn test_inside_field_needs_no_clamp() {
    assert!(clamp_to_field(&unit_at(300.0), 5.0, 0.0, 600.0).is_none());
}

#[test]
fn test_fire_rate_matches_profile() {
    let profile = PursuitProfile::default();
    let mut rng = rng();
    let shots = (0..10_000)
        .filter(|_| wants_to_fire(&profile, &mut rng))
        .count();
    assert!((800..1200).contains(&shots), "shots {shots}");
}
