#![cfg(not(target_arch = "wasm32"))]

use orb_backdrop::{BackdropConfig, Orb, OrbField, Tint};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn seeded(seed: u64, width: f64, height: f64) -> OrbField {
    let mut rng = SmallRng::seed_from_u64(seed);
    OrbField::initialize(width, height, &BackdropConfig::default(), &mut rng)
}

#[test]
fn left_top_corner_orb_bounces_within_a_thousand_ticks() {
    let mut field = seeded(2024, 800.0, 600.0);
    assert_eq!(field.len(), 8);

    let corner = Orb::new([10.0, 10.0], [0.3, -0.3], 120.0, 0.25, Tint::Hue(215.0));
    let mut orbs = field.orbs().to_vec();
    orbs[0] = corner;
    field = OrbField::from_orbs(800.0, 600.0, orbs);

    let mut flips = [0usize; 2];
    let mut last = field.orbs()[0].velocity();
    for _ in 0..1000 {
        field.tick();
        let now = field.orbs()[0].velocity();
        for axis in 0..2 {
            if now[axis].signum() != last[axis].signum() {
                flips[axis] += 1;
            }
        }
        last = now;
    }

    // Heading up from y = 10, it leaves past -120 around tick 434.
    assert!(flips[1] >= 1, "vertical velocity never flipped");
    // Heading right it only reaches x ~ 310; the right boundary is 920.
    assert_eq!(flips[0], 0);
    assert!(field.orbs()[0].velocity()[1] > 0.0);
}

#[test]
fn replay_is_bit_identical() {
    let mut a = seeded(77, 1440.0, 900.0);
    let mut b = a.clone();
    for _ in 0..5000 {
        a.tick();
        b.tick();
        for (oa, ob) in a.orbs().iter().zip(b.orbs()) {
            assert_eq!(oa.position()[0].to_bits(), ob.position()[0].to_bits());
            assert_eq!(oa.position()[1].to_bits(), ob.position()[1].to_bits());
        }
    }
}

#[test]
fn resize_keeps_orbs_and_tightens_bounds() {
    let mut field = seeded(3, 1920.0, 1080.0);
    let before: Vec<_> = field
        .orbs()
        .iter()
        .map(|o| (o.radius(), o.velocity(), o.opacity(), o.tint()))
        .collect();
    field.resize(400.0, 300.0);
    let after: Vec<_> = field
        .orbs()
        .iter()
        .map(|o| (o.radius(), o.velocity(), o.opacity(), o.tint()))
        .collect();
    assert_eq!(before, after);
    assert_eq!(field.len(), 8);

    // Orbs left outside the smaller surface snap to its edge on the next tick.
    for _ in 0..20 {
        field.tick();
    }
    for orb in field.orbs() {
        let [x, y] = orb.position();
        let r = orb.radius();
        assert!(x >= -r && x <= 400.0 + r, "x={x} r={r}");
        assert!(y >= -r && y <= 300.0 + r, "y={y} r={r}");
    }
}

#[test]
fn nan_velocity_cannot_escape_containment() {
    let orb = Orb::new([10.0, 10.0], [f64::NAN, 0.0], 5.0, 0.3, Tint::Hue(220.0));
    let mut field = OrbField::from_orbs(100.0, 100.0, vec![orb]);
    for _ in 0..10 {
        field.tick();
    }
    let [x, y] = field.orbs()[0].position();
    assert!(x >= -5.0 && x <= 105.0, "x={x}");
    assert!(y >= -5.0 && y <= 105.0, "y={y}");
}

proptest! {
    #[test]
    fn orbs_stay_within_one_radius_of_the_surface(
        seed in any::<u64>(),
        width in 1.0f64..2560.0,
        height in 1.0f64..1600.0,
        ticks in 0usize..3000,
    ) {
        let mut field = seeded(seed, width, height);
        for _ in 0..ticks {
            field.tick();
            for orb in field.orbs() {
                let [x, y] = orb.position();
                let r = orb.radius();
                prop_assert!(x >= -r && x <= width + r);
                prop_assert!(y >= -r && y <= height + r);
            }
        }
    }

    #[test]
    fn only_position_and_velocity_change(seed in any::<u64>(), ticks in 1usize..2000) {
        let mut field = seeded(seed, 1024.0, 768.0);
        let fixed: Vec<_> = field
            .orbs()
            .iter()
            .map(|o| (o.radius().to_bits(), o.opacity().to_bits(), o.tint()))
            .collect();
        let count = field.len();
        for _ in 0..ticks {
            field.tick();
        }
        prop_assert_eq!(field.len(), count);
        for (orb, (radius, opacity, tint)) in field.orbs().iter().zip(fixed) {
            prop_assert_eq!(orb.radius().to_bits(), radius);
            prop_assert_eq!(orb.opacity().to_bits(), opacity);
            prop_assert_eq!(orb.tint(), tint);
            prop_assert!(orb.radius() > 0.0);
            prop_assert!((0.0..=1.0).contains(&orb.opacity()));
        }
    }
}
