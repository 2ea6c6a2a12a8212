//! Property tests for the session engine invariants

use glam::DVec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use turret_breaker::Settings;
use turret_breaker::sim::{
    EntityId, ExclusionZone, HitAxis, IdAllocator, LevelGenerator, PrizeCatalog, Projectile, Session,
    SessionPhase, Target, TargetKind, TickInput, resolve, tick,
};

#[derive(Debug, Clone)]
enum Command {
    Aim(f64),
    Fire,
    Wait(u8),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (-3.2f64..3.2).prop_map(Command::Aim),
        Just(Command::Fire),
        (0u8..40).prop_map(Command::Wait),
    ]
}

proptest! {
    #[test]
    fn single_flight_and_shot_accounting(seed in any::<u64>(), commands in prop::collection::vec(command(), 1..60)) {
        let mut session = Session::new(Settings::default(), seed).unwrap();

        for cmd in commands {
            match cmd {
                Command::Aim(angle) => session.set_aim(angle),
                Command::Fire => {
                    let shots = session.remaining_shots();
                    let live = session.projectile().cloned();
                    let accepted = session.fire();

                    if live.is_some() || shots == 0 || session.phase() != SessionPhase::InProgress {
                        prop_assert!(!accepted);
                        prop_assert_eq!(session.remaining_shots(), shots);
                        prop_assert_eq!(session.projectile().cloned(), live);
                    } else {
                        prop_assert!(accepted);
                        prop_assert_eq!(session.remaining_shots(), shots - 1);
                        prop_assert!(session.projectile().is_some());
                    }
                }
                Command::Wait(n) => {
                    for _ in 0..n {
                        tick(&mut session, &TickInput::default());
                    }
                }
            }
        }
    }

    #[test]
    fn generated_targets_avoid_exclusion_zone(seed in any::<u64>(), level in 1u32..40) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = IdAllocator::default();
        let generator = LevelGenerator::new(800.0, 600.0);
        let targets = generator.generate(level, &mut rng, &mut ids).unwrap();

        prop_assert_eq!(targets.len(), level as usize);
        let zone = ExclusionZone::around(DVec2::new(400.0, 300.0), 50.0);
        for t in &targets {
            prop_assert!(!zone.contains(t.pos));
            prop_assert!(t.pos.x >= 0.0 && t.pos.x < 750.0);
            prop_assert!(t.pos.y >= 0.0 && t.pos.y < 580.0);
            if level < 3 {
                prop_assert_eq!(t.kind, TargetKind::Basic);
            }
            if level < 6 {
                prop_assert!(t.hits_remaining().is_none());
            }
        }
    }

    #[test]
    fn rolled_prize_is_in_catalog(seed in any::<u64>(), count in 1usize..12) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let catalog = PrizeCatalog::generate(&mut rng, count);

        prop_assert!(!catalog.is_empty());
        prop_assert!(catalog.len() <= count.min(10));
        let balls: Vec<u8> = catalog.prizes().iter().map(|p| p.balls).collect();
        prop_assert!(balls.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(balls.iter().all(|b| (1..=10).contains(b)));

        let prize = catalog.roll(&mut rng).unwrap();
        prop_assert!(catalog.contains_balls(prize.balls));
    }

    #[test]
    fn resolve_flips_exactly_one_axis(
        px in 80.0f64..170.0,
        py in 80.0f64..140.0,
        vx in -10.0f64..10.0,
        vy in -10.0f64..10.0,
    ) {
        let target = Target::new(EntityId(1), DVec2::new(100.0, 100.0), TargetKind::Basic).unwrap();
        let projectile = Projectile::new(EntityId(2), DVec2::new(px, py), DVec2::new(vx, vy), 5.0).unwrap();
        let targets = [target];

        let first = resolve(&projectile, &targets);
        prop_assert_eq!(first, resolve(&projectile, &targets));

        if let Some(hit) = first {
            match hit.axis {
                HitAxis::Side => {
                    prop_assert_eq!(hit.velocity, DVec2::new(-vx, vy));
                    prop_assert_eq!(hit.position.y, py);
                    prop_assert!(hit.position.x == 95.0 || hit.position.x == 155.0);
                }
                HitAxis::Cap => {
                    prop_assert_eq!(hit.velocity, DVec2::new(vx, -vy));
                    prop_assert_eq!(hit.position.x, px);
                    prop_assert!(hit.position.y == 95.0 || hit.position.y == 125.0);
                }
            }
        }
    }
}
