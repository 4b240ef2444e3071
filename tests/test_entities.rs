use invader_waves::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq; equality comparisons must work
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);
    assert_eq!(Outcome::Won, Outcome::Won);
    assert_ne!(Outcome::Won, Outcome::Lost);
    assert_eq!(Phase::Start, Phase::Start);
    assert_ne!(Phase::Start, Phase::Playing);

    // The countdown is part of the phase's identity
    assert_eq!(
        Phase::GetReady { ticks_left: 10 },
        Phase::GetReady { ticks_left: 10 }
    );
    assert_ne!(
        Phase::GetReady { ticks_left: 10 },
        Phase::GetReady { ticks_left: 9 }
    );

    let owner = BulletOwner::Enemy;
    assert_eq!(owner.clone(), BulletOwner::Enemy);
}

#[test]
fn wave_pool_levels_are_one_based() {
    let pool = WavePool {
        waves: [
            vec![Enemy { rect: Rect { x: 1.0, y: 0.0, w: 20.0, h: 20.0 } }],
            Vec::new(),
            Vec::new(),
            vec![Enemy { rect: Rect { x: 4.0, y: 0.0, w: 20.0, h: 20.0 } }],
        ],
        bullets: Vec::new(),
        speed: 2.0,
        fall_increment: 1.0,
    };
    assert_eq!(pool.wave(1)[0].rect.x, 1.0);
    assert!(pool.wave(2).is_empty());
    assert_eq!(pool.wave(4)[0].rect.x, 4.0);
}

#[test]
fn sim_state_clone_is_independent() {
    let original = SimState {
        phase: Phase::Playing,
        active_level: 1,
        outcome: None,
        player: Player {
            rect: Rect { x: 180.0, y: 390.0, w: 40.0, h: 10.0 },
            vx: 0.0,
            bullets: Vec::new(),
        },
        enemies: WavePool {
            waves: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            bullets: Vec::new(),
            speed: 2.0,
            fall_increment: 1.0,
        },
        frame: 0,
        width: 400.0,
        height: 400.0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99.0;
    cloned.active_level = 3;
    cloned.enemies.wave_mut(1).push(Enemy {
        rect: Rect { x: 5.0, y: 5.0, w: 20.0, h: 20.0 },
    });

    assert_eq!(original.player.rect.x, 180.0);
    assert_eq!(original.active_level, 1);
    assert!(original.enemies.wave(1).is_empty());
}
