//! Bot firing policy
//!
//! Every tick, each living bot whose cooldown has elapsed rolls against
//! `enemy_fire_chance`. The roll makes the fire rate probabilistic, bounded
//! above by one shot per `enemy_fire_interval`.

use glam::Vec3;
use rand::Rng;

use super::state::{Cannonball, GameEvent, GameState};
use crate::consts::*;

/// Fallback aim when a direction cannot be normalized
const FALLBACK_AIM: Vec3 = Vec3::Y;

/// Whether the cooldown since `last_fire_time` has elapsed at `now`
pub fn cooldown_elapsed(last_fire_time: Option<f64>, now: f64, interval: f64) -> bool {
    match last_fire_time {
        Some(last) => now - last > interval,
        None => true,
    }
}

/// Aim from `from` toward `target` with per-axis jitter, never downward.
pub fn enemy_aim(from: Vec3, target: Vec3, rng: &mut impl Rng) -> Vec3 {
    let jitter = Vec3::new(
        rng.random_range(-ENEMY_AIM_JITTER..=ENEMY_AIM_JITTER),
        rng.random_range(-ENEMY_AIM_JITTER..=ENEMY_AIM_JITTER),
        rng.random_range(-ENEMY_AIM_JITTER..=ENEMY_AIM_JITTER),
    );
    let mut dir = target - from + jitter;
    dir.y = dir.y.max(ENEMY_MIN_AIM_Y);
    dir.normalize_or(FALLBACK_AIM)
}

/// Let each living bot decide whether to fire at the player this tick
pub fn run_bot_ai(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    let interval = state.tuning.enemy_fire_interval;
    let chance = state.tuning.enemy_fire_chance;
    let speed = state.tuning.enemy_cannon_speed;
    let target = state.player().pos;

    for index in 1..state.ships.len() {
        let bot = &state.ships[index];
        if bot.is_player || !bot.alive || !cooldown_elapsed(bot.last_fire_time, now, interval) {
            continue;
        }
        let from = bot.pos;
        if state.rng.random::<f32>() >= chance {
            continue;
        }

        let dir = enemy_aim(from, target, &mut state.rng);
        state.ships[index].last_fire_time = Some(now);
        state.cannonballs.push(Cannonball::new(
            from + Vec3::Y * MUZZLE_HEIGHT,
            dir,
            speed,
            true,
        ));
        log::debug!("Bot {} fired", index);
        events.push(GameEvent::BotFired { ship: index });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state_with(chance: f32) -> GameState {
        let tuning = Tuning {
            num_bots: 4,
            enemy_fire_chance: chance,
            ..Default::default()
        };
        GameState::new(tuning, 11).unwrap()
    }

    #[test]
    fn test_cooldown_gate() {
        assert!(cooldown_elapsed(None, 0.0, 3.0));
        assert!(!cooldown_elapsed(Some(1.0), 4.0, 3.0));
        assert!(cooldown_elapsed(Some(1.0), 4.01, 3.0));
    }

    #[test]
    fn test_aim_never_downward() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            // Target far below the bot
            let dir = enemy_aim(
                Vec3::new(0.0, 100.0, 0.0),
                Vec3::new(50.0, -500.0, 50.0),
                &mut rng,
            );
            assert!(dir.y > 0.0);
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_certain_fire_respects_cooldown() {
        let mut state = state_with(1.0);
        let mut events = Vec::new();
        run_bot_ai(&mut state, 0.0, &mut events);
        assert_eq!(state.cannonballs.len(), 4);
        assert!(state.cannonballs.iter().all(|c| c.is_enemy));
        assert!(state.bots().iter().all(|b| b.last_fire_time == Some(0.0)));

        // Still cooling down
        run_bot_ai(&mut state, 2.9, &mut events);
        assert_eq!(state.cannonballs.len(), 4);

        run_bot_ai(&mut state, 3.1, &mut events);
        assert_eq!(state.cannonballs.len(), 8);
        assert_eq!(events.len(), 8);
    }

    #[test]
    fn test_zero_chance_never_fires() {
        let mut state = state_with(0.0);
        let mut events = Vec::new();
        for i in 0..100 {
            run_bot_ai(&mut state, i as f64 * 5.0, &mut events);
        }
        assert!(state.cannonballs.is_empty());
        assert!(state.bots().iter().all(|b| b.last_fire_time.is_none()));
    }

    #[test]
    fn test_dead_bots_hold_fire() {
        let mut state = state_with(1.0);
        for bot in state.bots_mut() {
            bot.alive = false;
        }
        let mut events = Vec::new();
        run_bot_ai(&mut state, 10.0, &mut events);
        assert!(state.cannonballs.is_empty());
    }

    #[test]
    fn test_fire_rate_is_probabilistic() {
        // Cooldown disabled: fire rate tracks the Bernoulli chance
        let tuning = Tuning {
            num_bots: 1,
            enemy_fire_interval: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 77).unwrap();
        let mut events = Vec::new();
        for i in 0..2000 {
            run_bot_ai(&mut state, 1.0 + i as f64, &mut events);
        }
        let rate = events.len() as f32 / 2000.0;
        assert!((0.33..0.47).contains(&rate), "fire rate {rate}");
    }

    #[test]
    fn test_shot_spawns_above_bot() {
        let mut state = state_with(1.0);
        let bot_pos = state.ships[1].pos;
        let mut events = Vec::new();
        run_bot_ai(&mut state, 0.0, &mut events);
        assert_eq!(state.cannonballs[0].pos, bot_pos + Vec3::new(0.0, 10.0, 0.0));
        assert!((state.cannonballs[0].vel.length() - 70.0).abs() < 1e-3);
    }
}
