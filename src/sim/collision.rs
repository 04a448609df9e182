//! Shot impact resolution
//!
//! Each active shot is checked against its targets first, then against the
//! sea. A shot resolves at most one impact per tick and is compacted out of
//! the projectile list afterwards.

use glam::Vec3;

use super::effects::VisualEffect;
use super::state::{Cannonball, GameEvent, GameState, PLAYER_INDEX, Ship};
use super::wave::wave_height;
use crate::consts::*;
use crate::distance;

/// Outcome of checking a single shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// Player shot sank the bot at this `ships` index
    Bot(usize),
    /// Enemy shot struck the player
    Player,
    /// Landed in the sea at this splash position
    Sea(Vec3),
}

/// First living bot within hit radius of `pos`, in spawn order
pub fn first_bot_hit(ships: &[Ship], pos: Vec3) -> Option<usize> {
    ships
        .iter()
        .enumerate()
        .find(|(_, ship)| !ship.is_player && ship.alive && distance(ship.pos, pos) < BOT_HIT_RADIUS)
        .map(|(index, _)| index)
}

/// Decide what a shot hit this tick, if anything
pub fn check_impact(
    ball: &Cannonball,
    ships: &[Ship],
    player_health: i32,
    wave_time: f64,
) -> Option<Impact> {
    if !ball.active {
        return None;
    }

    if ball.is_enemy {
        let player = &ships[PLAYER_INDEX];
        if player_health > 0 && distance(ball.pos, player.pos) < PLAYER_HIT_RADIUS {
            return Some(Impact::Player);
        }
    } else if let Some(index) = first_bot_hit(ships, ball.pos) {
        return Some(Impact::Bot(index));
    }

    let sea = wave_height(ball.pos.x, ball.pos.z, wave_time);
    if ball.pos.y <= sea + SEA_CONTACT_MARGIN {
        return Some(Impact::Sea(Vec3::new(ball.pos.x, sea + SPLASH_HEIGHT, ball.pos.z)));
    }
    None
}

/// Resolve every shot against ships and sea, spawning effects for impacts
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let wave_time = state.wave_time();
    let damage = state.tuning.player_damage;

    for i in 0..state.cannonballs.len() {
        let impact = check_impact(
            &state.cannonballs[i],
            &state.ships,
            state.player_health,
            wave_time,
        );
        let Some(impact) = impact else {
            continue;
        };
        state.cannonballs[i].active = false;

        match impact {
            Impact::Bot(index) => {
                let pos = state.ships[index].pos;
                state.ships[index].alive = false;
                state.targets_destroyed += 1;
                state.effects.push(VisualEffect::explosion(pos));
                let smoke = VisualEffect::smoke(pos, &mut state.rng);
                state.effects.push(smoke);
                log::info!(
                    "Bot {} sunk ({} destroyed, {} remaining)",
                    index,
                    state.targets_destroyed,
                    state.alive_bots()
                );
                events.push(GameEvent::BotSunk { ship: index });
            }
            Impact::Player => {
                let health = state.damage_player(damage);
                let pos = state.player().pos;
                state.effects.push(VisualEffect::explosion(pos));
                log::info!("Player hit, health {}", health);
                events.push(GameEvent::PlayerHit { health });
            }
            Impact::Sea(pos) => {
                state.effects.push(VisualEffect::splash(pos));
                log::debug!("Splash at ({:.0}, {:.0})", pos.x, pos.z);
                events.push(GameEvent::Splash { pos });
            }
        }
    }

    state.cannonballs.retain(|ball| ball.active);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;

    /// Player at origin, stationary bots placed explicitly
    fn fixture(bots: &[Vec3]) -> GameState {
        let tuning = Tuning {
            num_bots: bots.len(),
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 5).unwrap();
        for (bot, &pos) in state.bots_mut().iter_mut().zip(bots) {
            bot.pos = pos;
            bot.vel = Vec3::ZERO;
        }
        state
    }

    fn shot(pos: Vec3, is_enemy: bool) -> Cannonball {
        Cannonball::new(pos, Vec3::X, 1.0, is_enemy)
    }

    #[test]
    fn test_player_shot_sinks_bot() {
        let mut state = fixture(&[Vec3::new(100.0, 0.0, 150.0)]);
        state.cannonballs.push(shot(Vec3::new(105.0, 20.0, 150.0), false));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(!state.ships[1].alive);
        assert_eq!(state.targets_destroyed, 1);
        assert!(state.cannonballs.is_empty());
        assert_eq!(state.effects.explosions.len(), 1);
        assert_eq!(state.effects.smokes.len(), 1);
        assert_eq!(events, vec![GameEvent::BotSunk { ship: 1 }]);
    }

    #[test]
    fn test_single_kill_per_shot() {
        // Both bots within 30 units of the shot; only the first sinks
        let mut state = fixture(&[Vec3::new(0.0, 0.0, 100.0), Vec3::new(10.0, 0.0, 100.0)]);
        state.cannonballs.push(shot(Vec3::new(5.0, 10.0, 100.0), false));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(!state.ships[1].alive);
        assert!(state.ships[2].alive);
        assert_eq!(state.targets_destroyed, 1);
        assert!(state.cannonballs.is_empty());
    }

    #[test]
    fn test_dead_bot_is_ignored() {
        let mut state = fixture(&[Vec3::new(0.0, 0.0, 100.0)]);
        state.ships[1].alive = false;
        state.cannonballs.push(shot(Vec3::new(0.0, 50.0, 100.0), false));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.targets_destroyed, 0);
        assert_eq!(state.cannonballs.len(), 1);
    }

    #[test]
    fn test_player_shot_never_hurts_player() {
        let mut state = fixture(&[Vec3::new(500.0, 0.0, 500.0)]);
        state.cannonballs.push(shot(Vec3::new(0.0, 20.0, 0.0), false));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.player_health, 100);
        assert_eq!(state.cannonballs.len(), 1);
    }

    #[test]
    fn test_enemy_hit_damages_and_clamps() {
        let mut state = fixture(&[Vec3::new(500.0, 0.0, 500.0)]);
        let mut events = Vec::new();
        for _ in 0..3 {
            state.cannonballs.push(shot(Vec3::new(0.0, 20.0, 10.0), true));
        }
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.player_health, 85);
        assert_eq!(state.effects.explosions.len(), 3);

        state.player_health = 2;
        state.cannonballs.push(shot(Vec3::new(0.0, 20.0, 10.0), true));
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.player_health, 0);
    }

    #[test]
    fn test_enemy_shot_passes_through_when_health_zero() {
        let mut state = fixture(&[Vec3::new(500.0, 0.0, 500.0)]);
        state.player_health = 0;
        state.cannonballs.push(shot(Vec3::new(0.0, 30.0, 0.0), true));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.cannonballs.len(), 1);
        assert!(state.effects.explosions.is_empty());
    }

    #[test]
    fn test_sea_contact_splashes() {
        let mut state = fixture(&[Vec3::new(500.0, 0.0, 500.0)]);
        state.cannonballs.push(shot(Vec3::new(300.0, -20.0, -300.0), false));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);

        assert!(state.cannonballs.is_empty());
        assert_eq!(state.effects.splashes.len(), 1);
        let sea = wave_height(300.0, -300.0, state.wave_time());
        let splash = state.effects.splashes[0].position();
        assert!((splash.y - (sea + SPLASH_HEIGHT)).abs() < 1e-5);
    }

    #[test]
    fn test_hit_takes_priority_over_splash() {
        // Under the sea and inside a bot's hit radius: counts as a hit
        let mut state = fixture(&[Vec3::new(0.0, 0.0, 200.0)]);
        state.cannonballs.push(shot(Vec3::new(0.0, -15.0, 200.0), false));
        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.targets_destroyed, 1);
        assert!(state.effects.splashes.is_empty());
    }
}
