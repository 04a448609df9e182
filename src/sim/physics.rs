//! Kinematics for ships and cannon shots
//!
//! Ships drift at constant velocity and bounce off an invisible square.
//! Shots follow a ballistic arc with exaggerated gravity and despawn at hard
//! world bounds.

use glam::Vec3;

use super::state::{Cannonball, GameState, Ship};
use super::tick::HeldDirections;
use crate::consts::*;

/// Move the player directly from held direction intents.
///
/// Forward is -z, back +z, left -x, right +x; each held direction moves a
/// fixed distance per tick regardless of dt.
pub fn move_player(state: &mut GameState, held: HeldDirections) {
    let step = state.tuning.player_speed;
    let player = state.player_mut();
    if !player.alive {
        return;
    }
    if held.forward {
        player.pos.z -= step;
    }
    if held.back {
        player.pos.z += step;
    }
    if held.left {
        player.pos.x -= step;
    }
    if held.right {
        player.pos.x += step;
    }
}

/// Advance one ship and reflect it off the area boundary.
///
/// A horizontal velocity component flips only while the ship is past the
/// limit and still heading outward, so each crossing flips exactly once.
pub fn integrate_ship(ship: &mut Ship, dt: f32, area_limit: f32) {
    if !ship.alive {
        return;
    }
    ship.pos += ship.vel * dt * SHIP_VELOCITY_SCALE;

    if ship.pos.x.abs() > area_limit && ship.pos.x * ship.vel.x > 0.0 {
        ship.vel.x = -ship.vel.x;
    }
    if ship.pos.z.abs() > area_limit && ship.pos.z * ship.vel.z > 0.0 {
        ship.vel.z = -ship.vel.z;
    }
}

/// Advance every living bot
pub fn integrate_bots(state: &mut GameState, dt: f32) {
    let limit = state.tuning.bot_area_limit;
    for bot in state.bots_mut() {
        integrate_ship(bot, dt, limit);
    }
}

/// Apply gravity then velocity. Returns false once the shot leaves the world.
pub fn integrate_cannonball(ball: &mut Cannonball, dt: f32, gravity: f32) -> bool {
    if !ball.active {
        return false;
    }
    ball.vel.y -= gravity * dt * GRAVITY_SCALE;
    ball.pos += ball.vel * dt;

    if !in_world(ball.pos) {
        ball.active = false;
    }
    ball.active
}

/// Advance every shot and drop the ones that left the world
pub fn integrate_cannonballs(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.gravity;
    let before = state.cannonballs.len();
    state
        .cannonballs
        .retain_mut(|ball| integrate_cannonball(ball, dt, gravity));
    let culled = before - state.cannonballs.len();
    if culled > 0 {
        log::debug!("Culled {} shots outside the world", culled);
    }
}

/// Inside the hard despawn bounds
#[inline]
pub fn in_world(pos: Vec3) -> bool {
    pos.y >= SHOT_MIN_Y
        && pos.x.abs() <= SHOT_MAX_HORIZONTAL
        && pos.z.abs() <= SHOT_MAX_HORIZONTAL
}
