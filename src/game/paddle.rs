// Paddle controllers: integrate position, derive velocity, track charge

use crate::ai::{CpuDecision, Vertical};

use super::geometry::Court;
use super::input::{Direction, HeldDirections};
use super::state::Paddle;

/// +1 per moving tick up to `max`, -2 per still tick down to zero.
pub fn next_charge(charge: u32, moving: bool, max: u32) -> u32 {
    if moving {
        (charge + 1).min(max)
    } else {
        charge.saturating_sub(2)
    }
}

/// Move the player paddle from the directions held this tick.
///
/// Axes are independent and not normalised, so a diagonal moves at full
/// speed on both. The paddle is confined to the left half of the court.
pub fn move_player(paddle: &mut Paddle, held: &HeldDirections, court: &Court) {
    let (prev_x, prev_y) = (paddle.x, paddle.y);
    let step = court.player_speed;

    let mut x = paddle.x;
    let mut y = paddle.y;
    if held.contains(Direction::Up) {
        y -= step;
    }
    if held.contains(Direction::Down) {
        y += step;
    }
    if held.contains(Direction::Left) {
        x -= step;
    }
    if held.contains(Direction::Right) {
        x += step;
    }

    paddle.x = x.clamp(court.player_min_x(), court.player_max_x());
    paddle.y = y.clamp(court.paddle_min_y(), court.paddle_max_y());
    paddle.vx = paddle.x - prev_x;
    paddle.vy = paddle.y - prev_y;
    paddle.charge = next_charge(paddle.charge, paddle.is_moving(), court.max_charge);
}

/// Move the CPU paddle vertically as the policy decided. `x` never changes.
pub fn move_cpu(paddle: &mut Paddle, decision: &CpuDecision, court: &Court) {
    let prev_y = paddle.y;

    match decision.movement {
        Some(Vertical::Down) => paddle.y += decision.speed,
        Some(Vertical::Up) => paddle.y -= decision.speed,
        None => {}
    }

    paddle.y = paddle.y.clamp(court.paddle_min_y(), court.paddle_max_y());
    paddle.vx = 0.0;
    paddle.vy = paddle.y - prev_y;
    // CPU charge only counts vertical motion
    paddle.charge = next_charge(paddle.charge, paddle.vy != 0.0, court.max_charge);
}
