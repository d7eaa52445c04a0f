use rand::RngCore;
use tracing::debug;

use super::events::GameEvent;
use super::scoring::award_point;
use super::smash::{self, Contact, SmashEvent};
use super::state::{Ball, GameState, Paddle, Side};

/// Advance the ball one tick: move, decay smash effects, bounce, hit, score.
///
/// Collision is a plain AABB overlap with no sweep, so a ball moving fast
/// enough under a smash multiplier can pass through a paddle.
pub fn update_ball(state: &mut GameState, rng: &mut dyn RngCore, events: &mut Vec<GameEvent>) {
    let court = state.court;
    let ball = &mut state.ball;

    ball.record_trail();

    let (dx, dy) = ball.effective_velocity();
    ball.x += dx;
    ball.y += dy;

    if ball.smash_timer > 0 {
        ball.smash_timer -= 1;
        if ball.smash_timer == 0 {
            ball.speed_multiplier = 1.0;
        }
    }

    // Walls reflect without energy loss. The ball is put back on the wall
    // line and the sign forced away from it, so it never rests past a wall.
    if ball.y <= court.wall_top() {
        ball.y = court.wall_top();
        if ball.dy < 0.0 {
            ball.dy = -ball.dy;
            events.push(GameEvent::WallBounce);
        }
    } else if ball.y >= court.wall_bottom() {
        ball.y = court.wall_bottom();
        if ball.dy > 0.0 {
            ball.dy = -ball.dy;
            events.push(GameEvent::WallBounce);
        }
    }

    if state.ball.dx < 0.0 && overlaps(&state.ball, &state.player, court.half_ball()) {
        strike(state, Side::Player, events);
    }

    if state.ball.dx > 0.0 && overlaps(&state.ball, &state.cpu, court.half_ball()) {
        strike(state, Side::Cpu, events);
    }

    if state.ball.x < 0.0 {
        award_point(state, Side::Cpu, rng, events);
    } else if state.ball.x > court.width {
        award_point(state, Side::Player, rng, events);
    }
}

fn overlaps(ball: &Ball, paddle: &Paddle, half_ball: f32) -> bool {
    ball.x - half_ball <= paddle.x + paddle.width
        && ball.x + half_ball >= paddle.x
        && ball.y + half_ball >= paddle.y
        && ball.y - half_ball <= paddle.y + paddle.height
}

/// Return the ball off `side`'s paddle, applying any smash.
fn strike(state: &mut GameState, side: Side, events: &mut Vec<GameEvent>) {
    let court = state.court;
    let paddle = *state.paddle(side);

    let contact = Contact {
        paddle_vx: paddle.vx,
        paddle_vy: paddle.vy,
        charge: paddle.charge,
        max_charge: court.max_charge,
        incoming_dy: state.ball.dy,
    };
    let smash_power = smash::resolve(side, &contact, court.cpu_speed);
    let power = smash_power.unwrap_or(1.0);

    // Not clamped: a ball caught beyond the paddle's end leaves steeper
    let hit_offset = (state.ball.y - paddle.center_y()) / (paddle.height / 2.0);
    let away = match side {
        Side::Player => 1.0,
        Side::Cpu => -1.0,
    };
    state.ball.dx = away * state.ball.dx.abs() * power;
    state.ball.dy = hit_offset * 4.0 * power;
    events.push(GameEvent::PaddleHit { side, power });

    if let Some(power) = smash_power {
        state.paddle_mut(side).charge = 0;
        match side {
            Side::Player => state.player_smashes += 1,
            Side::Cpu => state.cpu_smashes += 1,
        }
        state.ball.smash_timer = court.smash_effect_frames;
        state.ball.speed_multiplier = power;

        let smash = SmashEvent { actor: side, power };
        debug!(
            actor = side.label(),
            power,
            tier = ?smash.tier(),
            charge = contact.charge,
            "smash"
        );
        events.push(GameEvent::Smash(smash));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::geometry::Court;
    use crate::game::state::Phase;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running_state(rng: &mut StdRng) -> GameState {
        let mut state = GameState::new(Court::default(), rng);
        state.phase = Phase::Running;
        state
    }

    fn place_ball(state: &mut GameState, x: f32, y: f32, dx: f32, dy: f32) {
        state.ball.x = x;
        state.ball.y = y;
        state.ball.dx = dx;
        state.ball.dy = dy;
    }

    #[test]
    fn test_ball_moves_by_effective_velocity_and_records_trail() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        place_ball(&mut state, 400.0, 250.0, -6.0, 2.0);
        state.ball.speed_multiplier = 2.0;
        state.ball.smash_timer = 5;

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);

        assert_eq!((state.ball.x, state.ball.y), (388.0, 254.0));
        assert_eq!(state.ball.smash_timer, 4);
        assert_eq!(state.ball.speed_multiplier, 2.0);
        assert_eq!(state.ball.trail().last(), Some((400.0, 250.0)));
        assert!(events.is_empty());
    }

    #[test]
    fn test_multiplier_resets_when_timer_expires() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        place_ball(&mut state, 400.0, 250.0, 6.0, 1.0);
        state.ball.speed_multiplier = 1.8;
        state.ball.smash_timer = 1;

        update_ball(&mut state, &mut rng, &mut Vec::new());

        assert_eq!(state.ball.smash_timer, 0);
        assert_eq!(state.ball.speed_multiplier, 1.0);
    }

    #[test]
    fn test_wall_bounce_preserves_magnitude() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        place_ball(&mut state, 400.0, 13.0, 6.0, -3.0);

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);
        assert_eq!(state.ball.dy, 3.0);
        assert_eq!(state.ball.y, 11.0);
        assert_eq!(events, vec![GameEvent::WallBounce]);

        place_ball(&mut state, 400.0, 487.0, 6.0, 2.5);
        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);
        assert_eq!(state.ball.dy, -2.5);
        assert_eq!(events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_smashed_ball_stops_on_wall_line() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        place_ball(&mut state, 400.0, 480.0, 6.0, 10.0);
        state.ball.speed_multiplier = 2.5;
        state.ball.smash_timer = 12;

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);
        assert_eq!(state.ball.y, 489.0);
        assert_eq!(state.ball.dy, -10.0);
        assert_eq!(events, vec![GameEvent::WallBounce]);

        place_ball(&mut state, 400.0, 20.0, 6.0, -10.0);
        update_ball(&mut state, &mut rng, &mut Vec::new());
        assert_eq!(state.ball.y, 11.0);
        assert_eq!(state.ball.dy, 10.0);
    }

    #[test]
    fn test_normal_player_return() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        // Paddle at x=20..30, y=210..290; center 250
        place_ball(&mut state, 40.0, 270.0, -6.0, 1.0);

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);

        // Ball at x=34, y=271 overlaps; offset = 21/40
        assert_eq!(state.ball.dx, 6.0);
        assert!((state.ball.dy - 21.0 / 40.0 * 4.0).abs() < 1e-5);
        assert_eq!(events, vec![GameEvent::PaddleHit { side: Side::Player, power: 1.0 }]);
        assert_eq!(state.player_smashes, 0);
        assert_eq!(state.ball.smash_timer, 0);
    }

    #[test]
    fn test_player_smash_with_full_charge() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        state.player.vx = 8.0;
        state.player.charge = 60;
        place_ball(&mut state, 40.0, 250.0, -6.0, 2.0);

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);

        let smash = events.iter().find_map(GameEvent::as_smash).copied();
        assert_eq!(smash, Some(SmashEvent { actor: Side::Player, power: 2.5 }));
        assert_eq!(state.ball.dx, 15.0);
        assert_eq!(state.ball.speed_multiplier, 2.5);
        assert_eq!(state.ball.smash_timer, 30);
        assert_eq!(state.player.charge, 0);
        assert_eq!(state.player_smashes, 1);
    }

    #[test]
    fn test_no_hit_while_ball_moves_away() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        place_ball(&mut state, 30.0, 250.0, 6.0, 0.5);

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);
        assert_eq!(state.ball.dx, 6.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_cpu_return_goes_left() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        state.cpu.vy = 6.0;
        // CPU paddle at x=770..780, center y=250
        place_ball(&mut state, 760.0, 250.0, 6.0, 1.0);

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);

        assert!(state.ball.dx < 0.0);
        let smash = events.iter().find_map(GameEvent::as_smash).unwrap();
        assert_eq!(smash.actor, Side::Cpu);
        assert!((smash.power - 1.2).abs() < 1e-6);
        assert!((state.ball.dx + 6.0 * smash.power).abs() < 1e-5);
        assert_eq!(state.cpu_smashes, 1);
    }

    #[test]
    fn test_leaving_left_edge_scores_cpu_and_keeps_charges() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        state.player.y = 5.0; // out of the way
        state.player.charge = 25;
        state.cpu.charge = 12;
        state.ball.speed_multiplier = 2.0;
        state.ball.smash_timer = 10;
        place_ball(&mut state, 0.0, 400.0, -3.0, 1.0);

        let mut events = Vec::new();
        update_ball(&mut state, &mut rng, &mut events);

        assert_eq!(state.cpu_score, 1);
        assert_eq!(state.player_score, 0);
        assert_eq!((state.ball.x, state.ball.y), (400.0, 250.0));
        assert_eq!(state.ball.speed_multiplier, 1.0);
        assert_eq!(state.ball.smash_timer, 0);
        assert_eq!(state.player.charge, 25);
        assert_eq!(state.cpu.charge, 12);
        assert!(events.iter().any(GameEvent::is_point));
    }

    #[test]
    fn test_leaving_right_edge_scores_player() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = running_state(&mut rng);
        state.cpu.y = 5.0;
        place_ball(&mut state, 798.0, 400.0, 6.0, 0.0);

        update_ball(&mut state, &mut rng, &mut Vec::new());
        assert_eq!(state.player_score, 1);
    }
}
