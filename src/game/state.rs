use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::geometry::{Court, SERVE_DY};
use super::smash::SmashTier;

/// Which side of the net an actor plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Cpu,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Cpu => "CPU",
        }
    }
}

/// Display tier of a paddle's charge meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeLevel {
    Low,
    Half,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32, // top edge
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub charge: u32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            vx: 0.0,
            vy: 0.0,
            charge: 0,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn is_moving(&self) -> bool {
        self.vx != 0.0 || self.vy != 0.0
    }

    pub fn charge_ratio(&self, max_charge: u32) -> f32 {
        if max_charge == 0 {
            return 0.0;
        }
        (self.charge as f32 / max_charge as f32).min(1.0)
    }

    pub fn charge_level(&self) -> ChargeLevel {
        if self.charge > 30 {
            ChargeLevel::Full
        } else if self.charge > 15 {
            ChargeLevel::Half
        } else {
            ChargeLevel::Low
        }
    }
}

/// Colour state of the ball, derived from the active speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallTint {
    Plain,
    Smashed(SmashTier),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    /// Base velocity, before the speed multiplier.
    pub dx: f32,
    pub dy: f32,
    pub speed_multiplier: f32,
    /// Frames left of the current smash effect.
    pub smash_timer: u32,
    trail: VecDeque<(f32, f32)>,
    trail_capacity: usize,
}

impl Ball {
    pub fn new(x: f32, y: f32, trail_capacity: usize) -> Self {
        Self {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            speed_multiplier: 1.0,
            smash_timer: 0,
            trail: VecDeque::with_capacity(trail_capacity),
            trail_capacity,
        }
    }

    /// Recenter with a random serve and clear every smash effect.
    pub fn serve(&mut self, court: &Court, rng: &mut dyn RngCore) {
        self.x = court.width / 2.0;
        self.y = court.height / 2.0;
        self.dx = if rng.gen_bool(0.5) {
            court.ball_speed
        } else {
            -court.ball_speed
        };
        self.dy = *SERVE_DY.choose(rng).unwrap_or(&1.0);
        self.speed_multiplier = 1.0;
        self.smash_timer = 0;
        self.trail.clear();
    }

    pub fn effective_velocity(&self) -> (f32, f32) {
        (self.dx * self.speed_multiplier, self.dy * self.speed_multiplier)
    }

    pub fn effective_speed(&self) -> f32 {
        let (dx, dy) = self.effective_velocity();
        dx.hypot(dy)
    }

    /// Append the current position, evicting the oldest once full.
    pub fn record_trail(&mut self) {
        if self.trail_capacity == 0 {
            return;
        }
        if self.trail.len() == self.trail_capacity {
            self.trail.pop_front();
        }
        self.trail.push_back((self.x, self.y));
    }

    /// Oldest first.
    pub fn trail(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.trail.iter().copied()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn tint(&self) -> BallTint {
        if self.smash_timer == 0 || self.speed_multiplier <= 1.0 {
            BallTint::Plain
        } else {
            BallTint::Smashed(SmashTier::from_power(self.speed_multiplier))
        }
    }
}

/// Where the match is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver { winner: Side },
}

/// The full mutable state of one match.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub court: Court,
    pub player: Paddle,
    pub cpu: Paddle,
    pub ball: Ball,
    pub player_score: u32,
    pub cpu_score: u32,
    pub player_smashes: u32,
    pub cpu_smashes: u32,
    pub phase: Phase,
}

impl GameState {
    pub fn new(court: Court, rng: &mut dyn RngCore) -> Self {
        let mut ball = Ball::new(court.width / 2.0, court.height / 2.0, court.trail_length);
        ball.serve(&court, rng);

        Self {
            player: Self::player_paddle(&court),
            cpu: Self::cpu_paddle(&court),
            ball,
            player_score: 0,
            cpu_score: 0,
            player_smashes: 0,
            cpu_smashes: 0,
            phase: Phase::Idle,
            court,
        }
    }

    fn player_paddle(court: &Court) -> Paddle {
        Paddle::new(
            court.player_start_x,
            court.paddle_center_y(),
            court.paddle_width,
            court.paddle_height,
        )
    }

    fn cpu_paddle(court: &Court) -> Paddle {
        Paddle::new(
            court.cpu_x,
            court.paddle_center_y(),
            court.paddle_width,
            court.paddle_height,
        )
    }

    /// Back to the documented defaults: 0-0, paddles centered, fresh serve.
    pub fn reset_match(&mut self, rng: &mut dyn RngCore) {
        self.player = Self::player_paddle(&self.court);
        self.cpu = Self::cpu_paddle(&self.court);
        self.player_score = 0;
        self.cpu_score = 0;
        self.player_smashes = 0;
        self.cpu_smashes = 0;
        self.phase = Phase::Idle;
        self.ball.serve(&self.court, rng);
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Cpu => &self.cpu,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Cpu => &mut self.cpu,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Cpu => self.cpu_score,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_match_is_idle_and_centered() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::new(Court::default(), &mut rng);

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.player.y, 210.0);
        assert_eq!(state.cpu.y, 210.0);
        assert_eq!(state.cpu.x, 770.0);
        assert_eq!((state.ball.x, state.ball.y), (400.0, 250.0));
        assert_eq!(state.ball.dx.abs(), 6.0);
        assert!(SERVE_DY.contains(&state.ball.dy));
    }

    #[test]
    fn test_trail_is_fifo_with_capacity() {
        let mut ball = Ball::new(0.0, 0.0, 8);
        for i in 0..12 {
            ball.x = i as f32;
            ball.record_trail();
        }
        assert_eq!(ball.trail_len(), 8);
        assert_eq!(ball.trail().next(), Some((4.0, 0.0)));
        assert_eq!(ball.trail().last(), Some((11.0, 0.0)));
    }

    #[test]
    fn test_serve_clears_smash_effect() {
        let mut rng = StdRng::seed_from_u64(1);
        let court = Court::default();
        let mut ball = Ball::new(10.0, 10.0, 8);
        ball.speed_multiplier = 2.5;
        ball.smash_timer = 12;
        ball.record_trail();

        ball.serve(&court, &mut rng);

        assert_eq!(ball.speed_multiplier, 1.0);
        assert_eq!(ball.smash_timer, 0);
        assert_eq!(ball.trail_len(), 0);
        assert_eq!(ball.tint(), BallTint::Plain);
    }

    #[test]
    fn test_charge_levels() {
        let mut paddle = Paddle::new(0.0, 0.0, 10.0, 80.0);
        paddle.charge = 15;
        assert_eq!(paddle.charge_level(), ChargeLevel::Low);
        paddle.charge = 16;
        assert_eq!(paddle.charge_level(), ChargeLevel::Half);
        paddle.charge = 31;
        assert_eq!(paddle.charge_level(), ChargeLevel::Full);
        paddle.charge = 60;
        assert_eq!(paddle.charge_ratio(60), 1.0);
    }
}
