// Ball-chasing CPU with aim jitter and an occasional smash boost

use rand::{Rng, RngCore};

use super::bot::{Bot, CpuDecision, Vertical};
use crate::config::CpuConfig;
use crate::game::GameState;

/// Tuning for [`CpuBot`]
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTuning {
    pub aim_jitter: i32,    // target = ball_y + uniform integer in [-jitter, jitter]
    pub dead_zone: f32,     // no movement while the center is this close to target
    pub boost_chance: f64,  // per-tick roll while the ball is incoming and deep
    pub boost_factor: f32,
    pub boost_zone: f32,    // fraction of court width the ball must pass
}

impl CpuTuning {
    pub fn from_config(cpu: &CpuConfig) -> Self {
        Self {
            aim_jitter: cpu.aim_jitter as i32,
            dead_zone: cpu.dead_zone,
            boost_chance: cpu.boost_chance,
            boost_factor: cpu.boost_factor,
            boost_zone: cpu.boost_zone,
        }
    }
}

impl Default for CpuTuning {
    fn default() -> Self {
        Self::from_config(&CpuConfig::default())
    }
}

/// Tracks the ball's current height, never predicting its path.
///
/// The boost is re-rolled on every qualifying tick rather than latched, so
/// boosted stretches have a geometric rather than fixed length.
pub struct CpuBot {
    name: String,
    tuning: CpuTuning,
}

impl CpuBot {
    pub fn new(tuning: CpuTuning) -> Self {
        Self {
            name: "CPU".to_string(),
            tuning,
        }
    }

    fn roll_boost(&self, game_state: &GameState, rng: &mut dyn RngCore) -> bool {
        let ball = &game_state.ball;
        ball.dx > 0.0
            && ball.x > game_state.court.width * self.tuning.boost_zone
            && rng.gen_bool(self.tuning.boost_chance)
    }
}

impl Bot for CpuBot {
    fn decide(&mut self, game_state: &GameState, rng: &mut dyn RngCore) -> CpuDecision {
        let jitter = rng.gen_range(-self.tuning.aim_jitter..=self.tuning.aim_jitter);
        let target_y = game_state.ball.y + jitter as f32;

        let boosted = self.roll_boost(game_state, rng);
        let base = game_state.court.cpu_speed;
        let speed = if boosted {
            base * self.tuning.boost_factor
        } else {
            base
        };

        let center_y = game_state.cpu.center_y();
        let movement = if center_y < target_y - self.tuning.dead_zone {
            Some(Vertical::Down)
        } else if center_y > target_y + self.tuning.dead_zone {
            Some(Vertical::Up)
        } else {
            None
        };

        CpuDecision {
            target_y,
            movement,
            speed,
            boosted,
        }
    }

    fn reset(&mut self) {
        // Stateless between ticks
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Court, GameState};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with_ball(x: f32, y: f32, dx: f32) -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = GameState::new(Court::default(), &mut rng);
        state.ball.x = x;
        state.ball.y = y;
        state.ball.dx = dx;
        (state, rng)
    }

    #[test]
    fn test_target_stays_within_jitter() {
        let (state, mut rng) = state_with_ball(400.0, 100.0, -6.0);
        let mut bot = CpuBot::new(CpuTuning::default());
        for _ in 0..500 {
            let decision = bot.decide(&state, &mut rng);
            assert!((98.0..=102.0).contains(&decision.target_y));
            assert_eq!(decision.target_y.fract(), 0.0);
        }
    }

    #[test]
    fn test_moves_toward_ball_outside_dead_zone() {
        // CPU center is 250
        let (state, mut rng) = state_with_ball(400.0, 100.0, -6.0);
        let mut bot = CpuBot::new(CpuTuning::default());
        let decision = bot.decide(&state, &mut rng);
        assert_eq!(decision.movement, Some(Vertical::Up));
        assert_eq!(decision.speed, 6.0);

        let (state, mut rng) = state_with_ball(400.0, 400.0, -6.0);
        assert_eq!(bot.decide(&state, &mut rng).movement, Some(Vertical::Down));
    }

    #[test]
    fn test_dead_zone_prevents_jitter() {
        // |jitter| <= 2 keeps the target within 3 of center
        let (state, mut rng) = state_with_ball(400.0, 251.0, -6.0);
        let mut bot = CpuBot::new(CpuTuning::default());
        for _ in 0..200 {
            assert_eq!(bot.decide(&state, &mut rng).movement, None);
        }
    }

    #[test]
    fn test_no_boost_unless_ball_incoming_and_deep() {
        let mut bot = CpuBot::new(CpuTuning {
            boost_chance: 1.0,
            ..CpuTuning::default()
        });

        let (state, mut rng) = state_with_ball(600.0, 100.0, -6.0);
        assert!(!bot.decide(&state, &mut rng).boosted);

        let (state, mut rng) = state_with_ball(470.0, 100.0, 6.0);
        assert!(!bot.decide(&state, &mut rng).boosted);

        let (state, mut rng) = state_with_ball(500.0, 100.0, 6.0);
        let decision = bot.decide(&state, &mut rng);
        assert!(decision.boosted);
        assert_eq!(decision.speed, 9.0);
    }

    #[test]
    fn test_boost_is_rerolled_each_tick() {
        let (state, mut rng) = state_with_ball(600.0, 100.0, 6.0);
        let mut bot = CpuBot::new(CpuTuning::default());
        let boosted = (0..2000)
            .filter(|_| bot.decide(&state, &mut rng).boosted)
            .count();
        // 10% of 2000 with generous slack
        assert!((100..=320).contains(&boosted), "boosted {boosted} times");
    }
}
