// Court geometry and the movement constants every other component reads

use anyhow::{ensure, Result};

use crate::config::PhysicsConfig;

pub const COURT_WIDTH: f32 = 800.0;
pub const COURT_HEIGHT: f32 = 500.0;
pub const WALL_MARGIN: f32 = 5.0;
pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 80.0;
pub const BALL_SIZE: f32 = 12.0; // ball.x/y is the center
pub const PLAYER_SPEED: f32 = 8.0;
pub const CPU_SPEED: f32 = 6.0;
pub const BALL_SPEED: f32 = 6.0;
pub const PLAYER_START_X: f32 = 20.0;
pub const CPU_OFFSET_X: f32 = 30.0; // CPU paddle sits at width - offset
pub const WINNING_SCORE: u32 = 10;
pub const MAX_CHARGE: u32 = 60;
pub const SMASH_EFFECT_FRAMES: u32 = 30;
pub const TRAIL_LENGTH: usize = 8;

/// Serve `dy` choices; zero is excluded so the ball never travels flat.
pub const SERVE_DY: [f32; 6] = [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0];

/// Immutable description of the playing field and its movement rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_size: f32,
    pub player_speed: f32,
    pub cpu_speed: f32,
    pub ball_speed: f32,
    pub player_start_x: f32,
    pub cpu_x: f32,
    pub winning_score: u32,
    pub max_charge: u32,
    pub smash_effect_frames: u32,
    pub trail_length: usize,
}

impl Court {
    pub fn from_config(physics: &PhysicsConfig) -> Self {
        Self {
            width: physics.court_width,
            height: physics.court_height,
            margin: physics.wall_margin,
            paddle_width: physics.paddle_width,
            paddle_height: physics.paddle_height,
            ball_size: physics.ball_size,
            player_speed: physics.player_speed,
            cpu_speed: physics.cpu_speed,
            ball_speed: physics.ball_speed,
            player_start_x: physics.player_start_x,
            cpu_x: physics.court_width - physics.cpu_offset_x,
            winning_score: physics.winning_score,
            max_charge: physics.max_charge,
            smash_effect_frames: physics.smash_effect_frames,
            trail_length: physics.trail_length,
        }
    }

    /// Bounds the movement code clamps to must be non-empty.
    pub fn check(&self) -> Result<()> {
        ensure!(
            self.paddle_min_y() <= self.paddle_max_y(),
            "paddle of height {} does not fit a court {} high",
            self.paddle_height,
            self.height
        );
        ensure!(
            self.player_min_x() <= self.player_max_x(),
            "player half of a court {} wide has no room for the paddle",
            self.width
        );
        ensure!(
            self.wall_top() <= self.wall_bottom(),
            "ball of size {} does not fit between the walls",
            self.ball_size
        );
        Ok(())
    }

    pub fn half_ball(&self) -> f32 {
        self.ball_size / 2.0
    }

    pub fn half_paddle(&self) -> f32 {
        self.paddle_height / 2.0
    }

    /// Paddle top edge when vertically centered.
    pub fn paddle_center_y(&self) -> f32 {
        self.height / 2.0 - self.half_paddle()
    }

    pub fn paddle_min_y(&self) -> f32 {
        self.margin
    }

    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_height - self.margin
    }

    pub fn player_min_x(&self) -> f32 {
        self.margin
    }

    /// The player may roam its own half only.
    pub fn player_max_x(&self) -> f32 {
        self.width / 2.0 - self.paddle_width - self.margin
    }

    /// Ball center at or above this line touches the top wall.
    pub fn wall_top(&self) -> f32 {
        self.half_ball() + self.margin
    }

    pub fn wall_bottom(&self) -> f32 {
        self.height - self.half_ball() - self.margin
    }
}

impl Default for Court {
    fn default() -> Self {
        Self::from_config(&PhysicsConfig::default())
    }
}
