// Action Tennis configuration types
// Every setting defaults to the classic tuning of the game

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::game::geometry::{
    BALL_SIZE, BALL_SPEED, COURT_HEIGHT, COURT_WIDTH, CPU_OFFSET_X, CPU_SPEED, MAX_CHARGE,
    PADDLE_HEIGHT, PADDLE_WIDTH, PLAYER_SPEED, PLAYER_START_X, SMASH_EFFECT_FRAMES, TRAIL_LENGTH,
    WALL_MARGIN, WINNING_SCORE,
};
use crate::terminal_input::parse_key;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub cpu: CpuConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.keybindings.validate()?;
        self.physics.validate()?;
        self.cpu.validate()?;
        ensure!(self.display.tick_ms > 0, "display.tick_ms must be positive");
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Paddle movement (held)
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,

    // Match commands
    pub start: String,
    pub pause: String,
    pub reset: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "Up".to_string(),
            down: "Down".to_string(),
            left: "Left".to_string(),
            right: "Right".to_string(),
            start: "Enter".to_string(),
            pause: "P".to_string(),
            reset: "R".to_string(),
            quit: "Q".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("up", &self.up),
            ("down", &self.down),
            ("left", &self.left),
            ("right", &self.right),
            ("start", &self.start),
            ("pause", &self.pause),
            ("reset", &self.reset),
            ("quit", &self.quit),
        ];
        for (field, name) in names {
            if parse_key(name).is_none() {
                bail!("keybindings.{field}: unknown key name {name:?}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Court size in world units; walls are `wall_margin` thick
    pub court_width: f32,
    pub court_height: f32,
    pub wall_margin: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_size: f32,

    // Units per tick
    pub player_speed: f32,
    pub cpu_speed: f32,
    pub ball_speed: f32,

    // Paddle columns: player starts here, CPU sits at court_width - cpu_offset_x
    pub player_start_x: f32,
    pub cpu_offset_x: f32,

    // Points needed to win; no margin rule
    pub winning_score: u32,

    // Charge cap in ticks of sustained movement
    pub max_charge: u32,

    // Frames a smash keeps its speed multiplier
    pub smash_effect_frames: u32,

    // Ball positions kept for the trail
    pub trail_length: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            court_width: COURT_WIDTH,
            court_height: COURT_HEIGHT,
            wall_margin: WALL_MARGIN,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_size: BALL_SIZE,
            player_speed: PLAYER_SPEED,
            cpu_speed: CPU_SPEED,
            ball_speed: BALL_SPEED,
            player_start_x: PLAYER_START_X,
            cpu_offset_x: CPU_OFFSET_X,
            winning_score: WINNING_SCORE,
            max_charge: MAX_CHARGE,
            smash_effect_frames: SMASH_EFFECT_FRAMES,
            trail_length: TRAIL_LENGTH,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("court_width", self.court_width),
            ("court_height", self.court_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("player_speed", self.player_speed),
            ("cpu_speed", self.cpu_speed),
            ("ball_speed", self.ball_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                bail!("physics.{name} must be a positive number, got {value}");
            }
        }
        ensure!(
            self.wall_margin >= 0.0,
            "physics.wall_margin must not be negative"
        );
        ensure!(
            self.paddle_height + 2.0 * self.wall_margin <= self.court_height,
            "physics.paddle_height {} does not fit a court {} high",
            self.paddle_height,
            self.court_height
        );

        let player_max_x = self.court_width / 2.0 - self.paddle_width - self.wall_margin;
        ensure!(
            (self.wall_margin..=player_max_x).contains(&self.player_start_x),
            "physics.player_start_x {} is outside the player's half [{}, {}]",
            self.player_start_x,
            self.wall_margin,
            player_max_x
        );
        ensure!(
            self.cpu_offset_x > self.paddle_width && self.cpu_offset_x < self.court_width / 2.0,
            "physics.cpu_offset_x {} must place the CPU paddle inside its half",
            self.cpu_offset_x
        );
        ensure!(self.winning_score > 0, "physics.winning_score must be at least 1");
        ensure!(self.max_charge > 0, "physics.max_charge must be at least 1");
        // A zero-length effect would leave a smash multiplier with no timer to clear it
        ensure!(
            self.smash_effect_frames > 0,
            "physics.smash_effect_frames must be at least 1"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CpuConfig {
    // Aim error: uniform integer in [-aim_jitter, aim_jitter] added to ball y
    pub aim_jitter: u32,

    // No movement while within this distance of the target
    pub dead_zone: f32,

    // Per-tick chance of a speed boost once the ball is incoming and deep
    pub boost_chance: f64,
    pub boost_factor: f32,

    // Fraction of court width the ball must cross before boosts can roll
    pub boost_zone: f32,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            aim_jitter: 2,
            dead_zone: 5.0,
            boost_chance: 0.1,
            boost_factor: 1.5,
            boost_zone: 0.6,
        }
    }
}

impl CpuConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.boost_chance),
            "cpu.boost_chance must be within [0, 1], got {}",
            self.boost_chance
        );
        ensure!(
            (0.0..=1.0).contains(&self.boost_zone),
            "cpu.boost_zone must be within [0, 1], got {}",
            self.boost_zone
        );
        ensure!(self.dead_zone >= 0.0, "cpu.dead_zone must not be negative");
        ensure!(
            self.boost_factor.is_finite() && self.boost_factor > 0.0,
            "cpu.boost_factor must be positive"
        );
        ensure!(
            self.aim_jitter <= i32::MAX as u32,
            "cpu.aim_jitter is too large"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Tick cadence in milliseconds (16 ≈ 60 Hz)
    pub tick_ms: u64,

    // Draw the fading ball trail
    pub show_trail: bool,

    // Ticks a smash banner stays on screen
    pub banner_ticks: u32,

    // Colours, RGB 0-255
    pub court_color: [u8; 3],
    pub player_color: [u8; 3],
    pub cpu_color: [u8; 3],
    pub ball_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            show_trail: true,
            banner_ticks: 60,
            court_color: [255, 255, 255],  // White lines
            player_color: [33, 150, 243],  // Blue
            cpu_color: [244, 67, 54],      // Red
            ball_color: [255, 235, 59],    // Yellow
        }
    }
}
