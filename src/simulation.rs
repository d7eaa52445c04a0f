//! The tick function and the match state machine around it.
//!
//! [`Simulation`] owns all physics state. Collaborators push a
//! [`TickInput`] per tick and read a [`Snapshot`] plus the returned
//! events afterwards; nothing inside a tick blocks or fails.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

use crate::ai::{self, Bot, CpuTuning};
use crate::config::Config;
use crate::game::{
    paddle, update_ball, Ball, BallTint, Command, Court, GameEvent, GameState, Paddle, Phase,
    Side, TickInput,
};

pub struct Simulation<R: RngCore = StdRng> {
    state: GameState,
    bot: Box<dyn Bot>,
    rng: R,
    tick: u64,
}

impl Simulation<StdRng> {
    /// Reproducible simulation: the same seed and inputs give the same match.
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: &Config) -> Result<Self> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: RngCore> Simulation<R> {
    /// Fails on a config that [`Config::validate`] rejects, so ticks never can.
    pub fn new(config: &Config, rng: R) -> Result<Self> {
        config.validate()?;
        let court = Court::from_config(&config.physics);
        let bot = ai::create_bot(CpuTuning::from_config(&config.cpu));
        Self::with_bot(court, bot, rng)
    }

    pub fn with_bot(court: Court, bot: Box<dyn Bot>, mut rng: R) -> Result<Self> {
        court.check()?;
        let state = GameState::new(court, &mut rng);
        Ok(Self {
            state,
            bot,
            rng,
            tick: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scenario setup.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn bot_name(&self) -> &str {
        self.bot.name()
    }

    /// Ticks that advanced physics.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Apply queued commands, then advance one step if the match is running.
    ///
    /// Paused, idle and finished matches leave every paddle and ball field
    /// untouched.
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for command in &input.commands {
            self.apply(*command, &mut events);
        }

        if self.state.phase != Phase::Running {
            return events;
        }

        let court = self.state.court;
        paddle::move_player(&mut self.state.player, &input.held, &court);

        let decision = self.bot.decide(&self.state, &mut self.rng);
        paddle::move_cpu(&mut self.state.cpu, &decision, &court);

        update_ball(&mut self.state, &mut self.rng, &mut events);
        self.tick += 1;
        events
    }

    fn apply(&mut self, command: Command, events: &mut Vec<GameEvent>) {
        let next = match (command, self.state.phase) {
            (Command::Start, Phase::Idle) => Phase::Running,
            (Command::TogglePause, Phase::Running) => Phase::Paused,
            (Command::TogglePause, Phase::Paused) => Phase::Running,
            (Command::Reset, _) => {
                self.state.reset_match(&mut self.rng);
                self.bot.reset();
                self.tick = 0;
                info!("match reset");
                events.push(GameEvent::PhaseChanged(Phase::Idle));
                return;
            }
            // Start while running or after game over, pause while idle
            _ => return,
        };

        info!(from = ?self.state.phase, to = ?next, "phase change");
        self.state.phase = next;
        events.push(GameEvent::PhaseChanged(next));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.tick)
    }
}

/// Read-only view of the ball for collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct BallSnapshot {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub effective_speed: f32,
    pub speed_multiplier: f32,
    pub smash_timer: u32,
    pub tint: BallTint,
    /// Oldest first.
    pub trail: Vec<(f32, f32)>,
}

impl BallSnapshot {
    fn capture(ball: &Ball) -> Self {
        Self {
            x: ball.x,
            y: ball.y,
            dx: ball.dx,
            dy: ball.dy,
            effective_speed: ball.effective_speed(),
            speed_multiplier: ball.speed_multiplier,
            smash_timer: ball.smash_timer,
            tint: ball.tint(),
            trail: ball.trail().collect(),
        }
    }
}

/// Everything a renderer or HUD needs after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub court: Court,
    pub player: Paddle,
    pub cpu: Paddle,
    pub ball: BallSnapshot,
    pub player_score: u32,
    pub cpu_score: u32,
    pub player_smashes: u32,
    pub cpu_smashes: u32,
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub winner: Option<Side>,
}

impl Snapshot {
    pub fn capture(state: &GameState, tick: u64) -> Self {
        Self {
            tick,
            court: state.court,
            player: state.player,
            cpu: state.cpu,
            ball: BallSnapshot::capture(&state.ball),
            player_score: state.player_score,
            cpu_score: state.cpu_score,
            player_smashes: state.player_smashes,
            cpu_smashes: state.cpu_smashes,
            phase: state.phase,
            running: state.is_running(),
            paused: state.is_paused(),
            game_over: state.winner().is_some(),
            winner: state.winner(),
        }
    }
}
