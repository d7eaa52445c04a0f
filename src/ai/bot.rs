// Bot trait for the CPU opponent

use rand::RngCore;

use crate::game::GameState;

/// Vertical step direction in screen coordinates (`Down` grows `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// What the CPU paddle should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuDecision {
    /// Noisy aim point the decision was taken against.
    pub target_y: f32,
    /// `None` inside the dead zone.
    pub movement: Option<Vertical>,
    pub speed: f32,
    /// The anticipatory smash boost was rolled this tick.
    pub boosted: bool,
}

/// Trait for AI bot implementations
///
/// Bots may keep internal state. All randomness goes through the `rng`
/// handed in by the simulation so seeded runs are reproducible.
pub trait Bot {
    /// Decide what the CPU paddle does this tick
    fn decide(&mut self, game_state: &GameState, rng: &mut dyn RngCore) -> CpuDecision;

    /// Reset bot internal state (called when the match is reset)
    fn reset(&mut self);

    /// Bot name for debugging/display
    fn name(&self) -> &str;
}
