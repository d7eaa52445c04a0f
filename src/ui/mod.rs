pub mod overlay;
pub mod render;

use anyhow::Result;
use tracing::info;

use crate::game::GameEvent;
use crate::simulation::Snapshot;

pub use overlay::{OverlayMessage, OverlayStyle};
pub use render::TerminalRenderer;

/// Consumes the state after each tick; never feeds anything back.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot, events: &[GameEvent]) -> Result<()>;
}

/// Renderer for headless runs: reports notable events through `tracing`.
#[derive(Debug, Default)]
pub struct EventLog {
    pub points: u32,
    pub smashes: u32,
}

impl Renderer for EventLog {
    fn render(&mut self, snapshot: &Snapshot, events: &[GameEvent]) -> Result<()> {
        for event in events {
            match event {
                GameEvent::Smash(smash) => {
                    self.smashes += 1;
                    info!(
                        tick = snapshot.tick,
                        actor = smash.actor.label(),
                        power = smash.power,
                        "{}",
                        smash.tier().label()
                    );
                }
                GameEvent::PointScored {
                    scorer,
                    player_score,
                    cpu_score,
                } => {
                    self.points += 1;
                    info!(
                        tick = snapshot.tick,
                        scorer = scorer.label(),
                        "score {player_score}-{cpu_score}"
                    );
                }
                GameEvent::GameOver { winner } => {
                    info!(tick = snapshot.tick, winner = winner.label(), "match over");
                }
                _ => {}
            }
        }
        Ok(())
    }
}
