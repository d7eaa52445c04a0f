use anyhow::Result;
use tracing::info;

use crate::game::{Command, Side, TickInput};
use crate::simulation::Simulation;
use crate::ui::Renderer;

/// Upper bound on ticks when no limit is given.
pub const MAX_HEADLESS_TICKS: u64 = 100_000;

/// Result of a headless match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub player_score: u32,
    pub cpu_score: u32,
    pub player_smashes: u32,
    pub cpu_smashes: u32,
    pub winner: Option<Side>,
}

/// Run a started match with an idle player as fast as possible.
///
/// Stops at game over or after `max_ticks` (default [`MAX_HEADLESS_TICKS`]).
pub fn run_headless<R: Renderer>(
    sim: &mut Simulation,
    renderer: &mut R,
    max_ticks: Option<u64>,
) -> Result<HeadlessReport> {
    let limit = max_ticks.unwrap_or(MAX_HEADLESS_TICKS);

    // Starting also runs the first tick, so a zero limit never starts
    if limit > 0 {
        let events = sim.tick(&TickInput::command(Command::Start));
        renderer.render(&sim.snapshot(), &events)?;

        let idle = TickInput::idle();
        while sim.ticks() < limit && !sim.snapshot().game_over {
            let events = sim.tick(&idle);
            renderer.render(&sim.snapshot(), &events)?;
        }
    }

    let state = sim.state();
    let report = HeadlessReport {
        ticks: sim.ticks(),
        player_score: state.player_score,
        cpu_score: state.cpu_score,
        player_smashes: state.player_smashes,
        cpu_smashes: state.cpu_smashes,
        winner: state.winner(),
    };
    info!(?report, "headless run finished");
    Ok(report)
}
