use std::time::Instant;

use anyhow::Result;
use ratatui::backend::Backend;
use tracing::info;

use super::common::TickScheduler;
use crate::config::Config;
use crate::game::Command;
use crate::simulation::Simulation;
use crate::terminal_input::KeyboardInput;
use crate::ui::{Renderer, TerminalRenderer};

/// Play against the CPU until the quit key is pressed.
///
/// Keys are drained once per frame, so commands and held directions land
/// atomically at the start of the next tick.
pub fn run_game_vs_cpu<B: Backend>(
    renderer: &mut TerminalRenderer<B>,
    keyboard: &mut KeyboardInput,
    sim: &mut Simulation,
    config: &Config,
) -> Result<()> {
    info!(bot = sim.bot_name(), "session start");
    let scheduler = TickScheduler::new(config.display.tick_ms);

    loop {
        let frame_start = Instant::now();

        let frame = keyboard.poll()?;
        if frame.quit {
            info!(
                player = sim.state().player_score,
                cpu = sim.state().cpu_score,
                "session quit"
            );
            return Ok(());
        }
        if frame.input.commands.contains(&Command::Reset) {
            keyboard.clear();
        }

        let events = sim.tick(&frame.input);
        renderer.render(&sim.snapshot(), &events)?;

        scheduler.limit_frame_rate(frame_start);
    }
}
