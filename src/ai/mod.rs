// AI module for the CPU opponent

mod bot;
mod cpu_bot;

pub use bot::{Bot, CpuDecision, Vertical};
pub use cpu_bot::{CpuBot, CpuTuning};

/// Create the CPU opponent from its tuning
pub fn create_bot(tuning: CpuTuning) -> Box<dyn Bot> {
    Box::new(CpuBot::new(tuning))
}
