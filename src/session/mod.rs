pub mod common;
mod headless;
mod interactive;

pub use common::TickScheduler;
pub use headless::{run_headless, HeadlessReport, MAX_HEADLESS_TICKS};
pub use interactive::run_game_vs_cpu;
