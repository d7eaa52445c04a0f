//! Action Tennis: a paddle-and-ball duel against the CPU with a smash
//! mechanic that rewards counter-motion and sustained movement.
//!
//! The simulation core lives in [`game`], [`ai`] and [`simulation`]; it is
//! free of any rendering or terminal concerns. [`ui`], [`terminal_input`]
//! and [`session`] are the collaborators the binary wires around it.

pub mod ai;
pub mod config;
pub mod game;
pub mod logging;
pub mod session;
pub mod simulation;
pub mod terminal_input;
pub mod ui;

pub use simulation::{Simulation, Snapshot};
