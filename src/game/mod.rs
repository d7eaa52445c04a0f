pub mod events;
pub mod geometry;
pub mod input;
pub mod paddle;
pub mod physics;
pub mod scoring;
pub mod smash;
pub mod state;

pub use events::GameEvent;
pub use geometry::Court;
pub use input::{Command, Direction, HeldDirections, TickInput};
pub use physics::update_ball;
pub use smash::{SmashEvent, SmashTier};
pub use state::{Ball, BallTint, ChargeLevel, GameState, Paddle, Phase, Side};
