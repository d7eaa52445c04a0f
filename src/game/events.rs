use super::smash::SmashEvent;
use super::state::{Phase, Side};

/// Something that happened during a tick, for renderers and logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PhaseChanged(Phase),
    WallBounce,
    PaddleHit { side: Side, power: f32 },
    Smash(SmashEvent),
    PointScored {
        scorer: Side,
        player_score: u32,
        cpu_score: u32,
    },
    GameOver { winner: Side },
}

impl GameEvent {
    pub fn as_smash(&self) -> Option<&SmashEvent> {
        match self {
            GameEvent::Smash(smash) => Some(smash),
            _ => None,
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, GameEvent::PointScored { .. })
    }
}
