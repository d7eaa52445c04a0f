use rand::RngCore;
use tracing::{debug, info};

use super::events::GameEvent;
use super::state::{GameState, Phase, Side};

/// Credit `scorer` with a point, serve a fresh ball and check for a winner.
///
/// Paddle charges survive a point; only the ball and its effects reset.
pub fn award_point(
    state: &mut GameState,
    scorer: Side,
    rng: &mut dyn RngCore,
    events: &mut Vec<GameEvent>,
) {
    match scorer {
        Side::Player => state.player_score += 1,
        Side::Cpu => state.cpu_score += 1,
    }
    debug!(
        scorer = scorer.label(),
        player = state.player_score,
        cpu = state.cpu_score,
        "point"
    );
    events.push(GameEvent::PointScored {
        scorer,
        player_score: state.player_score,
        cpu_score: state.cpu_score,
    });

    let court = state.court;
    state.ball.serve(&court, rng);
    check_game_over(state, events);
}

/// First to the winning score takes the match outright; no margin needed.
pub fn check_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if matches!(state.phase, Phase::GameOver { .. }) {
        return;
    }

    let target = state.court.winning_score;
    let winner = if state.player_score >= target {
        Side::Player
    } else if state.cpu_score >= target {
        Side::Cpu
    } else {
        return;
    };

    state.phase = Phase::GameOver { winner };
    info!(
        winner = winner.label(),
        player = state.player_score,
        cpu = state.cpu_score,
        "game over"
    );
    events.push(GameEvent::PhaseChanged(state.phase));
    events.push(GameEvent::GameOver { winner });
}
