//! Per-frame maze update
//!
//! Consumes one frame's worth of input and leaves the game with fresh
//! presence flags and phase.

use super::state::{MazeGame, MazePhase, MoveOutcome};
use super::view::Direction;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct MazeInput {
    /// Relative move (arrow keys or door clicks)
    pub movement: Option<Direction>,
    /// Leave through the exit (space)
    pub advance: bool,
    /// Read the note on the floor
    pub pick_note: bool,
    /// Start over
    pub reset: bool,
}

impl MazeInput {
    pub fn movement(direction: Direction) -> Self {
        Self {
            movement: Some(direction),
            ..Default::default()
        }
    }
}

/// Advance the maze game by one frame.
///
/// Order: reset, advance, note, movement, then presence is recomputed.
pub fn tick(game: &mut MazeGame, input: &MazeInput) {
    game.events.clear();

    if input.reset {
        game.reset();
        return;
    }

    if let MazePhase::Ended(_) = game.phase {
        return;
    }

    if input.advance && game.advance() {
        return;
    }

    if input.pick_note {
        if let Some(message) = game.pick_note() {
            log::debug!("Note: {:?}", message);
        }
    }

    if let Some(direction) = input.movement {
        if game.try_move(direction) == MoveOutcome::Blocked {
            log::trace!("Blocked moving {:?}", direction);
        }
        return;
    }

    game.refresh();
}
