//! Rotating maze engine
//!
//! A perfect grid maze seen through four 90° views. The player walks
//! relative to their facing; turning switches the active view.
//!
//! Pure and deterministic like the orbit engine: seeded RNG only, no
//! rendering or platform dependencies.

pub mod grid;
pub mod landmarks;
pub mod state;
pub mod tick;
pub mod view;

pub use grid::{Cell, Maze, MazeSet, Side, create_maze};
pub use landmarks::{LandmarkKind, Landmarks};
pub use state::{
    Encounter, MazeEvent, MazeGame, MazePhase, MoveOutcome, NOTE_MESSAGES, Navigator, Presence,
    VisitStats,
};
pub use tick::{MazeInput, tick};
pub use view::{Direction, Heading, View, project_all, view_deltas};
