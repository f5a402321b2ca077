//! Maze game state
//!
//! The player is stored once, in base coordinates, together with a turn
//! counter. Everything view-specific is derived from those two values.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, MazeSet};
use super::landmarks::{LandmarkKind, Landmarks};
use super::view::{Direction, Heading, View, project_all, view_deltas};
use crate::settings::MazeTuning;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encounter {
    /// Cornered by the grim reaper in a dead end
    GrimReaper,
    /// Climbed out on the ladder
    Ladder,
}

/// Current phase of the maze game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazePhase {
    /// Walking the maze
    Exploring,
    /// Standing on the exit, waiting for the advance action
    AtEnd,
    /// Run over until reset
    Ended(Encounter),
}

/// Result of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeEvent {
    Moved { direction: Direction },
    Blocked { direction: Direction },
    ReachedEnd,
    Advanced { size: usize },
    Visited(LandmarkKind),
    NoteRead(&'static str),
    Ended(Encounter),
    Reset,
}

/// Player position plus facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigator {
    /// Base maze dimensions
    size: IVec2,
    /// Base coordinates
    pos: IVec2,
    /// Accumulated signed turns; selects the active view
    turns: i32,
}

impl Navigator {
    pub fn new(start: IVec2, size: IVec2) -> Self {
        Self {
            size,
            pos: start,
            turns: 0,
        }
    }

    pub fn turns(&self) -> i32 {
        self.turns
    }

    pub fn view(&self) -> View {
        View::from_turns(self.turns)
    }

    pub fn facing(&self) -> Heading {
        self.view().heading()
    }

    /// Base coordinates
    pub fn canonical(&self) -> IVec2 {
        self.pos
    }

    /// Position in the active view
    pub fn position(&self) -> IVec2 {
        self.view().project(self.pos, self.size)
    }

    /// Position in each of the four views, in lock-step
    pub fn positions(&self) -> [IVec2; 4] {
        project_all(self.pos, self.size)
    }

    /// Cell under the player in the active view's maze
    pub fn cell<'a>(&self, mazes: &'a MazeSet) -> Option<&'a Cell> {
        mazes.view(self.view().index()).cell(self.position())
    }

    /// Move relative to the current facing.
    ///
    /// Blocked when the active view's maze has a wall on that side of the
    /// player's cell; a blocked move changes nothing.
    pub fn try_move(&mut self, mazes: &MazeSet, direction: Direction) -> MoveOutcome {
        let view = self.view();
        if mazes.view(view.index()).has_wall(self.position(), direction.side()) {
            return MoveOutcome::Blocked;
        }
        let deltas = view_deltas(view, direction);
        // Base coordinates are view 0
        self.pos += deltas[0];
        // Only the residue mod 4 matters, and 2^32 keeps it across wrap-around
        self.turns = self.turns.wrapping_add(direction.turn_delta());
        MoveOutcome::Moved
    }

    /// Walk one cell toward a compass heading, whatever the current facing
    pub fn try_step(&mut self, mazes: &MazeSet, heading: Heading) -> MoveOutcome {
        self.try_move(mazes, Direction::toward(self.facing(), heading))
    }
}

/// Which landmarks the player currently stands on, plus the walls around
/// them. Rebuilt from scratch every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub start: bool,
    pub end: bool,
    pub skeleton: bool,
    pub painting: bool,
    pub note: bool,
    pub grim_reaper: bool,
    pub spider: bool,
    pub ladder: bool,
    /// Walls of the player's cell in the active view
    pub walls: Option<Cell>,
}

impl Presence {
    pub fn is_present(&self, kind: LandmarkKind) -> bool {
        match kind {
            LandmarkKind::Start => self.start,
            LandmarkKind::End => self.end,
            LandmarkKind::Skeleton => self.skeleton,
            LandmarkKind::Painting => self.painting,
            LandmarkKind::Note => self.note,
            LandmarkKind::GrimReaper => self.grim_reaper,
            LandmarkKind::Spider => self.spider,
            LandmarkKind::Ladder => self.ladder,
        }
    }
}

/// Per-marker visit tallies.
///
/// A visit counts once until the player leaves the cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    counts: [u32; 8],
    counted: [bool; 8],
}

impl VisitStats {
    pub fn count(&self, kind: LandmarkKind) -> u32 {
        self.counts[kind.slot()]
    }

    /// Record a visit; returns true when it is a new one
    pub fn record(&mut self, kind: LandmarkKind) -> bool {
        let slot = kind.slot();
        if self.counted[slot] {
            return false;
        }
        self.counted[slot] = true;
        self.counts[slot] += 1;
        true
    }

    /// Forget current visits (player left the cell or a new maze was built)
    pub fn clear_visits(&mut self) {
        self.counted = [false; 8];
    }
}

/// Messages found on notes
pub const NOTE_MESSAGES: [&str; 14] = [
    "don't lose the light",
    "the walls turn",
    "you shouldn't be here",
    "there's only one way out",
    "i saw myself, but it wasn't me",
    "the notes write back",
    "they moved the exit again",
    "hello?",
    "which maze am i in?",
    "it keeps expanding",
    "wrong turn. very wrong.",
    "skeleton keeps you safe",
    "be scared of the dark",
    " go down to go up",
];

/// Complete maze game state
#[derive(Debug, Clone)]
pub struct MazeGame {
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: MazeTuning,
    /// Side length of the current maze
    pub size: usize,
    /// Mazes escaped this run
    pub score: u32,
    pub mazes: MazeSet,
    pub landmarks: Landmarks,
    pub player: Navigator,
    pub phase: MazePhase,
    pub presence: Presence,
    pub stats: VisitStats,
    /// The note of the current maze has already been read
    pub note_read: bool,
    /// Events produced by the last tick
    pub events: Vec<MazeEvent>,
}

impl MazeGame {
    pub fn new(seed: u64, tuning: MazeTuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let size = tuning.start_size.max(1);
        let (mazes, landmarks, player) = build_level(size, &mut rng);
        log::info!("New maze game (seed {}, {}x{})", seed, size, size);
        let mut game = Self {
            seed,
            rng,
            tuning,
            size,
            score: 0,
            mazes,
            landmarks,
            player,
            phase: MazePhase::Exploring,
            presence: Presence::default(),
            stats: VisitStats::default(),
            note_read: false,
            events: Vec::new(),
        };
        game.refresh();
        game
    }

    pub fn view(&self) -> View {
        self.player.view()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MazePhase::Ended(_))
    }

    /// Landmark position in the active view
    pub fn landmark(&self, kind: LandmarkKind) -> IVec2 {
        self.landmarks.in_view(kind, self.view())
    }

    fn at(&self, kind: LandmarkKind) -> bool {
        self.player.position() == self.landmark(kind)
    }

    /// Attempt a move; ignored once the run has ended
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.is_over() {
            return MoveOutcome::Blocked;
        }
        let outcome = self.player.try_move(&self.mazes, direction);
        match outcome {
            MoveOutcome::Moved => {
                self.stats.clear_visits();
                self.events.push(MazeEvent::Moved { direction });
            }
            MoveOutcome::Blocked => self.events.push(MazeEvent::Blocked { direction }),
        }
        self.refresh();
        outcome
    }

    /// Leave through the exit into a bigger maze
    pub fn advance(&mut self) -> bool {
        if self.phase != MazePhase::AtEnd {
            return false;
        }
        self.score += 1;
        self.size += 1;
        self.rebuild();
        log::info!("Advanced to a {}x{} maze (score {})", self.size, self.size, self.score);
        self.events.push(MazeEvent::Advanced { size: self.size });
        true
    }

    /// Start over from scratch at the reset size
    pub fn reset(&mut self) {
        self.score = 0;
        self.size = self.tuning.reset_size.max(1);
        self.stats = VisitStats::default();
        self.rebuild();
        log::info!("Maze game reset");
        self.events.push(MazeEvent::Reset);
    }

    /// Read the note under the player.
    ///
    /// The first read in a maze reveals a message; later reads come back
    /// blank. `None` when there is no note here.
    pub fn pick_note(&mut self) -> Option<&'static str> {
        if !self.presence.note || self.is_over() {
            return None;
        }
        let message = if self.note_read {
            ""
        } else {
            self.note_read = true;
            NOTE_MESSAGES[self.rng.random_range(0..NOTE_MESSAGES.len())]
        };
        self.events.push(MazeEvent::NoteRead(message));
        Some(message)
    }

    fn rebuild(&mut self) {
        let (mazes, landmarks, player) = build_level(self.size, &mut self.rng);
        self.mazes = mazes;
        self.landmarks = landmarks;
        self.player = player;
        self.phase = MazePhase::Exploring;
        self.presence = Presence::default();
        self.stats.clear_visits();
        self.note_read = false;
        self.refresh();
    }

    /// Recompute landmark presence for the player's cell and run the phase
    /// transitions that depend on it
    pub(crate) fn refresh(&mut self) {
        if self.is_over() {
            return;
        }
        let walls = self.player.cell(&self.mazes).copied();
        let dead_end = walls.is_some_and(|c| c.is_dead_end());
        let corridor = walls.is_some_and(|c| c.is_corridor());

        let mut p = Presence {
            walls,
            ..Presence::default()
        };
        p.start = self.at(LandmarkKind::Start);
        p.end = self.at(LandmarkKind::End);
        let off_path = !p.start && !p.end;
        p.skeleton = self.at(LandmarkKind::Skeleton) && off_path;
        p.painting = self.at(LandmarkKind::Painting) && off_path && !corridor;
        p.note = self.at(LandmarkKind::Note) && self.view() == self.landmarks.note_view && off_path;
        p.grim_reaper = self.at(LandmarkKind::GrimReaper)
            && off_path
            && !p.skeleton
            && !p.note
            && !p.painting
            && dead_end
            && self.score > 0;
        p.spider = self.at(LandmarkKind::Spider);
        p.ladder = self.at(LandmarkKind::Ladder)
            && !p.skeleton
            && !p.note
            && !p.painting
            && !p.grim_reaper
            && !p.spider
            && !p.end
            && self.score > self.tuning.ladder_min_score
            && self.score % 2 == 1;
        self.presence = p;

        for kind in LandmarkKind::MARKERS {
            // Standing on the reaper's cell counts even when it stays hidden
            let here = if kind == LandmarkKind::GrimReaper {
                self.at(kind)
            } else {
                p.is_present(kind)
            };
            if here && self.stats.record(kind) {
                self.events.push(MazeEvent::Visited(kind));
            }
        }

        if p.grim_reaper {
            self.end_run(Encounter::GrimReaper);
        } else if p.ladder {
            self.end_run(Encounter::Ladder);
        } else if p.end {
            if self.phase != MazePhase::AtEnd {
                self.events.push(MazeEvent::ReachedEnd);
            }
            self.phase = MazePhase::AtEnd;
        } else {
            self.phase = MazePhase::Exploring;
        }
    }

    fn end_run(&mut self, encounter: Encounter) {
        log::info!("Run ended by {:?} with score {}", encounter, self.score);
        self.phase = MazePhase::Ended(encounter);
        self.events.push(MazeEvent::Ended(encounter));
    }
}

/// Generate the maze set, landmarks and starting player for a side length
fn build_level(size: usize, rng: &mut Pcg32) -> (MazeSet, Landmarks, Navigator) {
    let mazes = MazeSet::generate(size, size, rng);
    let dims = mazes.base().size();
    let landmarks = Landmarks::place(dims, rng);
    let player = Navigator::new(landmarks.canonical(LandmarkKind::Start), dims);
    (mazes, landmarks, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::grid::{Maze, create_maze};
    use proptest::prelude::*;

    /// Straight corridor, open along its whole length
    fn open_maze(w: usize, h: usize) -> MazeSet {
        assert!(w == 1 || h == 1);
        let mut rng = Pcg32::seed_from_u64(0);
        MazeSet::from_base(create_maze(w, h, &mut rng))
    }

    fn game_with(mazes: MazeSet, cells: [IVec2; 8], note_view: View, score: u32) -> MazeGame {
        let mut game = MazeGame::new(1, MazeTuning::default());
        let size = mazes.base().size();
        game.landmarks = Landmarks::from_cells(size, cells, note_view);
        game.player = Navigator::new(cells[LandmarkKind::Start.slot()], size);
        game.mazes = mazes;
        game.score = score;
        game.phase = MazePhase::Exploring;
        game.events.clear();
        game.refresh();
        game
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let mazes = MazeSet::from_base(Maze::walled(3, 3));
        let mut nav = Navigator::new(IVec2::new(1, 1), IVec2::new(3, 3));
        let before = nav;
        for dir in Direction::ALL {
            assert_eq!(nav.try_move(&mazes, dir), MoveOutcome::Blocked);
            assert_eq!(nav, before);
        }
    }

    #[test]
    fn test_move_updates_every_view() {
        let mazes = open_maze(1, 4);
        let size = mazes.base().size();
        let mut nav = Navigator::new(IVec2::new(0, 3), size);
        let before = nav.positions();
        assert_eq!(nav.try_move(&mazes, Direction::Forward), MoveOutcome::Moved);
        let deltas = view_deltas(View::new(0), Direction::Forward);
        let after = nav.positions();
        for k in 0..4 {
            assert_eq!(after[k], before[k] + deltas[k]);
        }
        assert_eq!(nav.canonical(), IVec2::new(0, 2));
    }

    #[test]
    fn test_turning_switches_view() {
        let mazes = open_maze(4, 1);
        let mut nav = Navigator::new(IVec2::new(0, 0), mazes.base().size());
        assert_eq!(nav.try_move(&mazes, Direction::Right), MoveOutcome::Moved);
        assert_eq!(nav.turns(), 1);
        assert_eq!(nav.view(), View::new(3));
        assert_eq!(nav.facing(), Heading::East);
        // Still facing east: forward keeps walking east
        assert_eq!(nav.try_move(&mazes, Direction::Forward), MoveOutcome::Moved);
        assert_eq!(nav.canonical(), IVec2::new(2, 0));
        // Turn around and walk back
        assert_eq!(nav.try_move(&mazes, Direction::Backward), MoveOutcome::Moved);
        assert_eq!(nav.canonical(), IVec2::new(1, 0));
        assert_eq!(nav.facing(), Heading::West);
    }

    #[test]
    fn test_reaching_end_and_advancing() {
        let mazes = open_maze(1, 3);
        let mut cells = [IVec2::new(0, 1); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 2);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Ladder.slot()] = IVec2::new(0, 0);
        let mut game = game_with(mazes, cells, View::new(0), 0);
        assert_eq!(game.phase, MazePhase::Exploring);
        assert!(game.presence.start);

        assert!(!game.advance());
        game.try_move(Direction::Forward);
        game.try_move(Direction::Forward);
        assert_eq!(game.phase, MazePhase::AtEnd);
        assert!(game.events.contains(&MazeEvent::ReachedEnd));

        let size = game.size;
        assert!(game.advance());
        assert_eq!(game.score, 1);
        assert_eq!(game.size, size + 1);
        assert_eq!(game.mazes.base().width(), size + 1);
        assert_eq!(game.player.turns(), 0);
        assert_eq!(
            game.player.canonical(),
            game.landmarks.canonical(LandmarkKind::Start)
        );
    }

    #[test]
    fn test_leaving_end_returns_to_exploring() {
        let mazes = open_maze(1, 3);
        let mut cells = [IVec2::new(0, 2); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 1);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Ladder.slot()] = IVec2::new(0, 0);
        let mut game = game_with(mazes, cells, View::new(0), 0);
        game.try_move(Direction::Forward);
        assert_eq!(game.phase, MazePhase::AtEnd);
        game.try_move(Direction::Backward);
        assert_eq!(game.phase, MazePhase::Exploring);
    }

    #[test]
    fn test_grim_reaper_in_dead_end_is_fatal() {
        // Walking north up a 1-wide corridor: the top cell is a dead end
        let mazes = open_maze(1, 3);
        let mut cells = [IVec2::new(0, 1); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 2);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 2);
        cells[LandmarkKind::GrimReaper.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Ladder.slot()] = IVec2::new(0, 2);
        let mut game = game_with(mazes, cells, View::new(2), 1);
        // Move off the start/end cell first so the markers at (0,1) do not matter
        game.try_move(Direction::Forward);
        game.try_move(Direction::Forward);
        assert_eq!(game.phase, MazePhase::Ended(Encounter::GrimReaper));
        assert!(game.is_over());

        let frozen = game.player;
        assert_eq!(game.try_move(Direction::Backward), MoveOutcome::Blocked);
        assert_eq!(game.player, frozen);

        game.reset();
        assert_eq!(game.phase, MazePhase::Exploring);
        assert_eq!(game.size, 2);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_grim_reaper_needs_positive_score() {
        let mazes = open_maze(1, 2);
        let mut cells = [IVec2::new(0, 1); 8];
        cells[LandmarkKind::GrimReaper.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Spider.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Note.slot()] = IVec2::new(0, 1);
        let mut game = game_with(mazes, cells, View::new(0), 0);
        game.try_move(Direction::Forward);
        assert_eq!(game.phase, MazePhase::Exploring);
        assert!(!game.presence.grim_reaper);
        assert!(game.presence.spider);
        assert_eq!(game.stats.count(LandmarkKind::GrimReaper), 1);
    }

    #[test]
    fn test_ladder_needs_odd_score_above_minimum() {
        let mazes = open_maze(1, 2);
        let mut cells = [IVec2::new(0, 1); 8];
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 1);
        cells[LandmarkKind::Ladder.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 1);

        let mut even = game_with(mazes.clone(), cells, View::new(1), 6);
        even.try_move(Direction::Forward);
        assert_eq!(even.phase, MazePhase::Exploring);

        let mut odd = game_with(mazes, cells, View::new(1), 7);
        odd.try_move(Direction::Forward);
        assert_eq!(odd.phase, MazePhase::Ended(Encounter::Ladder));
    }

    #[test]
    fn test_note_only_in_its_view() {
        let mazes = open_maze(3, 1);
        let mut cells = [IVec2::new(0, 0); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Note.slot()] = IVec2::new(1, 0);
        cells[LandmarkKind::Skeleton.slot()] = IVec2::new(2, 0);
        cells[LandmarkKind::Painting.slot()] = IVec2::new(2, 0);

        // Turning right faces east, which is view 3
        let mut seen = game_with(mazes.clone(), cells, View::new(3), 0);
        seen.try_move(Direction::Right);
        assert!(seen.presence.note);
        let message = seen.pick_note();
        assert!(message.is_some_and(|m| !m.is_empty()));
        assert_eq!(seen.pick_note(), Some(""));

        let mut hidden = game_with(mazes, cells, View::new(0), 0);
        hidden.try_move(Direction::Right);
        assert!(!hidden.presence.note);
        assert_eq!(hidden.pick_note(), None);
    }

    #[test]
    fn test_grim_reaper_spares_corridor() {
        let mazes = open_maze(1, 3);
        let mut cells = [IVec2::new(0, 2); 8];
        cells[LandmarkKind::GrimReaper.slot()] = IVec2::new(0, 1);
        let mut game = game_with(mazes, cells, View::new(2), 3);

        game.try_move(Direction::Forward);
        assert!(game.presence.walls.is_some_and(|c| c.is_corridor()));
        assert!(!game.presence.grim_reaper);
        assert_eq!(game.phase, MazePhase::Exploring);
        assert_eq!(game.stats.count(LandmarkKind::GrimReaper), 1);

        game.try_move(Direction::Forward);
        assert_eq!(game.phase, MazePhase::Exploring);
    }

    #[test]
    fn test_grim_reaper_hidden_by_marker() {
        for marker in [Some(LandmarkKind::Skeleton), Some(LandmarkKind::Note), None] {
            let mut cells = [IVec2::new(0, 2); 8];
            cells[LandmarkKind::GrimReaper.slot()] = IVec2::new(0, 0);
            if let Some(kind) = marker {
                cells[kind.slot()] = IVec2::new(0, 0);
            }
            let mut game = game_with(open_maze(1, 3), cells, View::new(0), 3);
            game.try_move(Direction::Forward);
            game.try_move(Direction::Forward);
            assert!(game.presence.walls.is_some_and(|c| c.is_dead_end()));

            match marker {
                Some(kind) => {
                    assert!(game.presence.is_present(kind), "{kind:?} should show");
                    assert!(!game.presence.grim_reaper);
                    assert_eq!(game.phase, MazePhase::Exploring);
                }
                None => assert_eq!(game.phase, MazePhase::Ended(Encounter::GrimReaper)),
            }
        }
    }

    #[test]
    fn test_painting_hidden_in_corridor() {
        // Side walls open: the painting hangs in a room
        let mut cells = [IVec2::new(2, 0); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Painting.slot()] = IVec2::new(1, 0);
        let mut room = game_with(open_maze(3, 1), cells, View::new(2), 0);
        room.player = Navigator::new(IVec2::new(1, 0), room.mazes.base().size());
        room.refresh();
        assert!(room.presence.painting);

        // Both side walls set: no painting
        let mut cells = [IVec2::new(0, 2); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Painting.slot()] = IVec2::new(0, 1);
        let mut corridor = game_with(open_maze(1, 3), cells, View::new(2), 0);
        corridor.player = Navigator::new(IVec2::new(0, 1), corridor.mazes.base().size());
        corridor.refresh();
        assert!(corridor.presence.walls.is_some_and(|c| c.is_corridor()));
        assert!(!corridor.presence.painting);
    }

    #[test]
    fn test_skeleton_hidden_on_start_and_end() {
        let mut cells = [IVec2::new(0, 1); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 2);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Ladder.slot()] = IVec2::new(0, 0);

        cells[LandmarkKind::Skeleton.slot()] = IVec2::new(0, 2);
        let on_start = game_with(open_maze(1, 3), cells, View::new(2), 0);
        assert!(on_start.presence.start);
        assert!(!on_start.presence.skeleton);

        cells[LandmarkKind::Skeleton.slot()] = IVec2::new(0, 0);
        let mut on_end = game_with(open_maze(1, 3), cells, View::new(2), 0);
        on_end.try_move(Direction::Forward);
        on_end.try_move(Direction::Forward);
        assert_eq!(on_end.phase, MazePhase::AtEnd);
        assert!(!on_end.presence.skeleton);
        assert_eq!(on_end.stats.count(LandmarkKind::Skeleton), 0);
    }

    #[test]
    fn test_turn_counter_wraps() {
        let mazes = open_maze(4, 1);
        let mut nav = Navigator::new(IVec2::new(0, 0), mazes.base().size());
        nav.turns = i32::MAX;
        assert_eq!(nav.facing(), Heading::West);

        assert_eq!(nav.try_move(&mazes, Direction::Backward), MoveOutcome::Moved);
        assert_eq!(nav.turns(), i32::MIN + 1);
        assert_eq!(nav.facing(), Heading::East);
        assert_eq!(nav.canonical(), IVec2::new(1, 0));
    }

    #[test]
    fn test_visits_count_once_per_stay() {
        let mazes = open_maze(3, 1);
        let mut cells = [IVec2::new(2, 0); 8];
        cells[LandmarkKind::Start.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::End.slot()] = IVec2::new(0, 0);
        cells[LandmarkKind::Spider.slot()] = IVec2::new(1, 0);
        let mut game = game_with(mazes, cells, View::new(0), 0);

        game.try_move(Direction::Right);
        assert_eq!(game.stats.count(LandmarkKind::Spider), 1);
        // Bumping into a wall does not leave the cell
        game.try_move(Direction::Left);
        game.refresh();
        assert_eq!(game.stats.count(LandmarkKind::Spider), 1);
        // Leave and come back
        game.try_move(Direction::Forward);
        game.try_move(Direction::Backward);
        assert_eq!(game.stats.count(LandmarkKind::Spider), 2);
    }

    #[test]
    fn test_single_cell_game_starts_at_end() {
        let tuning = MazeTuning {
            start_size: 1,
            ..MazeTuning::default()
        };
        let game = MazeGame::new(9, tuning);
        assert_eq!(game.mazes.base().carved_walls(), 0);
        assert_eq!(game.phase, MazePhase::AtEnd);
    }

    proptest! {
        #[test]
        fn prop_walk_and_return(seed in any::<u64>(), size in 2usize..8, steps in proptest::collection::vec(0usize..4, 0..40)) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mazes = MazeSet::generate(size, size, &mut rng);
            let dims = mazes.base().size();
            let mut nav = Navigator::new(IVec2::new(0, 0), dims);
            let start = nav.positions();

            let mut walked = Vec::new();
            for pick in steps {
                let dir = Direction::ALL[pick];
                let heading = dir.heading_from(nav.view());
                if nav.try_move(&mazes, dir) == MoveOutcome::Moved {
                    walked.push(heading);
                }
            }
            for heading in walked.iter().rev() {
                prop_assert_eq!(nav.try_step(&mazes, heading.opposite()), MoveOutcome::Moved);
            }
            prop_assert_eq!(nav.positions(), start);
        }

        #[test]
        fn prop_blocked_moves_leave_state(seed in any::<u64>(), size in 1usize..6, pick in 0usize..4) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mazes = MazeSet::generate(size, size, &mut rng);
            let mut nav = Navigator::new(IVec2::new(0, 0), mazes.base().size());
            let dir = Direction::ALL[pick];
            let before = nav;
            if nav.try_move(&mazes, dir) == MoveOutcome::Blocked {
                prop_assert_eq!(nav, before);
            } else {
                prop_assert_ne!(nav.canonical(), before.canonical());
            }
        }
    }
}
