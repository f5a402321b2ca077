//! Rotation views, relative directions and the movement table
//!
//! A view is one of four clockwise rotations of the base maze. The player
//! always looks "up" the active view, so turning right means switching to
//! the view in which east is at the top.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Side;

/// Rotation index: 0 = base, 1 = 90°, 2 = 180°, 3 = 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct View(u8);

impl View {
    pub const ALL: [View; 4] = [View(0), View(1), View(2), View(3)];

    pub fn new(index: usize) -> Self {
        View((index % 4) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Active view for an accumulated turn counter.
    ///
    /// Residues 0, 1, 2, 3 map to views 0, 3, 2, 1, so a turn to the right
    /// followed by a turn to the left lands back on the same view.
    pub fn from_turns(turns: i32) -> Self {
        const BY_RESIDUE: [u8; 4] = [0, 3, 2, 1];
        View(BY_RESIDUE[turns.rem_euclid(4) as usize])
    }

    /// Compass heading at the top of this view
    pub fn heading(self) -> Heading {
        match self.0 {
            0 => Heading::North,
            1 => Heading::West,
            2 => Heading::South,
            _ => Heading::East,
        }
    }

    /// Map a canonical cell of a `size.x × size.y` base maze into this view
    pub fn project(self, pos: IVec2, size: IVec2) -> IVec2 {
        let (w, h) = (size.x, size.y);
        match self.0 {
            0 => pos,
            1 => IVec2::new(h - 1 - pos.y, pos.x),
            2 => IVec2::new(w - 1 - pos.x, h - 1 - pos.y),
            _ => IVec2::new(pos.y, w - 1 - pos.x),
        }
    }

    /// Inverse of [`View::project`]
    pub fn unproject(self, pos: IVec2, size: IVec2) -> IVec2 {
        let (w, h) = (size.x, size.y);
        match self.0 {
            0 => pos,
            1 => IVec2::new(pos.y, h - 1 - pos.x),
            2 => IVec2::new(w - 1 - pos.x, h - 1 - pos.y),
            _ => IVec2::new(w - 1 - pos.y, pos.x),
        }
    }

    /// Rotate a canonical displacement into this view's frame
    pub fn rotate_delta(self, delta: IVec2) -> IVec2 {
        match self.0 {
            0 => delta,
            1 => IVec2::new(-delta.y, delta.x),
            2 => -delta,
            _ => IVec2::new(delta.y, -delta.x),
        }
    }
}

/// Project a canonical position into all four views at once
pub fn project_all(pos: IVec2, size: IVec2) -> [IVec2; 4] {
    View::ALL.map(|v| v.project(pos, size))
}

/// Compass direction in the base maze's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    const CLOCKWISE: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    fn ordinal(self) -> i32 {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Heading after `quarter_turns` clockwise quarter turns (negative = counter-clockwise)
    pub fn turned(self, quarter_turns: i32) -> Heading {
        Self::CLOCKWISE[(self.ordinal() + quarter_turns).rem_euclid(4) as usize]
    }

    /// Quarter turns clockwise from `self` to `other`
    pub fn turns_to(self, other: Heading) -> i32 {
        (other.ordinal() - self.ordinal()).rem_euclid(4)
    }

    /// Grid step in base coordinates
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::North => IVec2::new(0, -1),
            Heading::East => IVec2::new(1, 0),
            Heading::South => IVec2::new(0, 1),
            Heading::West => IVec2::new(-1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        self.turned(2)
    }
}

/// Move relative to the player's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// Change applied to the turn counter
    pub fn turn_delta(self) -> i32 {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 2,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Wall checked in the active view's maze before moving
    pub fn side(self) -> Side {
        match self {
            Direction::Forward => Side::Top,
            Direction::Backward => Side::Bottom,
            Direction::Left => Side::Left,
            Direction::Right => Side::Right,
        }
    }

    /// Relative direction that walks toward `target` while facing `facing`
    pub fn toward(facing: Heading, target: Heading) -> Direction {
        match facing.turns_to(target) {
            0 => Direction::Forward,
            1 => Direction::Right,
            2 => Direction::Backward,
            _ => Direction::Left,
        }
    }

    /// Heading actually walked when moving this way from `view`
    pub fn heading_from(self, view: View) -> Heading {
        view.heading().turned(self.turn_delta())
    }
}

/// Per-view displacement of one move: `view_deltas(v, d)[k]` is how the
/// player's position in view `k` changes when moving `d` while `v` is active
pub fn view_deltas(view: View, direction: Direction) -> [IVec2; 4] {
    DELTA_TABLE[view.index()][direction_slot(direction)]
}

fn direction_slot(direction: Direction) -> usize {
    match direction {
        Direction::Forward => 0,
        Direction::Backward => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

/// `DELTA_TABLE[active view][direction][view k]`
static DELTA_TABLE: std::sync::LazyLock<[[[IVec2; 4]; 4]; 4]> = std::sync::LazyLock::new(|| {
    View::ALL.map(|active| {
        Direction::ALL.map(|dir| {
            let step = dir.heading_from(active).delta();
            View::ALL.map(|k| k.rotate_delta(step))
        })
    })
});
