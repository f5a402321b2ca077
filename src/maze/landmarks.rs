//! Points of interest placed once per maze
//!
//! Positions are stored in base coordinates only and projected into a view
//! when asked for.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::view::{View, project_all};

/// Kinds of landmark, in the order they are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandmarkKind {
    Start,
    End,
    Skeleton,
    Painting,
    Note,
    GrimReaper,
    Spider,
    Ladder,
}

impl LandmarkKind {
    pub const ALL: [LandmarkKind; 8] = [
        LandmarkKind::Start,
        LandmarkKind::End,
        LandmarkKind::Skeleton,
        LandmarkKind::Painting,
        LandmarkKind::Note,
        LandmarkKind::GrimReaper,
        LandmarkKind::Spider,
        LandmarkKind::Ladder,
    ];

    /// Markers whose visits are tallied
    pub const MARKERS: [LandmarkKind; 5] = [
        LandmarkKind::Skeleton,
        LandmarkKind::Painting,
        LandmarkKind::Note,
        LandmarkKind::GrimReaper,
        LandmarkKind::Spider,
    ];

    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkKind::Start => "start",
            LandmarkKind::End => "end",
            LandmarkKind::Skeleton => "skeleton",
            LandmarkKind::Painting => "painting",
            LandmarkKind::Note => "note",
            LandmarkKind::GrimReaper => "grim reaper",
            LandmarkKind::Spider => "spider",
            LandmarkKind::Ladder => "ladder",
        }
    }
}

/// Landmark cells for one maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmarks {
    /// Base maze dimensions (x = width, y = height)
    size: IVec2,
    /// Base coordinates, indexed by `LandmarkKind::slot`
    cells: [IVec2; 8],
    /// The note can only be seen from this view
    pub note_view: View,
}

impl Landmarks {
    /// Place every landmark on a `size.x × size.y` base maze.
    ///
    /// Start sits somewhere on the bottom row, end and ladder in a top-row
    /// corner; the other markers land on any cell.
    pub fn place<R: Rng>(size: IVec2, rng: &mut R) -> Self {
        let (w, h) = (size.x.max(1), size.y.max(1));
        let any_cell = |rng: &mut R| IVec2::new(rng.random_range(0..w), rng.random_range(0..h));
        let top_corner = |rng: &mut R| IVec2::new(if rng.random_bool(0.5) { 0 } else { w - 1 }, 0);

        let start = IVec2::new(rng.random_range(0..w), h - 1);
        let end = top_corner(rng);
        let skeleton = any_cell(rng);
        let painting = any_cell(rng);
        let note = any_cell(rng);
        let note_view = View::new(rng.random_range(0..4));
        let grim_reaper = any_cell(rng);
        let spider = any_cell(rng);
        let ladder = top_corner(rng);

        Self {
            size,
            cells: [start, end, skeleton, painting, note, grim_reaper, spider, ladder],
            note_view,
        }
    }

    /// Build from explicit base coordinates (same order as `LandmarkKind::ALL`)
    pub fn from_cells(size: IVec2, cells: [IVec2; 8], note_view: View) -> Self {
        Self {
            size,
            cells,
            note_view,
        }
    }

    /// Base coordinates of a landmark
    pub fn canonical(&self, kind: LandmarkKind) -> IVec2 {
        self.cells[kind.slot()]
    }

    /// Position of a landmark as seen from `view`
    pub fn in_view(&self, kind: LandmarkKind, view: View) -> IVec2 {
        view.project(self.canonical(kind), self.size)
    }

    /// The landmark's position in each of the four views, in lock-step
    pub fn positions(&self, kind: LandmarkKind) -> [IVec2; 4] {
        project_all(self.canonical(kind), self.size)
    }
}
