//! Grid maze generation and rotation
//!
//! Mazes are perfect: every cell reachable, exactly one path between any
//! two cells. Rotation produces the view a player gets after turning.

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A single room of the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    /// Only meaningful while carving
    pub visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            top: true,
            bottom: true,
            left: true,
            right: true,
            visited: false,
        }
    }
}

impl Cell {
    /// Wall flag for a side
    pub fn wall(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn clear(&mut self, side: Side) {
        match side {
            Side::Top => self.top = false,
            Side::Bottom => self.bottom = false,
            Side::Left => self.left = false,
            Side::Right => self.right = false,
        }
    }

    /// Dead-end room: walled ahead and on both sides
    pub fn is_dead_end(&self) -> bool {
        self.top && self.left && self.right
    }

    /// Corridor: both side walls set
    pub fn is_corridor(&self) -> bool {
        self.left && self.right
    }
}

/// One side of a cell, in the maze's own frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Grid step toward this side (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Side::Top => IVec2::new(0, -1),
            Side::Bottom => IVec2::new(0, 1),
            Side::Left => IVec2::new(-1, 0),
            Side::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A `height` rows by `width` columns grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    width: usize,
    height: usize,
    /// Row-major, `cells[y * width + x]`
    cells: Vec<Cell>,
}

impl Maze {
    /// Fully walled grid
    pub fn walled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as a vector (x = width, y = height)
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Cell at `pos`, `None` outside the grid
    pub fn cell(&self, pos: IVec2) -> Option<&Cell> {
        if self.in_bounds(pos) {
            self.cells.get(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, pos: IVec2) -> Option<&mut Cell> {
        if self.in_bounds(pos) {
            self.cells.get_mut(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    /// Wall check at `pos`; out-of-bounds counts as walled
    pub fn has_wall(&self, pos: IVec2, side: Side) -> bool {
        self.cell(pos).is_none_or(|c| c.wall(side))
    }

    /// Iterate `(position, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (IVec2::new((i % width) as i32, (i / width) as i32), c))
    }

    /// Remove the wall between `pos` and its neighbour on `side`
    fn carve(&mut self, pos: IVec2, side: Side) {
        let next = pos + side.delta();
        if !self.in_bounds(pos) || !self.in_bounds(next) {
            return;
        }
        if let Some(cell) = self.cell_mut(pos) {
            cell.clear(side);
        }
        if let Some(cell) = self.cell_mut(next) {
            cell.clear(side.opposite());
        }
    }

    /// Number of interior walls removed (each shared wall counted once)
    pub fn carved_walls(&self) -> usize {
        self.iter()
            .map(|(pos, cell)| {
                let right_open = !cell.right && self.in_bounds(pos + Side::Right.delta());
                let bottom_open = !cell.bottom && self.in_bounds(pos + Side::Bottom.delta());
                right_open as usize + bottom_open as usize
            })
            .sum()
    }

    /// True when every cell can be reached from the top-left one
    pub fn is_connected(&self) -> bool {
        if self.cells.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![IVec2::ZERO];
        seen[0] = true;
        let mut reached = 1;
        while let Some(pos) = stack.pop() {
            for side in Side::ALL {
                if self.has_wall(pos, side) {
                    continue;
                }
                let next = pos + side.delta();
                if !self.in_bounds(next) {
                    continue;
                }
                let idx = next.y as usize * self.width + next.x as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }
        reached == self.cells.len()
    }

    /// Rotate 90° clockwise: a `W×H` maze becomes `H×W`,
    /// cell `(x, y)` moves to `(H-1-y, x)`
    pub fn rotate(&self) -> Maze {
        let (w, h) = (self.width, self.height);
        let mut rotated = Maze::walled(h, w);
        for (pos, cell) in self.iter() {
            let to = IVec2::new(h as i32 - 1 - pos.y, pos.x);
            if let Some(slot) = rotated.cell_mut(to) {
                *slot = Cell {
                    top: cell.left,
                    bottom: cell.right,
                    left: cell.bottom,
                    right: cell.top,
                    visited: cell.visited,
                };
            }
        }
        rotated
    }
}

/// Unvisited neighbours of `pos` paired with the side leading to them
fn unvisited_neighbors(maze: &Maze, pos: IVec2) -> Vec<(IVec2, Side)> {
    Side::ALL
        .iter()
        .map(|&side| (pos + side.delta(), side))
        .filter(|(next, _)| maze.cell(*next).is_some_and(|c| !c.visited))
        .collect()
}

/// Generate a perfect maze by randomized depth-first carving.
///
/// Starts from a random cell. Each stack frame holds a cell and its
/// shuffled neighbour list; neighbours visited in the meantime are skipped,
/// so every cell is entered exactly once and `width * height - 1` walls are
/// removed.
pub fn create_maze<R: Rng>(width: usize, height: usize, rng: &mut R) -> Maze {
    let mut maze = Maze::walled(width, height);
    if width == 0 || height == 0 {
        return maze;
    }

    let start = IVec2::new(
        rng.random_range(0..width) as i32,
        rng.random_range(0..height) as i32,
    );

    let mut stack: Vec<(IVec2, Vec<(IVec2, Side)>)> = Vec::new();
    if let Some(cell) = maze.cell_mut(start) {
        cell.visited = true;
    }
    let mut neighbors = unvisited_neighbors(&maze, start);
    neighbors.shuffle(rng);
    stack.push((start, neighbors));

    while let Some((pos, pending)) = stack.last_mut() {
        let pos = *pos;
        let Some((next, side)) = pending.pop() else {
            stack.pop();
            continue;
        };
        if maze.cell(next).is_none_or(|c| c.visited) {
            continue;
        }
        maze.carve(pos, side);
        if let Some(cell) = maze.cell_mut(next) {
            cell.visited = true;
        }
        let mut neighbors = unvisited_neighbors(&maze, next);
        neighbors.shuffle(rng);
        stack.push((next, neighbors));
    }

    log::debug!("Carved {}x{} maze from {:?}", width, height, start);
    maze
}

/// The base maze and its three clockwise rotations, indexed by view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSet {
    pub mazes: [Maze; 4],
}

impl MazeSet {
    /// Build all four views from a base maze
    pub fn from_base(base: Maze) -> Self {
        let r90 = base.rotate();
        let r180 = r90.rotate();
        let r270 = r180.rotate();
        Self {
            mazes: [base, r90, r180, r270],
        }
    }

    /// Generate a fresh `width × height` base and its rotations
    pub fn generate<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        Self::from_base(create_maze(width, height, rng))
    }

    pub fn base(&self) -> &Maze {
        &self.mazes[0]
    }

    /// Maze seen from a rotation index (0..4)
    pub fn view(&self, index: usize) -> &Maze {
        &self.mazes[index % 4]
    }
}
