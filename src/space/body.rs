//! Celestial bodies

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Role of a body in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// The central star; never culled
    Star,
    /// Placed by the player
    Planet,
    /// Spawned by the game at higher difficulty
    Rogue,
}

/// A body with position, velocity, mass and a short trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub kind: BodyKind,
    pub pos: DVec2,
    pub vel: DVec2,
    pub mass: f64,
    pub radius: f64,
    /// Recent positions, oldest first
    #[serde(skip)]
    pub trail: VecDeque<DVec2>,
}

impl Body {
    pub fn new(id: u32, kind: BodyKind, pos: DVec2, vel: DVec2, mass: f64, radius: f64) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            mass,
            radius,
            trail: VecDeque::new(),
        }
    }

    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        self.pos.distance(other.pos)
    }

    /// True when the two discs overlap
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// Append the current position, dropping the oldest beyond `max_len`
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }
}
