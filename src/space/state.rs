//! Orbit game state
//!
//! Bodies live in one list with the star first. Timers are stored as the
//! simulated time at which they last fired, so `dt` only ever advances
//! `time`.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, BodyKind};
use super::collision::StarContact;
use super::gravity::circular_orbit_velocity;
use crate::polar_to_cartesian;
use crate::settings::{BodyPreset, LevelSpec, SpaceTuning};

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceEvent {
    Placed { id: u32 },
    PresetSelected(BodyPreset),
    Escaped { id: u32 },
    Crashed { id: u32, penalty: i64 },
    /// Two bodies hit each other and were both destroyed
    Collided { a: u32, b: u32, at: DVec2 },
    SurvivalBonus { amount: i64 },
    RogueSpawned { id: u32 },
    LevelComplete { number: u32 },
    /// Every level in the table is done
    AllLevelsComplete,
    Reset,
}

/// Orbit game state
#[derive(Debug, Clone)]
pub struct SpaceState {
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: SpaceTuning,
    /// Star first, then planets and rogues in spawn order
    pub bodies: Vec<Body>,
    pub score: i64,
    /// Simulated seconds since the last reset
    pub time: f64,
    /// Index into the level table; equals completed levels
    pub level_index: usize,
    /// When the current level's hold started
    pub level_timer_start: f64,
    pub last_bonus: f64,
    pub last_rogue: f64,
    /// Preset used for the next placement
    pub preset: BodyPreset,
    /// Events produced by the last tick
    pub events: Vec<SpaceEvent>,
    next_id: u32,
}

impl SpaceState {
    pub fn new(seed: u64, tuning: SpaceTuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            preset: tuning.initial_preset,
            tuning,
            bodies: Vec::new(),
            score: 0,
            time: 0.0,
            level_index: 0,
            level_timer_start: 0.0,
            last_bonus: 0.0,
            last_rogue: 0.0,
            events: Vec::new(),
            next_id: 0,
        };
        state.spawn_star();
        log::info!("New orbit game (seed {})", seed);
        state
    }

    /// Clear the system back to a lone star at level 1
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.score = 0;
        self.time = 0.0;
        self.level_index = 0;
        self.level_timer_start = 0.0;
        self.last_bonus = 0.0;
        self.last_rogue = 0.0;
        self.preset = self.tuning.initial_preset;
        self.next_id = 0;
        self.spawn_star();
        log::info!("Orbit game reset");
        self.events.push(SpaceEvent::Reset);
    }

    fn spawn_star(&mut self) {
        let id = self.next_entity_id();
        self.bodies.push(Body::new(
            id,
            BodyKind::Star,
            self.tuning.star_pos,
            DVec2::ZERO,
            self.tuning.star_mass,
            self.tuning.star_radius,
        ));
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn star(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_star())
    }

    /// Bodies other than the star
    pub fn planet_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_star()).count()
    }

    /// Completed level count
    pub fn difficulty(&self) -> usize {
        self.level_index
    }

    /// The level being played, `None` once the table is exhausted
    pub fn current_level(&self) -> Option<&LevelSpec> {
        self.tuning.levels.get(self.level_index)
    }

    /// Seconds the current level's target has been held
    pub fn level_elapsed(&self) -> f64 {
        self.time - self.level_timer_start
    }

    /// Switch the placement preset (0-based index into the preset table)
    pub fn select_preset(&mut self, index: usize) -> bool {
        let Some(preset) = self.tuning.presets.get(index).copied() else {
            return false;
        };
        self.preset = preset;
        self.events.push(SpaceEvent::PresetSelected(preset));
        true
    }

    /// Place a planet on a circular orbit through `pos`.
    ///
    /// Ignored when `pos` is the star's center.
    pub fn place_body(&mut self, pos: DVec2) -> Option<u32> {
        let star = self.star()?;
        let vel = circular_orbit_velocity(star.pos, star.mass, self.tuning.g, pos)?;
        let id = self.next_entity_id();
        self.bodies.push(Body::new(
            id,
            BodyKind::Planet,
            pos,
            vel,
            self.preset.mass,
            self.preset.radius,
        ));
        self.score += self.tuning.placement_score;
        log::debug!("Placed body {} at ({:.1}, {:.1})", id, pos.x, pos.y);
        self.events.push(SpaceEvent::Placed { id });
        Some(id)
    }

    /// Launch a rogue body on a tangential path around the star
    pub fn spawn_rogue(&mut self) -> Option<u32> {
        let center = self.star()?.pos;
        let tuning = &self.tuning;
        let (dist_lo, dist_hi) = tuning.rogue_distance;
        let (speed_lo, speed_hi) = tuning.rogue_speed;
        let (mass_lo, mass_hi) = tuning.rogue_mass;
        let (radius_lo, radius_hi) = tuning.rogue_radius;

        let angle = self.rng.random_range(0.0..std::f64::consts::TAU);
        let distance = self.rng.random_range(dist_lo..=dist_hi) as f64;
        let speed = self.rng.random_range(speed_lo..=speed_hi);
        let mass = self.rng.random_range(mass_lo..=mass_hi);
        let radius = self.rng.random_range(radius_lo..=radius_hi) as f64;

        let pos = center + polar_to_cartesian(distance, angle);
        let vel = DVec2::new(-angle.sin(), angle.cos()) * speed;
        let id = self.next_entity_id();
        self.bodies
            .push(Body::new(id, BodyKind::Rogue, pos, vel, mass, radius));
        log::debug!("Rogue body {} spawned {:.0} from the star", id, distance);
        self.events.push(SpaceEvent::RogueSpawned { id });
        Some(id)
    }

    /// Book a star contact
    pub(crate) fn record_contact(&mut self, body: &Body, contact: StarContact) {
        match contact {
            StarContact::Escaped => {
                log::debug!("Body {} escaped", body.id);
                self.events.push(SpaceEvent::Escaped { id: body.id });
            }
            StarContact::Crashed => {
                let penalty = self.tuning.collision_penalty(self.difficulty());
                self.score -= penalty;
                log::debug!("Body {} fell into the star (-{})", body.id, penalty);
                self.events.push(SpaceEvent::Crashed {
                    id: body.id,
                    penalty,
                });
            }
        }
    }
}
