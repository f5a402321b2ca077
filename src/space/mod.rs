//! Orbit engine
//!
//! Bodies circle a single star under mutual gravity. The player places
//! planets and must keep enough of them alive long enough to clear each
//! level. Pure and deterministic for a given seed and input sequence.

pub mod body;
pub mod collision;
pub mod gravity;
pub mod state;
pub mod tick;

pub use body::{Body, BodyKind};
pub use collision::{StarContact, cull_against_star, find_pair_collision, star_contact};
pub use gravity::{MIN_SEPARATION, acceleration_on, circular_orbit_velocity, integrate};
pub use state::{SpaceEvent, SpaceState};
pub use tick::{SpaceInput, tick};
