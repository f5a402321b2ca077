//! Mutual Newtonian gravity
//!
//! Semi-implicit Euler, one step per tick: velocity first, then position,
//! both from the same tick's acceleration. Accelerations are computed from
//! a snapshot of all positions before any body moves, so the result does
//! not depend on list order. This differs from an in-place, list-order
//! update, where later bodies see positions already moved this tick:
//! planet-planet trajectories under the strong planet multiplier drift
//! apart from that scheme over time.

use glam::DVec2;

use super::body::Body;

/// Pairs closer than this exert no force on each other
pub const MIN_SEPARATION: f64 = 1e-2;

/// Acceleration body `index` feels from every other body.
///
/// `planet_multiplier` scales pairs that do not involve the star.
pub fn acceleration_on(bodies: &[Body], index: usize, g: f64, planet_multiplier: f64) -> DVec2 {
    let Some(this) = bodies.get(index) else {
        return DVec2::ZERO;
    };
    let mut acc = DVec2::ZERO;
    for (j, other) in bodies.iter().enumerate() {
        if j == index {
            continue;
        }
        let offset = other.pos - this.pos;
        let distance = offset.length();
        if distance < MIN_SEPARATION {
            continue;
        }
        let scale = if this.is_star() || other.is_star() {
            1.0
        } else {
            planet_multiplier
        };
        let magnitude = g * scale * other.mass / (distance * distance);
        acc += offset / distance * magnitude;
    }
    acc
}

/// Advance every body by one tick and record its trail
pub fn integrate(bodies: &mut [Body], g: f64, planet_multiplier: f64, trail_len: usize) {
    let accelerations: Vec<DVec2> = (0..bodies.len())
        .map(|i| acceleration_on(bodies, i, g, planet_multiplier))
        .collect();

    for (body, acc) in bodies.iter_mut().zip(accelerations) {
        body.vel += acc;
        body.pos += body.vel;
        body.record_trail(trail_len);
    }
}

/// Velocity for a circular orbit around `center` at `pos`.
///
/// Perpendicular to the radius, magnitude `sqrt(g * mass / d)`. `None` when
/// `pos` sits on the center.
pub fn circular_orbit_velocity(center: DVec2, central_mass: f64, g: f64, pos: DVec2) -> Option<DVec2> {
    let offset = pos - center;
    let distance = offset.length();
    if distance == 0.0 {
        return None;
    }
    let speed = (g * central_mass / distance).sqrt();
    Some(DVec2::new(-offset.y, offset.x) / distance * speed)
}
