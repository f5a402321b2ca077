//! Contact detection: body-body pairs and the star

use super::body::Body;

/// How a body left the system through the star check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarContact {
    /// Drifted beyond the escape radius
    Escaped,
    /// Touched the star
    Crashed,
}

/// Classify one body against the star
pub fn star_contact(body: &Body, star: &Body, escape_radius: f64) -> Option<StarContact> {
    let distance = body.distance_to(star);
    if distance > escape_radius {
        Some(StarContact::Escaped)
    } else if distance < body.radius + star.radius {
        Some(StarContact::Crashed)
    } else {
        None
    }
}

/// Remove every non-star body that escaped or crashed.
///
/// Scans from the back so removals never shift an index still to be
/// visited. Removed bodies come back in scan order.
pub fn cull_against_star(bodies: &mut Vec<Body>, escape_radius: f64) -> Vec<(Body, StarContact)> {
    let Some(star) = bodies.iter().find(|b| b.is_star()).cloned() else {
        return Vec::new();
    };

    let mut removed = Vec::new();
    for i in (0..bodies.len()).rev() {
        if bodies[i].is_star() {
            continue;
        }
        if let Some(contact) = star_contact(&bodies[i], &star, escape_radius) {
            removed.push((bodies.remove(i), contact));
        }
    }
    removed
}

/// First overlapping pair of non-star bodies, scanning `i < j`
pub fn find_pair_collision(bodies: &[Body]) -> Option<(usize, usize)> {
    for (i, a) in bodies.iter().enumerate() {
        if a.is_star() {
            continue;
        }
        for (j, b) in bodies.iter().enumerate().skip(i + 1) {
            if !b.is_star() && a.overlaps(b) {
                return Some((i, j));
            }
        }
    }
    None
}
