//! Rotamaze - two small deterministic game engines
//!
//! Core modules:
//! - `maze`: Perfect maze generation, four rotated views, relative navigation
//! - `space`: N-body orbits around a star, collisions, level progression
//! - `settings`: Data-driven tuning for both engines

pub mod maze;
pub mod settings;
pub mod space;

pub use settings::{Settings, SettingsError};
pub use space::gravity::circular_orbit_velocity;

use glam::DVec2;

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one physics step per tick)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Default settings file looked up by the binary
    pub const SETTINGS_FILE: &str = "rotamaze.json";
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_polar_keeps_radius() {
        let pos = polar_to_cartesian(250.0, PI / 3.0);
        assert!((pos.length() - 250.0).abs() < 1e-9);
        assert!((pos.y.atan2(pos.x) - PI / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar_axes() {
        let up = polar_to_cartesian(2.0, PI / 2.0);
        assert!(up.x.abs() < 1e-12);
        assert!((up.y - 2.0).abs() < 1e-12);
    }
}
