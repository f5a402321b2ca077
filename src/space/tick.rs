//! Per-frame orbit update
//!
//! Physics steps once per tick regardless of `dt`; `dt` only advances the
//! clock that drives the bonus, rogue and level timers.

use glam::DVec2;

use super::collision::{cull_against_star, find_pair_collision};
use super::gravity::integrate;
use super::state::{SpaceEvent, SpaceState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct SpaceInput {
    /// Preset index chosen this frame (keys 1-3 map to 0-2)
    pub preset: Option<usize>,
    /// World position clicked this frame
    pub place: Option<DVec2>,
    /// Start over
    pub reset: bool,
}

impl SpaceInput {
    pub fn place(pos: DVec2) -> Self {
        Self {
            place: Some(pos),
            ..Default::default()
        }
    }
}

/// Advance the orbit game by one frame
pub fn tick(state: &mut SpaceState, input: &SpaceInput, dt: f64) {
    state.events.clear();

    if input.reset {
        state.reset();
        return;
    }

    // === INPUT ===
    if let Some(index) = input.preset {
        state.select_preset(index);
    }
    if let Some(pos) = input.place {
        state.place_body(pos);
    }

    state.time += dt;
    let difficulty = state.difficulty();

    // === GRAVITY ===
    integrate(
        &mut state.bodies,
        state.tuning.g,
        state.tuning.gravity_multiplier(difficulty),
        state.tuning.trail_length,
    );

    // === STAR CONTACT ===
    for (body, contact) in cull_against_star(&mut state.bodies, state.tuning.escape_radius) {
        state.record_contact(&body, contact);
    }

    // === BODY COLLISION ===
    // At most one pair per tick; both bodies are destroyed and the hold restarts
    if let Some((i, j)) = find_pair_collision(&state.bodies) {
        let b = state.bodies.remove(j);
        let a = state.bodies.remove(i);
        let at = (a.pos + b.pos) * 0.5;
        log::debug!("Bodies {} and {} collided", a.id, b.id);
        state.level_timer_start = state.time;
        state.events.push(SpaceEvent::Collided {
            a: a.id,
            b: b.id,
            at,
        });
    }

    // === SURVIVAL BONUS ===
    if state.time - state.last_bonus >= state.tuning.bonus_interval {
        state.score += state.tuning.bonus_score;
        state.last_bonus = state.time;
        state.events.push(SpaceEvent::SurvivalBonus {
            amount: state.tuning.bonus_score,
        });
    }

    // === ROGUE SPAWN ===
    if state.level_index >= state.tuning.rogue_min_level
        && state.time - state.last_rogue >= state.tuning.rogue_interval(difficulty)
    {
        state.spawn_rogue();
        state.last_rogue = state.time;
    }

    check_level(state);
}

/// Hold the target long enough and the level is done
fn check_level(state: &mut SpaceState) {
    let Some(level) = state.current_level().copied() else {
        return;
    };
    let planets = state.planet_count();
    if planets < level.target_planets {
        state.level_timer_start = state.time;
        return;
    }
    if state.level_elapsed() < level.survive_time {
        return;
    }

    log::info!("Level {} complete (score {})", level.number, state.score);
    state.events.push(SpaceEvent::LevelComplete {
        number: level.number,
    });
    state.level_index += 1;
    state.level_timer_start = state.time;
    if state.current_level().is_none() {
        log::info!("All levels complete");
        state.events.push(SpaceEvent::AllLevelsComplete);
    }
}
