//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one frame: movement first, then
//! the collision sweep over the updated positions, then the phase decision.

use serde::{Deserialize, Serialize};

use super::avatar;
use super::body;
use super::projectile;
use super::resolve::resolve;
use super::state::{LevelSession, LevelVariant, SessionPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Held this tick; takes priority over `move_right`
    pub move_left: bool,
    pub move_right: bool,
    /// Climb up a ladder (held)
    pub move_up: bool,
    /// Climb down a ladder (held)
    pub move_down: bool,
    /// Pressed this tick
    pub jump: bool,
    /// Pressed this tick; fires the ranged weapon
    pub fire: bool,
    /// Pressed this tick; acknowledges a terminal outcome
    pub confirm: bool,
}

/// Outcome reported after every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub completed: bool,
    pub game_over: bool,
    pub score: u32,
    pub seconds_left: u32,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut LevelSession, input: &TickInput) -> SessionResult {
    if session.phase.is_terminal() {
        if input.confirm {
            session.acknowledge();
        }
        return session.result();
    }

    session.frame += 1;
    let armed = session.variant == LevelVariant::Armed;

    // Avatar (and its own shots)
    {
        let LevelSession {
            avatar,
            terrain,
            pickups,
            ammo,
            tuning,
            ..
        } = session;
        avatar::update(
            avatar,
            input,
            terrain,
            pickups,
            armed.then_some(ammo),
            tuning,
        );
    }

    session.boss.update(&session.terrain.platforms, &session.tuning);

    if armed {
        update_enemies(session);
        projectile::advance_all(&mut session.lobbed, session.tuning.screen);

        // Holding the melee weapon forfeits any ranged ammo
        if session.avatar.holds_melee() {
            session.ammo = 0;
        }
    }

    let hazard_params = session.tuning.hazard;
    for hazard in session.hazards.iter_mut().filter(|h| h.state.is_active()) {
        body::fall(
            &mut hazard.pos,
            &mut hazard.vel_y,
            hazard.size,
            &session.terrain.platforms,
            &hazard_params,
        );
    }

    let out_of_time = session.frame >= session.max_frames;

    let outcome = resolve(session);
    if outcome.score_delta > 0 {
        session.score += outcome.score_delta;
        log::debug!("Score: {}", session.score);
    }

    let completed = (super::collision::reached(&session.avatar, &session.boss)
        && session.avatar.holds_melee())
        || (armed && session.boss.defeated)
        || outcome.level_completed;

    // A win detected on the same tick as a loss still counts as a win
    if completed {
        session.phase = SessionPhase::Completed;
        log::info!(
            "Level completed at frame {} with score {}",
            session.frame,
            session.score
        );
    } else if outcome.game_over || out_of_time {
        session.phase = SessionPhase::GameOver;
        log::info!(
            "Game over at frame {}{}, score {}",
            session.frame,
            if out_of_time { " (out of time)" } else { "" },
            session.score
        );
    }

    session.result()
}

fn update_enemies(session: &mut LevelSession) {
    let LevelSession {
        enemies,
        lobbed,
        terrain,
        tuning,
        ..
    } = session;
    let patrol = &tuning.patrol;

    for enemy in enemies.iter_mut().filter(|e| e.state.is_active()) {
        let params = if enemy.is_ranged() {
            &patrol.ranged
        } else {
            &patrol.plain
        };
        enemy.patrol(&terrain.platforms, params, patrol.speed);

        if let Some(thrown) =
            enemy.tick_shooter(patrol.shoot_interval, &tuning.lobbed, tuning.sprites.lobbed)
        {
            lobbed.push(thrown);
        }
    }
}

impl LevelSession {
    /// Advance by one tick; see [`tick`]
    pub fn step(&mut self, input: &TickInput) -> SessionResult {
        tick(self, input)
    }

    /// Current result without advancing
    pub fn result(&self) -> SessionResult {
        SessionResult {
            completed: self.phase == SessionPhase::Completed,
            game_over: self.phase == SessionPhase::GameOver,
            score: self.score,
            seconds_left: self.seconds_left(),
        }
    }
}
