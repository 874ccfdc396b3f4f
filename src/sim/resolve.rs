//! Collision resolution and scoring
//!
//! Runs once per tick after every entity has moved. The sweep order is fixed:
//! hazards, boss, enemies, lobbed projectiles, then the avatar's shots.

use super::collision::{self, overlaps, touching};
use super::state::{EntityState, LevelSession, LevelVariant};

/// What the sweep found this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub game_over: bool,
    /// A fired shot dealt the boss its final hit
    pub level_completed: bool,
    pub score_delta: u32,
}

impl CollisionOutcome {
    fn award(&mut self, points: u32, reason: &str) {
        self.score_delta += points;
        log::debug!("+{points} ({reason})");
    }
}

/// Resolve every avatar/entity and shot/entity contact
pub fn resolve(session: &mut LevelSession) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    hazards(session, &mut outcome);
    boss(session, &mut outcome);

    if session.variant == LevelVariant::Armed {
        enemies(session, &mut outcome);
        lobbed(session, &mut outcome);
        shots(session, &mut outcome);
    }

    outcome
}

fn hazards(session: &mut LevelSession, outcome: &mut CollisionOutcome) {
    let avatar = &session.avatar;
    let tuning = &session.tuning;
    let apex = tuning.avatar.jump_speed.powi(2) / (2.0 * tuning.avatar.body.gravity);
    let body = avatar.bounds();

    for hazard in &mut session.hazards {
        // Awarded on every qualifying tick, not once per hazard
        if collision::jump_over(avatar, hazard, apex, crate::consts::JUMP_OVER_TOLERANCE) {
            outcome.award(tuning.scores.hazard_cleared, "hazard cleared");
        }

        if touching(&body, &*hazard) {
            if avatar.holds_melee() {
                hazard.state = EntityState::Destroyed;
                outcome.award(tuning.scores.hazard_destroyed, "hazard destroyed");
            } else {
                outcome.game_over = true;
            }
        }
    }
}

fn boss(session: &LevelSession, outcome: &mut CollisionOutcome) {
    let armed = session.variant == LevelVariant::Armed;
    if collision::reached(&session.avatar, &session.boss)
        && !session.avatar.holds_melee()
        && !(armed && session.boss.defeated)
    {
        outcome.game_over = true;
    }
}

fn enemies(session: &mut LevelSession, outcome: &mut CollisionOutcome) {
    let avatar = &session.avatar;
    let scores = &session.tuning.scores;
    let body = avatar.bounds();

    for enemy in &mut session.enemies {
        if !touching(&body, &*enemy) {
            continue;
        }
        if avatar.holds_melee() {
            enemy.state = EntityState::Destroyed;
            let points = if enemy.is_ranged() {
                scores.ranged_enemy
            } else {
                scores.plain_enemy
            };
            outcome.award(points, "enemy destroyed");
        } else {
            outcome.game_over = true;
        }
    }
}

fn lobbed(session: &mut LevelSession, outcome: &mut CollisionOutcome) {
    let body = session.avatar.bounds();
    session.lobbed.retain_mut(|projectile| {
        if touching(&body, &*projectile) {
            projectile.state = EntityState::Destroyed;
            outcome.game_over = true;
            return false;
        }
        true
    });
}

fn shots(session: &mut LevelSession, outcome: &mut CollisionOutcome) {
    let LevelSession {
        avatar,
        boss,
        enemies,
        tuning,
        ..
    } = session;

    avatar.shots.retain_mut(|shot| {
        if !shot.state.is_active() {
            return false;
        }

        if !boss.defeated && shot.bounds().intersects(&boss.bounds()) {
            // Consumed even when the hit lands inside the boss's invulnerability window
            shot.state = EntityState::Destroyed;
            if boss.take_hit(tuning.boss.hit_cooldown) {
                outcome.level_completed = true;
            }
            return false;
        }

        let Some(enemy) = enemies.iter_mut().find(|enemy| overlaps(&**enemy, &*shot)) else {
            return true;
        };
        enemy.state = EntityState::Destroyed;
        shot.state = EntityState::Destroyed;
        let points = if enemy.is_ranged() {
            tuning.scores.ranged_enemy
        } else {
            tuning.scores.plain_enemy
        };
        outcome.award(points, "enemy shot");
        false
    });
}
