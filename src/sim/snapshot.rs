//! Read-only render view of a session
//!
//! The renderer owns images and text layout; it draws whatever this snapshot
//! lists, in order, and never touches the session itself.

use glam::Vec2;
use serde::Serialize;

use super::state::{
    EnemyKind, Facing, LevelSession, PickupKind, ProjectileKind, SessionPhase, Weapon,
};

/// Which image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKey {
    Platform,
    Ladder,
    Avatar { weapon: Weapon, facing: Facing },
    /// Drawn faded once defeated
    Boss { defeated: bool },
    Hazard,
    PlainEnemy(Facing),
    RangedEnemy(Facing),
    Lobbed(Facing),
    Fired(Facing),
    MeleePickup,
    RangedPickup,
}

/// One drawable entity, centre-anchored
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub sprite: SpriteKey,
    pub pos: Vec2,
    pub size: Vec2,
    /// False on the "off" frames of the boss's post-hit flashing
    pub visible: bool,
}

impl EntityView {
    fn new(sprite: SpriteKey, pos: Vec2, size: Vec2) -> Self {
        Self {
            sprite,
            pos,
            size,
            visible: true,
        }
    }
}

/// Status line data
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub score: u32,
    pub seconds_left: u32,
    pub phase: SessionPhase,
    /// Shown in the armed variant only
    pub boss_health: Option<u8>,
    pub ammo: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Back to front; destroyed and collected entities are omitted
    pub entities: Vec<EntityView>,
    pub hud: Hud,
}

/// Build the view for the current frame
pub fn build_snapshot(session: &LevelSession) -> Snapshot {
    let terrain = &session.terrain;
    let mut entities = Vec::with_capacity(
        terrain.platforms.len()
            + terrain.ladders.len()
            + session.pickups.len()
            + session.hazards.len()
            + session.enemies.len()
            + session.lobbed.len()
            + session.avatar.shots.len()
            + 2,
    );

    entities.extend(
        terrain
            .platforms
            .iter()
            .map(|p| EntityView::new(SpriteKey::Platform, p.pos, p.size)),
    );
    entities.extend(
        terrain
            .ladders
            .iter()
            .map(|l| EntityView::new(SpriteKey::Ladder, l.pos, l.size)),
    );

    for pickup in session.pickups.iter().filter(|p| p.state.is_active()) {
        let sprite = match pickup.kind {
            PickupKind::Melee => SpriteKey::MeleePickup,
            PickupKind::Ranged => SpriteKey::RangedPickup,
        };
        entities.push(EntityView::new(sprite, pickup.pos, pickup.size));
    }

    let boss = &session.boss;
    entities.push(EntityView {
        visible: boss.defeated || boss.hit_cooldown == 0 || boss.hit_cooldown % 4 >= 2,
        ..EntityView::new(
            SpriteKey::Boss {
                defeated: boss.defeated,
            },
            boss.pos,
            boss.size,
        )
    });

    for hazard in session.hazards.iter().filter(|h| h.state.is_active()) {
        entities.push(EntityView::new(SpriteKey::Hazard, hazard.pos, hazard.size));
    }

    for enemy in session.enemies.iter().filter(|e| e.state.is_active()) {
        let sprite = match enemy.kind {
            EnemyKind::Plain => SpriteKey::PlainEnemy(enemy.facing),
            EnemyKind::Ranged { .. } => SpriteKey::RangedEnemy(enemy.facing),
        };
        entities.push(EntityView::new(sprite, enemy.pos, enemy.size));
    }

    let avatar = &session.avatar;
    entities.push(EntityView::new(
        SpriteKey::Avatar {
            weapon: avatar.weapon,
            facing: avatar.facing,
        },
        avatar.pos,
        avatar.size,
    ));

    for projectile in session
        .lobbed
        .iter()
        .chain(&avatar.shots)
        .filter(|p| p.state.is_active())
    {
        let sprite = match projectile.kind {
            ProjectileKind::Lobbed => SpriteKey::Lobbed(projectile.facing()),
            ProjectileKind::Fired => SpriteKey::Fired(projectile.facing()),
        };
        entities.push(EntityView::new(sprite, projectile.pos, projectile.size));
    }

    let armed = session.variant == super::LevelVariant::Armed;
    Snapshot {
        entities,
        hud: Hud {
            score: session.score,
            seconds_left: session.seconds_left(),
            phase: session.phase,
            boss_health: armed.then_some(boss.health),
            ammo: armed.then_some(session.ammo),
        },
    }
}

impl LevelSession {
    pub fn snapshot(&self) -> Snapshot {
        build_snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LevelLayout;
    use crate::sim::state::{EntityState, LevelVariant};
    use crate::tuning::Tuning;

    fn session(variant: LevelVariant) -> LevelSession {
        LevelSession::new(&LevelLayout::default_for(variant), Tuning::default())
            .expect("default layout is valid")
    }

    fn count(snapshot: &Snapshot, pred: impl Fn(&SpriteKey) -> bool) -> usize {
        snapshot.entities.iter().filter(|e| pred(&e.sprite)).count()
    }

    #[test]
    fn test_lists_every_active_entity() {
        let s = session(LevelVariant::Armed);
        let snap = s.snapshot();
        assert_eq!(
            count(&snap, |k| matches!(k, SpriteKey::Platform)),
            s.terrain.platforms.len()
        );
        let hazards = count(&snap, |k| matches!(k, SpriteKey::Hazard));
        assert_eq!(hazards, s.hazards.len());
        assert_eq!(count(&snap, |k| matches!(k, SpriteKey::Avatar { .. })), 1);
        assert_eq!(snap.hud.boss_health, Some(5));
        assert_eq!(snap.hud.ammo, Some(0));
    }

    #[test]
    fn test_destroyed_entities_are_omitted() {
        let mut s = session(LevelVariant::Basic);
        let hazards = s.hazards.len();
        s.hazards[0].state = EntityState::Destroyed;
        s.pickups[0].state = EntityState::Destroyed;
        let snap = s.snapshot();
        let drawn = count(&snap, |k| matches!(k, SpriteKey::Hazard));
        assert_eq!(drawn, hazards - 1);
        assert_eq!(count(&snap, |k| matches!(k, SpriteKey::MeleePickup)), 0);
        assert_eq!(snap.hud.boss_health, None);
    }

    #[test]
    fn test_boss_flashes_during_cooldown() {
        let mut s = session(LevelVariant::Armed);
        let boss_visible = |s: &LevelSession| {
            s.snapshot()
                .entities
                .iter()
                .find(|e| matches!(e.sprite, SpriteKey::Boss { .. }))
                .map(|e| e.visible)
        };
        s.boss.hit_cooldown = 19;
        assert_eq!(boss_visible(&s), Some(true));
        s.boss.hit_cooldown = 17;
        assert_eq!(boss_visible(&s), Some(false));
        s.boss.hit_cooldown = 0;
        assert_eq!(boss_visible(&s), Some(true));
    }
}
