//! Configuration errors
//!
//! A session is never built from partially-valid data: every problem with a
//! layout or tuning table is reported here, before the first tick.

use thiserror::Error;

use crate::sim::LevelVariant;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("frame budget must be positive")]
    ZeroFrameBudget,

    #[error("level has no platforms")]
    NoPlatforms,

    #[error("{kind} #{index} has an empty waypoint list")]
    EmptyWaypoints { kind: &'static str, index: usize },

    #[error("{kind} #{index} has a non-finite position")]
    NonFinitePosition { kind: &'static str, index: usize },

    #[error("{kind} #{index} at ({x}, {y}) lies outside the screen")]
    OffScreen {
        kind: &'static str,
        index: usize,
        x: f32,
        y: f32,
    },

    #[error("{kind} is not available in the {variant:?} variant")]
    UnsupportedEntity {
        kind: &'static str,
        variant: LevelVariant,
    },

    #[error("tuning value `{name}` = {value} is out of range")]
    InvalidTuning { name: &'static str, value: f32 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
