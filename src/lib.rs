pub mod config;
pub mod engine;
pub mod tracks;

pub use config::{Config, TrackConfig};
pub use engine::anim::Timeline;
pub use engine::choreo::{
    Choreographer, EntityConfig, EntityPhase, EntityState, Frame, Orientation, Settle,
};
pub use engine::curve::{Curve, PathCommand, PathError};
pub use engine::math::Vec2;
pub use engine::spring::{Spring, SpringParams};
pub use engine::zone::{ZoneTable, ZoneTableError};
