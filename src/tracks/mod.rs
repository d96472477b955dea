//! Built-in track definitions, carried over from the dashboard assets.

pub mod background;
pub mod mission;
