//! The full-page competition track: one robot driving the course with a
//! zone readout for each stage of the mission.

use crate::config::{EntityEntry, TrackConfig, ZoneEntry};
use crate::engine::spring::SpringParams;

/// Robot route through the arena, in the arena's own 600x750 space:
/// start box, box pickup detour, up the main path, across to the green
/// path, up the straight ramp, and onto the target platform.
const PATH: &str = "M 330 700 \
                    L 330 630 L 290 630 L 330 630 \
                    L 330 450 \
                    L 280 450 L 230 450 \
                    L 155 400 \
                    L 170 320 L 170 210 \
                    L 140 195 L 140 170 L 140 145 L 140 125 L 140 120";

const ZONES: [(f32, &str); 11] = [
    (0.05, "START"),
    (0.15, "PICKUP BOX"),
    (0.30, "BLACK PATH"),
    (0.40, "PATH SPLIT"),
    (0.50, "GREEN PATH"),
    (0.55, "RE-UPLOAD POINT"),
    (0.65, "CLIMBING RAMP"),
    (0.75, "BLUE RING"),
    (0.85, "RED RING"),
    (0.92, "GREEN RING"),
    (1.00, "BLACK CENTER - SHOOT"),
];

pub fn track() -> TrackConfig {
    TrackConfig {
        path: PATH.to_string(),
        window_start: 0.0,
        spring: SpringParams {
            stiffness: 100.0,
            damping: 30.0,
            rest_delta: 1e-3,
        },
        zones: ZONES
            .iter()
            .map(|(bound, label)| ZoneEntry {
                bound: *bound,
                label: label.to_string(),
            })
            .collect(),
        entities: vec![EntityEntry {
            name: "robot".to_string(),
            arc_offset: 0.0,
            spin: None,
            lookahead: 1.0,
            settle: None,
        }],
    }
}
