//! The ambient page-background track: a robot sweeping from the top
//! right of a 1920x1080 scene to the bottom left, pushing a ball that
//! drops into the target ring part-way through.

use crate::config::{EntityEntry, SettleEntry, TrackConfig};
use crate::engine::spring::SpringParams;

/// Course from the start marker through the target ring, then weaving
/// around the obstacle zone and off the bottom-left edge.
const PATH: &str = "M 1850 80 \
                    C 1700 100, 1500 150, 1350 200 \
                    L 1250 250 \
                    L 1200 280 \
                    L 1150 300 \
                    C 1000 380, 850 450, 700 480 \
                    C 620 500, 600 510, 550 450 \
                    C 500 390, 480 420, 500 500 \
                    C 520 580, 560 600, 500 650 \
                    C 440 700, 380 680, 350 610 \
                    C 320 540, 280 580, 300 680 \
                    C 320 780, 250 820, 150 870 \
                    C 50 920, 0 950, -50 980";

/// Center of the blue target ring the ball drops into.
const RING: (f32, f32) = (1200.0, 280.0);

/// Progress at which the ball leaves the path for the ring center.
const BALL_SETTLE: f32 = 0.22;

/// Arc-length lead of the ball in front of the robot.
const BALL_LEAD: f32 = 40.0;

pub fn track() -> TrackConfig {
    TrackConfig {
        path: PATH.to_string(),
        // The animation only starts 15% down the page.
        window_start: 0.15,
        spring: SpringParams {
            stiffness: 150.0,
            damping: 20.0,
            rest_delta: 1e-4,
        },
        zones: Vec::new(),
        entities: vec![
            EntityEntry {
                name: "robot".to_string(),
                arc_offset: 0.0,
                spin: None,
                lookahead: 5.0,
                settle: None,
            },
            EntityEntry {
                name: "ball".to_string(),
                arc_offset: BALL_LEAD,
                spin: Some(720.0),
                lookahead: 1.0,
                settle: Some(SettleEntry {
                    threshold: BALL_SETTLE,
                    x: RING.0,
                    y: RING.1,
                }),
            },
        ],
    }
}
