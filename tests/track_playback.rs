//! End-to-end playback of the built-in tracks: a simulated scroll ramp
//! driven through the full config -> curve -> filter -> choreography
//! pipeline, checking what the presentation layer would actually see.

use trackbot::{tracks, EntityPhase, Timeline, Vec2};

const DT: f32 = 1.0 / 60.0;

/// Steps the choreographer until the filter rests on `raw`.
fn hold(choreo: &mut trackbot::Choreographer, raw: f32) -> trackbot::Frame {
    let mut frame = choreo.update(DT, raw);
    for _ in 0..5000 {
        if choreo.is_at_rest(raw) {
            break;
        }
        frame = choreo.update(DT, raw);
    }
    frame
}

#[test]
fn mission_track_walks_every_zone_in_order() {
    let config = tracks::mission::track();
    let mut choreo = config.build().expect("mission track builds");

    let labels: Vec<String> = config.zones.iter().map(|z| z.label.clone()).collect();
    let mut visited: Vec<String> = Vec::new();

    let mut ramp = Timeline::new(4.0);
    while !(ramp.is_complete() && choreo.is_at_rest(ramp.eased_progress())) {
        ramp.advance(DT);
        let frame = choreo.update(DT, ramp.eased_progress());
        if let Some(zone) = frame.zone {
            if visited.last() != Some(&zone) {
                visited.push(zone);
            }
        }
    }

    assert_eq!(visited, labels, "zones skipped or out of order");

    // The run ends parked on the target center, facing somewhere real.
    let frame = hold(&mut choreo, 1.0);
    assert!((frame.progress - 1.0).abs() < 1e-6);
    assert_eq!(frame.entities[0].position, Vec2::new(140.0, 120.0));
    assert!(frame.entities[0].angle.is_finite());
}

#[test]
fn mission_robot_stays_on_the_course() {
    let config = tracks::mission::track();
    let mut choreo = config.build().unwrap();

    let mut ramp = Timeline::new(4.0);
    for _ in 0..120 {
        ramp.advance(DT);
        let frame = choreo.update(DT, ramp.eased_progress());
        let expected = choreo
            .curve()
            .point_at(frame.progress * choreo.curve().length());
        let drift = frame.entities[0].position.distance(expected);
        assert!(drift < 1e-3, "robot drifted {drift} off the course");
    }
}

#[test]
fn background_ball_settles_and_reverts_with_scrollback() {
    let config = tracks::background::track();
    let mut choreo = config.build().expect("background track builds");

    // Early in the page: ball rolling ahead of the robot.
    let frame = hold(&mut choreo, 0.25);
    assert_eq!(frame.entities[1].phase, EntityPhase::Following);

    // Past the settle threshold: parked dead center in the ring.
    let frame = hold(&mut choreo, 0.5);
    assert_eq!(frame.entities[1].phase, EntityPhase::Settled);
    assert_eq!(frame.entities[1].position, Vec2::new(1200.0, 280.0));

    // Scroll back up: the settle recomputes from live progress.
    let frame = hold(&mut choreo, 0.25);
    assert_eq!(frame.entities[1].phase, EntityPhase::Following);

    // And the robot itself never left the curve.
    let expected = choreo
        .curve()
        .point_at(frame.progress * choreo.curve().length());
    assert!(frame.entities[0].position.distance(expected) < 1e-3);
}

#[test]
fn background_ball_spin_follows_progress() {
    let config = tracks::background::track();
    let mut choreo = config.build().unwrap();

    let frame = hold(&mut choreo, 0.5);
    let expected = frame.progress * 720.0;
    assert!((frame.entities[1].angle - expected).abs() < 1e-3);
}
