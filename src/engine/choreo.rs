use super::curve::Curve;
use super::math::Vec2;
use super::spring::Spring;
use super::zone::ZoneTable;
use log::debug;

/// How an entity's rotation is derived each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Face along the curve: tangent direction measured over `lookahead`
    /// units of arc length. Used by the primary mover.
    Heading { lookahead: f32 },
    /// Spin proportional to progress (`angle = p * rate`, degrees),
    /// unrelated to travel direction. Used by rolling follower objects.
    Spin { rate: f32 },
}

/// Leave the curve and sit at `point` once smoothed progress reaches
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    pub threshold: f32,
    pub point: Vec2,
}

#[derive(Debug, Clone)]
pub struct EntityConfig {
    pub name: String,
    /// Arc-length offset relative to the reference distance. Positive
    /// runs ahead of the primary mover, negative trails it.
    pub arc_offset: f32,
    pub orientation: Orientation,
    pub settle: Option<Settle>,
}

impl EntityConfig {
    pub fn mover(name: &str, lookahead: f32) -> Self {
        Self {
            name: name.to_string(),
            arc_offset: 0.0,
            orientation: Orientation::Heading { lookahead },
            settle: None,
        }
    }

    pub fn follower(name: &str, arc_offset: f32, spin_rate: f32) -> Self {
        Self {
            name: name.to_string(),
            arc_offset,
            orientation: Orientation::Spin { rate: spin_rate },
            settle: None,
        }
    }

    pub fn with_settle(mut self, threshold: f32, point: Vec2) -> Self {
        self.settle = Some(Settle { threshold, point });
        self
    }
}

/// `Following` while the entity tracks the curve; `Settled` once it has
/// passed its settle threshold and sits at the fixed target point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityPhase {
    Following,
    Settled,
}

/// Per-tick render state for one entity. Recomputed every update and
/// handed to the presentation layer; nothing here persists across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    pub position: Vec2,
    pub angle: f32,
    pub phase: EntityPhase,
}

/// Everything the presentation layer needs for one tick.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Smoothed progress after windowing and filtering.
    pub progress: f32,
    /// Current zone of the primary mover, when a zone table is configured.
    pub zone: Option<String>,
    /// One state per configured entity, in configuration order.
    pub entities: Vec<EntityState>,
}

/// Orchestrates every tracked entity along one shared curve from one
/// shared progress signal.
///
/// Settle policy: settle is recomputed from the live smoothed progress
/// each tick, so scrolling back below the threshold reverts the entity
/// to curve-following. The transition is observable through
/// [`EntityPhase`] and logged at debug level.
#[derive(Debug)]
pub struct Choreographer {
    curve: Curve,
    spring: Spring,
    window_start: f32,
    zones: Option<ZoneTable>,
    entities: Vec<EntityConfig>,
    last_angles: Vec<f32>,
    last_phases: Vec<EntityPhase>,
    last_zone: Option<String>,
}

impl Choreographer {
    pub fn new(curve: Curve, spring: Spring, entities: Vec<EntityConfig>) -> Self {
        let count = entities.len();
        Self {
            curve,
            spring,
            window_start: 0.0,
            zones: None,
            entities,
            last_angles: vec![0.0; count],
            last_phases: vec![EntityPhase::Following; count],
            last_zone: None,
        }
    }

    pub fn with_zones(mut self, zones: ZoneTable) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Ignore the first `start` fraction of raw progress and stretch the
    /// remainder over the whole track, the way a page-background track
    /// only starts moving some way down the page.
    pub fn with_window(mut self, start: f32) -> Self {
        self.window_start = start.clamp(0.0, 0.99);
        self
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn progress(&self) -> f32 {
        self.spring.value()
    }

    /// Whether the filter has converged on the current raw target.
    pub fn is_at_rest(&self, raw_progress: f32) -> bool {
        self.spring.is_at_rest(self.window(raw_progress))
    }

    fn window(&self, raw: f32) -> f32 {
        let raw = raw.clamp(0.0, 1.0);
        if self.window_start > 0.0 {
            ((raw - self.window_start) / (1.0 - self.window_start)).max(0.0)
        } else {
            raw
        }
    }

    /// Advances the progress filter by `dt` toward `raw_progress` and
    /// recomputes every entity's state. Must be called once per tick;
    /// everything downstream of the filter is a pure function of the
    /// smoothed value.
    pub fn update(&mut self, dt: f32, raw_progress: f32) -> Frame {
        let target = self.window(raw_progress);
        let p = self.spring.update(target, dt);
        let length = self.curve.length();
        let d_ref = p * length;

        let mut states = Vec::with_capacity(self.entities.len());
        for (i, entity) in self.entities.iter().enumerate() {
            let settled = entity
                .settle
                .map_or(false, |settle| p >= settle.threshold);
            let phase = if settled {
                EntityPhase::Settled
            } else {
                EntityPhase::Following
            };
            if phase != self.last_phases[i] {
                debug!("entity '{}' is now {:?} at p={:.3}", entity.name, phase, p);
                self.last_phases[i] = phase;
            }

            let distance = (d_ref + entity.arc_offset).clamp(0.0, length);
            let position = match entity.settle {
                Some(settle) if settled => settle.point,
                _ => self.curve.point_at(distance),
            };

            let angle = match entity.orientation {
                Orientation::Heading { lookahead } => {
                    // Keep the last valid heading when the lookahead
                    // collapses (end of path, degenerate curve).
                    match self.curve.heading(distance, lookahead) {
                        Some(angle) => {
                            self.last_angles[i] = angle;
                            angle
                        }
                        None => self.last_angles[i],
                    }
                }
                Orientation::Spin { rate } => p * rate,
            };

            states.push(EntityState {
                position,
                angle,
                phase,
            });
        }

        let zone = self.zones.as_ref().map(|t| t.classify(p).to_string());
        if zone != self.last_zone {
            if let Some(label) = &zone {
                debug!("entered zone '{}' at p={:.3}", label, p);
            }
            self.last_zone = zone.clone();
        }

        Frame {
            progress: p,
            zone,
            entities: states,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::curve::PathCommand;
    use crate::engine::spring::SpringParams;

    fn line_curve() -> Curve {
        Curve::build(&[
            PathCommand::MoveTo(Vec2::new(0.0, 0.0)),
            PathCommand::LineTo(Vec2::new(1000.0, 0.0)),
        ])
    }

    fn snappy_spring() -> Spring {
        // High stiffness so tests converge in little simulated time.
        Spring::new(SpringParams {
            stiffness: 2000.0,
            damping: 90.0,
            rest_delta: 1e-4,
        })
    }

    /// Drives the choreographer until the filter rests on `target`.
    fn settle_on(choreo: &mut Choreographer, target: f32) -> Frame {
        let mut frame = choreo.update(1.0 / 60.0, target);
        for _ in 0..2000 {
            if choreo.is_at_rest(target) {
                break;
            }
            frame = choreo.update(1.0 / 60.0, target);
        }
        frame
    }

    #[test]
    fn primary_mover_tracks_the_curve() {
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::mover("robot", 1.0)],
        );
        let frame = settle_on(&mut choreo, 0.5);
        let robot = &frame.entities[0];
        assert!((robot.position.x - 500.0).abs() < 1.0);
        assert_eq!(robot.position.y, 0.0);
        assert!(robot.angle.abs() < 1e-4); // facing +x
        assert_eq!(robot.phase, EntityPhase::Following);
    }

    #[test]
    fn follower_runs_ahead_by_arc_offset() {
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![
                EntityConfig::mover("robot", 1.0),
                EntityConfig::follower("ball", 40.0, 720.0),
            ],
        );
        let frame = settle_on(&mut choreo, 0.5);
        let robot = &frame.entities[0];
        let ball = &frame.entities[1];
        assert!((ball.position.x - robot.position.x - 40.0).abs() < 1e-3);
        assert!((ball.angle - 0.5 * 720.0).abs() < 0.5);
    }

    #[test]
    fn offsets_clamp_at_path_ends() {
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::follower("ball", 40.0, 720.0)],
        );
        let frame = settle_on(&mut choreo, 1.0);
        assert_eq!(frame.entities[0].position, Vec2::new(1000.0, 0.0));

        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::follower("trailer", -40.0, 720.0)],
        );
        let frame = choreo.update(1.0 / 60.0, 0.0);
        assert_eq!(frame.entities[0].position, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn settle_snaps_to_target_point_exactly() {
        let target = Vec2::new(1200.0, 280.0);
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::follower("ball", 40.0, 720.0).with_settle(0.22, target)],
        );

        let frame = settle_on(&mut choreo, 0.10);
        let ball = &frame.entities[0];
        assert_eq!(ball.phase, EntityPhase::Following);
        // On the curve at 0.10 * length + offset.
        assert!((ball.position.x - (100.0 + 40.0)).abs() < 1.0);

        let frame = settle_on(&mut choreo, 0.25);
        let ball = &frame.entities[0];
        assert_eq!(ball.phase, EntityPhase::Settled);
        assert_eq!(ball.position, target);
    }

    #[test]
    fn settle_reverts_when_progress_drops_below_threshold() {
        let target = Vec2::new(1200.0, 280.0);
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::follower("ball", 0.0, 720.0).with_settle(0.22, target)],
        );
        let frame = settle_on(&mut choreo, 0.5);
        assert_eq!(frame.entities[0].phase, EntityPhase::Settled);

        // Scrolling back below the threshold un-settles the ball.
        let frame = settle_on(&mut choreo, 0.1);
        let ball = &frame.entities[0];
        assert_eq!(ball.phase, EntityPhase::Following);
        assert!((ball.position.x - 100.0).abs() < 1.0);
    }

    #[test]
    fn zone_reported_for_primary_only_from_shared_progress() {
        let zones = ZoneTable::new(vec![
            (0.3, "A".to_string()),
            (0.6, "B".to_string()),
            (1.0, "C".to_string()),
        ])
        .unwrap();
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![
                EntityConfig::mover("robot", 1.0),
                // Offset far enough that its own distance is in a
                // different zone's range; the label must not care.
                EntityConfig::follower("ball", 400.0, 720.0),
            ],
        )
        .with_zones(zones);

        let frame = settle_on(&mut choreo, 0.5);
        assert_eq!(frame.zone.as_deref(), Some("B"));

        let frame = settle_on(&mut choreo, 1.0);
        assert_eq!(frame.zone.as_deref(), Some("C"));
    }

    #[test]
    fn no_zone_without_a_table() {
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::mover("robot", 1.0)],
        );
        let frame = choreo.update(1.0 / 60.0, 0.5);
        assert_eq!(frame.zone, None);
    }

    #[test]
    fn degenerate_curve_yields_safe_default_state() {
        let mut choreo = Choreographer::new(
            Curve::build(&[]),
            snappy_spring(),
            vec![EntityConfig::mover("robot", 1.0)],
        );
        let frame = settle_on(&mut choreo, 0.8);
        let robot = &frame.entities[0];
        assert_eq!(robot.position, Vec2::default());
        assert_eq!(robot.angle, 0.0);
    }

    #[test]
    fn heading_survives_path_end() {
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::mover("robot", 5.0)],
        );
        settle_on(&mut choreo, 0.5);
        let frame = settle_on(&mut choreo, 1.0);
        let robot = &frame.entities[0];
        // Lookahead collapses at the end; heading holds its last value.
        assert!(robot.angle.abs() < 1e-4);
        assert!(robot.angle.is_finite());
    }

    #[test]
    fn progress_window_delays_activation() {
        let mut choreo = Choreographer::new(
            line_curve(),
            snappy_spring(),
            vec![EntityConfig::mover("robot", 1.0)],
        )
        .with_window(0.15);

        let frame = settle_on(&mut choreo, 0.10);
        assert_eq!(frame.progress, 0.0);
        assert_eq!(frame.entities[0].position, Vec2::new(0.0, 0.0));

        // Raw 1.0 still maps to full progress.
        let frame = settle_on(&mut choreo, 1.0);
        assert!((frame.progress - 1.0).abs() < 1e-3);
    }
}
