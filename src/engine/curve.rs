use super::math::Vec2;
use svgtypes::{PathParser, PathSegment};
use thiserror::Error;

/// Subdivisions per curved segment in the arc-length table. Line segments
/// need no subdivision. At track coordinate scales (hundreds to ~2000
/// units) this keeps the polyline within a unit of the true curve.
const CURVE_TABLE_SAMPLES: usize = 32;

const LENGTH_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo(Vec2, Vec2),
    CubicTo(Vec2, Vec2, Vec2),
}

#[derive(Debug, Error)]
pub enum PathError {
    #[error("malformed path data: {0}")]
    Syntax(#[from] svgtypes::Error),
    #[error("unsupported path command: {0}")]
    Unsupported(&'static str),
}

/// Immutable 2D path with a precomputed arc-length sampling table.
///
/// Built once, then queried by distance along the path. Distances are
/// always clamped to `[0, length]`; a degenerate curve (no commands, or
/// zero total length) answers its start point for every query.
#[derive(Debug, Clone)]
pub struct Curve {
    points: Vec<Vec2>,
    cumulative: Vec<f32>,
    length: f32,
}

impl Curve {
    pub fn build(commands: &[PathCommand]) -> Self {
        let mut points: Vec<Vec2> = Vec::new();
        let mut cumulative: Vec<f32> = Vec::new();
        let mut length = 0.0f32;

        let mut push = |points: &mut Vec<Vec2>, cumulative: &mut Vec<f32>, p: Vec2| {
            if let Some(&last) = points.last() {
                length += last.distance(p);
            }
            points.push(p);
            cumulative.push(length);
        };

        for &cmd in commands {
            match cmd {
                PathCommand::MoveTo(p) => {
                    // A mid-path move is treated as a straight connector
                    // so arc length stays continuous.
                    push(&mut points, &mut cumulative, p);
                }
                PathCommand::LineTo(p) => {
                    if points.is_empty() {
                        push(&mut points, &mut cumulative, Vec2::default());
                    }
                    push(&mut points, &mut cumulative, p);
                }
                PathCommand::QuadTo(c, p) => {
                    if points.is_empty() {
                        push(&mut points, &mut cumulative, Vec2::default());
                    }
                    let start = *points.last().expect("start point present");
                    for i in 1..=CURVE_TABLE_SAMPLES {
                        let t = i as f32 / CURVE_TABLE_SAMPLES as f32;
                        push(&mut points, &mut cumulative, quad_point(start, c, p, t));
                    }
                }
                PathCommand::CubicTo(c1, c2, p) => {
                    if points.is_empty() {
                        push(&mut points, &mut cumulative, Vec2::default());
                    }
                    let start = *points.last().expect("start point present");
                    for i in 1..=CURVE_TABLE_SAMPLES {
                        let t = i as f32 / CURVE_TABLE_SAMPLES as f32;
                        push(&mut points, &mut cumulative, cubic_point(start, c1, c2, p, t));
                    }
                }
            }
        }

        if points.is_empty() {
            points.push(Vec2::default());
            cumulative.push(0.0);
        }

        Self {
            points,
            cumulative,
            length,
        }
    }

    /// Parses an SVG `d` attribute string (`M`/`L`/`H`/`V`/`Q`/`C`/`Z`,
    /// absolute or relative) into a built curve.
    pub fn parse(data: &str) -> Result<Self, PathError> {
        let mut commands = Vec::new();
        let mut current = Vec2::default();
        let mut subpath_start = Vec2::default();

        for segment in PathParser::from(data) {
            let segment = segment?;
            match segment {
                PathSegment::MoveTo { abs, x, y } => {
                    let p = resolve(abs, current, x, y);
                    commands.push(PathCommand::MoveTo(p));
                    current = p;
                    subpath_start = p;
                }
                PathSegment::LineTo { abs, x, y } => {
                    let p = resolve(abs, current, x, y);
                    commands.push(PathCommand::LineTo(p));
                    current = p;
                }
                PathSegment::HorizontalLineTo { abs, x } => {
                    let x = if abs { x as f32 } else { current.x + x as f32 };
                    let p = Vec2::new(x, current.y);
                    commands.push(PathCommand::LineTo(p));
                    current = p;
                }
                PathSegment::VerticalLineTo { abs, y } => {
                    let y = if abs { y as f32 } else { current.y + y as f32 };
                    let p = Vec2::new(current.x, y);
                    commands.push(PathCommand::LineTo(p));
                    current = p;
                }
                PathSegment::Quadratic { abs, x1, y1, x, y } => {
                    let c = resolve(abs, current, x1, y1);
                    let p = resolve(abs, current, x, y);
                    commands.push(PathCommand::QuadTo(c, p));
                    current = p;
                }
                PathSegment::CurveTo {
                    abs,
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let c1 = resolve(abs, current, x1, y1);
                    let c2 = resolve(abs, current, x2, y2);
                    let p = resolve(abs, current, x, y);
                    commands.push(PathCommand::CubicTo(c1, c2, p));
                    current = p;
                }
                PathSegment::ClosePath { .. } => {
                    commands.push(PathCommand::LineTo(subpath_start));
                    current = subpath_start;
                }
                PathSegment::SmoothCurveTo { .. } => {
                    return Err(PathError::Unsupported("smooth curve (S)"));
                }
                PathSegment::SmoothQuadratic { .. } => {
                    return Err(PathError::Unsupported("smooth quadratic (T)"));
                }
                PathSegment::EllipticalArc { .. } => {
                    return Err(PathError::Unsupported("elliptical arc (A)"));
                }
            }
        }

        Ok(Self::build(&commands))
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn is_degenerate(&self) -> bool {
        self.length <= LENGTH_EPSILON
    }

    pub fn start_point(&self) -> Vec2 {
        self.points[0]
    }

    /// Point at arc-length `d`, clamped to `[0, length]`. The endpoints
    /// are returned exactly, with no interpolation error.
    pub fn point_at(&self, d: f32) -> Vec2 {
        if self.is_degenerate() || d <= 0.0 || !d.is_finite() {
            return self.points[0];
        }
        if d >= self.length {
            return *self.points.last().expect("curve has at least one point");
        }

        let idx = self.cumulative.partition_point(|&c| c < d);
        if idx == 0 {
            return self.points[0];
        }
        if idx >= self.points.len() {
            return *self.points.last().expect("curve has at least one point");
        }

        let prev = self.cumulative[idx - 1];
        let span = self.cumulative[idx] - prev;
        if span <= 0.0 {
            return self.points[idx];
        }
        let t = (d - prev) / span;
        self.points[idx - 1].lerp(self.points[idx], t)
    }

    /// Travel direction at `d`, in degrees, measured over `lookahead`
    /// units of arc length. `None` when the lookahead collapses to a
    /// zero-length delta (end of path, degenerate curve); callers that
    /// need a total function carry the previous heading.
    pub fn heading(&self, d: f32, lookahead: f32) -> Option<f32> {
        let a = self.point_at(d);
        let b = self.point_at(d + lookahead.max(0.0));
        let delta = b - a;
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        Some(delta.y.atan2(delta.x).to_degrees())
    }

    /// Total variant of [`heading`](Self::heading): 0.0 on a degenerate
    /// delta, never NaN or infinite.
    pub fn tangent_angle(&self, d: f32, lookahead: f32) -> f32 {
        self.heading(d, lookahead).unwrap_or(0.0)
    }
}

fn resolve(abs: bool, current: Vec2, x: f64, y: f64) -> Vec2 {
    if abs {
        Vec2::new(x as f32, y as f32)
    } else {
        Vec2::new(current.x + x as f32, current.y + y as f32)
    }
}

fn quad_point(p0: Vec2, c: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t)
}

fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}
