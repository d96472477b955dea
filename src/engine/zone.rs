use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ZoneTableError {
    #[error("zone table is empty")]
    Empty,
    #[error("zone bound {0} is outside (0, 1]")]
    OutOfRange(f32),
    #[error("zone bounds must be strictly increasing: {prev} then {next}")]
    NotIncreasing { prev: f32, next: f32 },
    #[error("final zone bound {0} does not cover progress 1.0")]
    Uncovered(f32),
}

/// Ordered `(upper bound, label)` table mapping progress to a discrete
/// zone. Each entry owns the lower-exclusive / upper-inclusive interval
/// ending at its bound; the last entry is the terminal zone.
///
/// Misconfigured tables are a static authoring mistake and are rejected
/// here, at construction, rather than tolerated per tick.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    entries: Vec<(f32, String)>,
}

impl ZoneTable {
    pub fn new(entries: Vec<(f32, String)>) -> Result<Self, ZoneTableError> {
        if entries.is_empty() {
            return Err(ZoneTableError::Empty);
        }
        let mut prev = 0.0f32;
        for (bound, _) in &entries {
            if !bound.is_finite() || *bound <= 0.0 || *bound > 1.0 {
                return Err(ZoneTableError::OutOfRange(*bound));
            }
            if *bound <= prev && prev > 0.0 {
                return Err(ZoneTableError::NotIncreasing {
                    prev,
                    next: *bound,
                });
            }
            prev = *bound;
        }
        if prev < 1.0 {
            return Err(ZoneTableError::Uncovered(prev));
        }
        Ok(Self { entries })
    }

    /// First entry whose upper bound is `>= progress`; progress at or
    /// past 1.0 resolves to the terminal label.
    pub fn classify(&self, progress: f32) -> &str {
        for (bound, label) in &self.entries {
            if progress <= *bound {
                return label;
            }
        }
        self.terminal()
    }

    pub fn terminal(&self) -> &str {
        &self.entries.last().expect("table is non-empty").1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
