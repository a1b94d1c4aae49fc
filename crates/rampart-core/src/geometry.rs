//! Lane geometry: arc length and progress-to-position interpolation.
//!
//! Pure functions over immutable lane definitions. Progress is normalized
//! per segment (each segment covers an equal share of [0,1]), matching how
//! the lanes are authored as straight runs between waypoints.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// A fixed polyline that enemies and units travel along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub waypoints: Vec<Position>,
}

impl Lane {
    pub fn new(waypoints: Vec<Position>) -> Self {
        Self { waypoints }
    }

    /// Straight vertical lane at `x` spanning `0..=height`.
    pub fn vertical(x: f64, height: f64) -> Self {
        Self::new(vec![Position::new(x, 0.0), Position::new(x, height)])
    }

    /// Number of straight segments.
    pub fn segment_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Lane start (enemy entry point).
    pub fn entry(&self) -> Position {
        self.waypoints.first().copied().unwrap_or_default()
    }

    /// Sum of Euclidean distances between consecutive waypoints.
    pub fn length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }

    /// Position at normalized `progress`.
    ///
    /// Progress is clamped into [0,1] (NaN counts as 0) and the segment
    /// index is clamped to the last segment, so `1.0` lands exactly on the
    /// final waypoint.
    pub fn position_at(&self, progress: f64) -> Position {
        let segments = self.segment_count();
        if segments == 0 {
            return self.entry();
        }

        let progress = clamp_progress(progress);
        let scaled = progress * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let t = scaled - segment as f64;

        let start = self.waypoints[segment].to_vec();
        let end = self.waypoints[segment + 1].to_vec();
        start.lerp(end, t).into()
    }

    /// Shortest distance from `point` to any segment of the lane.
    pub fn distance_to_point(&self, point: &Position) -> f64 {
        let p = point.to_vec();
        self.waypoints
            .windows(2)
            .map(|w| {
                let a = w[0].to_vec();
                let b = w[1].to_vec();
                let ab = b - a;
                let len_sq = ab.length_squared();
                if len_sq <= f64::EPSILON {
                    return p.distance(a);
                }
                let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
                p.distance(a + ab * t)
            })
            .fold(f64::INFINITY, f64::min)
    }
}

/// Clamp a progress value into [0,1]; NaN maps to 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
