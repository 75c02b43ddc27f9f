//! Great-circle distances between drop-off points.

use crate::types::GeoPoint;

/// Mean Earth radius used for every distance in the report.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two coordinates given in degrees.
///
/// Inputs are not range-checked; out-of-range coordinates give a defined but
/// meaningless result.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    // Rounding can push `a` just past 1 for near-antipodal pairs.
    let a = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2)).min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

impl GeoPoint {
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Symmetric, zero-diagonal matrix of pairwise distances in kilometres.
///
/// Fewer than two points give a 1x1 matrix holding `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    points: usize,
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the upper triangle once and mirrors it.
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let n = points.len();
        let size = n.max(1);
        let mut values = vec![0.0; size * size];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_km(&points[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }
        Self { points: n, size, values }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Number of unordered point pairs, N·(N−1)/2.
    pub fn pair_count(&self) -> usize {
        self.points * self.points.saturating_sub(1) / 2
    }

    /// Mean of the distinct pairwise distances; NaN when there is no pair.
    ///
    /// Sums the upper triangle only, so each pair is counted once.
    pub fn mean_distance(&self) -> f64 {
        let pairs = self.pair_count();
        if pairs == 0 {
            return f64::NAN;
        }
        let mut total = 0.0;
        for i in 0..self.points {
            for j in (i + 1)..self.points {
                total += self.get(i, j);
            }
        }
        total / pairs as f64
    }
}
