//! Cluster reduction: collapse bursts of nearby turning points.
//!
//! Near a sharp corner the detector often records several points a few
//! steps apart as the tangent wobbles between quadrants. Consecutive
//! points closer than `length / cluster_divisor` are gathered into a
//! pending cluster, and each cluster is replaced by its positional
//! median once a distant point ends it.

use crate::types::{AnalysisConfig, Point};

/// Distance below which two consecutive points belong to one cluster.
#[must_use]
pub fn close_distance(total_length: f64, config: &AnalysisConfig) -> f64 {
    total_length / config.cluster_divisor
}

/// The representative of a cluster: the element at index `len / 2`.
///
/// This is a positional median in traversal order, not a centroid, so
/// the result is always one of the recorded points. Returns `None` for
/// an empty cluster.
#[must_use]
pub fn cluster_representative(cluster: &[Point]) -> Option<Point> {
    cluster.get(cluster.len() / 2).copied()
}

/// Reduce `points` by collapsing runs of close points.
///
/// `total_length` is the arc length of the curve the points came from.
/// The output keeps traversal order, is never longer than the input,
/// and always starts with the first input point and ends with the last.
///
/// # Examples
///
/// ```
/// use turnpoint_core::{AnalysisConfig, Point};
/// use turnpoint_core::cluster::reduce_clusters;
///
/// // Three points bunched near x = 50 on a 100-unit curve (close = 10).
/// let raw = [
///     Point::new(0.0, 0.0),
///     Point::new(49.0, 0.0),
///     Point::new(50.0, 0.0),
///     Point::new(51.0, 0.0),
///     Point::new(100.0, 0.0),
/// ];
/// let reduced = reduce_clusters(&raw, 100.0, &AnalysisConfig::default());
/// assert_eq!(
///     reduced,
///     vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(100.0, 0.0)],
/// );
/// ```
#[must_use = "returns the reduced points"]
pub fn reduce_clusters(points: &[Point], total_length: f64, config: &AnalysisConfig) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if points.len() == 1 {
        return vec![first];
    }

    let close = close_distance(total_length, config);
    let mut output = Vec::with_capacity(points.len());
    output.push(first);

    let mut cluster: Vec<Point> = Vec::new();
    // Whether `previous` is already the last entry of `cluster`.
    let mut previous_in_cluster = false;
    // Index of `previous` in `points`; index 0 has already been emitted.
    let mut previous_idx = 0;
    let mut previous = first;

    for (idx, &current) in points.iter().enumerate().skip(1) {
        if previous.distance(current) < close {
            if !previous_in_cluster {
                cluster.push(previous);
            }
            cluster.push(current);
            previous_in_cluster = true;
        } else {
            if let Some(representative) = cluster_representative(&cluster) {
                output.push(representative);
                cluster.clear();
            } else if previous_idx != 0 {
                output.push(previous);
            }
            previous_in_cluster = false;
        }
        previous = current;
        previous_idx = idx;
    }

    output.push(last);
    tracing::debug!(close, before = points.len(), after = output.len(), "reduced clusters");
    output
}
