use crate::{Point, Primitive};
use std::collections::HashSet;

/// Amount of points with pairwise different coordinates. `-0.0` and `0.0` count as the same value.
pub(crate) fn count_distinct<T: Primitive>(points: &[Point<T>]) -> usize {
    points.iter()
        .map(|p| ((p.x() + T::zero()).integer_decode(), (p.y() + T::zero()).integer_decode()))
        .collect::<HashSet<_>>()
        .len()
}

/// Index and distance of the nearest centroid. The first minimum wins on ties.
#[inline(always)]
pub(crate) fn nearest_centroid<T: Primitive>(point: &Point<T>, centroids: &[Point<T>]) -> (usize, T) {
    let mut best = (0, T::infinity());
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = point.distance(centroid);
        if dist < best.1 {
            best = (idx, dist);
        }
    }
    best
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-9))
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distinct_points_are_counted_by_value() {
		let points = vec![
			Point::new(0.0f64, 0.0), Point::new(-0.0, 0.0), Point::new(1.0, 0.0),
			Point::new(1.0, 0.0), Point::new(0.0, 1.0)
		];
		assert_eq!(count_distinct(&points), 3);
		assert_eq!(count_distinct::<f64>(&[]), 0);
	}

	#[test]
	fn nearest_centroid_prefers_lower_index_on_ties() {
		let centroids = [Point::new(-1.0f64, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 50.0)];
		let (idx, dist) = nearest_centroid(&Point::new(0.0, 0.0), &centroids);
		assert_eq!(idx, 0);
		assert_approx_eq!(dist, 1.0);
		assert_eq!(nearest_centroid(&Point::new(0.9, 0.0), &centroids).0, 1);
	}
}
