use crate::{helpers, Point, Primitive};

/// Label **point** with the index of its nearest centroid. Equidistant centroids resolve to the lower index.
#[inline(always)]
pub fn assign<T: Primitive>(point: Point<T>, centroids: &[Point<T>]) -> (usize, Point<T>) {
    (helpers::nearest_centroid(&point, centroids).0, point)
}

/// Label every point of one partition against the same broadcast centroid set.
pub fn assign_partition<T: Primitive>(points: &[Point<T>], centroids: &[Point<T>]) -> Vec<(usize, Point<T>)> {
    points.iter().map(|&p| assign(p, centroids)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_the_lower_index() {
        let centroids = [Point::new(0.0f64, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 1.0)];
        // (1,0) is at distance 1 from all three centroids
        for _ in 0..10 {
            assert_eq!(assign(Point::new(1.0, 0.0), &centroids).0, 0);
        }
        let reordered = [centroids[2], centroids[1], centroids[0]];
        assert_eq!(assign(Point::new(1.0, 0.0), &reordered).0, 0);
        assert_eq!(assign(Point::new(1.9, 0.0), &reordered).0, 1);
    }

    #[test]
    fn coinciding_centroids_keep_distinct_indices() {
        let centroids = [Point::new(5.0f32, 5.0), Point::new(5.0, 5.0)];
        assert_eq!(assign(Point::new(5.0, 4.0), &centroids), (0, Point::new(5.0, 4.0)));
    }

    #[test]
    fn partition_keeps_point_order() {
        let centroids = [Point::new(0.0f64, 0.0), Point::new(10.0, 10.0)];
        let points = [Point::new(9.0, 9.0), Point::new(1.0, 0.0), Point::new(11.0, 10.0)];
        let labelled = assign_partition(&points, &centroids);
        assert_eq!(labelled, vec![(1, points[0]), (0, points[1]), (1, points[2])]);
    }
}
