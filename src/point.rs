use crate::{KMeansError, Primitive, Result};
use std::iter::FromIterator;

/// Immutable planar coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T: Primitive> {
    x: T,
    y: T,
}
impl<T: Primitive> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn x(&self) -> T { self.x }
    #[inline(always)]
    pub fn y(&self) -> T { self.y }

    /// Euclidean distance between `self` and `other`.
    #[inline(always)]
    pub fn distance(&self, other: &Point<T>) -> T {
        self.squared_distance(other).sqrt()
    }

    #[inline(always)]
    pub fn squared_distance(&self, other: &Point<T>) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Coordinate-wise arithmetic mean of **points**.
    ///
    /// ## Errors
    /// [`KMeansError::EmptyCluster`] if **points** is empty. The reported index is `0`, callers that know
    /// which cluster they were averaging should map it.
    pub fn average(points: &[Point<T>]) -> Result<Point<T>> {
        points.iter().collect::<PartialAggregate<T>>().centroid(0)
    }
}


/// Raw (sum_x, sum_y, count) triple of the points assigned to one centroid.
///
/// Aggregates never divide; merging any number of them and dividing once in [`PartialAggregate::centroid`]
/// gives the same mean as averaging all underlying points directly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PartialAggregate<T: Primitive> {
    pub sum_x: T,
    pub sum_y: T,
    pub count: usize,
}
impl<T: Primitive> PartialAggregate<T> {
    pub fn empty() -> Self {
        Self { sum_x: T::zero(), sum_y: T::zero(), count: 0 }
    }

    pub fn new(sum_x: T, sum_y: T, count: usize) -> Self {
        Self { sum_x, sum_y, count }
    }

    #[inline(always)]
    pub fn push(&mut self, point: &Point<T>) {
        self.sum_x += point.x;
        self.sum_y += point.y;
        self.count += 1;
    }

    /// Remove a point that was previously pushed into this aggregate.
    pub(crate) fn pop(&mut self, point: &Point<T>) {
        debug_assert!(self.count > 0);
        self.sum_x -= point.x;
        self.sum_y -= point.y;
        self.count -= 1;
    }

    pub fn merge(mut self, other: &PartialAggregate<T>) -> Self {
        self.sum_x += other.sum_x;
        self.sum_y += other.sum_y;
        self.count += other.count;
        self
    }

    pub fn is_empty(&self) -> bool { self.count == 0 }

    /// Divide the sums by the count. **index** is only used to label the error of an empty aggregate.
    pub fn centroid(&self, index: usize) -> Result<Point<T>> {
        if self.count == 0 {
            return Err(KMeansError::EmptyCluster { index });
        }
        let count = T::from(self.count).ok_or(KMeansError::EmptyCluster { index })?;
        Ok(Point::new(self.sum_x / count, self.sum_y / count))
    }
}
impl<'a, T: Primitive> FromIterator<&'a Point<T>> for PartialAggregate<T> {
    fn from_iter<I: IntoIterator<Item = &'a Point<T>>>(iter: I) -> Self {
        let mut aggregate = Self::empty();
        iter.into_iter().for_each(|p| aggregate.push(p));
        aggregate
    }
}
impl<T: Primitive> FromIterator<Point<T>> for PartialAggregate<T> {
    fn from_iter<I: IntoIterator<Item = Point<T>>>(iter: I) -> Self {
        let mut aggregate = Self::empty();
        iter.into_iter().for_each(|p| aggregate.push(&p));
        aggregate
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test] fn distance_known_values_f32() { distance_known_values::<f32>(); }
    #[test] fn distance_known_values_f64() { distance_known_values::<f64>(); }

    fn distance_known_values<T: Primitive>() {
        let a = Point::new(T::zero(), T::zero());
        let b = Point::new(T::from(3.0).unwrap(), T::from(4.0).unwrap());
        assert_eq!(a.distance(&b), T::from(5.0).unwrap());
        assert_eq!(a.squared_distance(&b), T::from(25.0).unwrap());
        assert_eq!(b.distance(&b), T::zero());
    }

    #[test]
    fn average_of_repeated_point_is_the_point() {
        let p = Point::new(1.25f64, -7.5);
        assert_eq!(Point::average(&[p, p, p]).unwrap(), p);
    }

    #[test]
    fn average_of_points() {
        let points = [Point::new(0.0f64, 0.0), Point::new(0.0, 2.0), Point::new(3.0, 4.0)];
        assert_eq!(Point::average(&points).unwrap(), Point::new(1.0, 2.0));
    }

    #[test]
    fn average_of_nothing_is_empty_cluster() {
        assert_eq!(Point::<f64>::average(&[]), Err(KMeansError::EmptyCluster { index: 0 }));
    }

    #[test]
    fn aggregate_merge_and_centroid() {
        let left: PartialAggregate<f64> = [Point::new(0.0, 0.0), Point::new(0.0, 2.0)].iter().collect();
        let right: PartialAggregate<f64> = vec![Point::new(6.0, 4.0)].into_iter().collect();
        let merged = left.merge(&right);
        assert_eq!(merged, PartialAggregate::new(6.0, 6.0, 3));
        assert_eq!(merged.centroid(4).unwrap(), Point::new(2.0, 2.0));
        assert_eq!(PartialAggregate::<f64>::empty().centroid(4), Err(KMeansError::EmptyCluster { index: 4 }));
    }

    #[test]
    fn aggregate_pop_undoes_push() {
        let mut agg: PartialAggregate<f64> = [Point::new(1.0, 1.0), Point::new(3.0, 5.0)].iter().collect();
        agg.pop(&Point::new(3.0, 5.0));
        assert_eq!(agg, PartialAggregate::new(1.0, 1.0, 1));
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(ax in -1e6f64..1e6, ay in -1e6f64..1e6, bx in -1e6f64..1e6, by in -1e6f64..1e6) {
            let (a, b) = (Point::new(ax, ay), Point::new(bx, by));
            prop_assert_eq!(a.distance(&b), b.distance(&a));
            prop_assert!(a.distance(&b) >= 0.0);
            prop_assert_eq!(a.distance(&b) == 0.0, a == b);
        }
    }
}
