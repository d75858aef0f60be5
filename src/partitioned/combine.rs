use crate::{PartialAggregate, Point, Primitive};
use super::CombineOutput;
use std::collections::BTreeMap;

/// Fold all points carrying label **index** into one partial aggregate. Never divides.
pub fn combine<'a, T, I>(index: usize, points: I) -> (usize, PartialAggregate<T>)
        where T: Primitive, I: IntoIterator<Item = &'a Point<T>> {
    (index, points.into_iter().collect())
}

/// Group one labelled partition by label and combine each group. Only labels that occur are emitted.
pub fn combine_partition<T: Primitive>(labelled: &[(usize, Point<T>)]) -> CombineOutput<T> {
    let mut groups: BTreeMap<usize, PartialAggregate<T>> = BTreeMap::new();
    for (idx, point) in labelled {
        groups.entry(*idx).or_insert_with(PartialAggregate::empty).push(point);
    }
    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_sums_without_dividing() {
        let points = [Point::new(1.0f64, 2.0), Point::new(3.0, 4.0), Point::new(5.0, 6.0)];
        assert_eq!(combine(3, points.iter()), (3, PartialAggregate::new(9.0, 12.0, 3)));
    }

    #[test]
    fn partition_is_grouped_by_label() {
        let labelled = vec![
            (2, Point::new(1.0f64, 1.0)),
            (0, Point::new(0.0, 4.0)),
            (2, Point::new(3.0, -1.0)),
        ];
        assert_eq!(combine_partition(&labelled), vec![
            (0, PartialAggregate::new(0.0, 4.0, 1)),
            (2, PartialAggregate::new(4.0, 0.0, 2)),
        ]);
        assert!(combine_partition::<f64>(&[]).is_empty());
    }
}
