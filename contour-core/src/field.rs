//! Scalar fields sampled at mesh vertices.
//!
//! A field holds exactly one finite value per vertex. Equal values are
//! ordered by vertex index so every sweep over the field is reproducible.

use std::cmp::Ordering;

use crate::{
    error::{ContourTreeError, Result},
    sweep::SweepDirection,
    vertex::VertexId,
};

/// Per-vertex scalar values aligned with the mesh's vertex indices.
///
/// # Examples
/// ```
/// use contour_core::{ScalarField, SweepDirection, VertexId};
///
/// let field = ScalarField::new(vec![0.0, 3.0, 1.0])?;
/// assert_eq!(field.len(), 3);
/// assert_eq!(field.value(VertexId::new(1)), Some(3.0));
/// assert_eq!(
///     field.sweep_order(SweepDirection::Descending),
///     vec![VertexId::new(1), VertexId::new(2), VertexId::new(0)],
/// );
/// # Ok::<(), contour_core::ContourTreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    values: Vec<f64>,
}

impl ScalarField {
    /// Wraps `values`, one per vertex.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::NonFiniteValue`] for the first NaN or
    /// infinite value.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ContourTreeError::NonFiniteValue {
                vertex: VertexId::new(index),
                value,
            });
        }
        Ok(Self { values })
    }

    /// Builds a height field from vertex positions, using the `y` coordinate.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::NonFiniteValue`] when a coordinate is not
    /// finite.
    ///
    /// # Examples
    /// ```
    /// use contour_core::ScalarField;
    ///
    /// let field = ScalarField::from_heights(&[[0.0, 2.0, 5.0], [1.0, -1.0, 0.0]])?;
    /// assert_eq!(field.values(), &[2.0, -1.0]);
    /// # Ok::<(), contour_core::ContourTreeError>(())
    /// ```
    pub fn from_heights(positions: &[[f64; 3]]) -> Result<Self> {
        Self::new(positions.iter().map(|[_, y, _]| *y).collect())
    }

    /// Builds a field holding each vertex's Euclidean distance to `target`.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::NonFiniteValue`] when a distance is not
    /// finite.
    pub fn from_distance(positions: &[[f64; 3]], target: [f64; 3]) -> Result<Self> {
        Self::new(
            positions
                .iter()
                .map(|position| {
                    position
                        .iter()
                        .zip(target.iter())
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum::<f64>()
                        .sqrt()
                })
                .collect(),
        )
    }

    /// Returns the number of values in the field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the field holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `vertex`, or `None` when it is out of range.
    #[must_use]
    pub fn value(&self, vertex: VertexId) -> Option<f64> {
        self.values.get(vertex.index()).copied()
    }

    /// Returns all values in vertex order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns `(min, max)` over the field, or `None` when it is empty.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        let first = *self.values.first()?;
        Some(
            self.values
                .iter()
                .fold((first, first), |(min, max), &value| {
                    (min.min(value), max.max(value))
                }),
        )
    }

    /// Orders two vertices by value, breaking ties by vertex index.
    ///
    /// Vertices outside the field compare as equal in value and fall back to
    /// the index ordering.
    #[must_use]
    pub fn compare(&self, left: VertexId, right: VertexId) -> Ordering {
        match (self.value(left), self.value(right)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => Ordering::Equal,
        }
        .then_with(|| left.cmp(&right))
    }

    /// Returns every vertex in sweep order.
    ///
    /// Ascending order processes the lowest value first; descending order is
    /// the exact reverse, so ties are visited in descending index order.
    #[must_use]
    pub fn sweep_order(&self, direction: SweepDirection) -> Vec<VertexId> {
        let mut order: Vec<VertexId> = (0..self.values.len()).map(VertexId::new).collect();
        order.sort_by(|&a, &b| self.compare(a, b));
        if direction == SweepDirection::Descending {
            order.reverse();
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(indices: &[usize]) -> Vec<VertexId> {
        indices.iter().copied().map(VertexId::new).collect()
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn new_rejects_non_finite_values(#[case] bad: f64) {
        let err = ScalarField::new(vec![0.0, bad]).expect_err("non-finite values are invalid");
        assert!(matches!(
            err,
            ContourTreeError::NonFiniteValue { vertex, .. } if vertex == VertexId::new(1)
        ));
    }

    #[rstest]
    #[case::ascending(SweepDirection::Ascending, &[0, 2, 4, 1, 3])]
    #[case::descending(SweepDirection::Descending, &[3, 1, 4, 2, 0])]
    fn sweep_order_sorts_by_value(#[case] direction: SweepDirection, #[case] expected: &[usize]) {
        let field = ScalarField::new(vec![0.0, 3.0, 1.0, 4.0, 2.0]).expect("finite field");
        assert_eq!(field.sweep_order(direction), ids(expected));
    }

    #[test]
    fn sweep_order_breaks_ties_by_index() {
        let field = ScalarField::new(vec![1.0, 1.0, 0.0, 1.0]).expect("finite field");
        assert_eq!(
            field.sweep_order(SweepDirection::Ascending),
            ids(&[2, 0, 1, 3])
        );
        assert_eq!(
            field.sweep_order(SweepDirection::Descending),
            ids(&[3, 1, 0, 2])
        );
    }

    #[test]
    fn range_reports_extremes() {
        let field = ScalarField::new(vec![2.0, -1.5, 7.25]).expect("finite field");
        assert_eq!(field.range(), Some((-1.5, 7.25)));
        let empty = ScalarField::new(Vec::new()).expect("empty field is valid");
        assert_eq!(empty.range(), None);
    }

    #[test]
    fn distance_field_measures_euclidean_distance() {
        let field = ScalarField::from_distance(&[[3.0, 4.0, 0.0], [1.0, 1.0, 1.0]], [0.0, 0.0, 0.0])
            .expect("finite distances");
        assert_eq!(field.value(VertexId::new(0)), Some(5.0));
        let second = field.value(VertexId::new(1)).expect("second vertex");
        assert!((second - 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn height_field_rejects_non_finite_coordinates() {
        let err = ScalarField::from_heights(&[[0.0, f64::NAN, 0.0]])
            .expect_err("NaN heights are invalid");
        assert_eq!(err.code(), crate::ContourTreeErrorCode::NonFiniteValue);
    }
}
