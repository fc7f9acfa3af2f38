//! Grade Enumerator (C4)
//!
//! Per attribute `a`, `G_a = sort({0} ∪ {I[a,o] : o} ∪ {1})` — the only
//! values Next-Closure (C5) ever assigns to position `a`. In the binary
//! case every `G_a = {0, 1}`. Computed once from the incidence's raw
//! entries in a single `O(nnz)` pass and reused for the lifetime of the
//! incidence.

use crate::sparse::SparseColumns;

/// The per-attribute grade sets of an incidence.
#[derive(Debug, Clone)]
pub struct GradeSet {
    grades: Vec<Vec<f64>>,
}

impl GradeSet {
    /// Builds the grade sets for an incidence with `n_attrs` rows.
    pub fn compute(data: &SparseColumns, n_attrs: usize) -> Self {
        let mut grades: Vec<Vec<f64>> = vec![vec![0.0, 1.0]; n_attrs];
        for (row, value) in data.entries() {
            grades[row].push(value);
        }
        for g in &mut grades {
            g.sort_by(|a, b| a.partial_cmp(b).expect("grade values are never NaN"));
            g.dedup();
        }
        GradeSet { grades }
    }

    /// `G_a`, sorted ascending, always containing at least `0.0` and `1.0`.
    pub fn grades_for(&self, attr: usize) -> &[f64] {
        &self.grades[attr]
    }

    pub fn n_attrs(&self) -> usize {
        self.grades.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Universe;
    use crate::sparse::FuzzySet;

    #[test]
    fn binary_incidence_has_two_grades_per_attribute() {
        let cols = vec![
            FuzzySet::new(Universe::Objects, 3, vec![(0, 1.0)]),
            FuzzySet::new(Universe::Objects, 3, vec![(1, 1.0), (2, 1.0)]),
        ];
        let data = SparseColumns::from_columns(Universe::Objects, 3, &cols).unwrap();
        let grades = GradeSet::compute(&data, 3);
        for a in 0..3 {
            assert_eq!(grades.grades_for(a), &[0.0, 1.0]);
        }
    }

    #[test]
    fn fuzzy_incidence_collects_observed_grades() {
        let cols = vec![FuzzySet::new(
            Universe::Objects,
            2,
            vec![(0, 0.3), (1, 0.7)],
        )];
        let data = SparseColumns::from_columns(Universe::Objects, 2, &cols).unwrap();
        let grades = GradeSet::compute(&data, 2);
        assert_eq!(grades.grades_for(0), &[0.0, 0.3, 1.0]);
        assert_eq!(grades.grades_for(1), &[0.0, 0.7, 1.0]);
    }
}
