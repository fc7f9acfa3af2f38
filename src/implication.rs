//! Implication Store (C6)
//!
//! Two aligned sparse column matrices over the attribute universe:
//! column `i` of `LHS` paired with column `i` of `RHS` is the rule
//! `LHS[:,i] ⇒ RHS[:,i]`. A rule with empty RHS is dead and must not be
//! carried across a rewrite (C8 drops them at the end of its pass).

use crate::error::{FcaError, FcaResult, Universe};
use crate::incidence::Incidence;
use crate::sparse::{self, FuzzySet, SparseColumns};

/// Aligned LHS/RHS column matrices forming an implication set.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplicationStore {
    n_attrs: usize,
    lhs: SparseColumns,
    rhs: SparseColumns,
}

impl ImplicationStore {
    /// Builds a store from `(LHS, RHS)` pairs, positionally aligned.
    pub fn new(n_attrs: usize, rules: &[(FuzzySet, FuzzySet)]) -> FcaResult<Self> {
        let lhs_cols: Vec<FuzzySet> = rules.iter().map(|(l, _)| l.clone()).collect();
        let rhs_cols: Vec<FuzzySet> = rules.iter().map(|(_, r)| r.clone()).collect();
        let lhs = SparseColumns::from_columns(Universe::Attributes, n_attrs, &lhs_cols)?;
        let rhs = SparseColumns::from_columns(Universe::Attributes, n_attrs, &rhs_cols)?;
        Ok(ImplicationStore { n_attrs, lhs, rhs })
    }

    pub(crate) fn from_matrices(n_attrs: usize, lhs: SparseColumns, rhs: SparseColumns) -> FcaResult<Self> {
        if lhs.ncols() != rhs.ncols() {
            return Err(FcaError::InvariantViolation {
                rule: "store".to_string(),
                reason: format!(
                    "LHS has {} columns but RHS has {}",
                    lhs.ncols(),
                    rhs.ncols()
                ),
            });
        }
        Ok(ImplicationStore { n_attrs, lhs, rhs })
    }

    pub fn empty(n_attrs: usize) -> Self {
        ImplicationStore {
            n_attrs,
            lhs: SparseColumns::new(Universe::Attributes, n_attrs),
            rhs: SparseColumns::new(Universe::Attributes, n_attrs),
        }
    }

    pub fn n_attrs(&self) -> usize {
        self.n_attrs
    }

    pub fn cardinality(&self) -> usize {
        self.lhs.ncols()
    }

    pub fn lhs(&self, i: usize) -> FuzzySet {
        self.lhs.column(i)
    }

    pub fn rhs(&self, i: usize) -> FuzzySet {
        self.rhs.column(i)
    }

    pub(crate) fn lhs_matrix(&self) -> &SparseColumns {
        &self.lhs
    }

    pub(crate) fn rhs_matrix(&self) -> &SparseColumns {
        &self.rhs
    }

    pub fn rules(&self) -> impl Iterator<Item = (FuzzySet, FuzzySet)> + '_ {
        (0..self.cardinality()).map(|i| (self.lhs(i), self.rhs(i)))
    }

    /// `(|LHS[:,i]|, |RHS[:,i]|)`.
    pub fn size(&self, i: usize) -> (f64, f64) {
        (
            sparse::cardinality(&self.lhs(i)),
            sparse::cardinality(&self.rhs(i)),
        )
    }

    /// Fraction of `inc`'s objects whose attribute vector is `≥ LHS[:,i]`
    /// pointwise.
    pub fn support(&self, i: usize, inc: &Incidence) -> FcaResult<f64> {
        if inc.n_attrs() != self.n_attrs {
            return Err(FcaError::AttributeCountMismatch {
                expected: self.n_attrs,
                found: inc.n_attrs(),
            });
        }
        let lhs = self.lhs(i);
        if inc.n_objs() == 0 {
            return Ok(0.0);
        }
        let satisfied = (0..inc.n_objs())
            .filter(|&o| sparse::subset(&lhs, &inc.object_vector(o)).unwrap_or(false))
            .count();
        Ok(satisfied as f64 / inc.n_objs() as f64)
    }

    /// Keeps only the rules matching every supplied criterion.
    pub fn filter(&self, criteria: &FilterCriteria, inc: Option<&Incidence>) -> FcaResult<Self> {
        let mut kept = Vec::new();
        for i in 0..self.cardinality() {
            let lhs = self.lhs(i);
            let rhs = self.rhs(i);
            if let Some(target) = &criteria.lhs_in {
                if !sparse::subset(&lhs, target)? {
                    continue;
                }
            }
            if let Some(target) = &criteria.rhs_in {
                if !sparse::subset(&rhs, target)? {
                    continue;
                }
            }
            if let Some(target) = &criteria.not_lhs {
                if sparse::subset(&lhs, target)? {
                    continue;
                }
            }
            if let Some(min_size) = criteria.min_size {
                let (l, r) = self.size(i);
                if l + r < min_size {
                    continue;
                }
            }
            if let Some(min_support) = criteria.min_support {
                let inc = inc.ok_or(FcaError::EmptyContext)?;
                if self.support(i, inc)? < min_support {
                    continue;
                }
            }
            kept.push((lhs, rhs));
        }
        ImplicationStore::new(self.n_attrs, &kept)
    }

    /// For each rule, whether every object's attribute vector in `inc`
    /// satisfies `LHS ⇒ RHS` (not `LHS ⊆ vector`, or `RHS ⊆ vector`).
    pub fn holds_in(&self, inc: &Incidence) -> FcaResult<Vec<bool>> {
        if inc.n_attrs() != self.n_attrs {
            return Err(FcaError::AttributeCountMismatch {
                expected: self.n_attrs,
                found: inc.n_attrs(),
            });
        }
        let vectors: Vec<FuzzySet> = (0..inc.n_objs()).map(|o| inc.object_vector(o)).collect();
        let mut out = Vec::with_capacity(self.cardinality());
        for i in 0..self.cardinality() {
            let lhs = self.lhs(i);
            let rhs = self.rhs(i);
            let ok = vectors
                .iter()
                .all(|v| !sparse::subset(&lhs, v).unwrap_or(false) || sparse::subset(&rhs, v).unwrap_or(false));
            out.push(ok);
        }
        Ok(out)
    }

    /// `respects[s][j]`: `sets[s]` respects rule `j` iff `sets[s] ⊉
    /// LHS[:,j]` or `sets[s] ⊇ RHS[:,j]`.
    pub fn respects(&self, sets: &[FuzzySet]) -> FcaResult<Vec<Vec<bool>>> {
        let mut out = Vec::with_capacity(sets.len());
        for s in sets {
            let mut row = Vec::with_capacity(self.cardinality());
            for i in 0..self.cardinality() {
                let lhs = self.lhs(i);
                let rhs = self.rhs(i);
                row.push(!sparse::subset(&lhs, s)? || sparse::subset(&rhs, s)?);
            }
            out.push(row);
        }
        Ok(out)
    }
}

/// Criteria accepted by [`ImplicationStore::filter`].
#[derive(Debug, Default, Clone)]
pub struct FilterCriteria {
    /// Keep rules whose LHS is a subset of this set.
    pub lhs_in: Option<FuzzySet>,
    /// Keep rules whose RHS is a subset of this set.
    pub rhs_in: Option<FuzzySet>,
    /// Drop rules whose LHS is a subset of this set.
    pub not_lhs: Option<FuzzySet>,
    pub min_support: Option<f64>,
    pub min_size: Option<f64>,
}
