//! Sparse Column Store (C2)
//!
//! Column-major storage over a fixed row count: per column, the sorted
//! indices of non-zero rows and their values. A [`FuzzySet`] is a single
//! such column tagged with the universe (objects or attributes) it lives
//! over; a [`SparseColumns`] matrix is many columns sharing a row count,
//! stored as the packed `(i, p, x)` triple the external interfaces rely
//! on (spec §6): `p[0] = 0`, `p[k] = nnz`, `i` strictly ascending within
//! each column.
//!
//! Every set operation here is `O(nnz)` of its inputs via a sorted
//! merge-join; none of them allocate more than their output requires.

use rayon::prelude::*;

use crate::error::{FcaError, FcaResult, Universe};
use crate::logic::Logic;

/// A sparse fuzzy set over a fixed-size universe: sorted, deduplicated,
/// zero-free `(index, value)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet {
    universe: Universe,
    size: usize,
    entries: Vec<(usize, f64)>,
}

impl FuzzySet {
    /// Builds a fuzzy set from unsorted entries, dropping zeros and
    /// keeping one arbitrary surviving value per duplicate index (callers
    /// are expected not to pass duplicates; this guards rather than
    /// rewards it).
    pub fn new(universe: Universe, size: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, v)| v != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        entries.dedup_by_key(|&mut (idx, _)| idx);
        FuzzySet {
            universe,
            size,
            entries,
        }
    }

    pub fn empty(universe: Universe, size: usize) -> Self {
        FuzzySet {
            universe,
            size,
            entries: Vec::new(),
        }
    }

    pub fn singleton(universe: Universe, size: usize, index: usize, value: f64) -> Self {
        FuzzySet::new(universe, size, vec![(index, value)])
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `index`, `0.0` if absent.
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(idx, _)| idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    fn expect(&self, universe: Universe) -> FcaResult<()> {
        if self.universe == universe {
            Ok(())
        } else {
            Err(FcaError::ShapeMismatch {
                expected: universe,
                found: self.universe,
            })
        }
    }

    pub(crate) fn expect_universe(&self, universe: Universe) -> FcaResult<()> {
        self.expect(universe)
    }

    /// Dense materialisation, length [`FuzzySet::size`].
    pub fn extract(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.size];
        for &(idx, v) in &self.entries {
            out[idx] = v;
        }
        out
    }
}

fn check_compatible(a: &FuzzySet, b: &FuzzySet) -> FcaResult<()> {
    if a.universe != b.universe {
        return Err(FcaError::ShapeMismatch {
            expected: a.universe,
            found: b.universe,
        });
    }
    Ok(())
}

/// Pointwise max: `A ∪ B` as fuzzy sets.
pub fn union(a: &FuzzySet, b: &FuzzySet) -> FcaResult<FuzzySet> {
    check_compatible(a, b)?;
    let mut out = Vec::with_capacity(a.entries.len() + b.entries.len());
    let (mut i, mut j) = (0, 0);
    while i < a.entries.len() && j < b.entries.len() {
        let (ia, va) = a.entries[i];
        let (ib, vb) = b.entries[j];
        match ia.cmp(&ib) {
            std::cmp::Ordering::Less => {
                out.push((ia, va));
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push((ib, vb));
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push((ia, va.max(vb)));
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a.entries[i..]);
    out.extend_from_slice(&b.entries[j..]);
    Ok(FuzzySet::new(a.universe, a.size.max(b.size), out))
}

/// Pointwise `⊗` (fuzzy conjunction); boolean AND in the `{0,1}` case.
/// Only indices present in both operands can be non-zero, since every
/// built-in t-norm sends `(x, 0) ↦ 0`.
pub fn intersect(a: &FuzzySet, b: &FuzzySet, logic: &dyn Logic) -> FcaResult<FuzzySet> {
    check_compatible(a, b)?;
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.entries.len() && j < b.entries.len() {
        let (ia, va) = a.entries[i];
        let (ib, vb) = b.entries[j];
        match ia.cmp(&ib) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push((ia, logic.tnorm(va, vb)));
                i += 1;
                j += 1;
            }
        }
    }
    Ok(FuzzySet::new(a.universe, a.size.max(b.size), out))
}

/// Pointwise `A ≤ B` on every row.
pub fn subset(a: &FuzzySet, b: &FuzzySet) -> FcaResult<bool> {
    check_compatible(a, b)?;
    for &(idx, va) in &a.entries {
        if va > b.get(idx) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Pointwise equality.
pub fn equal(a: &FuzzySet, b: &FuzzySet) -> FcaResult<bool> {
    check_compatible(a, b)?;
    Ok(a.entries == b.entries)
}

/// `D − B`: for every row `r`, `result[r] = D[r]` if `D[r] > B[r]`, else 0.
pub fn difference(d: &FuzzySet, b: &FuzzySet) -> FcaResult<FuzzySet> {
    check_compatible(d, b)?;
    let out: Vec<(usize, f64)> = d
        .entries
        .iter()
        .filter(|&&(idx, v)| v > b.get(idx))
        .copied()
        .collect();
    Ok(FuzzySet::new(d.universe, d.size.max(b.size), out))
}

/// Sum of a column's membership values (its fuzzy cardinality).
pub fn cardinality(col: &FuzzySet) -> f64 {
    col.entries.iter().map(|&(_, v)| v).sum()
}

/// `sum(L ⊗ R)`; zero iff the two columns are disjoint.
pub fn self_intersection(l: &FuzzySet, r: &FuzzySet, logic: &dyn Logic) -> FcaResult<f64> {
    Ok(cardinality(&intersect(l, r, logic)?))
}

/// Column-major matrix of fuzzy sets sharing a row count, stored as the
/// packed `(i, p, x)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseColumns {
    universe: Universe,
    nrows: usize,
    i: Vec<usize>,
    x: Vec<f64>,
    p: Vec<usize>,
}

impl SparseColumns {
    pub fn new(universe: Universe, nrows: usize) -> Self {
        SparseColumns {
            universe,
            nrows,
            i: Vec::new(),
            x: Vec::new(),
            p: vec![0],
        }
    }

    pub fn from_columns(universe: Universe, nrows: usize, columns: &[FuzzySet]) -> FcaResult<Self> {
        let mut store = SparseColumns::new(universe, nrows);
        for col in columns {
            store.push_column(col)?;
        }
        Ok(store)
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.p.len() - 1
    }

    pub fn push_column(&mut self, col: &FuzzySet) -> FcaResult<()> {
        col.expect_universe(self.universe)?;
        for &(idx, v) in col.entries() {
            self.i.push(idx);
            self.x.push(v);
        }
        self.p.push(self.i.len());
        Ok(())
    }

    /// Materialises column `j` as an owned [`FuzzySet`].
    pub fn column(&self, j: usize) -> FuzzySet {
        let (start, end) = (self.p[j], self.p[j + 1]);
        let entries: Vec<(usize, f64)> = self.i[start..end]
            .iter()
            .zip(&self.x[start..end])
            .map(|(&idx, &v)| (idx, v))
            .collect();
        FuzzySet::new(self.universe, self.nrows, entries)
    }

    pub fn replace_column(&mut self, j: usize, col: &FuzzySet) -> FcaResult<()> {
        col.expect_universe(self.universe)?;
        let columns: Vec<FuzzySet> = (0..self.ncols())
            .map(|k| if k == j { col.clone() } else { self.column(k) })
            .collect();
        *self = SparseColumns::from_columns(self.universe, self.nrows, &columns)?;
        Ok(())
    }

    /// Keeps only the columns whose index is `true` in `keep`.
    pub fn retain_columns(&mut self, keep: &[bool]) {
        assert_eq!(keep.len(), self.ncols());
        let kept: Vec<FuzzySet> = (0..self.ncols())
            .filter(|&j| keep[j])
            .map(|j| self.column(j))
            .collect();
        *self = SparseColumns::from_columns(self.universe, self.nrows, &kept)
            .expect("columns already share this store's universe");
    }

    /// Per-column cardinalities. Columns are independent (spec.md §5's
    /// named parallelism opportunity), so this fans out over `rayon`
    /// while still returning results in column order.
    pub fn col_sums(&self) -> Vec<f64> {
        (0..self.ncols())
            .into_par_iter()
            .map(|j| cardinality(&self.column(j)))
            .collect()
    }

    /// Value at `(row, col)`, `0.0` if absent. `O(log nnz_col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let (start, end) = (self.p[col], self.p[col + 1]);
        self.i[start..end]
            .binary_search(&row)
            .map(|pos| self.x[start + pos])
            .unwrap_or(0.0)
    }

    /// Every stored `(row, value)` pair across the whole matrix, in no
    /// particular column order. Used to build per-row grade sets in
    /// `O(nnz)` total rather than re-scanning every column per row.
    pub fn entries(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.i.iter().zip(&self.x).map(|(&i, &x)| (i, x))
    }
}
