//! Derivation Kernel (C3)
//!
//! The Galois connection over a (possibly fuzzy) incidence relation: intent,
//! extent, and their composition, closure. An [`Incidence`] is immutable
//! after construction — attribute names, object names, and the underlying
//! [`SparseColumns`] matrix never change shape — except through
//! [`Incidence::rescale_in_place`], the one mutating operation the kernel
//! exposes.

use crate::error::{FcaError, FcaResult, Universe};
use crate::grades::GradeSet;
use crate::logic::Logic;
use crate::sparse::{FuzzySet, SparseColumns};

/// Rows = attributes, columns = objects (spec's transposed layout —
/// each column is one object's full attribute vector).
#[derive(Debug, Clone)]
pub struct Incidence {
    attr_names: Vec<String>,
    obj_names: Vec<String>,
    data: SparseColumns,
    grades: GradeSet,
    is_binary: bool,
}

fn compute_is_binary(data: &SparseColumns) -> bool {
    data.entries().all(|(_, v)| v == 1.0)
}

impl Incidence {
    /// Builds from a dense `attributes × objects` matrix in `[0, 1]`.
    pub fn from_dense(dense: &[Vec<f64>], attr_names: Vec<String>, obj_names: Vec<String>) -> Self {
        let n_attrs = dense.len();
        let n_objs = obj_names.len();
        let columns: Vec<FuzzySet> = (0..n_objs)
            .map(|o| {
                let entries: Vec<(usize, f64)> = (0..n_attrs)
                    .map(|a| (a, dense[a][o]))
                    .collect();
                FuzzySet::new(Universe::Attributes, n_attrs, entries)
            })
            .collect();
        let data = SparseColumns::from_columns(Universe::Attributes, n_attrs, &columns)
            .expect("columns were built over a common universe");
        let grades = GradeSet::compute(&data, n_attrs);
        let is_binary = compute_is_binary(&data);
        Incidence {
            attr_names,
            obj_names,
            data,
            grades,
            is_binary,
        }
    }

    /// Builds from the packed column-sparse triple `(i, p, x)` of §6:
    /// `i` row (attribute) indices ascending per column, `p` column
    /// pointers with `p[0] = 0`, `x` the matching values.
    pub fn from_sparse(
        i: Vec<usize>,
        p: Vec<usize>,
        x: Vec<f64>,
        attr_names: Vec<String>,
        obj_names: Vec<String>,
    ) -> FcaResult<Self> {
        let n_attrs = attr_names.len();
        let n_objs = obj_names.len();
        if p.len() != n_objs + 1 {
            return Err(FcaError::IndexOutOfRange {
                index: p.len(),
                universe: Universe::Objects,
                size: n_objs + 1,
            });
        }
        if i.len() != x.len() {
            return Err(FcaError::IndexOutOfRange {
                index: x.len(),
                universe: Universe::Attributes,
                size: i.len(),
            });
        }
        if p[0] != 0 || p.last() != Some(&i.len()) || p.windows(2).any(|w| w[0] > w[1]) {
            return Err(FcaError::IndexOutOfRange {
                index: *p.last().unwrap_or(&0),
                universe: Universe::Objects,
                size: i.len(),
            });
        }
        if let Some(&row) = i.iter().find(|&&row| row >= n_attrs) {
            return Err(FcaError::IndexOutOfRange {
                index: row,
                universe: Universe::Attributes,
                size: n_attrs,
            });
        }
        let columns: Vec<FuzzySet> = (0..n_objs)
            .map(|o| {
                let (start, end) = (p[o], p[o + 1]);
                let entries: Vec<(usize, f64)> = i[start..end]
                    .iter()
                    .zip(&x[start..end])
                    .map(|(&row, &v)| (row, v))
                    .collect();
                FuzzySet::new(Universe::Attributes, n_attrs, entries)
            })
            .collect();
        let data = SparseColumns::from_columns(Universe::Attributes, n_attrs, &columns)?;
        let grades = GradeSet::compute(&data, n_attrs);
        let is_binary = compute_is_binary(&data);
        Ok(Incidence {
            attr_names,
            obj_names,
            data,
            grades,
            is_binary,
        })
    }

    pub fn attr_names(&self) -> &[String] {
        &self.attr_names
    }

    pub fn obj_names(&self) -> &[String] {
        &self.obj_names
    }

    pub fn n_attrs(&self) -> usize {
        self.attr_names.len()
    }

    pub fn n_objs(&self) -> usize {
        self.obj_names.len()
    }

    /// Whether every stored entry is `1.0` (the matrix is `{0,1}`-valued).
    /// Cached at construction, recomputed by [`Incidence::rescale_in_place`].
    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    pub fn grades_for(&self, attr: usize) -> &[f64] {
        self.grades.grades_for(attr)
    }

    /// `I[a, o]`.
    pub fn value_at(&self, attr: usize, obj: usize) -> f64 {
        self.data.get(attr, obj)
    }

    /// Object `obj`'s full attribute vector, `I[:, obj]`.
    pub fn object_vector(&self, obj: usize) -> FuzzySet {
        self.data.column(obj)
    }

    fn full_attributes(&self) -> FuzzySet {
        let entries: Vec<(usize, f64)> = (0..self.n_attrs()).map(|a| (a, 1.0)).collect();
        FuzzySet::new(Universe::Attributes, self.n_attrs(), entries)
    }

    /// `S↑(a) = inf_o (S(o) → I[a,o])`.
    pub fn intent(&self, objects: &FuzzySet, logic: &dyn Logic) -> FcaResult<FuzzySet> {
        objects.expect_universe(Universe::Objects)?;
        if objects.is_empty() {
            return Ok(self.full_attributes());
        }
        let mut entries = Vec::with_capacity(self.n_attrs());
        for a in 0..self.n_attrs() {
            let mut inf = 1.0_f64;
            for &(o, sv) in objects.entries() {
                let iv = self.data.get(a, o);
                inf = inf.min(logic.residuum(sv, iv));
                if inf == 0.0 {
                    break;
                }
            }
            if inf != 0.0 {
                entries.push((a, inf));
            }
        }
        Ok(FuzzySet::new(Universe::Attributes, self.n_attrs(), entries))
    }

    /// `T↓(o) = inf_a (T(a) → I[a,o])`.
    pub fn extent(&self, attrs: &FuzzySet, logic: &dyn Logic) -> FcaResult<FuzzySet> {
        attrs.expect_universe(Universe::Attributes)?;
        let mut entries = Vec::with_capacity(self.n_objs());
        for o in 0..self.n_objs() {
            let mut inf = 1.0_f64;
            if attrs.is_empty() {
                // Vacuously true over every attribute.
            } else {
                for &(a, tv) in attrs.entries() {
                    let iv = self.data.get(a, o);
                    inf = inf.min(logic.residuum(tv, iv));
                    if inf == 0.0 {
                        break;
                    }
                }
            }
            if inf != 0.0 {
                entries.push((o, inf));
            }
        }
        Ok(FuzzySet::new(Universe::Objects, self.n_objs(), entries))
    }

    /// `cl(T) = (T↓)↑`. Idempotent, extensive, monotone.
    pub fn closure(&self, attrs: &FuzzySet, logic: &dyn Logic) -> FcaResult<FuzzySet> {
        let extent = self.extent(attrs, logic)?;
        self.intent(&extent, logic)
    }

    /// Applies a monotone map to every stored entry in place, dropping
    /// any that become zero, and recomputes `is_binary`.
    pub fn rescale_in_place(&mut self, f: impl Fn(f64) -> f64) {
        let n_attrs = self.n_attrs();
        let columns: Vec<FuzzySet> = (0..self.n_objs())
            .map(|o| {
                let entries: Vec<(usize, f64)> = self
                    .data
                    .column(o)
                    .entries()
                    .iter()
                    .map(|&(a, v)| (a, f(v)))
                    .collect();
                FuzzySet::new(Universe::Attributes, n_attrs, entries)
            })
            .collect();
        self.data = SparseColumns::from_columns(Universe::Attributes, n_attrs, &columns)
            .expect("columns were built over a common universe");
        self.grades = GradeSet::compute(&self.data, n_attrs);
        self.is_binary = compute_is_binary(&self.data);
    }
}
