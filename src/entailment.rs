//! Entailment and Equivalence (C9)
//!
//! Semantic comparison of two implication sets via the closures they
//! induce (C7), plus a convenience wrapper over [`ImplicationStore::holds_in`].

use crate::closure_rules::closure_under_rules;
use crate::error::FcaResult;
use crate::implication::ImplicationStore;
use crate::incidence::Incidence;
use crate::sparse;

/// `A ⊨ B`: every rule `(P_i → Q_i)` in `b` satisfies `Q_i ⊆ cl_A(P_i)`.
pub fn entails(a: &ImplicationStore, b: &ImplicationStore) -> FcaResult<bool> {
    for (p, q) in b.rules() {
        let closed = closure_under_rules(&p, a)?;
        if !sparse::subset(&q, &closed)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `A ≡ B`: `A ⊨ B ∧ B ⊨ A`.
pub fn equiv(a: &ImplicationStore, b: &ImplicationStore) -> FcaResult<bool> {
    Ok(entails(a, b)? && entails(b, a)?)
}

/// Every object's attribute vector in `inc` respects every rule in `basis`.
pub fn holds_in(basis: &ImplicationStore, inc: &Incidence) -> FcaResult<bool> {
    Ok(basis.holds_in(inc)?.into_iter().all(|ok| ok))
}
