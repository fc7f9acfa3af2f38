//! Closure Under a Rule Base (C7)
//!
//! Forward-chaining fixed point of `S ← S ∪ RHS[:,i]` over every rule
//! `i` whose `LHS[:,i] ⊆ S`. Terminates because each pass either grows
//! `S` strictly or converges (attribute count bounds the number of
//! strict growths).

use crate::error::{FcaError, FcaResult, Universe};
use crate::implication::ImplicationStore;
use crate::simplify;
use crate::sparse::{self, FuzzySet};

/// `cl_Σ(S)`: the least fixed point of the rule base's forward chaining.
pub fn closure_under_rules(s: &FuzzySet, store: &ImplicationStore) -> FcaResult<FuzzySet> {
    s.expect_universe(Universe::Attributes)?;
    let mut current = s.clone();
    loop {
        let mut grew = false;
        for i in 0..store.cardinality() {
            let lhs = store.lhs(i);
            if sparse::subset(&lhs, &current)? {
                let rhs = store.rhs(i);
                if !sparse::subset(&rhs, &current)? {
                    current = sparse::union(&current, &rhs)?;
                    grew = true;
                }
            }
        }
        if !grew {
            return Ok(current);
        }
    }
}

/// *reduce* mode: the closure, plus the rules whose LHS never fired
/// against the accumulating closure, simplified per §4.8.
pub fn closure_under_rules_reduced(
    s: &FuzzySet,
    store: &ImplicationStore,
) -> FcaResult<(FuzzySet, ImplicationStore)> {
    s.expect_universe(Universe::Attributes)?;
    let mut current = s.clone();
    let mut used = vec![false; store.cardinality()];
    loop {
        let mut grew = false;
        for i in 0..store.cardinality() {
            if used[i] {
                continue;
            }
            let lhs = store.lhs(i);
            if sparse::subset(&lhs, &current)? {
                used[i] = true;
                let rhs = store.rhs(i);
                if !sparse::subset(&rhs, &current)? {
                    current = sparse::union(&current, &rhs)?;
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
    }
    let remaining: Vec<(FuzzySet, FuzzySet)> = (0..store.cardinality())
        .filter(|&i| !used[i])
        .map(|i| (store.lhs(i), store.rhs(i)))
        .collect();
    let remaining_store = ImplicationStore::new(store.n_attrs(), &remaining)
        .map_err(|e| FcaError::InvariantViolation {
            rule: "reduce".to_string(),
            reason: e.to_string(),
        })?;
    let simplified = simplify::apply_rules(
        &remaining_store,
        &["simplification".to_string()],
        0,
        10_000,
        None,
    )?;
    Ok((current, simplified))
}
