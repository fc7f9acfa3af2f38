//! Next-Closure Engine (C5)
//!
//! Two traversals over the lectic order of attribute subsets:
//!
//! - [`enumerate_concepts`] steps directly on the context's own Galois
//!   closure `cl`; every accepted set is a concept intent.
//! - [`enumerate_implications`] steps on Ganter's extended closure for
//!   computing the Duquenne-Guigues canonical basis: the stepping
//!   operator is the *implication closure* of the rules accumulated so
//!   far (not `cl`), so pseudo-intents that never appear as anyone's
//!   `cl`-closure are still visited in lectic order. Each accepted set
//!   is then tested against `cl` separately — sets where the two agree
//!   are concept intents; sets where they disagree are pseudo-intents,
//!   and a new rule is appended to the basis and folded into the
//!   stepping operator for every subsequent step.
//!
//! Stepping directly on `cl` cannot compute the canonical basis: a
//! pseudo-intent's lectic successor is its own `cl`-closure, which
//! immediately replaces it as `current`, so other pseudo-intents that
//! would only be reached as successors of the (discarded) pseudo-intent
//! itself are never visited and the basis under-generates.

use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::{FcaError, FcaResult, Universe};
use crate::incidence::Incidence;
use crate::logic::Logic;
use crate::sparse::{self, FuzzySet};

/// A closed set together with the (possibly non-closed) candidate that
/// produced it via the lectic step.
struct Step {
    candidate: FuzzySet,
    closed: FuzzySet,
}

/// `A <_L B` test data: searches `k = n..1` for the smallest grade whose
/// `close`-closure agrees with `current` below `k`. Shared lectic
/// stepping search, parameterised by whichever closure operator the
/// caller wants to step on.
fn step(
    inc: &Incidence,
    current: &FuzzySet,
    close: impl Fn(&FuzzySet) -> FcaResult<FuzzySet>,
) -> FcaResult<Option<Step>> {
    let n = inc.n_attrs();
    for k in (0..n).rev() {
        let current_k = current.get(k);
        for &v in inc.grades_for(k) {
            if v <= current_k {
                continue;
            }
            let mut entries: Vec<(usize, f64)> = current
                .entries()
                .iter()
                .filter(|&&(idx, _)| idx < k)
                .copied()
                .collect();
            entries.push((k, v));
            let candidate = FuzzySet::new(Universe::Attributes, n, entries);
            let closed = close(&candidate)?;
            let agrees = (0..k).all(|j| closed.get(j) == current.get(j));
            if agrees {
                return Ok(Some(Step { candidate, closed }));
            }
        }
    }
    Ok(None)
}

/// Forward-chains `x` under `implications` to a fixed point. The pure
/// implication-closure used to step through pseudo-intent candidates
/// that the context closure alone would skip over.
fn implication_closure(implications: &[(FuzzySet, FuzzySet)], x: &FuzzySet) -> FcaResult<FuzzySet> {
    let mut current = x.clone();
    loop {
        let mut grew = false;
        for (lhs, rhs) in implications {
            if sparse::subset(lhs, &current)? && !sparse::subset(rhs, &current)? {
                current = sparse::union(&current, rhs)?;
                grew = true;
            }
        }
        if !grew {
            return Ok(current);
        }
    }
}

/// The result of a full Next-Closure run.
#[derive(Debug, Clone)]
pub struct NextClosureReport {
    pub intents: Vec<FuzzySet>,
    pub extents: Option<Vec<FuzzySet>>,
    /// `(pseudo_intent, new_attributes)` pairs; `None` in concepts mode.
    pub implications: Option<Vec<(FuzzySet, FuzzySet)>>,
    /// Number of accepted concept intents — equal to `intents.len()` by
    /// construction, reported separately as the diagnostic named in
    /// spec.md §8 S1.
    pub closure_count: usize,
}

/// Concepts mode: every intent, optionally paired with its extent.
pub fn enumerate_concepts(
    inc: &Incidence,
    logic: &dyn Logic,
    save_extents: bool,
    cancel: Option<&CancelToken>,
) -> FcaResult<NextClosureReport> {
    let empty = FuzzySet::empty(Universe::Attributes, inc.n_attrs());
    let mut current = inc.closure(&empty, logic)?;

    let mut intents = vec![current.clone()];
    let mut extents = if save_extents {
        Some(vec![inc.extent(&current, logic)?])
    } else {
        None
    };

    loop {
        if let Some(token) = cancel {
            token.check()?;
        }
        match step(inc, &current, |x| inc.closure(x, logic))? {
            None => break,
            Some(Step { candidate: _, closed }) => {
                debug!(intent_card = sparse::cardinality(&closed), "next_closure step accepted");
                if let Some(extents) = extents.as_mut() {
                    extents.push(inc.extent(&closed, logic)?);
                }
                intents.push(closed.clone());
                current = closed;
            }
        }
    }

    let closure_count = intents.len();
    Ok(NextClosureReport {
        intents,
        extents,
        implications: None,
        closure_count,
    })
}

/// Implications mode: the Duquenne-Guigues canonical basis, via Ganter's
/// extended Next-Closure over pseudo-intents (see module docs). Also
/// returns every concept intent encountered along the way.
pub fn enumerate_implications(
    inc: &Incidence,
    logic: &dyn Logic,
    save_concepts: bool,
    cancel: Option<&CancelToken>,
) -> FcaResult<NextClosureReport> {
    let n = inc.n_attrs();
    let mut implications: Vec<(FuzzySet, FuzzySet)> = Vec::new();
    let mut current = FuzzySet::empty(Universe::Attributes, n);

    let mut intents = Vec::new();
    let mut extents = save_concepts.then(Vec::new);

    loop {
        if let Some(token) = cancel {
            token.check()?;
        }

        let closed_in_context = inc.closure(&current, logic)?;
        if sparse::equal(&closed_in_context, &current)? {
            intents.push(current.clone());
            if let Some(extents) = extents.as_mut() {
                extents.push(inc.extent(&current, logic)?);
            }
        } else {
            let new_part = sparse::difference(&closed_in_context, &current)?;
            debug!(
                lhs_card = sparse::cardinality(&current),
                new_card = sparse::cardinality(&new_part),
                "pseudo-intent found"
            );
            implications.push((current.clone(), new_part));
        }

        match step(inc, &current, |x| implication_closure(&implications, x))? {
            None => break,
            Some(Step { candidate: _, closed }) => current = closed,
        }
    }

    let closure_count = intents.len();
    Ok(NextClosureReport {
        intents,
        extents,
        implications: Some(implications),
        closure_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Classical;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    /// The nominal scale: object `o_i` has only attribute `a_i`. Its
    /// concept lattice is the M3 diamond.
    fn m3() -> Incidence {
        let dense = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        Incidence::from_dense(&dense, names("a", 3), names("o", 3))
    }

    #[test]
    fn concepts_are_in_strictly_ascending_lectic_order_with_no_duplicates() {
        let inc = m3();
        let logic = Classical;
        let report = enumerate_concepts(&inc, &logic, true, None).unwrap();
        assert_eq!(report.closure_count, report.intents.len());
        for w in report.intents.windows(2) {
            assert_ne!(w[0].entries(), w[1].entries());
        }
        // cl(empty) is always first.
        let empty = FuzzySet::empty(Universe::Attributes, 3);
        assert_eq!(inc.closure(&empty, &logic).unwrap(), report.intents[0]);
    }

    #[test]
    fn m3_canonical_basis_has_the_three_diamond_rules() {
        let inc = m3();
        let logic = Classical;
        let report = enumerate_implications(&inc, &logic, false, None).unwrap();
        let implications = report.implications.unwrap();
        // {a_i, a_j} => {a_k} for every permutation of the diamond.
        assert_eq!(implications.len(), 3);
        for (lhs, rhs) in &implications {
            assert_eq!(sparse::cardinality(lhs), 2.0);
            assert_eq!(sparse::cardinality(rhs), 1.0);
        }
    }

    #[test]
    fn canonical_basis_closure_matches_incidence_closure() {
        let inc = m3();
        let logic = Classical;
        let report = enumerate_implications(&inc, &logic, false, None).unwrap();
        let implications = report.implications.unwrap();
        for intent in &report.intents {
            let mut closed = intent.clone();
            loop {
                let mut grew = false;
                for (lhs, rhs) in &implications {
                    if sparse::subset(lhs, &closed).unwrap() && !sparse::subset(rhs, &closed).unwrap() {
                        closed = sparse::union(&closed, rhs).unwrap();
                        grew = true;
                    }
                }
                if !grew {
                    break;
                }
            }
            assert!(sparse::equal(&closed, intent).unwrap());
        }
    }

    #[test]
    fn canonical_basis_closure_matches_incidence_closure_for_non_intents_too() {
        // Property 4 over every pseudo-intent surfaced along the way, not
        // just over the concept intents: cl_B(T) must equal cl(T) even
        // when T itself never appears as a concept.
        let inc = m3();
        let logic = Classical;
        let report = enumerate_implications(&inc, &logic, false, None).unwrap();
        let implications = report.implications.unwrap();
        for (pseudo_intent, _) in &implications {
            let expected = inc.closure(pseudo_intent, &logic).unwrap();
            let mut closed = pseudo_intent.clone();
            loop {
                let mut grew = false;
                for (lhs, rhs) in &implications {
                    if sparse::subset(lhs, &closed).unwrap() && !sparse::subset(rhs, &closed).unwrap() {
                        closed = sparse::union(&closed, rhs).unwrap();
                        grew = true;
                    }
                }
                if !grew {
                    break;
                }
            }
            assert!(sparse::equal(&closed, &expected).unwrap());
        }
    }

    #[test]
    fn cancellation_is_observed() {
        let inc = m3();
        let logic = Classical;
        let token = CancelToken::new();
        token.cancel();
        assert!(matches!(
            enumerate_concepts(&inc, &logic, false, Some(&token)),
            Err(FcaError::Cancelled)
        ));
    }

    #[test]
    fn universal_attribute_yields_an_empty_lhs_rule() {
        // a0 holds for every object; a1 distinguishes o0 from o1.
        let dense = vec![vec![1.0, 1.0], vec![1.0, 0.0]];
        let inc = Incidence::from_dense(&dense, names("a", 2), names("o", 2));
        let logic = Classical;
        let report = enumerate_implications(&inc, &logic, false, None).unwrap();
        let implications = report.implications.unwrap();
        let empty = FuzzySet::empty(Universe::Attributes, 2);
        let universal_rule = implications
            .iter()
            .find(|(lhs, _)| sparse::equal(lhs, &empty).unwrap());
        assert!(universal_rule.is_some(), "expected a rule with an empty LHS");
        let (_, rhs) = universal_rule.unwrap();
        assert_eq!(sparse::cardinality(rhs), 1.0);
    }
}
