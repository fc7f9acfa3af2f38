//! S4 — simplifying a synthetic basis.
//!
//! `{a}=>{b}, {a,b}=>{c,d}, {a,b,c}=>{d,e}`. After one simplification
//! pass, `{d}` in the third rule's RHS is already implied by the second
//! rule, so it drops out.

use fca_core::sparse::{self, FuzzySet};
use fca_core::{simplify, ImplicationStore, Universe};

fn attr(n: usize, idx: &[usize]) -> FuzzySet {
    FuzzySet::new(Universe::Attributes, n, idx.iter().map(|&i| (i, 1.0)).collect())
}

fn basis() -> ImplicationStore {
    ImplicationStore::new(
        5,
        &[
            (attr(5, &[0]), attr(5, &[1])),
            (attr(5, &[0, 1]), attr(5, &[2, 3])),
            (attr(5, &[0, 1, 2]), attr(5, &[3, 4])),
        ],
    )
    .unwrap()
}

#[test]
fn simplification_shrinks_the_third_rules_rhs_and_nothing_else() {
    let before = basis();
    let after = simplify::apply_rules(&before, &["simplification".to_string()], 0, 1000, None).unwrap();

    assert_eq!(after.cardinality(), before.cardinality());

    let mut rules: Vec<_> = after.rules().collect();
    rules.sort_by_key(|(l, _)| sparse::cardinality(l) as usize);
    assert_eq!(rules[0].1, attr(5, &[1]));
    assert_eq!(rules[1].1, attr(5, &[2, 3]));
    assert_eq!(rules[2].1, attr(5, &[4]));

    let total_before: f64 = before.rules().map(|(_, r)| sparse::cardinality(&r)).sum();
    let total_after: f64 = after.rules().map(|(_, r)| sparse::cardinality(&r)).sum();
    assert!(total_after < total_before);
}
