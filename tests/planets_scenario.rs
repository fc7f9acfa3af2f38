//! S1 — Wille's planets example (classical logic).
//!
//! 9 objects x 7 attributes, binary. Exercises the full pipeline against
//! a well-known worked example from the formal concept analysis
//! literature.

use fca_core::logic::Classical;
use fca_core::{closure_rules, next_closure, Incidence, Universe};
use fca_core::sparse::FuzzySet;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn planets() -> Incidence {
    let attr_names = names(&["small", "medium", "large", "near", "far", "moon", "no_moon"]);
    let obj_names = names(&[
        "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune", "pluto",
    ]);
    let dense = vec![
        vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0], // small
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0], // medium
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0], // large
        vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0], // near
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0], // far
        vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], // moon
        vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], // no_moon
    ];
    Incidence::from_dense(&dense, attr_names, obj_names)
}

fn attrs(inc: &Incidence, names: &[&str]) -> FuzzySet {
    let entries = names
        .iter()
        .map(|n| (inc.attr_names().iter().position(|a| a == n).unwrap(), 1.0))
        .collect();
    FuzzySet::new(Universe::Attributes, inc.n_attrs(), entries)
}

#[test]
fn closure_of_moon_and_large_adds_far() {
    let inc = planets();
    let logic = Classical;
    let t = attrs(&inc, &["moon", "large"]);
    let closed = inc.closure(&t, &logic).unwrap();
    assert_eq!(closed, attrs(&inc, &["moon", "large", "far"]));
}

#[test]
fn closure_of_large_alone_already_contains_far() {
    let inc = planets();
    let logic = Classical;
    let t = attrs(&inc, &["large"]);
    let closed = inc.closure(&t, &logic).unwrap();
    assert!(fca_core::sparse::subset(&attrs(&inc, &["large", "far"]), &closed).unwrap());
}

#[test]
fn canonical_basis_entails_moon_large_implies_far() {
    let inc = planets();
    let logic = Classical;
    let report = next_closure::enumerate_implications(&inc, &logic, false, None).unwrap();
    let basis =
        fca_core::ImplicationStore::new(inc.n_attrs(), &report.implications.unwrap()).unwrap();

    let seed = attrs(&inc, &["moon", "large"]);
    let derived = closure_rules::closure_under_rules(&seed, &basis).unwrap();
    assert!(fca_core::sparse::subset(&attrs(&inc, &["far"]), &derived).unwrap());
}

#[test]
fn closure_count_matches_intent_count_and_is_deterministic() {
    let inc = planets();
    let logic = Classical;
    let first = next_closure::enumerate_concepts(&inc, &logic, true, None).unwrap();
    let second = next_closure::enumerate_concepts(&inc, &logic, true, None).unwrap();
    assert_eq!(first.closure_count, first.intents.len());
    assert_eq!(first.closure_count, second.closure_count);
    assert_eq!(first.intents.len(), second.intents.len());
}
