//! S2 — the M3 diamond lattice, from the nominal scale: 3 objects x 3
//! attributes, object `o_i` carrying only attribute `a_i`. Modular but
//! not distributive; a standard counterexample for concept-lattice
//! enumeration.

use fca_core::logic::Classical;
use fca_core::{next_closure, sparse, Incidence};

fn names(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn m3() -> Incidence {
    let dense = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];
    Incidence::from_dense(&dense, names("a", 3), names("o", 3))
}

#[test]
fn canonical_basis_has_exactly_the_three_diamond_rules() {
    let inc = m3();
    let logic = Classical;
    let report = next_closure::enumerate_implications(&inc, &logic, false, None).unwrap();
    let implications = report.implications.unwrap();
    assert_eq!(implications.len(), 3);
    for (lhs, rhs) in &implications {
        assert_eq!(sparse::cardinality(lhs), 2.0);
        assert_eq!(sparse::cardinality(rhs), 1.0);
    }
}

#[test]
fn lattice_has_five_concepts() {
    // bottom (intent = all three attributes), three pairwise-incomparable
    // atoms (intent = a single attribute), top (intent = empty).
    let inc = m3();
    let logic = Classical;
    let report = next_closure::enumerate_concepts(&inc, &logic, true, None).unwrap();
    assert_eq!(report.intents.len(), 5);

    let sizes: Vec<f64> = report.intents.iter().map(sparse::cardinality).collect();
    assert!(sizes.iter().any(|&s| s == 0.0)); // top
    assert!(sizes.iter().any(|&s| s == 3.0)); // bottom
    assert_eq!(sizes.iter().filter(|&&s| s == 1.0).count(), 3); // three atoms
}
