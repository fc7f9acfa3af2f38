//! S6 — a derived canonical basis must be respected by every object it
//! was derived from.
//!
//! 6 objects x 6 attributes under Gödel logic. `respects(I, basis)` and
//! `holds_in(basis, I)` must both be all-true: the basis is sound for
//! the incidence it came from by construction.

use fca_core::logic::Godel;
use fca_core::{entailment, next_closure, Incidence, ImplicationStore};

fn library() -> Incidence {
    let attr_names = vec!["a", "b", "c", "d", "e", "f"]
        .into_iter()
        .map(String::from)
        .collect();
    let obj_names = vec!["o1", "o2", "o3", "o4", "o5", "o6"]
        .into_iter()
        .map(String::from)
        .collect();
    let dense = vec![
        vec![1.0, 0.5, 1.0, 0.0, 0.5, 1.0],
        vec![0.0, 1.0, 0.5, 1.0, 0.0, 0.5],
        vec![0.5, 0.0, 1.0, 0.5, 1.0, 0.0],
        vec![1.0, 0.5, 0.0, 1.0, 0.5, 1.0],
        vec![0.0, 1.0, 0.5, 0.0, 1.0, 0.5],
        vec![0.5, 0.5, 1.0, 1.0, 0.0, 1.0],
    ];
    Incidence::from_dense(&dense, attr_names, obj_names)
}

#[test]
fn derived_basis_respects_every_object_vector() {
    let inc = library();
    let logic = Godel;
    let report = next_closure::enumerate_implications(&inc, &logic, false, None).unwrap();
    let basis = ImplicationStore::new(inc.n_attrs(), &report.implications.unwrap()).unwrap();

    let vectors: Vec<_> = (0..inc.n_objs()).map(|o| inc.object_vector(o)).collect();
    let respects = basis.respects(&vectors).unwrap();
    for (obj, row) in respects.iter().enumerate() {
        assert!(row.iter().all(|&ok| ok), "object {obj} violates the derived basis");
    }

    assert!(entailment::holds_in(&basis, &inc).unwrap());
}
