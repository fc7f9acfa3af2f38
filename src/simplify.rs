//! Simplification Rewrite Engine (C8)
//!
//! Four equivalence rewrites over an [`ImplicationStore`], each
//! preserving the closure operator the rule set induces:
//!
//! - **reduction** drops trivially-true rules (`RHS ⊆ LHS`).
//! - **composition** merges rules that share an LHS.
//! - **generalization** drops a rule subsumed by a more general one
//!   differing in exactly one LHS attribute.
//! - **simplification** (`Rsimplification_bg`) is the named fixed-point
//!   algorithm that shrinks one rule's RHS using another's, and its
//!   `rsimp` back-rule counterpart.
//!
//! A process-wide registry (mirroring [`crate::logic`]'s) maps names to
//! rewrites; `apply_rules` runs a named sequence to a fixed point.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::trace;

use crate::cancel::CancelToken;
use crate::error::{FcaError, FcaResult};
use crate::implication::ImplicationStore;
use crate::sparse::{self, FuzzySet};

/// A closure-preserving transformation on an implication store.
///
/// `fixed` names a protected prefix (spec.md §9): columns `0..fixed` are
/// never chosen as the target of a shrinking rewrite. `fixed = 0` means
/// no protection.
pub trait Rewrite: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, store: &ImplicationStore, fixed: usize) -> FcaResult<ImplicationStore>;
}

struct Reduction;
impl Rewrite for Reduction {
    fn name(&self) -> &str {
        "reduction"
    }
    fn apply(&self, store: &ImplicationStore, _fixed: usize) -> FcaResult<ImplicationStore> {
        let kept: Vec<(FuzzySet, FuzzySet)> = store
            .rules()
            .filter(|(l, r)| !sparse::subset(r, l).unwrap_or(false))
            .collect();
        ImplicationStore::new(store.n_attrs(), &kept)
    }
}

struct Composition;
impl Rewrite for Composition {
    fn name(&self) -> &str {
        "composition"
    }
    fn apply(&self, store: &ImplicationStore, _fixed: usize) -> FcaResult<ImplicationStore> {
        let mut merged: Vec<(FuzzySet, FuzzySet)> = Vec::new();
        'outer: for (lhs, rhs) in store.rules() {
            for (existing_lhs, existing_rhs) in &mut merged {
                if sparse::equal(existing_lhs, &lhs)? {
                    *existing_rhs = sparse::union(existing_rhs, &rhs)?;
                    continue 'outer;
                }
            }
            merged.push((lhs, rhs));
        }
        ImplicationStore::new(store.n_attrs(), &merged)
    }
}

/// A rule whose LHS differs from a more general rule's LHS by exactly
/// one attribute, and whose RHS is already entailed by that more
/// general rule's RHS, is redundant.
struct Generalization;
impl Rewrite for Generalization {
    fn name(&self) -> &str {
        "generalization"
    }
    fn apply(&self, store: &ImplicationStore, _fixed: usize) -> FcaResult<ImplicationStore> {
        let rules: Vec<(FuzzySet, FuzzySet)> = store.rules().collect();
        let mut drop = vec![false; rules.len()];
        for i in 0..rules.len() {
            let (li, ri) = &rules[i];
            for (j, (lj, rj)) in rules.iter().enumerate() {
                if i == j || drop[j] {
                    continue;
                }
                if sparse::subset(li, lj)? && !sparse::equal(li, lj)? {
                    let extra = sparse::difference(lj, li)?;
                    if sparse::cardinality(&extra) == 1.0 && sparse::subset(rj, ri)? {
                        drop[j] = true;
                    }
                }
            }
        }
        let kept: Vec<(FuzzySet, FuzzySet)> = rules
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| !drop[*idx])
            .map(|(_, r)| r)
            .collect();
        ImplicationStore::new(store.n_attrs(), &kept)
    }
}

/// `Rsimplification_bg` and its `rsimp` back-rule: same fixed-point
/// algorithm, `rsimp` considering candidates in reverse column order
/// (spec.md §4.8 names a "reverse variant" without further detail; this
/// is the documented resolution — see DESIGN.md).
struct Simplification {
    reverse: bool,
}
impl Rewrite for Simplification {
    fn name(&self) -> &str {
        if self.reverse {
            "rsimp"
        } else {
            "simplification"
        }
    }
    fn apply(&self, store: &ImplicationStore, fixed: usize) -> FcaResult<ImplicationStore> {
        simplification_pass(store, fixed, self.reverse)
    }
}

/// Whether `a` and `b` share no attribute index, regardless of the
/// membership values held there — a structural property, not a fuzzy
/// one, so it needs no `Logic` to evaluate.
fn attrs_disjoint(a: &FuzzySet, b: &FuzzySet) -> bool {
    let (mut ai, mut bi) = (a.entries().iter().peekable(), b.entries().iter().peekable());
    loop {
        match (ai.peek(), bi.peek()) {
            (Some(&&(ia, _)), Some(&&(ib, _))) => match ia.cmp(&ib) {
                std::cmp::Ordering::Less => {
                    ai.next();
                }
                std::cmp::Ordering::Greater => {
                    bi.next();
                }
                std::cmp::Ordering::Equal => return false,
            },
            _ => return true,
        }
    }
}

/// The algorithm of spec.md §4.8 "Algorithm — simplification pass":
/// repeatedly find the rule with the most LHS-subset hits against other
/// disjoint rules, subtract its RHS from every hit, and retire it; drop
/// empty-RHS rules at the end.
fn simplification_pass(
    store: &ImplicationStore,
    fixed: usize,
    reverse: bool,
) -> FcaResult<ImplicationStore> {
    let n = store.cardinality();
    if n == 0 {
        return Ok(store.clone());
    }
    let mut lhs: Vec<FuzzySet> = (0..n).map(|i| store.lhs(i)).collect();
    let mut rhs: Vec<FuzzySet> = (0..n).map(|i| store.rhs(i)).collect();
    let mut retired = vec![false; n];
    let protected = fixed.min(n);

    loop {
        // Step 1: columns with LHS/RHS disjoint are eligible targets.
        // Disjointness is structural (no shared attribute index) rather
        // than a fuzzy-value computation, so it holds the same way under
        // every active logic.
        let disjoint: Vec<bool> = (0..n).map(|j| attrs_disjoint(&lhs[j], &rhs[j])).collect();

        // S[i,j] = LHS[i] ⊆ (LHS[j] ∪ RHS[j]), restricted to disjoint j.
        let mut hits: Vec<Vec<usize>> = vec![Vec::new(); n];
        for i in 0..n {
            if retired[i] {
                continue;
            }
            for j in 0..n {
                if i == j || retired[j] || !disjoint[j] {
                    continue;
                }
                let union_j = sparse::union(&lhs[j], &rhs[j])?;
                if sparse::subset(&lhs[i], &union_j)? {
                    hits[i].push(j);
                }
            }
        }

        // Step 2/3: pick the candidate with the most hits, ties broken by
        // column index (highest wins in the forward pass, lowest in the
        // reverse one — this is what makes `rsimp` an actual reverse
        // variant rather than a relabelling of `simplification`);
        // protected columns are never picked as the source of a shrink.
        let candidate = (0..n)
            .filter(|&i| !retired[i] && i >= protected && hits[i].len() > 1)
            .max_by_key(|&i| (hits[i].len(), if reverse { n - i } else { i }));

        let Some(r) = candidate else {
            break;
        };

        // Fixed columns are protected from being shrunk as a target too.
        let targets: Vec<usize> = hits[r].iter().copied().filter(|&j| j >= protected).collect();

        if targets.is_empty() {
            retired[r] = true;
            continue;
        }
        for j in targets {
            rhs[j] = sparse::difference(&rhs[j], &rhs[r])?;
        }
        retired[r] = true;
    }

    let kept: Vec<(FuzzySet, FuzzySet)> = (0..n)
        .filter(|&i| sparse::cardinality(&rhs[i]) > 0.0)
        .map(|i| (lhs[i].clone(), rhs[i].clone()))
        .collect();
    ImplicationStore::new(store.n_attrs(), &kept)
}

struct Registry {
    extra: HashMap<String, Arc<dyn Rewrite>>,
}

fn registry() -> &'static Mutex<Registry> {
    static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Mutex::new(Registry {
            extra: HashMap::new(),
        })
    })
}

fn builtin(name: &str) -> Option<Arc<dyn Rewrite>> {
    match name.to_lowercase().as_str() {
        "reduction" => Some(Arc::new(Reduction)),
        "composition" => Some(Arc::new(Composition)),
        "generalization" | "generalisation" => Some(Arc::new(Generalization)),
        "simplification" => Some(Arc::new(Simplification { reverse: false })),
        "rsimp" => Some(Arc::new(Simplification { reverse: true })),
        _ => None,
    }
}

/// Registers a user-defined rewrite under `name`.
pub fn register(name: impl Into<String>, rewrite: Arc<dyn Rewrite>) {
    registry().lock().extra.insert(name.into().to_lowercase(), rewrite);
}

fn resolve(name: &str) -> FcaResult<Arc<dyn Rewrite>> {
    if let Some(r) = builtin(name) {
        return Ok(r);
    }
    registry()
        .lock()
        .extra
        .get(&name.to_lowercase())
        .cloned()
        .ok_or_else(|| FcaError::UnknownRewrite(name.to_string()))
}

/// Runs `sequence` in order, repeating full passes until one produces no
/// change, bounded by `max_passes` as a backstop against a
/// non-terminating user-registered rewrite. A rewrite returning an
/// invalid store is rejected with [`FcaError::InvariantViolation`] and
/// the store as of the end of the previous pass is returned unchanged.
pub fn apply_rules(
    store: &ImplicationStore,
    sequence: &[String],
    fixed: usize,
    max_passes: usize,
    cancel: Option<&CancelToken>,
) -> FcaResult<ImplicationStore> {
    let mut current = store.clone();
    for pass in 0..max_passes {
        if let Some(token) = cancel {
            token.check()?;
        }
        let before = current.clone();
        for name in sequence {
            let rewrite = resolve(name)?;
            let next = rewrite
                .apply(&current, fixed)
                .map_err(|e| FcaError::InvariantViolation {
                    rule: name.clone(),
                    reason: e.to_string(),
                })?;
            trace!(rule = name.as_str(), pass, "applied rewrite");
            current = next;
        }
        if current == before {
            return Ok(current);
        }
    }
    Ok(current)
}
