//! Logic Registry (C1)
//!
//! A residuated lattice `([0,1], ⊗, →, ¬)` parameterises every fuzzy
//! operation in the core. No operation outside this module hard-codes
//! `min`/`max` — everything goes through `tnorm`/`residuum`. The active
//! logic is process-scoped; the only way to change it is the scoped
//! [`with_logic`] acquisition, which restores the previous logic on every
//! exit path, including panics.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::error::{FcaError, FcaResult};

/// A residuated lattice on `[0, 1]`.
///
/// Implementations must keep `⊗` commutative, associative, monotone, with
/// unit `1`, and `→` its residuum: `x ⊗ y ≤ z ⇔ x ≤ y → z`.
pub trait Logic: Send + Sync {
    fn name(&self) -> &'static str;
    fn tnorm(&self, x: f64, y: f64) -> f64;
    fn residuum(&self, x: f64, y: f64) -> f64;
    fn negation(&self, x: f64) -> f64 {
        self.residuum(x, 0.0)
    }
}

/// The classical two-valued restriction (`{0,1}`), shared by every
/// built-in logic's binary case but also usable standalone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classical;

impl Logic for Classical {
    fn name(&self) -> &'static str {
        "classical"
    }
    fn tnorm(&self, x: f64, y: f64) -> f64 {
        if x >= 1.0 && y >= 1.0 {
            1.0
        } else {
            0.0
        }
    }
    fn residuum(&self, x: f64, y: f64) -> f64 {
        if x <= y {
            1.0
        } else {
            0.0
        }
    }
}

/// Gödel logic: `⊗ = min`, `x → y = 1` if `x ≤ y` else `y`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Godel;

impl Logic for Godel {
    fn name(&self) -> &'static str {
        "godel"
    }
    fn tnorm(&self, x: f64, y: f64) -> f64 {
        x.min(y)
    }
    fn residuum(&self, x: f64, y: f64) -> f64 {
        if x <= y {
            1.0
        } else {
            y
        }
    }
}

/// Łukasiewicz logic: `⊗ = max(0, x+y-1)`, `x → y = min(1, 1-x+y)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lukasiewicz;

impl Logic for Lukasiewicz {
    fn name(&self) -> &'static str {
        "lukasiewicz"
    }
    fn tnorm(&self, x: f64, y: f64) -> f64 {
        (x + y - 1.0).max(0.0)
    }
    fn residuum(&self, x: f64, y: f64) -> f64 {
        (1.0 - x + y).min(1.0)
    }
}

/// Product logic: `⊗ = x·y`, `x → y = 1` if `x ≤ y` else `y/x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Product;

impl Logic for Product {
    fn name(&self) -> &'static str {
        "product"
    }
    fn tnorm(&self, x: f64, y: f64) -> f64 {
        x * y
    }
    fn residuum(&self, x: f64, y: f64) -> f64 {
        if x <= y {
            1.0
        } else {
            y / x
        }
    }
}

fn builtin(name: &str) -> Option<Arc<dyn Logic>> {
    match name.to_lowercase().as_str() {
        "classical" | "boolean" => Some(Arc::new(Classical)),
        "godel" | "gödel" => Some(Arc::new(Godel)),
        "lukasiewicz" | "łukasiewicz" => Some(Arc::new(Lukasiewicz)),
        "product" => Some(Arc::new(Product)),
        _ => None,
    }
}

struct RegistryState {
    extra: std::collections::HashMap<String, Arc<dyn Logic>>,
    active: Arc<dyn Logic>,
}

fn registry() -> &'static Mutex<RegistryState> {
    static REGISTRY: OnceLock<Mutex<RegistryState>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Mutex::new(RegistryState {
            extra: std::collections::HashMap::new(),
            active: Arc::new(Classical),
        })
    })
}

/// Register a user-defined logic under `name`, available to [`use_logic`]
/// and [`with_logic`] afterwards.
pub fn register(name: impl Into<String>, logic: Arc<dyn Logic>) {
    registry().lock().extra.insert(name.into().to_lowercase(), logic);
}

fn resolve(name: &str) -> FcaResult<Arc<dyn Logic>> {
    if let Some(l) = builtin(name) {
        return Ok(l);
    }
    let guard = registry().lock();
    guard
        .extra
        .get(&name.to_lowercase())
        .cloned()
        .ok_or_else(|| FcaError::UnknownLogic(name.to_string()))
}

/// Switch the process-scoped active logic by name.
pub fn use_logic(name: &str) -> FcaResult<()> {
    let logic = resolve(name)?;
    registry().lock().active = logic;
    Ok(())
}

/// The currently active logic.
pub fn get_logic() -> Arc<dyn Logic> {
    Arc::clone(&registry().lock().active)
}

/// Run `f` with `name` as the active logic, restoring the previous logic
/// on every exit path (normal return, early return, or panic).
pub fn with_logic<R>(name: &str, f: impl FnOnce() -> R) -> FcaResult<R> {
    let logic = resolve(name)?;
    let previous = {
        let mut guard = registry().lock();
        std::mem::replace(&mut guard.active, logic)
    };

    struct Restore(Arc<dyn Logic>);
    impl Drop for Restore {
        fn drop(&mut self) {
            registry().lock().active = Arc::clone(&self.0);
        }
    }
    let _restore = Restore(previous);

    Ok(f())
}
