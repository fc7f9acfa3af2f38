//! # Formal Concept Analysis Core
//!
//! Galois closure over (possibly fuzzy) incidence relations, Next-Closure
//! enumeration of concepts and the Duquenne-Guigues canonical implication
//! basis, and a closure-preserving rewrite system for simplifying
//! implication bases.
//!
//! ## Pipeline
//!
//! ```text
//! Incidence (C3)
//!     ↓
//! Next-Closure (C5)         → intents, extents, pseudo-intents
//!     ↓
//! ImplicationStore (C6)     → the Duquenne-Guigues canonical basis
//!     ↓
//! closure_rules (C7)        → forward chaining under the basis
//!     ↓
//! simplify (C8)             → closure-preserving rewrite passes
//!     ↓
//! entailment (C9)           → A ⊨ B, A ≡ B, holds_in
//! ```
//!
//! Every fuzzy operation is parameterised by the active [`logic`] (C1);
//! no component outside it hard-codes `min`/`max`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fca_core::{incidence::Incidence, logic, next_closure};
//!
//! let inc = Incidence::from_dense(&dense, attr_names, obj_names);
//! let logic = logic::get_logic();
//! let report = next_closure::enumerate_implications(&inc, &*logic, true, None)?;
//!
//! println!("{} concepts, {} implications",
//!     report.intents.len(),
//!     report.implications.as_ref().map_or(0, Vec::len));
//! ```

pub mod cancel;
pub mod closure_rules;
pub mod config;
pub mod entailment;
pub mod error;
pub mod grades;
pub mod implication;
pub mod incidence;
pub mod logic;
pub mod next_closure;
pub mod simplify;
pub mod sparse;

pub use cancel::{CancelHandle, CancelToken};
pub use config::Config;
pub use error::{FcaError, FcaResult, Universe};
pub use implication::{FilterCriteria, ImplicationStore};
pub use incidence::Incidence;
pub use logic::Logic;
pub use next_closure::NextClosureReport;
pub use sparse::FuzzySet;
