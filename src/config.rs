//! Configuration System
//!
//! Provides hierarchical configuration loading from:
//! - fca.toml (default configuration)
//! - fca.local.toml (git-ignored local overrides)
//! - Environment variables (FCA_* prefix)
//!
//! ## Example
//!
//! ```toml
//! # fca.toml
//! default_logic = "godel"
//!
//! [next_closure]
//! save_concepts = true
//! verbose = false
//!
//! [simplification]
//! sequence = ["reduction", "composition", "simplification"]
//! max_passes = 5000
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! FCA_DEFAULT_LOGIC=lukasiewicz
//! FCA_NEXT_CLOSURE__VERBOSE=true
//! ```

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::FcaResult;

/// Top-level configuration consumed by the CLI and by test fixtures.
/// Not read by C1-C9 directly — the core takes its parameters
/// (`logic`, `mode`, `save_concepts`, ...) as explicit arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The logic C1 activates at process start if the caller never
    /// calls `use_logic`.
    #[serde(default = "default_logic")]
    pub default_logic: String,

    #[serde(default)]
    pub next_closure: NextClosureConfig,

    #[serde(default)]
    pub simplification: SimplificationConfig,
}

/// Parameters matching §6's `next_closure(mode, save_concepts, verbose)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextClosureConfig {
    #[serde(default = "default_true")]
    pub save_concepts: bool,

    #[serde(default)]
    pub verbose: bool,
}

/// Parameters for the simplification rewrite engine (C8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplificationConfig {
    /// Rewrite sequence applied when a caller invokes `apply_rules`
    /// with no explicit sequence.
    #[serde(default = "default_sequence")]
    pub sequence: Vec<String>,

    /// Hard backstop against a non-terminating user-registered rewrite;
    /// the four built-ins are proven terminating well under this bound.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

fn default_logic() -> String {
    "classical".to_string()
}

fn default_true() -> bool {
    true
}

fn default_sequence() -> Vec<String> {
    vec![
        "reduction".to_string(),
        "composition".to_string(),
        "generalization".to_string(),
        "simplification".to_string(),
    ]
}

fn default_max_passes() -> usize {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_logic: default_logic(),
            next_closure: NextClosureConfig::default(),
            simplification: SimplificationConfig::default(),
        }
    }
}

impl Default for NextClosureConfig {
    fn default() -> Self {
        NextClosureConfig {
            save_concepts: true,
            verbose: false,
        }
    }
}

impl Default for SimplificationConfig {
    fn default() -> Self {
        SimplificationConfig {
            sequence: default_sequence(),
            max_passes: default_max_passes(),
        }
    }
}

impl Config {
    /// Loads configuration from the default locations.
    ///
    /// Merges in order:
    /// 1. `fca.toml` (base configuration)
    /// 2. `fca.local.toml` (local overrides, git-ignored)
    /// 3. Environment variables (`FCA_*` prefix)
    pub fn load() -> FcaResult<Self> {
        Figment::from(figment::providers::Serialized::defaults(Config::default()))
            .merge(Toml::file("fca.toml"))
            .merge(Toml::file("fca.local.toml"))
            .merge(Env::prefixed("FCA_").split("__"))
            .extract()
            .map_err(Into::into)
    }

    /// Loads configuration from a specific file path.
    pub fn from_file(path: &str) -> FcaResult<Self> {
        Figment::from(figment::providers::Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("FCA_").split("__"))
            .extract()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_classical_logic_and_full_sequence() {
        let config = Config::default();
        assert_eq!(config.default_logic, "classical");
        assert!(config.next_closure.save_concepts);
        assert!(!config.next_closure.verbose);
        assert_eq!(
            config.simplification.sequence,
            vec!["reduction", "composition", "generalization", "simplification"]
        );
        assert_eq!(config.simplification.max_passes, 10_000);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("default_logic"));
        assert!(toml_str.contains("[next_closure]"));
        assert!(toml_str.contains("[simplification]"));
    }

    #[test]
    fn env_override_changes_default_logic() {
        // figment's Env provider reads process environment directly, so
        // this exercises the same merge path `Config::load` uses.
        std::env::set_var("FCA_TEST_DEFAULT_LOGIC", "godel");
        let value = Figment::from(figment::providers::Serialized::defaults(Config::default()))
            .merge(Env::prefixed("FCA_TEST_").split("__"))
            .extract::<Config>()
            .unwrap();
        assert_eq!(value.default_logic, "godel");
        std::env::remove_var("FCA_TEST_DEFAULT_LOGIC");
    }
}
