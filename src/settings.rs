//! Runtime settings, read with the `config` crate from an optional file and
//! `PROJECTED_*` environment variables (nested keys use `__`, as in
//! `PROJECTED_STORE__MODE=sqlite-file`).
//!
//! ```toml
//! write_policy = "strict"
//! log_filter = "projected=debug"
//!
//! [store]
//! mode = "sqlite-file"
//! path = "preferences.db"
//!
//! [fields]
//! email = [{ kind = "not_empty" }, { kind = "email" }]
//! password = [{ kind = "not_empty" }, { kind = "min_length", value = 8 }]
//! ```

use std::collections::HashMap;

use config::{Config, Environment, File, Map};
use serde::Deserialize;

use crate::error::{ProjectedError, Result};
use crate::persist::{PersistenceMode, Persistor};
use crate::persisted::WritePolicy;
use crate::rule::ValidationRule;
use crate::store::{MemoryStore, StoreBackend};
use crate::validated::RuleValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreMode {
    Memory,
    SqliteMemory,
    SqliteFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreSettings {
    pub mode: StoreMode,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub store: StoreSettings,
    pub write_policy: WritePolicy,
    pub log_filter: String,
    #[serde(default)]
    pub fields: HashMap<String, Vec<ValidationRule>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                mode: StoreMode::Memory,
                path: None,
            },
            write_policy: WritePolicy::Silent,
            log_filter: "info".to_string(),
            fields: HashMap::new(),
        }
    }
}

impl Settings {
    /// Loads settings from `path` (a missing file is fine, its extension
    /// picks the format) layered under the process environment.
    pub fn load(path: &str) -> Result<Self> {
        Self::layered(path, environment())
    }
    /// Like [`load`](Self::load), with `vars` read in place of the process
    /// environment.
    pub fn load_with_env(path: &str, vars: Map<String, String>) -> Result<Self> {
        Self::layered(path, environment().source(Some(vars)))
    }
    fn layered(path: &str, environment: Environment) -> Result<Self> {
        let built = Config::builder()
            .set_default("store.mode", "memory")?
            .set_default("write_policy", "silent")?
            .set_default("log_filter", "info")?
            .add_source(File::with_name(path).required(false))
            .add_source(environment)
            .build()?;
        Ok(built.try_deserialize()?)
    }
    pub fn open_store(&self) -> Result<StoreBackend> {
        let backend = match self.store.mode {
            StoreMode::Memory => StoreBackend::Memory(MemoryStore::new()),
            StoreMode::SqliteMemory => {
                StoreBackend::Sqlite(Persistor::new(PersistenceMode::InMemory)?)
            }
            StoreMode::SqliteFile => {
                let path = self.store.path.clone().ok_or_else(|| {
                    ProjectedError::Config("store.path is required for sqlite-file".to_string())
                })?;
                StoreBackend::Sqlite(Persistor::new(PersistenceMode::File(path))?)
            }
        };
        Ok(backend)
    }
    /// The configured rules for a field, empty when the field is unknown.
    pub fn rules(&self, field: &str) -> Vec<ValidationRule> {
        self.fields.get(field).cloned().unwrap_or_default()
    }
    pub fn validator(&self, field: &str) -> RuleValidator {
        RuleValidator::empty(self.rules(field))
    }
    /// A validator with the configured rules for `field`, or `fallback` when
    /// the field is not configured at all. A field configured with an empty
    /// list keeps its empty list.
    pub fn validator_or(&self, field: &str, fallback: Vec<ValidationRule>) -> RuleValidator {
        let rules = self.fields.get(field).cloned().unwrap_or(fallback);
        RuleValidator::empty(rules)
    }
}

// PROJECTED_WRITE_POLICY, PROJECTED_STORE__MODE
fn environment() -> Environment {
    Environment::with_prefix("PROJECTED")
        .prefix_separator("_")
        .separator("__")
}
