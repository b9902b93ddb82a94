//! Configuration provider: a dot-path addressable JSON document with
//! documented fallbacks.
//!
//! The provider never fails a lookup. A missing segment, a type mismatch or a
//! document that failed to load all resolve to the caller-supplied default.
//! Reloading swaps the whole document at once, so a reader holding a
//! [`ConfigProvider::snapshot`] keeps seeing the document it started with.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use crate::actions::{ActionCosts, TurnRules};
use crate::balance::BalanceThresholds;
use crate::resources::{InitialResources, ResourceCaps};
use crate::victory::VictoryThresholds;

const BUNDLED_CONFIG: &str = include_str!("../assets/game_config.json");

/// Errors raised while reading or writing a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config root must be an object (got {found})")]
    NotAnObject { found: &'static str },
}

/// Read-mostly configuration store.
#[derive(Debug)]
pub struct ConfigProvider {
    source: Option<PathBuf>,
    document: RwLock<Arc<Value>>,
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigProvider {
    /// Provider with an empty document; every lookup yields its default.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_document(None, fallback_document())
    }

    /// Provider over the sample document shipped with the crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_json_str(BUNDLED_CONFIG)
    }

    /// Parse a document from a string, falling back to the empty document on
    /// malformed input.
    #[must_use]
    pub fn from_json_str(json: &str) -> Self {
        let document = parse_document(json).unwrap_or_else(|err| {
            log::warn!("config document rejected, using defaults: {err}");
            fallback_document()
        });
        Self::with_document(None, document)
    }

    /// Load a document from disk, falling back to defaults when the file is
    /// missing or malformed. The path is remembered for [`Self::reload`].
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = read_document(&path).unwrap_or_else(|err| {
            log::warn!("{err}; using default configuration");
            fallback_document()
        });
        Self::with_document(Some(path), document)
    }

    /// Strict variant of [`Self::from_path`] that reports load failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let document = read_document(&path)?;
        Ok(Self::with_document(Some(path), document))
    }

    fn with_document(source: Option<PathBuf>, document: Value) -> Self {
        Self {
            source,
            document: RwLock::new(Arc::new(document)),
        }
    }

    /// Path the document was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Current document. The returned handle is unaffected by later reloads.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Value> {
        self.document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, document: Value) {
        let mut guard = self.document.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(document);
    }

    /// Raw value at `path`, if present.
    #[must_use]
    pub fn get_value(&self, path: &str) -> Option<Value> {
        let snapshot = self.snapshot();
        lookup(&snapshot, path).cloned()
    }

    /// Typed value at `path`, or `default` when the path is missing or the
    /// stored value does not deserialize into `T`.
    #[must_use]
    pub fn get<T>(&self, path: &str, default: T) -> T
    where
        T: DeserializeOwned,
    {
        let Some(value) = self.get_value(path) else {
            return default;
        };
        match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::debug!("config {path} has unexpected shape ({err}); using default");
                default
            }
        }
    }

    /// Re-read the backing file and swap the document in one step.
    ///
    /// On failure the provider drops to the empty document so subsequent
    /// lookups use their defaults, and the error is returned for reporting.
    /// Providers not backed by a file keep their document.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or parsed.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let Some(path) = self.source.as_deref() else {
            return Ok(());
        };
        match read_document(path) {
            Ok(document) => {
                self.replace(document);
                log::info!("configuration reloaded from {}", path.display());
                Ok(())
            }
            Err(err) => {
                log::warn!("{err}; reverting to default configuration");
                self.replace(fallback_document());
                Err(err)
            }
        }
    }

    /// Set `path` to `value` in memory, creating intermediate objects.
    pub fn update(&self, path: &str, value: Value) {
        let mut document = Value::clone(&self.snapshot());
        let mut cursor = &mut document;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if !cursor.is_object() {
                *cursor = Value::Object(Map::new());
            }
            let Value::Object(map) = cursor else {
                return;
            };
            if segments.peek().is_none() {
                map.insert(segment.to_string(), value);
                break;
            }
            cursor = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        self.replace(document);
    }

    /// Write the current document as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let payload = serde_json::to_string_pretty(self.snapshot().as_ref())?;
        fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn fallback_document() -> Value {
    Value::Object(Map::new())
}

fn read_document(path: &Path) -> Result<Value, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&raw)
}

fn parse_document(json: &str) -> Result<Value, ConfigError> {
    let value: Value = serde_json::from_str(json)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(ConfigError::NotAnObject {
            found: value_kind(&value),
        })
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |value, segment| value.get(segment))
}

/// Every threshold the engine consumes, resolved once from a provider and
/// passed by reference to the evaluators.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub initial: InitialResources,
    pub caps: ResourceCaps,
    pub costs: ActionCosts,
    pub balance: BalanceThresholds,
    pub victory: VictoryThresholds,
    pub turn: TurnRules,
}

impl GameConfig {
    #[must_use]
    pub fn from_provider(provider: &ConfigProvider) -> Self {
        Self {
            initial: InitialResources::from_provider(provider),
            caps: ResourceCaps::from_provider(provider),
            costs: ActionCosts::from_provider(provider),
            balance: BalanceThresholds::from_provider(provider),
            victory: VictoryThresholds::from_provider(provider),
            turn: TurnRules::from_provider(provider),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_VICTORY_MERIT, PATH_VICTORY_MERIT};
    use serde_json::json;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "yijing-config-{label}-{}-{:?}.json",
            std::process::id(),
            std::thread::current().id()
        ))
    }

    #[test]
    fn nested_lookup_and_defaults() {
        let provider = ConfigProvider::from_json_str(
            r#"{"victory": {"merit_threshold": 9}, "balance": {"balanced_threshold": 0.75}}"#,
        );
        assert_eq!(provider.get(PATH_VICTORY_MERIT, 12_u32), 9);
        assert!((provider.get("balance.balanced_threshold", 0.8_f64) - 0.75).abs() < f64::EPSILON);
        assert_eq!(provider.get("victory.missing", 4_u32), 4);
        assert_eq!(provider.get("victory.merit_threshold.deeper", 4_u32), 4);
        assert_eq!(provider.get("nowhere.at.all", 7_u32), 7);
    }

    #[test]
    fn mismatched_type_falls_back() {
        let provider = ConfigProvider::from_json_str(r#"{"victory": {"merit_threshold": "lots"}}"#);
        assert_eq!(provider.get(PATH_VICTORY_MERIT, 12_u32), 12);
    }

    #[test]
    fn malformed_documents_fall_back_to_defaults() {
        let provider = ConfigProvider::from_json_str("{ not json");
        assert_eq!(provider.get(PATH_VICTORY_MERIT, DEFAULT_VICTORY_MERIT), 12);
        let provider = ConfigProvider::from_json_str("[1, 2, 3]");
        assert!(provider.get_value("0").is_none());
        assert_eq!(GameConfig::from_provider(&provider), GameConfig::default());
    }

    #[test]
    fn missing_file_uses_defaults_and_strict_load_errors() {
        let path = temp_path("missing");
        let provider = ConfigProvider::from_path(&path);
        assert_eq!(provider.get(PATH_VICTORY_MERIT, 12_u32), 12);
        assert_eq!(provider.source(), Some(path.as_path()));
        assert!(matches!(
            ConfigProvider::load(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = parse_document("42").unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { found: "number" }));
    }

    #[test]
    fn bundled_document_matches_hard_coded_defaults() {
        let bundled = GameConfig::from_provider(&ConfigProvider::bundled());
        assert_eq!(bundled, GameConfig::default());
        assert_eq!(
            GameConfig::from_provider(&ConfigProvider::empty()),
            GameConfig::default()
        );
    }

    #[test]
    fn update_creates_intermediate_objects() {
        let provider = ConfigProvider::empty();
        provider.update("victory.merit_threshold", json!(6));
        provider.update("a.b.c", json!(true));
        assert_eq!(provider.get(PATH_VICTORY_MERIT, 12_u32), 6);
        assert!(provider.get("a.b.c", false));

        provider.update("victory.merit_threshold.nested", json!(1));
        assert_eq!(provider.get("victory.merit_threshold.nested", 0_u32), 1);
    }

    #[test]
    fn reload_swaps_whole_document_and_keeps_old_snapshots() {
        let path = temp_path("reload");
        fs::write(&path, r#"{"victory": {"merit_threshold": 10}}"#).unwrap();
        let provider = ConfigProvider::load(&path).unwrap();
        let before = provider.snapshot();

        fs::write(
            &path,
            r#"{"victory": {"merit_threshold": 14, "taiji_merit": 6}}"#,
        )
        .unwrap();
        provider.reload().unwrap();

        assert_eq!(lookup(&before, PATH_VICTORY_MERIT), Some(&json!(10)));
        assert!(lookup(&before, "victory.taiji_merit").is_none());
        assert_eq!(provider.get(PATH_VICTORY_MERIT, 12_u32), 14);
        assert_eq!(provider.get("victory.taiji_merit", 8_u32), 6);

        fs::write(&path, "{ broken").unwrap();
        assert!(matches!(provider.reload(), Err(ConfigError::Parse(_))));
        assert_eq!(provider.get(PATH_VICTORY_MERIT, 12_u32), 12);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_round_trips_through_disk() {
        let path = temp_path("save");
        let provider = ConfigProvider::empty();
        provider.update("resource_limits.max_qi", json!(30));
        provider.save(&path).unwrap();

        let reloaded = ConfigProvider::load(&path).unwrap();
        assert_eq!(reloaded.get("resource_limits.max_qi", 25_u32), 30);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn in_memory_reload_is_a_no_op() {
        let provider = ConfigProvider::from_json_str(r#"{"turn": {"max_turns": 3}}"#);
        provider.reload().unwrap();
        assert_eq!(provider.get("turn.max_turns", 40_u32), 3);
    }
}
