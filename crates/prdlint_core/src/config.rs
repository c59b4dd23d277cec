//! Linter configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::BUILTIN_RULE_IDS;
use crate::{LinterError, ScoreWeights, Severity};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for the linter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterConfig {
    /// Rule configuration (enable/disable/severity/options), keyed by rule id.
    #[serde(default)]
    pub rules: HashMap<String, RuleOption>,

    /// Categories whose rules are not run.
    #[serde(default)]
    pub disabled_categories: Vec<String>,

    /// Score deduction per severity.
    #[serde(default)]
    pub weights: ScoreWeights,

    /// Run rules on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    /// File patterns to include.
    #[serde(default)]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Configuration for a single rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleOption {
    /// Rule is enabled/disabled (boolean).
    Enabled(bool),
    /// Rule is enabled with a severity override, or disabled with "off".
    Severity(String),
    /// Rule is enabled with an options object. A `severity` key inside it
    /// is treated as a severity override.
    Options(Value),
}

impl RuleOption {
    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleOption::Enabled(enabled) => *enabled,
            RuleOption::Severity(s) => s != "off",
            RuleOption::Options(_) => true,
        }
    }

    /// Returns the configured severity override, if any.
    pub fn severity(&self) -> Result<Option<Severity>, LinterError> {
        match self {
            RuleOption::Severity(s) if s != "off" => s.parse().map(Some),
            RuleOption::Options(Value::Object(map)) => match map.get("severity") {
                Some(Value::String(s)) => s.parse().map(Some),
                Some(other) => Err(LinterError::config(format!(
                    "Invalid severity {}. Expected a string",
                    other
                ))),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// Gets the rule options as JSON value, without the `severity` key.
    pub fn options(&self) -> Value {
        match self {
            RuleOption::Options(Value::Object(map)) => {
                let mut map = map.clone();
                map.remove("severity");
                Value::Object(map)
            }
            RuleOption::Options(v) => v.clone(),
            RuleOption::Enabled(_) | RuleOption::Severity(_) => Value::Null,
        }
    }
}

impl LinterConfig {
    /// Configuration file names searched by [`LinterConfig::discover`].
    pub const CONFIG_FILES: &'static [&'static str] = &[".prdlint.json"];

    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parses configuration from JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        // Parse into Value first for validation
        let value: Value = serde_json::from_str(json)
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?;

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Finds the nearest configuration file in `start` or its ancestors.
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        let start = start.as_ref();
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

        start.ancestors().find_map(|dir| {
            Self::CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Returns the configuration written by `prdlint init`.
    ///
    /// Lists every built-in rule explicitly so users can toggle them.
    pub fn template() -> String {
        let rules: serde_json::Map<String, Value> = BUILTIN_RULE_IDS
            .iter()
            .map(|id| ((*id).to_string(), Value::Bool(true)))
            .collect();
        let weights = ScoreWeights::default();

        let template = serde_json::json!({
            "rules": rules,
            "disabledCategories": [],
            "weights": {
                "error": weights.error,
                "warning": weights.warning,
                "info": weights.info,
                "suggestion": weights.suggestion,
            },
            "parallel": false,
            "include": ["**/*.md"],
            "exclude": [],
        });
        format!("{:#}\n", template)
    }
}
