//! Lint configuration: presets plus per-rule severity overrides.
//!
//! ```toml
//! [lint]
//! preset = "strict"
//!
//! [lint.rules]
//! "prefer-safeParse" = "off"
//! "zod-v4/no-merge-method" = "warn"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::rule::{Category, RuleMeta, Severity};
use crate::rules;

/// Prefix under which the rules are published; accepted in rule names.
pub const PLUGIN_PREFIX: &str = "zod-v4/";

/// Named rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Breaking-change rules only, as errors.
    Recommended,
    /// Breaking-change rules as errors, best practices as warnings.
    #[default]
    Strict,
    /// Every rule as an error.
    All,
}

impl Preset {
    /// Severity this preset assigns to a rule of `category`.
    pub fn severity(self, category: Category) -> Severity {
        match (self, category) {
            (_, Category::Breaking) => Severity::Error,
            (Preset::Recommended, Category::BestPractice) => Severity::Off,
            (Preset::Strict, Category::BestPractice) => Severity::Warn,
            (Preset::All, Category::BestPractice) => Severity::Error,
        }
    }
}

/// Configuration for the linter, loaded from `[lint]` in a TOML file.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    preset: Preset,
    /// Per-rule severity overrides. Key = rule name without plugin prefix.
    overrides: HashMap<String, Severity>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    lint: LintSection,
}

#[derive(Debug, Default, Deserialize)]
struct LintSection {
    #[serde(default)]
    preset: Option<Preset>,
    #[serde(default)]
    rules: BTreeMap<String, String>,
}

impl LintConfig {
    /// Create a config using the default preset and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(preset: Preset) -> Self {
        Self {
            preset,
            overrides: HashMap::new(),
        }
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Set the severity for a specific rule.
    pub fn set_severity(&mut self, rule_name: &str, severity: Severity) {
        self.overrides
            .insert(strip_prefix(rule_name).to_string(), severity);
    }

    /// Effective severity of a rule: its override, else the preset's choice.
    pub fn effective_severity(&self, meta: &RuleMeta) -> Severity {
        self.overrides
            .get(meta.name)
            .copied()
            .unwrap_or_else(|| self.preset.severity(meta.category))
    }

    /// Check if a rule is explicitly disabled.
    pub fn is_disabled(&self, rule_name: &str) -> bool {
        self.overrides.get(strip_prefix(rule_name)) == Some(&Severity::Off)
    }

    /// Parse a configuration from TOML text. Rule names are checked
    /// against the registry.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Self::with_preset(file.lint.preset.unwrap_or_default());
        let known = rules::rule_names();

        for (rule_name, value) in &file.lint.rules {
            let name = strip_prefix(rule_name);
            if !known.iter().any(|known_name| *known_name == name) {
                return Err(ConfigError::UnknownRule(rule_name.clone()));
            }
            let severity =
                Severity::parse(value).ok_or_else(|| ConfigError::InvalidSeverity {
                    rule: rule_name.clone(),
                    value: value.clone(),
                })?;
            config.set_severity(name, severity);
        }

        debug!(
            preset = ?config.preset,
            overrides = config.overrides.len(),
            "lint config loaded"
        );
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn strip_prefix(rule_name: &str) -> &str {
    rule_name.strip_prefix(PLUGIN_PREFIX).unwrap_or(rule_name)
}
