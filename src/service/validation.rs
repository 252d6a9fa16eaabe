//! Shape checks applied to resolver output before it leaves the service

use crate::resolver::Manifest;
use anyhow::Result;
use serde_json::{Map, Value};

pub const REQUIRED_KEYS: [&str; 3] = ["stack", "system_packages", "app_dependencies"];

pub trait ManifestRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, manifest: &Map<String, Value>) -> Result<()>;
}

pub struct RequiredKeysRule;

impl ManifestRule for RequiredKeysRule {
    fn name(&self) -> &'static str {
        "RequiredKeys"
    }

    fn validate(&self, manifest: &Map<String, Value>) -> Result<()> {
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !manifest.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("Manifest missing required keys: {}", missing.join(", "));
        }

        let unexpected: Vec<&str> = manifest
            .keys()
            .map(String::as_str)
            .filter(|key| !REQUIRED_KEYS.contains(key))
            .collect();
        if !unexpected.is_empty() {
            anyhow::bail!("Manifest has unexpected keys: {}", unexpected.join(", "));
        }
        Ok(())
    }
}

pub struct NonEmptyStackRule;

impl ManifestRule for NonEmptyStackRule {
    fn name(&self) -> &'static str {
        "NonEmptyStack"
    }

    fn validate(&self, manifest: &Map<String, Value>) -> Result<()> {
        match manifest.get("stack") {
            Some(Value::String(stack)) if !stack.is_empty() => Ok(()),
            Some(Value::String(_)) => anyhow::bail!("Stack cannot be empty"),
            _ => anyhow::bail!("Stack must be a string"),
        }
    }
}

/// Requires a list of strings in strictly ascending order
pub struct SortedUniqueListRule {
    key: &'static str,
}

impl SortedUniqueListRule {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl ManifestRule for SortedUniqueListRule {
    fn name(&self) -> &'static str {
        "SortedUniqueList"
    }

    fn validate(&self, manifest: &Map<String, Value>) -> Result<()> {
        let Some(Value::Array(items)) = manifest.get(self.key) else {
            anyhow::bail!("{} must be a list", self.key);
        };

        let mut previous: Option<&str> = None;
        for (i, item) in items.iter().enumerate() {
            let Some(item) = item.as_str() else {
                anyhow::bail!("{}[{}] must be a string", self.key, i);
            };
            if let Some(prev) = previous {
                if prev == item {
                    anyhow::bail!("{} contains duplicate entry '{}'", self.key, item);
                }
                if prev > item {
                    anyhow::bail!("{} is not sorted at index {}", self.key, i);
                }
            }
            previous = Some(item);
        }
        Ok(())
    }
}

pub struct ManifestValidator {
    rules: Vec<Box<dyn ManifestRule>>,
}

impl ManifestValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn ManifestRule>>) -> Self {
        Self { rules }
    }

    /// Validates the serialized form of a manifest
    pub fn validate(&self, manifest: &Manifest) -> Result<()> {
        let value = serde_json::to_value(manifest)?;
        self.validate_value(&value)
    }

    pub fn validate_value(&self, value: &Value) -> Result<()> {
        let Some(object) = value.as_object() else {
            anyhow::bail!(
                "Manifest must be a mapping, got {}",
                crate::resolver::json_type_name(value)
            );
        };

        for rule in &self.rules {
            if let Err(e) = rule.validate(object) {
                anyhow::bail!("[{}] {}", rule.name(), e);
            }
        }
        Ok(())
    }
}

impl Default for ManifestValidator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredKeysRule),
                Box::new(NonEmptyStackRule),
                Box::new(SortedUniqueListRule::new("system_packages")),
                Box::new(SortedUniqueListRule::new("app_dependencies")),
            ],
        }
    }
}
