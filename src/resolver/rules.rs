//! Declarative rule table
//!
//! A rule pairs a trigger (one or more whole words or phrases) with the stack
//! label, OS packages and application dependencies it contributes. Rules are
//! evaluated in declaration order, which also fixes the order labels appear
//! in the manifest. Adding a stack means adding a [`RuleDefinition`]; the
//! evaluation loop in [`RuleSet::resolve`] never changes.

use super::error::ResolveError;
use super::manifest::Manifest;
use crate::stack::StackId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// System package added when no rule produced a stack label
pub const FALLBACK_SYSTEM_PACKAGE: &str = "build-essential";

/// Uncompiled rule, as declared in a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Alternative words or phrases; any one of them activates the rule
    pub triggers: Vec<String>,
    /// Label appended to the stack description, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<StackId>,
    #[serde(default)]
    pub system_packages: Vec<String>,
    #[serde(default)]
    pub app_dependencies: Vec<String>,
    /// Labels that, when already present, withhold this rule's label
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed_by: Vec<StackId>,
}

impl RuleDefinition {
    pub fn new(triggers: &[&str]) -> Self {
        Self {
            triggers: to_strings(triggers),
            label: None,
            system_packages: Vec::new(),
            app_dependencies: Vec::new(),
            suppressed_by: Vec::new(),
        }
    }

    pub fn label(mut self, label: StackId) -> Self {
        self.label = Some(label);
        self
    }

    pub fn system_packages(mut self, packages: &[&str]) -> Self {
        self.system_packages = to_strings(packages);
        self
    }

    pub fn app_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.app_dependencies = to_strings(dependencies);
        self
    }

    pub fn suppressed_by(mut self, labels: &[StackId]) -> Self {
        self.suppressed_by = labels.to_vec();
        self
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Rule with its trigger compiled to a word-boundary pattern
#[derive(Debug, Clone)]
pub struct Rule {
    definition: RuleDefinition,
    trigger: Regex,
}

impl Rule {
    pub fn compile(definition: RuleDefinition) -> Result<Self, ResolveError> {
        if definition.triggers.is_empty() {
            return Err(ResolveError::InvalidRule {
                trigger: String::new(),
                reason: "rule has no trigger words".to_string(),
            });
        }

        let mut alternatives = Vec::with_capacity(definition.triggers.len());
        for word in &definition.triggers {
            let normalized = word.trim().to_lowercase();
            let first = normalized.chars().next();
            let last = normalized.chars().last();

            match (first, last) {
                (Some(first), Some(last)) if is_word_char(first) && is_word_char(last) => {}
                (None, _) | (_, None) => {
                    return Err(ResolveError::InvalidRule {
                        trigger: word.clone(),
                        reason: "trigger is empty".to_string(),
                    })
                }
                _ => {
                    return Err(ResolveError::InvalidRule {
                        trigger: word.clone(),
                        reason: "trigger must start and end with a letter, digit or underscore"
                            .to_string(),
                    })
                }
            }

            alternatives.push(regex::escape(&normalized));
        }

        let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
        let trigger = Regex::new(&pattern).map_err(|e| ResolveError::InvalidRule {
            trigger: definition.triggers.join("|"),
            reason: e.to_string(),
        })?;

        Ok(Self {
            definition,
            trigger,
        })
    }

    /// Tests the trigger against already lower-cased text
    pub fn matches(&self, text_low: &str) -> bool {
        self.trigger.is_match(text_low)
    }

    /// True when one of the suppressing labels is already in `labels`
    pub fn is_suppressed(&self, labels: &[StackId]) -> bool {
        self.definition
            .suppressed_by
            .iter()
            .any(|suppressor| labels.contains(suppressor))
    }

    pub fn label(&self) -> Option<&StackId> {
        self.definition.label.as_ref()
    }

    pub fn system_packages(&self) -> &[String] {
        &self.definition.system_packages
    }

    pub fn app_dependencies(&self) -> &[String] {
        &self.definition.app_dependencies
    }

    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Ordered, immutable collection of compiled rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(definitions: Vec<RuleDefinition>) -> Result<Self, ResolveError> {
        let rules = definitions
            .into_iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Process-wide built-in table, compiled on first use
    pub fn builtin() -> &'static RuleSet {
        static BUILTIN: OnceLock<RuleSet> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            RuleSet::new(builtin_definitions()).expect("built-in rule table is valid")
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves a prompt into a manifest
    ///
    /// Matching is case-insensitive. Packages and dependencies of every
    /// matching rule are unioned; labels are appended in table order unless
    /// the rule is suppressed or the label is already present. With no label
    /// the stack is `Unknown` and [`FALLBACK_SYSTEM_PACKAGE`] is added.
    pub fn resolve(&self, prompt: &str) -> Result<Manifest, ResolveError> {
        let text = prompt.trim();
        if text.is_empty() {
            return Err(ResolveError::EmptyInput);
        }
        let text_low = text.to_lowercase();

        let mut labels: Vec<StackId> = Vec::new();
        let mut system_packages = BTreeSet::new();
        let mut app_dependencies = BTreeSet::new();

        for rule in self.rules.iter().filter(|rule| rule.matches(&text_low)) {
            system_packages.extend(rule.system_packages().iter().cloned());
            app_dependencies.extend(rule.app_dependencies().iter().cloned());

            if let Some(label) = rule.label() {
                if !rule.is_suppressed(&labels) && !labels.contains(label) {
                    labels.push(label.clone());
                }
            }
        }

        if labels.is_empty() {
            labels.push(StackId::Unknown);
            system_packages.insert(FALLBACK_SYSTEM_PACKAGE.to_string());
        }

        Ok(Manifest::from_parts(&labels, system_packages, app_dependencies))
    }
}

/// The built-in rule table, in evaluation order
pub fn builtin_definitions() -> Vec<RuleDefinition> {
    vec![
        // Python backends
        RuleDefinition::new(&["django"])
            .label(StackId::Django)
            .system_packages(&["python3-dev", "libpq-dev", "build-essential"])
            .app_dependencies(&["Django>=3.2", "psycopg2-binary"]),
        RuleDefinition::new(&["flask"])
            .label(StackId::Flask)
            .system_packages(&["python3-dev", "build-essential"])
            .app_dependencies(&["Flask>=2.0"]),
        RuleDefinition::new(&["fastapi"])
            .label(StackId::FastApi)
            .system_packages(&["python3-dev", "build-essential"])
            .app_dependencies(&["fastapi", "uvicorn[standard]"]),
        // JavaScript frontends
        RuleDefinition::new(&["react"])
            .label(StackId::React)
            .system_packages(&["nodejs", "npm", "build-essential"])
            .app_dependencies(&["react", "react-dom"]),
        RuleDefinition::new(&["vue"])
            .label(StackId::Vue)
            .system_packages(&["nodejs", "npm", "build-essential"])
            .app_dependencies(&["vue"]),
        // React and Vue already imply Node
        RuleDefinition::new(&["node", "express"])
            .label(StackId::Node)
            .system_packages(&["nodejs", "npm"])
            .app_dependencies(&["express"])
            .suppressed_by(&[StackId::React, StackId::Vue]),
        // CSS/build tools
        RuleDefinition::new(&["tailwind"])
            .system_packages(&["nodejs", "npm"])
            .app_dependencies(&["tailwindcss"]),
        // Databases
        RuleDefinition::new(&["postgres", "postgresql", "pg"])
            .system_packages(&["postgresql-client", "libpq-dev"])
            .app_dependencies(&["psycopg2-binary"]),
        RuleDefinition::new(&["mongodb", "mongo"])
            .system_packages(&["mongodb-clients"])
            .app_dependencies(&["pymongo"]),
    ]
}
