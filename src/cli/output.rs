//! Output formatting for manifests and the rule table

use anyhow::{Context, Result};

use crate::resolver::{Manifest, RuleDefinition, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_manifest(&self, manifest: &Manifest) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(manifest).context("Failed to serialize manifest to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(manifest).context("Failed to serialize manifest to YAML")
            }
            OutputFormat::Human => Ok(format_manifest_human(manifest)),
        }
    }

    pub fn format_rules(&self, rules: &RuleSet) -> Result<String> {
        let definitions: Vec<&RuleDefinition> =
            rules.rules().iter().map(|rule| rule.definition()).collect();

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&definitions)
                .context("Failed to serialize rules to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&definitions).context("Failed to serialize rules to YAML")
            }
            OutputFormat::Human => Ok(format_rules_human(&definitions)),
        }
    }
}

fn format_manifest_human(manifest: &Manifest) -> String {
    let mut output = String::new();
    output.push_str(&format!("Stack: {}\n", manifest.stack));
    push_list(&mut output, "System packages", &manifest.system_packages);
    push_list(&mut output, "App dependencies", &manifest.app_dependencies);
    output
}

fn push_list(output: &mut String, title: &str, items: &[String]) {
    output.push_str(&format!("\n{}:\n", title));
    if items.is_empty() {
        output.push_str("  (none)\n");
    }
    for item in items {
        output.push_str(&format!("  - {}\n", item));
    }
}

fn format_rules_human(definitions: &[&RuleDefinition]) -> String {
    let mut output = String::new();
    for (i, definition) in definitions.iter().enumerate() {
        let label = definition
            .label
            .as_ref()
            .map(|label| label.label().to_string())
            .unwrap_or_else(|| "(no label)".to_string());

        output.push_str(&format!(
            "{:>2}. {} <- {}\n",
            i + 1,
            label,
            definition.triggers.join(" | ")
        ));
        output.push_str(&format!(
            "    system: {}\n",
            definition.system_packages.join(", ")
        ));
        output.push_str(&format!(
            "    deps:   {}\n",
            definition.app_dependencies.join(", ")
        ));
        if !definition.suppressed_by.is_empty() {
            let suppressors: Vec<&str> = definition.suppressed_by.iter().map(|id| id.label()).collect();
            output.push_str(&format!("    label suppressed by: {}\n", suppressors.join(", ")));
        }
    }
    output
}
