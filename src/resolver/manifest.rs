//! Installation manifest produced by the resolver

use crate::stack::StackId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Separator between labels in [`Manifest::stack`]
pub const STACK_SEPARATOR: &str = " + ";

/// Structured output of a resolution
///
/// `system_packages` and `app_dependencies` are always sorted ascending by
/// byte order and contain no duplicates. `stack` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub stack: String,
    pub system_packages: Vec<String>,
    pub app_dependencies: Vec<String>,
}

impl Manifest {
    pub(crate) fn from_parts(
        labels: &[StackId],
        system_packages: BTreeSet<String>,
        app_dependencies: BTreeSet<String>,
    ) -> Self {
        let stack = labels
            .iter()
            .map(StackId::label)
            .collect::<Vec<_>>()
            .join(STACK_SEPARATOR);

        Self {
            stack,
            system_packages: system_packages.into_iter().collect(),
            app_dependencies: app_dependencies.into_iter().collect(),
        }
    }

    /// Individual labels of the `stack` string, in order
    pub fn labels(&self) -> Vec<&str> {
        self.stack.split(STACK_SEPARATOR).collect()
    }

    /// True when no rule produced a stack label
    pub fn is_unknown(&self) -> bool {
        self.stack == StackId::Unknown.label()
    }
}
