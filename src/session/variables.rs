//! Session-scoped variables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Variables collected over the lifetime of one USSD session.
///
/// Tag handlers read and write entries here as the menu tree is walked;
/// the map is what an external persistence collaborator snapshots between
/// requests. Also tracks the last subscriber input consumed, for
/// diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableStore {
    /// Variable name to value.
    vars: HashMap<String, String>,
    /// Last subscriber input consumed by a handler.
    last_input: Option<String>,
    /// Number of inputs consumed so far.
    input_count: u64,
}

impl VariableStore {
    /// Create a new empty variable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a variable value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|s| s.as_str())
    }

    /// Set a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }

    /// Check whether a variable is set.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Merge variables from another map.
    pub fn merge(&mut self, vars: HashMap<String, String>) {
        self.vars.extend(vars);
    }

    /// Number of variables set.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check whether no variables are set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over all variables.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the last subscriber input consumed.
    pub fn last_input(&self) -> Option<&str> {
        self.last_input.as_deref()
    }

    /// Get the number of inputs consumed.
    pub fn input_count(&self) -> u64 {
        self.input_count
    }

    /// Record a consumed subscriber input.
    pub fn record_input(&mut self, input: impl Into<String>) {
        self.last_input = Some(input.into());
        self.input_count += 1;
    }
}
