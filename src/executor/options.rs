//! Traversal options

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

fn default_traverse_nested() -> bool {
    true
}

fn default_ignored_directory_names() -> BTreeSet<String> {
    [".git", ".github"].iter().map(|name| name.to_string()).collect()
}

/// How the executor walks the source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Descend into subdirectories
    #[serde(default = "default_traverse_nested")]
    pub traverse_nested: bool,

    /// Directory names never descended into; their own rows are still reported
    #[serde(default = "default_ignored_directory_names")]
    pub ignored_directory_names: BTreeSet<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            traverse_nested: default_traverse_nested(),
            ignored_directory_names: default_ignored_directory_names(),
        }
    }
}

impl Options {
    pub fn enable_nested_traversal(mut self) -> Self {
        self.traverse_nested = true;
        self
    }

    pub fn disable_nested_traversal(mut self) -> Self {
        self.traverse_nested = false;
        self
    }

    /// Adds directory names to the ignored set
    pub fn ignore_directories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_directory_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns true if a directory named `name` is not descended into
    pub fn is_directory_ignored(&self, name: &str) -> bool {
        self.ignored_directory_names.contains(name)
    }

    /// Returns true if the executor descends into a directory named `name`
    pub fn should_traverse(&self, name: &str) -> bool {
        self.traverse_nested && !self.is_directory_ignored(name)
    }
}
