//! Names of the file attributes a query may reference

/// Canonical attribute name with its aliases
const ATTRIBUTES: &[(&str, &[&str])] = &[
    ("name", &["fname", "filename"]),
    ("basename", &["base"]),
    ("path", &["filepath"]),
    ("absolutepath", &["abspath"]),
    ("extension", &["ext"]),
    ("size", &["sz"]),
    ("fmtsize", &["hsize", "formattedsize"]),
    ("isdir", &["directory"]),
    ("isfile", &["file"]),
    ("ishidden", &["hidden"]),
    ("issymlink", &["symlink"]),
    ("uid", &["userid"]),
    ("gid", &["groupid"]),
    ("mode", &["permission", "perm"]),
    ("mtime", &["modified", "lastmodified"]),
    ("atime", &["accessed"]),
];

/// Resolves an attribute name or alias (any case) to its canonical name
pub fn canonical_name(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    ATTRIBUTES
        .iter()
        .find(|(canonical, aliases)| *canonical == lowered || aliases.contains(&lowered.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Read-only view of the supported attributes
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeCatalog;

impl AttributeCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Canonical name for `name`, if it is a known attribute
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        canonical_name(name)
    }

    /// Returns true if `name` is a known attribute or alias
    pub fn contains(&self, name: &str) -> bool {
        canonical_name(name).is_some()
    }

    /// Canonical name → aliases, in declaration order
    pub fn attributes_with_aliases(&self) -> Vec<(&'static str, &'static [&'static str])> {
        ATTRIBUTES.to_vec()
    }
}
