//! Per-entry attribute bag
//!
//! Built from one directory entry's metadata snapshot. Attribute values are
//! computed when asked for; nothing here touches the directory listing.

use std::fs::Metadata;
use std::path::MAIN_SEPARATOR;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use super::catalog::canonical_name;
use crate::functions::Value;

const SIZE_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Joins a parent directory and an entry name with exactly one separator
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.ends_with(MAIN_SEPARATOR) || parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}{}{}", parent, MAIN_SEPARATOR, name)
    }
}

/// Renders a byte count with SI units: `58 B`, `1.2 kB`, `15 MB`
pub fn format_size(bytes: u64) -> String {
    if bytes < 10 {
        return format!("{} B", bytes);
    }
    let exponent = ((bytes as f64).ln() / 1000f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1000f64.powi(exponent as i32);
    let rounded = (scaled * 10.0 + 0.5).floor() / 10.0;
    if rounded < 10.0 {
        format!("{:.1} {}", rounded, SIZE_UNITS[exponent])
    } else {
        format!("{:.0} {}", rounded, SIZE_UNITS[exponent])
    }
}

/// Extension of a file name: the suffix from the last `.`, inclusive
fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|dot| &name[dot..]).unwrap_or("")
}

fn local_time(time: std::io::Result<SystemTime>) -> Value {
    time.map(|t| Value::DateTime(DateTime::<Local>::from(t).naive_local()))
        .unwrap_or(Value::Empty)
}

/// Attribute bag for one directory entry
#[derive(Debug, Clone)]
pub struct FileAttributes {
    parent: String,
    name: String,
    metadata: Metadata,
}

impl FileAttributes {
    /// Builds the bag for entry `name` inside `parent`
    pub fn from_entry(parent: &str, name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            parent: parent.to_string(),
            name: name.into(),
            metadata,
        }
    }

    /// Entry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent path joined with the entry name
    pub fn path(&self) -> String {
        join_path(&self.parent, &self.name)
    }

    /// Returns true if the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Looks up an attribute by name or alias, case-insensitively.
    ///
    /// Unknown or inapplicable attributes are Empty.
    pub fn get(&self, attribute: &str) -> Value {
        let canonical = match canonical_name(attribute) {
            Some(canonical) => canonical,
            None => return Value::Empty,
        };

        match canonical {
            "name" => Value::String(self.name.clone()),
            "basename" => {
                let extension = extension_of(&self.name);
                Value::String(self.name[..self.name.len() - extension.len()].to_string())
            }
            "path" => Value::String(self.path()),
            "absolutepath" => {
                let path = self.path();
                let absolute = std::fs::canonicalize(&path)
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or(path);
                Value::String(absolute)
            }
            "extension" => Value::String(extension_of(&self.name).to_string()),
            "size" => Value::Int(self.metadata.len() as i64),
            "fmtsize" => Value::String(format_size(self.metadata.len())),
            "isdir" => Value::Boolean(self.metadata.is_dir()),
            "isfile" => Value::Boolean(self.metadata.is_file()),
            "ishidden" => Value::Boolean(self.name.starts_with('.')),
            "issymlink" => Value::Boolean(self.metadata.file_type().is_symlink()),
            "uid" | "gid" | "mode" => self.unix_attribute(canonical),
            "mtime" => local_time(self.metadata.modified()),
            "atime" => local_time(self.metadata.accessed()),
            _ => Value::Empty,
        }
    }

    #[cfg(unix)]
    fn unix_attribute(&self, canonical: &str) -> Value {
        use std::os::unix::fs::MetadataExt;

        match canonical {
            "uid" => Value::Int(self.metadata.uid() as i64),
            "gid" => Value::Int(self.metadata.gid() as i64),
            "mode" => Value::String(self.mode_string(self.metadata.mode())),
            _ => Value::Empty,
        }
    }

    #[cfg(not(unix))]
    fn unix_attribute(&self, _canonical: &str) -> Value {
        Value::Empty
    }

    /// `drwxr-xr-x` style permission string
    #[cfg(unix)]
    fn mode_string(&self, mode: u32) -> String {
        let file_type = self.metadata.file_type();
        let mut rendered = String::with_capacity(10);
        rendered.push(if file_type.is_dir() {
            'd'
        } else if file_type.is_symlink() {
            'l'
        } else {
            '-'
        });
        for shift in [6u32, 3, 0] {
            let bits = (mode >> shift) & 0o7;
            rendered.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            rendered.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            rendered.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn attributes_for(dir: &TempDir, name: &str) -> FileAttributes {
        let parent = dir.path().to_string_lossy().into_owned();
        let metadata = fs::symlink_metadata(dir.path().join(name)).unwrap();
        FileAttributes::from_entry(&parent, name, metadata)
    }

    #[test]
    fn test_join_path_avoids_double_separator() {
        let sep = MAIN_SEPARATOR;
        assert_eq!(join_path("root", "a.txt"), format!("root{}a.txt", sep));
        assert_eq!(join_path(&format!("root{}", sep), "a.txt"), format!("root{}a.txt", sep));
        assert_eq!(join_path("root/", "a.txt"), "root/a.txt");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(58), "58 B");
        assert_eq!(format_size(1234), "1.2 kB");
        assert_eq!(format_size(15_000_000), "15 MB");
    }

    #[test]
    fn test_name_derived_attributes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Report.Final.log"), b"hello").unwrap();

        let attrs = attributes_for(&dir, "Report.Final.log");
        assert_eq!(attrs.get("name"), Value::string("Report.Final.log"));
        assert_eq!(attrs.get("EXT"), Value::string(".log"));
        assert_eq!(attrs.get("basename"), Value::string("Report.Final"));
        assert_eq!(attrs.get("size"), Value::Int(5));
        assert_eq!(attrs.get("fmtsize"), Value::string("5 B"));
        assert_eq!(attrs.get("isdir"), Value::Boolean(false));
        assert_eq!(attrs.get("isfile"), Value::Boolean(true));
        assert!(matches!(attrs.get("mtime"), Value::DateTime(_)));
    }

    #[test]
    fn test_extensionless_and_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let attrs = attributes_for(&dir, "nested");
        assert_eq!(attrs.get("ext"), Value::string(""));
        assert_eq!(attrs.get("basename"), Value::string("nested"));
        assert_eq!(attrs.get("isdir"), Value::Boolean(true));
        assert!(attrs.is_dir());
    }

    #[test]
    fn test_unknown_attribute_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), b"").unwrap();
        let attrs = attributes_for(&dir, "a");
        assert_eq!(attrs.get("nosuch"), Value::Empty);
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_string() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, b"#!/bin/sh").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o754)).unwrap();

        let attrs = attributes_for(&dir, "script.sh");
        assert_eq!(attrs.get("perm"), Value::string("-rwxr-xr--"));
    }
}
