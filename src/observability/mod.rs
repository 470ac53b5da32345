//! Observability subsystem
//!
//! Structured JSON logging on stderr and scope-based lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only; it never changes query results
//! 2. Synchronous, no background threads
//! 3. Deterministic field ordering
//!
//! # Usage
//!
//! ```ignore
//! use fsquery::observability::{Logger, ObservationScope};
//!
//! Logger::trace("DIRECTORY_SKIPPED", &[("path", "./.git")]);
//!
//! let scope = ObservationScope::new("QUERY");
//! // ... do work ...
//! scope.complete_with_fields(&[("rows", "42")]);
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity, LOG_LEVEL_ENV};
pub use scope::ObservationScope;
