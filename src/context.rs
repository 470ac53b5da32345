//! Query context
//!
//! Bundles the function registry and attribute catalog that the parser and
//! executor consult. Read-only once built; one per concurrent query runner.

use std::sync::Arc;

use crate::attributes::AttributeCatalog;
use crate::functions::{Clock, FunctionRegistry};

/// Functions and attributes available to queries
#[derive(Debug, Default)]
pub struct QueryContext {
    functions: FunctionRegistry,
    attributes: AttributeCatalog,
}

impl QueryContext {
    /// Context with the built-in catalogs and the system clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose time functions read from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            functions: FunctionRegistry::with_clock(clock),
            attributes: AttributeCatalog::new(),
        }
    }

    /// Context over a custom registry
    pub fn with_functions(functions: FunctionRegistry) -> Self {
        Self {
            functions,
            attributes: AttributeCatalog::new(),
        }
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn attributes(&self) -> &AttributeCatalog {
        &self.attributes
    }
}
