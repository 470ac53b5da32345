//! # Function Registry
//!
//! Closed table of scalar and aggregate functions, resolved by canonical name
//! or alias (case-insensitive). Built once per query context and read-only
//! afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::aggregate;
use super::clock::{Clock, SystemClock};
use super::errors::{FunctionError, FunctionResult};
use super::scalar;
use super::value::Value;

/// Tag carried by functions that may root a `where` clause
pub const TAG_WHERE: &str = "where";

/// Tag carried by functions that consume the whole matched row set
pub const TAG_AGGREGATE: &str = "aggregate";

/// Per-row function implementation
pub type ScalarFn = fn(&dyn Clock, &[Value]) -> FunctionResult<Value>;

/// Whole-set function implementation; one argument list per matched row
pub type AggregateFn = fn(&[Vec<Value>]) -> FunctionResult<Value>;

/// Accepted argument counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    /// Validates `received` arguments for `function`
    pub fn check(&self, function: &str, received: usize) -> FunctionResult<()> {
        let (min, max) = match *self {
            Arity::Exactly(n) => (n, Some(n)),
            Arity::AtLeast(n) => (n, None),
            Arity::Between(min, max) => (min, Some(max)),
        };
        if received < min {
            return Err(FunctionError::MissingParameters {
                function: function.to_string(),
                expected: min,
            });
        }
        if let Some(max) = max {
            if received > max {
                return Err(FunctionError::TooManyParameters {
                    function: function.to_string(),
                    expected: max,
                    received,
                });
            }
        }
        Ok(())
    }
}

/// Implementation of a registered function
#[derive(Clone, Copy)]
pub enum FunctionBody {
    Scalar(ScalarFn),
    Aggregate(AggregateFn),
}

/// A registered function: names, tags, arity and implementation
#[derive(Clone)]
pub struct FunctionSpec {
    name: String,
    aliases: Vec<String>,
    tags: Vec<&'static str>,
    arity: Arity,
    body: FunctionBody,
}

impl FunctionSpec {
    /// Creates a scalar function
    pub fn scalar(name: &str, arity: Arity, body: ScalarFn) -> Self {
        Self::new(name, arity, FunctionBody::Scalar(body))
    }

    /// Creates an aggregate function (tagged `aggregate`)
    pub fn aggregate(name: &str, arity: Arity, body: AggregateFn) -> Self {
        Self::new(name, arity, FunctionBody::Aggregate(body)).tags(&[TAG_AGGREGATE])
    }

    fn new(name: &str, arity: Arity, body: FunctionBody) -> Self {
        Self {
            name: name.to_lowercase(),
            aliases: Vec::new(),
            tags: Vec::new(),
            arity,
            body,
        }
    }

    /// Adds aliases (lower-cased)
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases
            .extend(aliases.iter().map(|alias| alias.to_lowercase()));
        self
    }

    /// Adds tags
    pub fn tags(mut self, tags: &[&'static str]) -> Self {
        self.tags.extend_from_slice(tags);
        self
    }

    /// Canonical name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias names
    pub fn alias_names(&self) -> &[String] {
        &self.aliases
    }

    /// Declared arity
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Returns true if the function carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Returns true for aggregate functions
    pub fn is_aggregate(&self) -> bool {
        matches!(self.body, FunctionBody::Aggregate(_))
    }
}

impl fmt::Debug for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("tags", &self.tags)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Registry of available functions
pub struct FunctionRegistry {
    specs: Vec<FunctionSpec>,
    by_name: HashMap<String, usize>,
    clock: Arc<dyn Clock>,
}

impl FunctionRegistry {
    /// Registry with the built-in catalog and the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Registry with the built-in catalog and the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let mut registry = Self::empty(clock);
        for spec in scalar::catalog().into_iter().chain(aggregate::catalog()) {
            let registered = registry.register(spec);
            debug_assert!(registered.is_ok(), "duplicate built-in function: {:?}", registered);
        }
        registry
    }

    /// Registry with no functions
    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self {
            specs: Vec::new(),
            by_name: HashMap::new(),
            clock,
        }
    }

    /// Registers a function under its canonical name and aliases
    pub fn register(&mut self, spec: FunctionSpec) -> FunctionResult<()> {
        let names: Vec<&String> = std::iter::once(&spec.name)
            .chain(spec.aliases.iter())
            .collect();
        for name in &names {
            if self.by_name.contains_key(name.as_str()) {
                return Err(FunctionError::AlreadyRegistered(name.to_string()));
            }
        }

        let index = self.specs.len();
        for name in names {
            self.by_name.insert(name.clone(), index);
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Resolves a name or alias
    pub fn lookup(&self, name: &str) -> FunctionResult<&FunctionSpec> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.specs[index])
            .ok_or_else(|| FunctionError::UnknownFunction(name.to_string()))
    }

    /// Returns true if `name` resolves to a function
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Returns true if `name` resolves to an aggregate function
    pub fn is_aggregate(&self, name: &str) -> bool {
        self.lookup(name).map(|spec| spec.is_aggregate()).unwrap_or(false)
    }

    /// Checks an argument count against the function's arity
    pub fn check_arity(&self, name: &str, received: usize) -> FunctionResult<()> {
        let spec = self.lookup(name)?;
        spec.arity.check(&spec.name, received)
    }

    /// Executes a function over one row of arguments.
    ///
    /// An aggregate executed this way aggregates over that single row.
    pub fn execute(&self, name: &str, args: &[Value]) -> FunctionResult<Value> {
        let spec = self.lookup(name)?;
        spec.arity.check(&spec.name, args.len())?;
        let result = match spec.body {
            FunctionBody::Scalar(body) => body(self.clock.as_ref(), args),
            FunctionBody::Aggregate(body) => body(&[args.to_vec()]),
        };
        result.map_err(|e| e.in_function(&spec.name))
    }

    /// Executes an aggregate function over every matched row's arguments
    pub fn execute_aggregate(&self, name: &str, rows: &[Vec<Value>]) -> FunctionResult<Value> {
        let spec = self.lookup(name)?;
        for args in rows {
            spec.arity.check(&spec.name, args.len())?;
        }
        match spec.body {
            FunctionBody::Aggregate(body) => body(rows).map_err(|e| e.in_function(&spec.name)),
            FunctionBody::Scalar(_) => Err(FunctionError::incorrect_type("aggregate function", "scalar function")
                .in_function(&spec.name)),
        }
    }

    /// Canonical name → aliases for every function carrying `tag`.
    ///
    /// Unsorted output follows registration order; sorted output orders
    /// functions by canonical name and each alias list alphabetically.
    pub fn functions_with_aliases_having_tag(
        &self,
        tag: &str,
        sorted: bool,
    ) -> Vec<(String, Vec<String>)> {
        let mut listing: Vec<(String, Vec<String>)> = self
            .specs
            .iter()
            .filter(|spec| spec.has_tag(tag))
            .map(|spec| (spec.name.clone(), spec.aliases.clone()))
            .collect();

        if sorted {
            listing.sort_by(|a, b| a.0.cmp(&b.0));
            for (_, aliases) in listing.iter_mut() {
                aliases.sort();
            }
        }
        listing
    }

    /// All registered functions in registration order
    pub fn specs(&self) -> &[FunctionSpec] {
        &self.specs
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.specs.len())
            .finish()
    }
}
