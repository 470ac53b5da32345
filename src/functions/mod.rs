//! # Functions
//!
//! Typed values, the injectable clock and the registry of scalar and
//! aggregate functions callable from queries.

pub mod aggregate;
pub mod clock;
pub mod errors;
pub mod registry;
pub mod scalar;
pub mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{FunctionError, FunctionResult};
pub use registry::{
    AggregateFn, Arity, FunctionBody, FunctionRegistry, FunctionSpec, ScalarFn, TAG_AGGREGATE,
    TAG_WHERE,
};
pub use value::Value;
