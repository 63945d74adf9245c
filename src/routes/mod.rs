//! Route resolution and ambiguity detection.

pub mod ambiguity;
pub mod path;
pub mod resolver;
pub mod types;

pub use ambiguity::detect_conflicts;
pub use path::compose_path;
pub use resolver::RouteResolver;
pub use types::{ConflictReport, HandlerRef, ResolvedRoute, RouteOrder, RouteSignature};
