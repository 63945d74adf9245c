//! Mapping normalization.
//!
//! Turns annotation occurrences into canonical [`RawMapping`] records
//! so route resolution never has to care about scalar-vs-array or
//! shorthand-vs-generic annotation shapes.

pub mod normalizer;
pub mod types;

pub use normalizer::normalize;
pub use types::{AnnotationKind, HttpMethod, RawMapping, RequestMethods, ANY_EXPANSION};
