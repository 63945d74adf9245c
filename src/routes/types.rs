//! Resolved routes and conflict reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::mapping::HttpMethod;
use crate::model::{LineRange, Parameter};

/// Declaration-order key of a route.
///
/// Fields compare lexicographically in the order listed: the controller's
/// position in the scan, then how far up the ancestor chain the method was
/// declared (0 = the controller itself), then method, mapping, prefix path,
/// method path and verb indexes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteOrder {
    pub controller: usize,
    pub depth: usize,
    pub method: usize,
    pub mapping: usize,
    pub prefix: usize,
    pub path: usize,
    pub verb: usize,
}

/// One fully composed (HTTP method, path) binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    /// The exposed controller serving the route.
    pub class: String,
    /// The class whose method carries the mapping; differs from `class`
    /// for inherited routes.
    pub declared_in: String,
    pub method_name: String,
    pub http_method: HttpMethod,
    pub path: String,
    pub headers: BTreeSet<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineRange>,
    pub order: RouteOrder,
}

impl ResolvedRoute {
    pub fn signature(&self) -> RouteSignature {
        RouteSignature {
            http_method: self.http_method.clone(),
            path: self.path.clone(),
            headers: self.headers.clone(),
        }
    }

    pub fn handler(&self) -> HandlerRef {
        HandlerRef {
            class: self.class.clone(),
            method_name: self.method_name.clone(),
        }
    }

    pub fn is_inherited(&self) -> bool {
        self.class != self.declared_in
    }
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}#{})",
            self.http_method, self.path, self.class, self.method_name
        )?;
        if !self.headers.is_empty() {
            let headers: Vec<&str> = self.headers.iter().map(String::as_str).collect();
            write!(f, " [headers: {}]", headers.join(", "))?;
        }
        Ok(())
    }
}

/// What two routes must share to collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteSignature {
    pub http_method: HttpMethod,
    pub path: String,
    pub headers: BTreeSet<String>,
}

impl fmt::Display for RouteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.http_method, self.path)?;
        if !self.headers.is_empty() {
            let headers: Vec<&str> = self.headers.iter().map(String::as_str).collect();
            write!(f, " [headers: {}]", headers.join(", "))?;
        }
        Ok(())
    }
}

/// A (class, method) pair registered for a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerRef {
    pub class: String,
    pub method_name: String,
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class, self.method_name)
    }
}

/// Two or more handlers registered under one signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub signature: RouteSignature,
    pub handlers: Vec<HandlerRef>,
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: Vec<String> = self.handlers.iter().map(HandlerRef::to_string).collect();
        write!(f, "{} is mapped by {}", self.signature, handlers.join(", "))
    }
}
