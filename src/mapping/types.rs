//! Canonical mapping records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
    /// A verb the normalizer did not recognize, kept verbatim.
    Custom(String),
}

/// The verbs an unspecified method attribute stands for.
pub const ANY_EXPANSION: [HttpMethod; 7] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Delete,
    HttpMethod::Patch,
    HttpMethod::Head,
    HttpMethod::Options,
];

impl HttpMethod {
    /// Parse a method token as an extractor may spell it:
    /// `GET`, `get`, `RequestMethod.GET`, `"GET"`.
    pub fn parse(token: &str) -> Self {
        let token = token.trim().trim_matches('"');
        let verb = token.rsplit('.').next().unwrap_or(token).trim();
        match verb.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            "TRACE" => HttpMethod::Trace,
            _ => HttpMethod::Custom(verb.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Custom(verb) => verb,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for HttpMethod {
    fn from(token: String) -> Self {
        HttpMethod::parse(&token)
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// The method set of a mapping: either the `ANY` marker or explicit verbs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestMethods {
    Any,
    Only(Vec<HttpMethod>),
}

impl RequestMethods {
    /// Concrete verbs this set binds, with `Any` expanded.
    pub fn expand(&self) -> Vec<HttpMethod> {
        match self {
            RequestMethods::Any => ANY_EXPANSION.to_vec(),
            RequestMethods::Only(methods) => methods.clone(),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, RequestMethods::Any)
    }
}

/// Which annotation a mapping came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationKind {
    GetMapping,
    PostMapping,
    PutMapping,
    DeleteMapping,
    PatchMapping,
    RequestMapping,
    /// Anything else; normalized like `RequestMapping`.
    Other(String),
}

impl AnnotationKind {
    /// Accepts `GetMapping`, `@GetMapping` and fully qualified names.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().trim_start_matches('@');
        let simple = name.rsplit('.').next().unwrap_or(name);
        match simple {
            "GetMapping" => AnnotationKind::GetMapping,
            "PostMapping" => AnnotationKind::PostMapping,
            "PutMapping" => AnnotationKind::PutMapping,
            "DeleteMapping" => AnnotationKind::DeleteMapping,
            "PatchMapping" => AnnotationKind::PatchMapping,
            "RequestMapping" => AnnotationKind::RequestMapping,
            _ => AnnotationKind::Other(simple.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnnotationKind::GetMapping => "GetMapping",
            AnnotationKind::PostMapping => "PostMapping",
            AnnotationKind::PutMapping => "PutMapping",
            AnnotationKind::DeleteMapping => "DeleteMapping",
            AnnotationKind::PatchMapping => "PatchMapping",
            AnnotationKind::RequestMapping => "RequestMapping",
            AnnotationKind::Other(name) => name,
        }
    }

    /// The single verb of a method-shorthand annotation.
    pub fn shorthand_method(&self) -> Option<HttpMethod> {
        match self {
            AnnotationKind::GetMapping => Some(HttpMethod::Get),
            AnnotationKind::PostMapping => Some(HttpMethod::Post),
            AnnotationKind::PutMapping => Some(HttpMethod::Put),
            AnnotationKind::DeleteMapping => Some(HttpMethod::Delete),
            AnnotationKind::PatchMapping => Some(HttpMethod::Patch),
            AnnotationKind::RequestMapping | AnnotationKind::Other(_) => None,
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for AnnotationKind {
    fn from(name: String) -> Self {
        AnnotationKind::from_name(&name)
    }
}

impl From<AnnotationKind> for String {
    fn from(kind: AnnotationKind) -> Self {
        kind.name().to_string()
    }
}

/// One annotation occurrence in canonical form.
///
/// `paths` always holds at least one entry; a missing value becomes `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMapping {
    pub methods: RequestMethods,
    pub paths: Vec<String>,
    /// Opaque header tokens, compared only for set equality.
    pub headers: Vec<String>,
}

impl RawMapping {
    /// Number of (path, verb) bindings this mapping denotes.
    pub fn binding_count(&self) -> usize {
        let verbs = match &self.methods {
            RequestMethods::Any => ANY_EXPANSION.len(),
            RequestMethods::Only(methods) => methods.len(),
        };
        self.paths.len() * verbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_tokens() {
        assert_eq!(HttpMethod::parse("GET"), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("post"), HttpMethod::Post);
        assert_eq!(HttpMethod::parse("RequestMethod.PUT"), HttpMethod::Put);
        assert_eq!(HttpMethod::parse("\"DELETE\""), HttpMethod::Delete);
        assert_eq!(HttpMethod::parse(" Patch "), HttpMethod::Patch);
        assert_eq!(
            HttpMethod::parse("PROPFIND"),
            HttpMethod::Custom("PROPFIND".to_string())
        );
    }

    #[test]
    fn test_annotation_kind_from_name() {
        assert_eq!(AnnotationKind::from_name("GetMapping"), AnnotationKind::GetMapping);
        assert_eq!(AnnotationKind::from_name("@PostMapping"), AnnotationKind::PostMapping);
        assert_eq!(
            AnnotationKind::from_name("org.springframework.web.bind.annotation.RequestMapping"),
            AnnotationKind::RequestMapping
        );
        assert_eq!(
            AnnotationKind::from_name("Mapping"),
            AnnotationKind::Other("Mapping".to_string())
        );
        assert_eq!(AnnotationKind::DeleteMapping.shorthand_method(), Some(HttpMethod::Delete));
        assert_eq!(AnnotationKind::RequestMapping.shorthand_method(), None);
    }

    #[test]
    fn test_any_expands_to_seven_verbs() {
        let verbs = RequestMethods::Any.expand();
        assert_eq!(verbs.len(), 7);
        assert!(!verbs.contains(&HttpMethod::Trace));
    }

    #[test]
    fn test_binding_count() {
        let mapping = RawMapping {
            methods: RequestMethods::Only(vec![HttpMethod::Get, HttpMethod::Post]),
            paths: vec!["/a".to_string(), "/b".to_string(), "/c".to_string()],
            headers: Vec::new(),
        };
        assert_eq!(mapping.binding_count(), 6);

        let any = RawMapping {
            methods: RequestMethods::Any,
            paths: vec![String::new()],
            headers: Vec::new(),
        };
        assert_eq!(any.binding_count(), 7);
    }

    #[test]
    fn test_http_method_serializes_as_string() {
        let json = serde_json::to_string(&HttpMethod::Options).unwrap();
        assert_eq!(json, "\"OPTIONS\"");
        let parsed: HttpMethod = serde_json::from_str("\"RequestMethod.HEAD\"").unwrap();
        assert_eq!(parsed, HttpMethod::Head);
    }
}
