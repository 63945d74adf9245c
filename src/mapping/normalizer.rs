//! Mapping normalizer: raw annotation shapes to canonical [`RawMapping`]s.
//!
//! Total by construction. Missing attributes get defaults (one empty path,
//! the `ANY` marker, no headers) instead of being treated as malformed.

use super::types::{HttpMethod, RawMapping, RequestMethods};
use crate::model::{AttributeValue, MappingAnnotation};

/// Normalize one annotation occurrence.
pub fn normalize(annotation: &MappingAnnotation) -> RawMapping {
    let methods = match annotation.kind.shorthand_method() {
        Some(method) => RequestMethods::Only(vec![method]),
        None => normalize_methods(annotation.method.as_ref()),
    };

    RawMapping {
        methods,
        paths: normalize_paths(annotation),
        headers: normalize_headers(annotation.headers.as_ref()),
    }
}

/// `value` first, then its `path` alias; never empty.
fn normalize_paths(annotation: &MappingAnnotation) -> Vec<String> {
    let source = [annotation.value.as_ref(), annotation.path.as_ref()]
        .into_iter()
        .flatten()
        .find(|attr| !attr.is_empty());

    match source {
        Some(attr) => attr
            .values()
            .iter()
            .map(|path| path.trim().trim_matches('"').to_string())
            .collect(),
        None => vec![String::new()],
    }
}

fn normalize_methods(attr: Option<&AttributeValue>) -> RequestMethods {
    let mut methods: Vec<HttpMethod> = Vec::new();
    for token in attr.map(AttributeValue::values).unwrap_or_default() {
        if token.trim().is_empty() {
            continue;
        }
        let method = HttpMethod::parse(&token);
        if !methods.contains(&method) {
            methods.push(method);
        }
    }

    if methods.is_empty() {
        RequestMethods::Any
    } else {
        RequestMethods::Only(methods)
    }
}

fn normalize_headers(attr: Option<&AttributeValue>) -> Vec<String> {
    attr.map(AttributeValue::values)
        .unwrap_or_default()
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}
