//! Path template composition.

/// Join a class-level prefix and a method-level path.
///
/// Repeated slashes collapse to one, a trailing slash is dropped, a leading
/// slash is added, and an empty composition becomes `/`. Templates such as
/// `{id}` are kept literally.
pub fn compose_path(prefix: &str, method_path: &str) -> String {
    let segments: Vec<&str> = prefix
        .split('/')
        .chain(method_path.split('/'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut path = String::with_capacity(prefix.len() + method_path.len() + 1);
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}
