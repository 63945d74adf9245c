//! Language-agnostic class model handed over by the symbol extractor.
//!
//! Every source unit, whatever its syntax, is described by the same
//! records. The source language is carried as metadata only; nothing in
//! the engine branches on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::mapping::AnnotationKind;

/// The syntax a class was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLanguage {
    Java,
    Kotlin,
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLanguage::Java => write!(f, "java"),
            SourceLanguage::Kotlin => write!(f, "kotlin"),
        }
    }
}

/// An annotation attribute that may be written as a scalar or as an array.
///
/// `@GetMapping("/a")`, `@GetMapping(value = ["/a", "/b"])` and
/// `@GetMapping({"/a"})` all reach the engine through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    List(Vec<String>),
}

impl AttributeValue {
    /// All values in declaration order. A scalar becomes a one-element list.
    pub fn values(&self) -> Vec<String> {
        match self {
            AttributeValue::Single(value) => vec![value.clone()],
            AttributeValue::List(values) => values.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AttributeValue::Single(_) => false,
            AttributeValue::List(values) => values.is_empty(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Single(value.to_string())
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        AttributeValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// One mapping annotation occurrence, exactly as the extractor saw it.
///
/// Attributes the source did not spell out are `None`; defaults are
/// applied by [`crate::mapping::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingAnnotation {
    /// Annotation name, e.g. `GetMapping` or `RequestMapping`.
    pub kind: AnnotationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// Alias of `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<AttributeValue>,
}

impl MappingAnnotation {
    pub fn new(kind: AnnotationKind) -> Self {
        Self {
            kind,
            value: None,
            path: None,
            method: None,
            headers: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<AttributeValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<AttributeValue>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<AttributeValue>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_headers(mut self, headers: impl Into<AttributeValue>) -> Self {
        self.headers = Some(headers.into());
        self
    }
}

/// A handler parameter bound from the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub param_type: String,
    /// Binding annotation, e.g. `PathVariable`, `RequestBody`, `RequestParam`.
    pub annotation: String,
}

/// Line range of a declaration (1-indexed, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// A method inside a class. The name is the override key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub mappings: Vec<MappingAnnotation>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineRange>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mappings: Vec::new(),
            parameters: Vec::new(),
            lines: None,
        }
    }

    pub fn with_mapping(mut self, mapping: MappingAnnotation) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        param_type: impl Into<String>,
        annotation: impl Into<String>,
    ) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            param_type: param_type.into(),
            annotation: annotation.into(),
        });
        self
    }

    pub fn at_lines(mut self, start: usize, end: usize) -> Self {
        self.lines = Some(LineRange { start, end });
        self
    }
}

/// A class (or Kotlin `class`/`open class`) declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// Best-available qualified name, e.g. `com.example.UserController`.
    pub name: String,
    pub language: SourceLanguage,
    /// Base-class reference as written in source, possibly unqualified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Class-level mapping annotations in source order.
    #[serde(default)]
    pub mappings: Vec<MappingAnnotation>,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
    /// Whether this class itself receives requests.
    #[serde(default)]
    pub is_exposed_controller: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>, language: SourceLanguage) -> Self {
        Self {
            name: name.into(),
            language,
            base: None,
            mappings: Vec::new(),
            methods: Vec::new(),
            is_exposed_controller: false,
            file: None,
        }
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn controller(mut self) -> Self {
        self.is_exposed_controller = true;
        self
    }

    pub fn with_mapping(mut self, mapping: MappingAnnotation) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }

    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The last dotted segment of the name.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    /// Everything before the last dotted segment, if any.
    pub fn package(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(package, _)| package)
    }
}

pub(crate) fn simple_name_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// The complete, order-stable extractor output for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassModel {
    pub classes: Vec<ClassDeclaration>,
}

impl ClassModel {
    pub fn new(classes: Vec<ClassDeclaration>) -> Self {
        Self { classes }
    }

    /// Decode the extractor's JSON (a top-level array of class records).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
