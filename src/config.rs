//! Analysis configuration, read from `.routemap/config.toml`.
//!
//! ```toml
//! report_unresolved_bases = true
//! detect_conflicts = true
//! known_library_bases = ["Object", "ResponseEntityExceptionHandler"]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;

/// Base classes that routinely live outside the scanned sources.
/// Unresolved references to them are informational, not warnings.
const DEFAULT_LIBRARY_BASES: &[&str] = &[
    // JDK
    "Object",
    "Exception",
    "RuntimeException",
    "Throwable",
    "Enum",
    "Record",
    "Number",
    "String",
    "Any",
    // Spring
    "AbstractAggregateRoot",
    "JpaRepository",
    "CrudRepository",
    "Repository",
    "PagingAndSortingRepository",
    "ResponseEntityExceptionHandler",
    "AbstractController",
    "WebMvcConfigurer",
    // JPA
    "AbstractAuditable",
    "AbstractPersistable",
    "Persistable",
    "Auditable",
    // HTTP entities
    "ResponseEntity",
    "HttpEntity",
    "RequestEntity",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutemapConfig {
    /// Simple names of bases expected to be unresolved.
    pub known_library_bases: Vec<String>,
    /// Record a diagnostic for every base reference that resolves nowhere.
    pub report_unresolved_bases: bool,
    /// Run the ambiguity detector after resolution.
    pub detect_conflicts: bool,
}

impl Default for RoutemapConfig {
    fn default() -> Self {
        Self {
            known_library_bases: DEFAULT_LIBRARY_BASES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            report_unresolved_bases: true,
            detect_conflicts: true,
        }
    }
}

impl RoutemapConfig {
    /// Load from `path`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(config = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(config = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Load from `path`, surfacing I/O and parse errors.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Whether an unresolved base with this simple name is expected.
    pub fn is_library_base(&self, simple_name: &str) -> bool {
        self.known_library_bases
            .iter()
            .any(|known| known == simple_name)
    }
}
