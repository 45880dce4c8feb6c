use thiserror::Error;

/// Failures reported by the page host (browser or fake).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("Element {0} is stale (removed from DOM)")]
    ElementStale(u32),

    #[error("Element {id} is not a {expected}")]
    InvalidElementType { id: u32, expected: String },

    #[error("Invalid selector: {selector}")]
    SelectorInvalid { selector: String },

    #[error("Script error: {0}")]
    Script(String),

    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl DomError {
    /// Stable code for diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            DomError::ElementStale(_) => "ELEMENT_STALE",
            DomError::InvalidElementType { .. } => "INVALID_ELEMENT_TYPE",
            DomError::SelectorInvalid { .. } => "SELECTOR_INVALID",
            DomError::Script(_) => "SCRIPT_ERROR",
            DomError::NotSupported(_) => "NOT_SUPPORTED",
        }
    }

    /// Capability gaps are expected on older browsers and only degrade behavior.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, DomError::NotSupported(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
