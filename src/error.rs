//! Error types for the melting pipeline.
//!
//! Normalization never fails (bad values degrade to best-effort output);
//! everything that can abort a run is collected here.

use thiserror::Error;

/// Main error type for the osmelt library.
#[derive(Debug, Error)]
pub enum MeltError {
    /// The underlying XML stream could not be parsed.
    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element attribute was malformed.
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// An element arrived without an `id`, so its tag and membership rows
    /// would have no owner to reference.
    #[error("{kind} element is missing its id attribute")]
    MissingId { kind: &'static str },

    /// A shaped record failed structural validation. Fatal to the run.
    #[error("record of kind '{kind}' failed validation: {detail}")]
    Validation {
        kind: &'static str,
        detail: serde_json::Value,
    },

    /// CSV serialization or writing failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for melting operations.
pub type Result<T> = std::result::Result<T, MeltError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_id_display() {
        let err = MeltError::MissingId { kind: "way" };
        assert_eq!(err.to_string(), "way element is missing its id attribute");
    }

    #[test]
    fn test_validation_display_carries_detail() {
        let err = MeltError::Validation {
            kind: "node",
            detail: json!([{"field": "lat", "error": "required field is missing"}]),
        };
        let message = err.to_string();
        assert!(message.contains("'node'"));
        assert!(message.contains("lat"));
    }
}
