//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Catalog decoding or validation error.
    #[error("catalog error: {0}")]
    Catalog(#[from] opgen_catalog::CatalogError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An attribute type reached emission without a setter in the binding.
    #[error("unsupported attribute type '{type_tag}' for attribute '{attr}' of operation '{op}'")]
    UnsupportedAttrType {
        /// Operation name.
        op: String,
        /// Attribute name.
        attr: String,
        /// Attribute type tag.
        type_tag: String,
    },
}

impl CodegenError {
    /// Creates an unsupported attribute type error.
    pub fn unsupported_attr(
        op: impl Into<String>,
        attr: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        Self::UnsupportedAttrType {
            op: op.into(),
            attr: attr.into(),
            type_tag: type_tag.into(),
        }
    }
}
