//! # opgen Codegen
//!
//! Rust wrapper generation from graph operation catalogs.
//!
//! This crate provides:
//! - Attribute type mapping to Rust types
//! - Documentation comment rendering
//! - Binding conventions for the generated wrappers
//! - Wrapper function emission and whole-file assembly

pub mod error;
pub mod generator;
pub mod rust;
pub mod writer;

pub use error::CodegenError;
pub use generator::{DEFAULT_HEADER, GeneratedSource, Generator, SkipReason, SkippedOp, check_op};
pub use rust::{Binding, BindingKind, MethodBinding, ModuleBinding};
pub use writer::CodeWriter;

use opgen_catalog::{ApiDefMap, OpCatalog};

/// Generates wrapper source from a serialized `OpList`.
///
/// Documentation comes from the catalog itself; no override files are
/// applied.
///
/// # Arguments
/// * `bytes` - Serialized operation list
/// * `binding` - Target binding conventions
///
/// # Returns
/// The generated source with emitted and skipped operation names.
///
/// # Errors
/// Returns `CodegenError` if decoding or emission fails.
pub fn generate_from_bytes(
    bytes: &[u8],
    binding: &dyn Binding,
) -> Result<GeneratedSource, CodegenError> {
    let catalog = OpCatalog::decode(bytes)?;
    let docs = ApiDefMap::from_catalog(&catalog);
    Generator::new(&catalog, &docs, binding).generate()
}

/// Generates wrapper source from an `OpList` file.
///
/// # Errors
/// Returns `CodegenError` if reading, decoding, or emission fails.
pub fn generate_from_file(
    path: &std::path::Path,
    binding: &dyn Binding,
) -> Result<GeneratedSource, CodegenError> {
    let bytes = std::fs::read(path)?;
    generate_from_bytes(&bytes, binding)
}
