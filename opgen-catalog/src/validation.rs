//! Catalog validation utilities.
//!
//! This module checks the structural guarantees the generator relies on:
//! operation names are non-empty and unique. Dangling attribute references
//! from arguments are reported but tolerated, since the classifier only
//! needs the names.

use crate::error::CatalogError;
use crate::op_def::OpDef;
use std::collections::HashSet;

/// Validates a decoded list of operations.
///
/// # Arguments
/// * `ops` - Operations in catalog order
///
/// # Returns
/// Ok(()) if valid, or CatalogError describing the first issue.
///
/// # Errors
/// Returns `CatalogError` if an operation name is empty or repeated.
pub fn validate_catalog(ops: &[OpDef]) -> Result<(), CatalogError> {
    let mut seen_names = HashSet::new();

    for (index, op) in ops.iter().enumerate() {
        if op.name.is_empty() {
            return Err(CatalogError::EmptyName { index });
        }

        if !seen_names.insert(op.name.as_str()) {
            return Err(CatalogError::DuplicateOp {
                name: op.name.clone(),
            });
        }

        validate_op(op)?;
    }

    Ok(())
}

/// Validates a single operation definition.
fn validate_op(op: &OpDef) -> Result<(), CatalogError> {
    let mut seen_attrs = HashSet::new();

    for attr in &op.attr {
        if !seen_attrs.insert(attr.name.as_str()) {
            return Err(CatalogError::validation(format!(
                "Duplicate attribute '{}' in operation '{}'",
                attr.name, op.name
            )));
        }
    }

    for arg in op.input_arg.iter().chain(&op.output_arg) {
        for referenced in arg.referenced_attrs() {
            if !seen_attrs.contains(referenced) {
                tracing::warn!(
                    "Operation {} argument {} references undeclared attribute {}",
                    op.name,
                    arg.name,
                    referenced
                );
            }
        }
    }

    Ok(())
}
