//! Source generation for a whole catalog.

use crate::error::CodegenError;
use crate::rust::binding::Binding;
use crate::rust::ops::OpEmitter;
use crate::rust::types::map_type;
use crate::writer::CodeWriter;
use opgen_catalog::{ApiDef, ApiDefMap, OpCatalog, OpDef, OpIr};
use std::fmt;

/// License text written at the top of generated files by default.
pub const DEFAULT_HEADER: &str = "\
Copyright the opgen authors.

Licensed under the MIT License. See the LICENSE file for details.";

const GENERATED_NOTICE: &str = "@generated by opgen. Do not edit by hand.";

/// Why an operation was left out of the generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The name starts with `_`.
    Internal,
    /// An attribute type has no Rust mapping.
    UnmappedAttr {
        /// First unmapped attribute.
        attr: String,
        /// Its type tag.
        type_tag: String,
    },
    /// No documentation entry, or an empty summary.
    Undocumented,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => f.write_str("internal operation"),
            Self::UnmappedAttr { attr, type_tag } => {
                write!(f, "attribute '{attr}' has unsupported type '{type_tag}'")
            }
            Self::Undocumented => f.write_str("no documentation summary"),
        }
    }
}

/// An operation that was not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOp {
    /// Operation name.
    pub name: String,
    /// Reason for skipping.
    pub reason: SkipReason,
}

/// Result of a generation pass.
#[derive(Debug, Clone, Default)]
pub struct GeneratedSource {
    /// The complete source file.
    pub code: String,
    /// Names of emitted operations, in output order.
    pub emitted: Vec<String>,
    /// Operations left out, in catalog order.
    pub skipped: Vec<SkippedOp>,
}

/// Decides whether an operation is emitted.
///
/// Checks run in a fixed order: internal name, attribute types, then
/// documentation. The first failing check wins.
///
/// # Errors
/// Returns the [`SkipReason`] of the first failing check.
pub fn check_op<'d>(op: &OpDef, doc: Option<&'d ApiDef>) -> Result<&'d ApiDef, SkipReason> {
    if op.is_internal() {
        return Err(SkipReason::Internal);
    }

    if let Some(attr) = op.attr.iter().find(|a| map_type(&a.r#type).is_none()) {
        return Err(SkipReason::UnmappedAttr {
            attr: attr.name.clone(),
            type_tag: attr.r#type.clone(),
        });
    }

    doc.filter(|d| d.is_documented())
        .ok_or(SkipReason::Undocumented)
}

/// Generates one source file from a catalog and its documentation.
pub struct Generator<'a> {
    catalog: &'a OpCatalog,
    docs: &'a ApiDefMap,
    binding: &'a dyn Binding,
    header: &'a str,
}

impl<'a> Generator<'a> {
    /// Creates a generator using [`DEFAULT_HEADER`].
    #[must_use]
    pub fn new(catalog: &'a OpCatalog, docs: &'a ApiDefMap, binding: &'a dyn Binding) -> Self {
        Self {
            catalog,
            docs,
            binding,
            header: DEFAULT_HEADER,
        }
    }

    /// Replaces the license header.
    #[must_use]
    pub fn with_header(mut self, header: &'a str) -> Self {
        self.header = header;
        self
    }

    /// Generates the complete source file.
    ///
    /// Operations are visited in byte order of their names, so identical
    /// inputs always produce identical output.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnsupportedAttrType`] if an operation passes
    /// the skip checks but cannot be emitted by the binding.
    pub fn generate(&self) -> Result<GeneratedSource, CodegenError> {
        let mut writer = CodeWriter::new();
        let mut emitted = Vec::new();
        let mut skipped = Vec::new();

        self.write_header(&mut writer);
        self.binding.open_container(&mut writer);

        let emitter = OpEmitter::new(self.binding);
        for op in self.catalog.sorted() {
            let doc = match check_op(op, self.docs.get(&op.name)) {
                Ok(doc) => doc,
                Err(reason) => {
                    log_skip(&op.name, &reason);
                    skipped.push(SkippedOp {
                        name: op.name.clone(),
                        reason,
                    });
                    continue;
                }
            };

            if !emitted.is_empty() {
                writer.blank();
            }
            emitter.emit(&OpIr::classify(op), doc, &mut writer)?;
            tracing::debug!("Emitted {}", op.name);
            emitted.push(op.name.clone());
        }

        self.binding.close_container(&mut writer);

        Ok(GeneratedSource {
            code: writer.finish(),
            emitted,
            skipped,
        })
    }

    fn write_header(&self, writer: &mut CodeWriter) {
        for line in self.header.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                writer.line("//");
            } else {
                writer.line(format!("// {line}"));
            }
        }
        writer.line("//");
        writer.line(format!("// {GENERATED_NOTICE}"));
        writer.blank();

        writer.line("#[allow(unused_imports)]");
        for line in self.binding.imports() {
            writer.line(line);
        }
        writer.blank();
    }
}

fn log_skip(name: &str, reason: &SkipReason) {
    match reason {
        SkipReason::UnmappedAttr { .. } => tracing::info!("Skipping {}: {}", name, reason),
        _ => tracing::debug!("Skipping {}: {}", name, reason),
    }
}
