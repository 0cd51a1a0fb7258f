//! Target binding conventions.
//!
//! A [`Binding`] captures everything that differs between graph-binding
//! flavors: where generated functions live, how the graph is reached, which
//! attribute setter is called for each type and how multiple outputs are
//! returned.

use crate::rust::types::{AttrKind, MappedType};
use crate::writer::CodeWriter;
use std::fmt;
use std::str::FromStr;

/// Shape of the return value for operations with more than one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// A plain tuple in declaration order.
    Tuple,
    /// A named `<Op>Outputs` struct emitted before the function.
    Struct,
}

/// Conventions of the graph binding the generated code targets.
pub trait Binding {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// `use` declarations emitted after the header.
    fn imports(&self) -> &'static [&'static str] {
        &[
            "use crate::{",
            "    DataType, Graph, OpCreateError, Operation, OperationDescription, Output, Shape,",
            "    Status, Tensor,",
            "};",
        ]
    }

    /// Opens the item holding the generated functions.
    fn open_container(&self, writer: &mut CodeWriter);

    /// Closes the item opened by [`Binding::open_container`].
    fn close_container(&self, writer: &mut CodeWriter) {
        writer.close("}");
    }

    /// Leading parameter of every generated function.
    fn receiver(&self) -> &'static str;

    /// Expression naming the graph inside generated bodies.
    fn graph_expr(&self) -> &'static str;

    /// Method on `OperationDescription` setting an attribute of this type.
    ///
    /// Returns `None` when the binding cannot set the type; reaching
    /// emission with such an attribute is fatal.
    fn attr_setter(&self, ty: &MappedType) -> Option<String>;

    /// Return shape for multiple outputs.
    fn output_style(&self) -> OutputStyle;
}

/// Methods on `impl Graph` with a single generic attribute setter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodBinding;

impl Binding for MethodBinding {
    fn name(&self) -> &'static str {
        "method"
    }

    fn open_container(&self, writer: &mut CodeWriter) {
        writer.line("#[allow(unused_assignments, clippy::too_many_arguments)]");
        writer.open("impl Graph {");
    }

    fn receiver(&self) -> &'static str {
        "&mut self"
    }

    fn graph_expr(&self) -> &'static str {
        "self"
    }

    fn attr_setter(&self, _ty: &MappedType) -> Option<String> {
        Some("set_attr".to_string())
    }

    fn output_style(&self) -> OutputStyle {
        OutputStyle::Tuple
    }
}

/// Free functions in `pub mod ops` with typed attribute setters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleBinding;

impl Binding for ModuleBinding {
    fn name(&self) -> &'static str {
        "module"
    }

    fn open_container(&self, writer: &mut CodeWriter) {
        writer.line("#[allow(unused_assignments, clippy::too_many_arguments)]");
        writer.open("pub mod ops {");
        writer.line("use super::*;");
    }

    fn receiver(&self) -> &'static str {
        "graph: &mut Graph"
    }

    fn graph_expr(&self) -> &'static str {
        "graph"
    }

    fn attr_setter(&self, ty: &MappedType) -> Option<String> {
        let base = match ty.kind {
            AttrKind::Int => "set_attr_int",
            AttrKind::Float => "set_attr_float",
            AttrKind::Bool => "set_attr_bool",
            AttrKind::Type => "set_attr_type",
            AttrKind::Shape => "set_attr_shape",
            AttrKind::Tensor => "set_attr_tensor",
            AttrKind::String => "set_attr_string",
        };
        if ty.is_list {
            Some(format!("{base}_list"))
        } else {
            Some(base.to_string())
        }
    }

    fn output_style(&self) -> OutputStyle {
        OutputStyle::Struct
    }
}

/// Selectable binding flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingKind {
    /// [`MethodBinding`]
    #[default]
    Method,
    /// [`ModuleBinding`]
    Module,
}

impl BindingKind {
    /// Returns the binding implementation for this flavor.
    #[must_use]
    pub fn binding(self) -> Box<dyn Binding> {
        match self {
            Self::Method => Box::new(MethodBinding),
            Self::Module => Box::new(ModuleBinding),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binding().name())
    }
}

impl FromStr for BindingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "method" => Ok(Self::Method),
            "module" => Ok(Self::Module),
            other => Err(format!("unknown binding '{other}', expected 'method' or 'module'")),
        }
    }
}
