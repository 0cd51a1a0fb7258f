//! Operation documentation entries.
//!
//! An [`ApiDef`] holds the human-authored text for one operation: a summary,
//! a longer description, and one description per argument and attribute.

use crate::op_def::OpDef;

/// Documentation for a single operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDef {
    /// Name of the documented operation.
    pub graph_op_name: String,
    /// One-line summary. Empty means the operation is not public.
    pub summary: String,
    /// Longer description.
    pub description: String,
    /// Input argument documentation.
    pub in_arg: Vec<ArgDoc>,
    /// Output argument documentation.
    pub out_arg: Vec<ArgDoc>,
    /// Attribute documentation.
    pub attr: Vec<AttrDoc>,
}

/// Documentation of an input or output argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgDoc {
    /// Argument name.
    pub name: String,
    /// Description text.
    pub description: String,
}

/// Documentation of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrDoc {
    /// Attribute name.
    pub name: String,
    /// Description text.
    pub description: String,
}

impl ApiDef {
    /// Creates an empty documentation entry for the named operation.
    #[must_use]
    pub fn new(graph_op_name: impl Into<String>) -> Self {
        Self {
            graph_op_name: graph_op_name.into(),
            ..Self::default()
        }
    }

    /// Seeds a documentation entry from the text carried by an op definition.
    #[must_use]
    pub fn from_op_def(op: &OpDef) -> Self {
        Self {
            graph_op_name: op.name.clone(),
            summary: op.summary.clone(),
            description: op.description.clone(),
            in_arg: op
                .input_arg
                .iter()
                .map(|a| ArgDoc {
                    name: a.name.clone(),
                    description: a.description.clone(),
                })
                .collect(),
            out_arg: op
                .output_arg
                .iter()
                .map(|a| ArgDoc {
                    name: a.name.clone(),
                    description: a.description.clone(),
                })
                .collect(),
            attr: op
                .attr
                .iter()
                .map(|a| AttrDoc {
                    name: a.name.clone(),
                    description: a.description.clone(),
                })
                .collect(),
        }
    }

    /// Returns true if the operation has a non-blank summary.
    #[must_use]
    pub fn is_documented(&self) -> bool {
        !self.summary.trim().is_empty()
    }

    /// Description of an input argument, or `""`.
    #[must_use]
    pub fn in_arg_description(&self, name: &str) -> &str {
        find_description(&self.in_arg, name)
    }

    /// Description of an output argument, or `""`.
    #[must_use]
    pub fn out_arg_description(&self, name: &str) -> &str {
        find_description(&self.out_arg, name)
    }

    /// Description of an attribute, or `""`.
    #[must_use]
    pub fn attr_description(&self, name: &str) -> &str {
        self.attr
            .iter()
            .find(|a| a.name == name)
            .map_or("", |a| a.description.as_str())
    }
}

fn find_description<'a>(docs: &'a [ArgDoc], name: &str) -> &'a str {
    docs.iter()
        .find(|d| d.name == name)
        .map_or("", |d| d.description.as_str())
}
