//! Intermediate representation for code generation.
//!
//! This module classifies an operation's attributes into the three sets the
//! emitter needs: attributes inferred from input arguments (never surfaced),
//! required attributes, and optional attributes.

use crate::op_def::{ArgDef, AttrDef, OpDef};
use std::collections::BTreeSet;

/// Classified view of one operation.
#[derive(Debug, Clone)]
pub struct OpIr<'a> {
    /// The classified operation.
    pub op: &'a OpDef,
    /// Attribute names referenced by input arguments.
    pub inferred: BTreeSet<&'a str>,
    /// Attributes without a default, in declaration order.
    pub required: Vec<&'a AttrDef>,
    /// Attributes with a default, in declaration order.
    pub optional: Vec<&'a AttrDef>,
    /// Whether the operation declares any output.
    pub has_outputs: bool,
}

impl<'a> OpIr<'a> {
    /// Classifies the attributes of an operation.
    #[must_use]
    pub fn classify(op: &'a OpDef) -> Self {
        let inferred: BTreeSet<&str> = op
            .input_arg
            .iter()
            .flat_map(ArgDef::referenced_attrs)
            .collect();

        let (required, optional) = op
            .attr
            .iter()
            .filter(|attr| !inferred.contains(attr.name.as_str()))
            .partition(|attr| attr.is_required());

        Self {
            op,
            inferred,
            required,
            optional,
            has_outputs: !op.output_arg.is_empty(),
        }
    }

    /// Surfaced attributes: required first, then optional.
    pub fn surfaced_attrs(&self) -> impl Iterator<Item = &'a AttrDef> + '_ {
        self.required.iter().chain(&self.optional).copied()
    }

    /// Returns true if any output is a list.
    #[must_use]
    pub fn has_list_output(&self) -> bool {
        self.op.output_arg.iter().any(is_list_arg)
    }
}

/// Returns true if the argument stands for a variable-length list of handles.
#[must_use]
pub fn is_list_arg(arg: &ArgDef) -> bool {
    !arg.type_list_attr.is_empty() || !arg.number_attr.is_empty()
}

/// Converts an operation name to snake_case.
///
/// Acronym runs stay together: `LRNGrad` becomes `lrn_grad`, and a digit
/// followed by a capital does not split (`Conv2DBackpropInput` becomes
/// `conv2d_backprop_input`).
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }

    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op_def::AttrValue;

    fn create_concat_op() -> OpDef {
        OpDef::new("ConcatV2")
            .with_input(
                ArgDef::new("values")
                    .with_type_attr("T")
                    .with_number_attr("N"),
            )
            .with_input(ArgDef::new("axis").with_type_attr("Tidx"))
            .with_output(ArgDef::new("output").with_type_attr("T"))
            .with_attr(AttrDef::new("N", "int"))
            .with_attr(AttrDef::new("T", "type"))
            .with_attr(AttrDef::new("Tidx", "type").with_default(AttrValue::data_type(3)))
            .with_attr(AttrDef::new("message", "string"))
            .with_attr(AttrDef::new("first_n", "int").with_default(AttrValue::int(-1)))
            .with_attr(AttrDef::new("summarize", "int").with_default(AttrValue::int(3)))
            .with_attr(AttrDef::new("shape", "shape"))
    }

    #[test]
    fn test_classify_partitions_attrs() {
        let op = create_concat_op();
        let ir = OpIr::classify(&op);

        assert_eq!(
            ir.inferred.iter().copied().collect::<Vec<_>>(),
            vec!["N", "T", "Tidx"]
        );
        let required: Vec<&str> = ir.required.iter().map(|a| a.name.as_str()).collect();
        let optional: Vec<&str> = ir.optional.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(required, vec!["message", "shape"]);
        assert_eq!(optional, vec!["first_n", "summarize"]);
        assert!(ir.has_outputs);
    }

    #[test]
    fn test_partition_invariant() {
        let op = create_concat_op();
        let ir = OpIr::classify(&op);

        let required: BTreeSet<&str> = ir.required.iter().map(|a| a.name.as_str()).collect();
        let optional: BTreeSet<&str> = ir.optional.iter().map(|a| a.name.as_str()).collect();
        let all: BTreeSet<&str> = op.attr.iter().map(|a| a.name.as_str()).collect();

        assert!(ir.inferred.is_disjoint(&required));
        assert!(ir.inferred.is_disjoint(&optional));
        assert!(required.is_disjoint(&optional));

        let union: BTreeSet<&str> = ir
            .inferred
            .iter()
            .chain(&required)
            .chain(&optional)
            .copied()
            .collect();
        assert_eq!(union, all);
    }

    #[test]
    fn test_output_refs_do_not_infer() {
        let op = OpDef::new("Unique")
            .with_input(ArgDef::new("x").with_type_attr("T"))
            .with_output(ArgDef::new("y").with_type_attr("T"))
            .with_output(ArgDef::new("idx").with_type_attr("out_idx"))
            .with_attr(AttrDef::new("T", "type"))
            .with_attr(AttrDef::new("out_idx", "type").with_default(AttrValue::data_type(3)));
        let ir = OpIr::classify(&op);

        assert!(!ir.inferred.contains("out_idx"));
        assert_eq!(ir.optional.len(), 1);
        assert_eq!(ir.surfaced_attrs().count(), 1);
    }

    #[test]
    fn test_no_outputs() {
        let op = OpDef::new("NoOp");
        let ir = OpIr::classify(&op);

        assert!(!ir.has_outputs);
        assert!(!ir.has_list_output());
        assert!(ir.inferred.is_empty());
    }

    #[test]
    fn test_is_list_arg() {
        assert!(is_list_arg(&ArgDef::new("values").with_number_attr("N")));
        assert!(is_list_arg(&ArgDef::new("components").with_type_list_attr("T")));
        assert!(!is_list_arg(&ArgDef::new("x").with_type_attr("T")));
        assert!(!is_list_arg(&ArgDef::new("x")));
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Add"), "add");
        assert_eq!(to_snake_case("MatMul"), "mat_mul");
        assert_eq!(to_snake_case("BatchMatMulV2"), "batch_mat_mul_v2");
        assert_eq!(to_snake_case("LRN"), "lrn");
        assert_eq!(to_snake_case("LRNGrad"), "lrn_grad");
        assert_eq!(to_snake_case("Conv2DBackpropInput"), "conv2d_backprop_input");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("unique"), "Unique");
        assert_eq!(to_pascal_case("batch_mat_mul"), "BatchMatMul");
        assert_eq!(to_pascal_case("MatMul"), "MatMul");
    }
}
