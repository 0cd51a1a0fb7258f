//! Wrapper function emission.
//!
//! One [`OpEmitter`] call writes one complete wrapper: the optional outputs
//! struct, the doc comment, the signature and the body. Everything that can
//! fail is resolved before the first line is written.

use crate::error::CodegenError;
use crate::rust::binding::{Binding, OutputStyle};
use crate::rust::docs::{CommentMarkers, render_comment};
use crate::rust::names::{ParamNames, fn_name};
use crate::rust::types::{MappedType, map_type};
use crate::writer::CodeWriter;
use opgen_catalog::ir::to_pascal_case;
use opgen_catalog::{ApiDef, ArgDef, AttrDef, OpIr, is_list_arg};

/// An input or output argument with its generated identifier.
struct ArgSlot<'a> {
    arg: &'a ArgDef,
    name: String,
    is_list: bool,
}

impl ArgSlot<'_> {
    fn output_type(&self) -> &'static str {
        if self.is_list { "Vec<Output>" } else { "Output" }
    }

    fn input_type(&self) -> &'static str {
        if self.is_list { "&[Output]" } else { "Output" }
    }
}

/// A surfaced attribute with its mapped type and setter.
struct AttrParam<'a> {
    attr: &'a AttrDef,
    name: String,
    ty: MappedType,
    setter: String,
}

/// Fully resolved wrapper signature.
struct Signature<'a> {
    fn_name: String,
    inputs: Vec<ArgSlot<'a>>,
    required: Vec<AttrParam<'a>>,
    optional: Vec<AttrParam<'a>>,
    outputs: Vec<ArgSlot<'a>>,
    outputs_struct: Option<String>,
}

impl<'a> Signature<'a> {
    fn resolve(ir: &OpIr<'a>, binding: &dyn Binding) -> Result<Self, CodegenError> {
        let op = ir.op;
        let mut names = ParamNames::new();

        let inputs = op
            .input_arg
            .iter()
            .map(|arg| ArgSlot {
                arg,
                name: names.allocate(&arg.name),
                is_list: is_list_arg(arg),
            })
            .collect();

        let mut attr_param = |attr: &'a AttrDef| -> Result<AttrParam<'a>, CodegenError> {
            let unsupported =
                || CodegenError::unsupported_attr(&op.name, &attr.name, &attr.r#type);
            let ty = map_type(&attr.r#type).ok_or_else(unsupported)?;
            let setter = binding.attr_setter(&ty).ok_or_else(unsupported)?;
            Ok(AttrParam {
                attr,
                name: names.allocate(&attr.name),
                ty,
                setter,
            })
        };

        let required = ir
            .required
            .iter()
            .map(|&attr| attr_param(attr))
            .collect::<Result<Vec<_>, _>>()?;
        let optional = ir
            .optional
            .iter()
            .map(|&attr| attr_param(attr))
            .collect::<Result<Vec<_>, _>>()?;

        let mut output_names = ParamNames::new();
        let outputs: Vec<ArgSlot<'a>> = op
            .output_arg
            .iter()
            .map(|arg| ArgSlot {
                arg,
                name: output_names.allocate(&arg.name),
                is_list: is_list_arg(arg),
            })
            .collect();

        let outputs_struct = (outputs.len() > 1 && binding.output_style() == OutputStyle::Struct)
            .then(|| format!("{}Outputs", to_pascal_case(&op.name)));

        Ok(Self {
            fn_name: fn_name(&op.name),
            inputs,
            required,
            optional,
            outputs,
            outputs_struct,
        })
    }

    fn return_type(&self) -> String {
        match self.outputs.as_slice() {
            [] => "Operation".to_string(),
            [single] => single.output_type().to_string(),
            many => match &self.outputs_struct {
                Some(name) => name.clone(),
                None => {
                    let fields: Vec<&str> = many.iter().map(ArgSlot::output_type).collect();
                    format!("({})", fields.join(", "))
                }
            },
        }
    }

    fn return_value(&self) -> String {
        match self.outputs.as_slice() {
            [] => "op".to_string(),
            [single] => single.name.clone(),
            many => {
                let fields: Vec<&str> = many.iter().map(|o| o.name.as_str()).collect();
                match &self.outputs_struct {
                    Some(name) => format!("{name} {{ {} }}", fields.join(", ")),
                    None => format!("({})", fields.join(", ")),
                }
            }
        }
    }
}

/// Emits wrapper functions for one binding.
pub struct OpEmitter<'a> {
    binding: &'a dyn Binding,
    markers: CommentMarkers,
}

impl<'a> OpEmitter<'a> {
    /// Creates an emitter using rustdoc comment markers.
    #[must_use]
    pub fn new(binding: &'a dyn Binding) -> Self {
        Self {
            binding,
            markers: CommentMarkers::RUSTDOC,
        }
    }

    /// Replaces the comment markers.
    #[must_use]
    pub fn with_markers(mut self, markers: CommentMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Appends the wrapper for one classified operation.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnsupportedAttrType`] if a surfaced attribute
    /// has no type mapping or no setter in the binding. Nothing is written
    /// in that case.
    pub fn emit(
        &self,
        ir: &OpIr<'_>,
        doc: &ApiDef,
        writer: &mut CodeWriter,
    ) -> Result<(), CodegenError> {
        let sig = Signature::resolve(ir, self.binding)?;

        if let Some(struct_name) = &sig.outputs_struct {
            self.emit_outputs_struct(&sig, struct_name, doc, writer);
        }
        self.emit_docs(&sig, doc, writer);
        self.emit_signature(&sig, writer);
        self.emit_body(&sig, &ir.op.name, writer);
        writer.close("}");

        Ok(())
    }

    fn render(&self, text: &str) -> Vec<String> {
        render_comment(text, &self.markers)
    }

    fn emit_outputs_struct(
        &self,
        sig: &Signature<'_>,
        struct_name: &str,
        doc: &ApiDef,
        writer: &mut CodeWriter,
    ) {
        writer.doc(format!("Outputs of [`{}`].", sig.fn_name));
        writer.open(format!("pub struct {struct_name} {{"));
        for out in &sig.outputs {
            for line in self.render(doc.out_arg_description(&out.arg.name)) {
                writer.doc(line);
            }
            writer.line(format!("pub {}: {},", out.name, out.output_type()));
        }
        writer.close("}");
        writer.blank();
    }

    fn emit_docs(&self, sig: &Signature<'_>, doc: &ApiDef, writer: &mut CodeWriter) {
        for line in self.render(&doc.summary) {
            writer.doc(line);
        }

        let description = self.render(&doc.description);
        if !description.is_empty() {
            writer.doc("");
            for line in description {
                writer.doc(line);
            }
        }

        writer.doc("");
        writer.doc("# Arguments");
        writer.doc("");
        for input in &sig.inputs {
            let lines = self.render(doc.in_arg_description(&input.arg.name));
            doc_bullet(writer, &input.name, lines);
        }
        for param in &sig.required {
            let lines = self.render(doc.attr_description(&param.attr.name));
            doc_bullet(writer, &param.name, lines);
        }
        for param in &sig.optional {
            let mut lines = vec!["Optional argument.".to_string()];
            lines.extend(self.render(doc.attr_description(&param.attr.name)));
            if let Some(value) = param.attr.default_value.as_ref().and_then(|v| v.render()) {
                lines.push(format!("Defaults to `{value}`."));
            }
            doc_bullet(writer, &param.name, lines);
        }
        doc_bullet(
            writer,
            "op_name",
            vec!["Name for the operation; a unique name is generated when `None`.".to_string()],
        );

        writer.doc("");
        writer.doc("# Returns");
        writer.doc("");
        match sig.outputs.as_slice() {
            [] => writer.doc("The created operation."),
            [single] => {
                let lines = self.render(doc.out_arg_description(&single.arg.name));
                if lines.is_empty() {
                    writer.doc(format!("The `{}` output.", single.arg.name));
                }
                for line in lines {
                    writer.doc(line);
                }
            }
            many => {
                match &sig.outputs_struct {
                    Some(name) => writer.doc(format!(
                        "Returns a [`{name}`] with multiple values, as follows:"
                    )),
                    None => writer.doc("Returns a tuple with multiple values, as follows:"),
                }
                writer.doc("");
                for out in many {
                    let lines = self.render(doc.out_arg_description(&out.arg.name));
                    doc_bullet(writer, &out.name, lines);
                }
            }
        }

        writer.doc("");
        writer.doc("# Errors");
        writer.doc("");
        writer.doc("Returns [`OpCreateError`] if the graph rejects the operation.");
    }

    fn emit_signature(&self, sig: &Signature<'_>, writer: &mut CodeWriter) {
        writer.open(format!("pub fn {}(", sig.fn_name));
        writer.line(format!("{},", self.binding.receiver()));
        for input in &sig.inputs {
            writer.line(format!("{}: {},", input.name, input.input_type()));
        }
        for param in &sig.required {
            writer.line(format!("{}: {},", param.name, param.ty.param_type()));
        }
        for param in &sig.optional {
            writer.line(format!("{}: Option<{}>,", param.name, param.ty.param_type()));
        }
        writer.line("op_name: Option<&str>,");
        writer.dedent();
        writer.open(format!(") -> Result<{}, OpCreateError> {{", sig.return_type()));
    }

    fn emit_body(&self, sig: &Signature<'_>, op_type: &str, writer: &mut CodeWriter) {
        let graph = self.binding.graph_expr();

        writer.line(format!("let name = {graph}.make_name({op_type:?}, op_name);"));
        writer.line(format!("let mut desc = OperationDescription::new({op_type:?}, &name);"));

        for input in &sig.inputs {
            if input.is_list {
                writer.line(format!("desc.add_input_list({});", input.name));
            } else {
                writer.line(format!("desc.add_input({});", input.name));
            }
        }

        writer.open(format!("for control in {graph}.control_dependencies() {{"));
        writer.line("desc.add_control_input(control);");
        writer.close("}");

        for param in &sig.required {
            writer.line(set_attr_call(param));
        }
        for param in &sig.optional {
            writer.open(format!("if let Some({0}) = {0} {{", param.name));
            writer.line(set_attr_call(param));
            writer.close("}");
        }

        writer.line("let mut status = Status::new();");
        writer.open(format!("let Some(op) = desc.finish({graph}, &mut status) else {{"));
        writer.line(format!("return Err(OpCreateError::new({op_type:?}, status.message()));"));
        writer.close("};");

        if !sig.outputs.is_empty() {
            writer.line("let mut idx = 0usize;");
        }
        for out in &sig.outputs {
            if out.is_list {
                writer.open("let n = op");
                writer.line(format!(".output_list_length({:?})", out.arg.name));
                writer.line(format!(
                    ".map_err(|status| OpCreateError::new({op_type:?}, status.message()))?;"
                ));
                writer.dedent();
                writer.line(format!("let mut {} = Vec::with_capacity(n);", out.name));
                writer.open("for _ in 0..n {");
                writer.line(format!("{}.push(Output::new(&op, idx));", out.name));
                writer.line("idx += 1;");
                writer.close("}");
            } else {
                writer.line(format!("let {} = Output::new(&op, idx);", out.name));
                writer.line("idx += 1;");
            }
        }

        writer.line(format!("Ok({})", sig.return_value()));
    }
}

fn set_attr_call(param: &AttrParam<'_>) -> String {
    format!("desc.{}({:?}, {});", param.setter, param.attr.name, param.name)
}

/// Writes a `* `name` - text` list item; continuation lines are indented.
fn doc_bullet(writer: &mut CodeWriter, name: &str, lines: Vec<String>) {
    let mut lines = lines.into_iter();
    match lines.next() {
        Some(first) if !first.is_empty() => writer.doc(format!("* `{name}` - {first}")),
        _ => writer.doc(format!("* `{name}`")),
    }
    for line in lines {
        if line.is_empty() {
            writer.doc("");
        } else {
            writer.doc(format!("  {line}"));
        }
    }
}
