//! Operation signature definitions.
//!
//! These messages mirror the wire layout of the runtime's `OpList` protobuf,
//! so a serialized operation list can be decoded directly. Fields the
//! generator never reads (deprecation, allowed values, shape and tensor
//! defaults) are skipped by the decoder.

use prost::Message;

/// A list of operation definitions, as returned by the runtime.
#[derive(Clone, PartialEq, Message)]
pub struct OpList {
    /// Operation definitions in registration order.
    #[prost(message, repeated, tag = "1")]
    pub op: Vec<OpDef>,
}

/// Signature of a single operation.
#[derive(Clone, PartialEq, Message)]
pub struct OpDef {
    /// Operation type name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Input arguments in declaration order.
    #[prost(message, repeated, tag = "2")]
    pub input_arg: Vec<ArgDef>,
    /// Output arguments in declaration order.
    #[prost(message, repeated, tag = "3")]
    pub output_arg: Vec<ArgDef>,
    /// Attributes in declaration order.
    #[prost(message, repeated, tag = "4")]
    pub attr: Vec<AttrDef>,
    /// One-line summary.
    #[prost(string, tag = "5")]
    pub summary: String,
    /// Longer description.
    #[prost(string, tag = "6")]
    pub description: String,
}

impl OpDef {
    /// Creates an operation definition with no arguments or attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an input argument.
    #[must_use]
    pub fn with_input(mut self, arg: ArgDef) -> Self {
        self.input_arg.push(arg);
        self
    }

    /// Adds an output argument.
    #[must_use]
    pub fn with_output(mut self, arg: ArgDef) -> Self {
        self.output_arg.push(arg);
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attr(mut self, attr: AttrDef) -> Self {
        self.attr.push(attr);
        self
    }

    /// Sets the summary line.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Returns true if the operation is internal to the runtime.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&AttrDef> {
        self.attr.iter().find(|a| a.name == name)
    }
}

/// Input or output argument of an operation.
#[derive(Clone, PartialEq, Message)]
pub struct ArgDef {
    /// Argument name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Human readable description.
    #[prost(string, tag = "2")]
    pub description: String,
    /// Fixed element type, when not given by an attribute.
    #[prost(int32, tag = "3")]
    pub r#type: i32,
    /// Attribute fixing the element type.
    #[prost(string, tag = "4")]
    pub type_attr: String,
    /// Attribute giving the repetition count.
    #[prost(string, tag = "5")]
    pub number_attr: String,
    /// Attribute fixing a list of element types.
    #[prost(string, tag = "6")]
    pub type_list_attr: String,
    /// Whether the argument is a reference.
    #[prost(bool, tag = "16")]
    pub is_ref: bool,
}

impl ArgDef {
    /// Creates an argument with no cross-references.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the element type attribute.
    #[must_use]
    pub fn with_type_attr(mut self, attr: impl Into<String>) -> Self {
        self.type_attr = attr.into();
        self
    }

    /// Sets the repetition count attribute.
    #[must_use]
    pub fn with_number_attr(mut self, attr: impl Into<String>) -> Self {
        self.number_attr = attr.into();
        self
    }

    /// Sets the element type list attribute.
    #[must_use]
    pub fn with_type_list_attr(mut self, attr: impl Into<String>) -> Self {
        self.type_list_attr = attr.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the attribute names this argument references.
    pub fn referenced_attrs(&self) -> impl Iterator<Item = &str> {
        [
            self.type_attr.as_str(),
            self.type_list_attr.as_str(),
            self.number_attr.as_str(),
        ]
        .into_iter()
        .filter(|name| !name.is_empty())
    }
}

/// Attribute definition of an operation.
#[derive(Clone, PartialEq, Message)]
pub struct AttrDef {
    /// Attribute name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Type tag, e.g. `int` or `list(shape)`.
    #[prost(string, tag = "2")]
    pub r#type: String,
    /// Default value; absent for required attributes.
    #[prost(message, optional, tag = "3")]
    pub default_value: Option<AttrValue>,
    /// Human readable description.
    #[prost(string, tag = "4")]
    pub description: String,
}

impl AttrDef {
    /// Creates a required attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: type_tag.into(),
            ..Self::default()
        }
    }

    /// Sets the default value, making the attribute optional.
    #[must_use]
    pub fn with_default(mut self, value: AttrValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Returns true if the attribute has no default value.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default_value.is_none()
    }
}

/// Attribute value, used for defaults.
#[derive(Clone, PartialEq, Message)]
pub struct AttrValue {
    /// The value, if its kind is one the generator understands.
    #[prost(oneof = "attr_value::Value", tags = "1, 2, 3, 4, 5, 6")]
    pub value: Option<attr_value::Value>,
}

/// Nested types of [`AttrValue`].
pub mod attr_value {
    /// Attribute value variants.
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Value {
        /// List value.
        #[prost(message, tag = "1")]
        List(super::ListValue),
        /// String value.
        #[prost(bytes = "vec", tag = "2")]
        S(Vec<u8>),
        /// Integer value.
        #[prost(int64, tag = "3")]
        I(i64),
        /// Float value.
        #[prost(float, tag = "4")]
        F(f32),
        /// Boolean value.
        #[prost(bool, tag = "5")]
        B(bool),
        /// Element type value.
        #[prost(int32, tag = "6")]
        Type(i32),
    }
}

/// List attribute value.
#[derive(Clone, PartialEq, Message)]
pub struct ListValue {
    /// String elements.
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub s: Vec<Vec<u8>>,
    /// Integer elements.
    #[prost(int64, repeated, tag = "3")]
    pub i: Vec<i64>,
    /// Float elements.
    #[prost(float, repeated, tag = "4")]
    pub f: Vec<f32>,
    /// Boolean elements.
    #[prost(bool, repeated, tag = "5")]
    pub b: Vec<bool>,
    /// Element type elements.
    #[prost(int32, repeated, tag = "6")]
    pub r#type: Vec<i32>,
}

impl AttrValue {
    /// Creates an integer value.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self {
            value: Some(attr_value::Value::I(value)),
        }
    }

    /// Creates a float value.
    #[must_use]
    pub fn float(value: f32) -> Self {
        Self {
            value: Some(attr_value::Value::F(value)),
        }
    }

    /// Creates a boolean value.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self {
            value: Some(attr_value::Value::B(value)),
        }
    }

    /// Creates a string value.
    #[must_use]
    pub fn string(value: &str) -> Self {
        Self {
            value: Some(attr_value::Value::S(value.as_bytes().to_vec())),
        }
    }

    /// Creates an element type value.
    #[must_use]
    pub fn data_type(value: i32) -> Self {
        Self {
            value: Some(attr_value::Value::Type(value)),
        }
    }

    /// Renders the value for documentation.
    ///
    /// Returns `None` for kinds without a readable literal form (element
    /// types, shapes, tensors, functions) and for empty lists of unknown kind.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        use attr_value::Value;

        match self.value.as_ref()? {
            Value::S(bytes) => Some(format!("{:?}", String::from_utf8_lossy(bytes))),
            Value::I(i) => Some(i.to_string()),
            Value::F(f) => Some(format!("{f:?}")),
            Value::B(b) => Some(b.to_string()),
            Value::Type(_) => None,
            Value::List(list) => list.render(),
        }
    }
}

impl ListValue {
    fn render(&self) -> Option<String> {
        let items: Vec<String> = if !self.i.is_empty() {
            self.i.iter().map(ToString::to_string).collect()
        } else if !self.f.is_empty() {
            self.f.iter().map(|f| format!("{f:?}")).collect()
        } else if !self.b.is_empty() {
            self.b.iter().map(ToString::to_string).collect()
        } else if !self.s.is_empty() {
            self.s
                .iter()
                .map(|s| format!("{:?}", String::from_utf8_lossy(s)))
                .collect()
        } else if !self.r#type.is_empty() {
            return None;
        } else {
            Vec::new()
        };

        Some(format!("[{}]", items.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_list_decode() {
        let list = OpList {
            op: vec![
                OpDef::new("Add")
                    .with_input(ArgDef::new("x").with_type_attr("T"))
                    .with_output(ArgDef::new("z").with_type_attr("T"))
                    .with_attr(AttrDef::new("T", "type")),
            ],
        };

        let bytes = list.encode_to_vec();
        let decoded = OpList::decode(bytes.as_slice()).expect("Failed to decode");

        assert_eq!(decoded.op.len(), 1);
        assert_eq!(decoded.op[0].name, "Add");
        assert_eq!(decoded.op[0].input_arg[0].type_attr, "T");
        assert!(decoded.op[0].attr[0].is_required());
    }

    #[test]
    fn test_default_value_presence_survives_decode() {
        let op = OpDef::new("Cast")
            .with_attr(AttrDef::new("Truncate", "bool").with_default(AttrValue::bool(false)));
        let decoded = OpDef::decode(op.encode_to_vec().as_slice()).expect("Failed to decode");

        let attr = decoded.get_attr("Truncate").expect("attr");
        assert!(!attr.is_required());
        assert_eq!(
            attr.default_value
                .as_ref()
                .and_then(AttrValue::render)
                .as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_empty_default_value_is_still_present() {
        // A default whose kind the decoder does not model (e.g. a shape)
        // arrives as an empty message and must still mark the attr optional.
        let attr = AttrDef::new("shape", "shape").with_default(AttrValue::default());
        let decoded = AttrDef::decode(attr.encode_to_vec().as_slice()).expect("Failed to decode");

        assert!(!decoded.is_required());
        assert_eq!(
            decoded.default_value.as_ref().and_then(AttrValue::render),
            None
        );
    }

    #[test]
    fn test_render_values() {
        assert_eq!(AttrValue::int(3).render().as_deref(), Some("3"));
        assert_eq!(AttrValue::float(0.5).render().as_deref(), Some("0.5"));
        assert_eq!(AttrValue::string("NHWC").render().as_deref(), Some("\"NHWC\""));
        assert_eq!(AttrValue::data_type(1).render(), None);

        let list = AttrValue {
            value: Some(attr_value::Value::List(ListValue {
                i: vec![1, 2, 2, 1],
                ..ListValue::default()
            })),
        };
        assert_eq!(list.render().as_deref(), Some("[1, 2, 2, 1]"));

        let empty = AttrValue {
            value: Some(attr_value::Value::List(ListValue::default())),
        };
        assert_eq!(empty.render().as_deref(), Some("[]"));
    }

    #[test]
    fn test_referenced_attrs() {
        let arg = ArgDef::new("values").with_type_attr("T").with_number_attr("N");
        let refs: Vec<&str> = arg.referenced_attrs().collect();
        assert_eq!(refs, vec!["T", "N"]);

        assert_eq!(ArgDef::new("x").referenced_attrs().count(), 0);
    }

    #[test]
    fn test_is_internal() {
        assert!(OpDef::new("_Send").is_internal());
        assert!(!OpDef::new("Send").is_internal());
    }
}
