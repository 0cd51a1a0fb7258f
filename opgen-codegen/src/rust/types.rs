//! Attribute type mapping.
//!
//! Maps the runtime's attribute type tags (`int`, `list(shape)`, ...) to Rust
//! types. Unknown tags map to `None`, which callers treat as "skip this
//! operation" rather than an error.

use std::fmt;

/// Kind of a scalar attribute, or of the elements of a list attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `bool`
    Bool,
    /// `type`
    Type,
    /// `shape`
    Shape,
    /// `tensor`
    Tensor,
    /// `string`
    String,
}

impl AttrKind {
    /// Parses a scalar type tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "type" => Some(Self::Type),
            "shape" => Some(Self::Shape),
            "tensor" => Some(Self::Tensor),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// Owned Rust type name.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::Int => "i64",
            Self::Float => "f32",
            Self::Bool => "bool",
            Self::Type => "DataType",
            Self::Shape => "Shape",
            Self::Tensor => "Tensor",
            Self::String => "String",
        }
    }

    /// Type tag as written in the catalog.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Type => "type",
            Self::Shape => "shape",
            Self::Tensor => "tensor",
            Self::String => "string",
        }
    }

    /// Returns true for kinds passed by reference.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Shape | Self::Tensor | Self::String)
    }
}

/// Result of mapping an attribute type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappedType {
    /// Scalar or element kind.
    pub kind: AttrKind,
    /// Whether the tag was wrapped in `list(...)`.
    pub is_list: bool,
}

impl MappedType {
    /// Owned Rust type, e.g. `i64` or `Vec<Shape>`.
    #[must_use]
    pub fn target_type(&self) -> String {
        if self.is_list {
            format!("Vec<{}>", self.kind.rust_type())
        } else {
            self.kind.rust_type().to_string()
        }
    }

    /// Parameter type: borrowed for reference-like types.
    ///
    /// `list(int)` becomes `&[i64]`, `string` becomes `&str`, `shape`
    /// becomes `&Shape`; value-like types are passed by value.
    #[must_use]
    pub fn param_type(&self) -> String {
        match (self.is_list, self.kind) {
            (true, AttrKind::String) => "&[&str]".to_string(),
            (true, kind) => format!("&[{}]", kind.rust_type()),
            (false, AttrKind::String) => "&str".to_string(),
            (false, kind) if kind.is_reference() => format!("&{}", kind.rust_type()),
            (false, kind) => kind.rust_type().to_string(),
        }
    }

    /// Returns true for list-wrapped, tensor, string and shape types.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.is_list || self.kind.is_reference()
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_list {
            write!(f, "list({})", self.kind.tag())
        } else {
            f.write_str(self.kind.tag())
        }
    }
}

/// Maps an attribute type tag to a Rust type.
///
/// # Returns
/// `None` for tags outside the supported table (`func`, `list(func)`, ...).
#[must_use]
pub fn map_type(tag: &str) -> Option<MappedType> {
    let (inner, is_list) = match tag.strip_prefix("list(").and_then(|t| t.strip_suffix(')')) {
        Some(inner) => (inner, true),
        None => (tag, false),
    };

    AttrKind::from_tag(inner).map(|kind| MappedType { kind, is_list })
}

/// Returns true if the tag maps to a reference-like parameter.
///
/// Unknown tags are classified as values.
#[must_use]
pub fn is_reference_type(tag: &str) -> bool {
    tag.starts_with("list(") || map_type(tag).is_some_and(|t| t.is_reference())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_scalar_types() {
        let cases = [
            ("int", "i64"),
            ("float", "f32"),
            ("bool", "bool"),
            ("type", "DataType"),
            ("shape", "Shape"),
            ("tensor", "Tensor"),
            ("string", "String"),
        ];
        for (tag, expected) in cases {
            let mapped = map_type(tag).expect("mapped");
            assert!(!mapped.is_list, "{tag}");
            assert_eq!(mapped.target_type(), expected);
        }
    }

    #[test]
    fn test_map_list_types() {
        let mapped = map_type("list(int)").expect("mapped");
        assert!(mapped.is_list);
        assert_eq!(mapped.target_type(), "Vec<i64>");
        assert_eq!(mapped.param_type(), "&[i64]");
        assert_eq!(mapped.to_string(), "list(int)");

        assert_eq!(
            map_type("list(string)").map(|t| t.param_type()).as_deref(),
            Some("&[&str]")
        );
    }

    #[test]
    fn test_map_unknown_types() {
        assert_eq!(map_type("func"), None);
        assert_eq!(map_type("list(func)"), None);
        assert_eq!(map_type("funcattr"), None);
        assert_eq!(map_type("list(int"), None);
        assert_eq!(map_type(""), None);
    }

    #[test]
    fn test_param_types() {
        assert_eq!(map_type("int").map(|t| t.param_type()).as_deref(), Some("i64"));
        assert_eq!(map_type("string").map(|t| t.param_type()).as_deref(), Some("&str"));
        assert_eq!(map_type("shape").map(|t| t.param_type()).as_deref(), Some("&Shape"));
        assert_eq!(map_type("tensor").map(|t| t.param_type()).as_deref(), Some("&Tensor"));
        assert_eq!(map_type("type").map(|t| t.param_type()).as_deref(), Some("DataType"));
    }

    #[test]
    fn test_reference_classification() {
        assert!(is_reference_type("list(bool)"));
        assert!(is_reference_type("tensor"));
        assert!(is_reference_type("string"));
        assert!(is_reference_type("shape"));
        assert!(!is_reference_type("int"));
        assert!(!is_reference_type("float"));
        assert!(!is_reference_type("bool"));
        assert!(!is_reference_type("type"));
        assert!(!is_reference_type("func"));
    }
}
