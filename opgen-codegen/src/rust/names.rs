//! Identifier generation for wrapper functions and their parameters.

use opgen_catalog::ir::to_snake_case;
use std::collections::HashSet;

/// Names used by generated bodies; parameters must not shadow them.
pub const RESERVED_LOCALS: &[&str] = &[
    "control", "desc", "graph", "idx", "n", "name", "op", "op_name", "status",
];

/// Returns true if `name` parses as a plain (non-keyword) identifier.
#[must_use]
pub fn is_plain_ident(name: &str) -> bool {
    syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Appends `_` to keywords so the result is a valid identifier.
#[must_use]
pub fn escape_keyword(name: &str) -> String {
    if is_plain_ident(name) {
        name.to_string()
    } else {
        format!("{name}_")
    }
}

/// Function name for an operation: `BatchMatMulV2` becomes `batch_mat_mul_v2`.
#[must_use]
pub fn fn_name(op_name: &str) -> String {
    escape_keyword(&to_snake_case(op_name))
}

/// Identifier for an argument or attribute name.
///
/// The name is snake-cased, then suffixed with `_` if it is a keyword or
/// one of [`RESERVED_LOCALS`].
#[must_use]
pub fn param_name(raw: &str) -> String {
    let name = escape_keyword(&to_snake_case(raw));
    if RESERVED_LOCALS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Allocates distinct parameter names within one function.
#[derive(Debug, Default)]
pub struct ParamNames {
    used: HashSet<String>,
}

impl ParamNames {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a name for `raw` not handed out before.
    pub fn allocate(&mut self, raw: &str) -> String {
        let mut name = param_name(raw);
        while self.used.contains(&name) {
            name.push('_');
        }
        self.used.insert(name.clone());
        name
    }
}
