//! Prelude module for convenient imports.
//!
//! ```ignore
//! use opgen::prelude::*;
//! ```

// Catalog types
pub use opgen_catalog::{ApiDef, ApiDefMap, ArgDef, AttrDef, AttrValue, OpCatalog, OpDef, OpIr};

// Codegen types
pub use opgen_codegen::{
    Binding, BindingKind, CodeWriter, GeneratedSource, Generator, MethodBinding, ModuleBinding,
    SkipReason, SkippedOp,
};

// Driver types
pub use crate::config::GeneratorConfig;
pub use crate::driver::{RunSummary, run};
pub use crate::error::RunError;
