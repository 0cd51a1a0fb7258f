//! # opgen
//!
//! Generates strongly-typed Rust wrappers for computational-graph operations.
//!
//! The generator reads a serialized operation catalog (`OpList`) and
//! ApiDef documentation files, then writes one wrapper function per public
//! operation into a single source file.
//!
//! ## Features
//!
//! - **Deterministic output** - Operations are emitted in byte order of their names
//! - **Typed attributes** - Attribute type tags map to Rust types; optional attributes become `Option<T>`
//! - **Documentation overrides** - ApiDef text files replace catalog documentation
//! - **Atomic writes** - The output is replaced only after a complete, successful run
//!
//! ## Quick Start
//!
//! ```no_run
//! use opgen::prelude::*;
//!
//! let config = GeneratorConfig::new()
//!     .with_op_list("ops.pb")
//!     .with_api_def_dir("tensorflow/core/api_def/base_api")
//!     .with_binding(BindingKind::Module);
//!
//! let summary = run(&config)?;
//! println!("emitted {} wrappers", summary.emitted.len());
//! # Ok::<(), opgen::RunError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`catalog`] - Operation signatures, documentation entries and the ApiDef parser
//! - [`codegen`] - Type mapping, doc rendering, bindings and wrapper emission
//! - [`config`] - Run configuration
//! - [`driver`] - End-to-end runs

pub mod config;
pub mod driver;
pub mod error;
pub mod prelude;

/// Operation catalog decoding and documentation handling.
pub mod catalog {
    pub use opgen_catalog::*;
}

/// Wrapper code generation.
pub mod codegen {
    pub use opgen_codegen::*;
}

pub use config::GeneratorConfig;
pub use driver::{RunSummary, run};
pub use error::RunError;
