//! # opgen Catalog
//!
//! Operation catalog decoding and documentation handling.
//!
//! This crate provides:
//! - Operation signature messages decoded from a serialized `OpList`
//! - Documentation entries and the ApiDef text-format parser
//! - Catalog validation
//! - Attribute classification for code generation

pub mod api_def;
pub mod catalog;
pub mod error;
pub mod ir;
pub mod op_def;
pub mod parser;
pub mod validation;

pub use api_def::{ApiDef, ArgDoc, AttrDoc};
pub use catalog::{ApiDefMap, OpCatalog};
pub use error::{CatalogError, ParseError};
pub use ir::{OpIr, is_list_arg};
pub use op_def::{ArgDef, AttrDef, AttrValue, ListValue, OpDef, OpList};
pub use parser::parse_api_defs;
