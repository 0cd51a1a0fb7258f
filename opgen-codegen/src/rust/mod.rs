//! Rust wrapper generation modules.

pub mod binding;
pub mod docs;
pub mod names;
pub mod ops;
pub mod types;

pub use binding::{Binding, BindingKind, MethodBinding, ModuleBinding, OutputStyle};
pub use docs::{CommentMarkers, render_comment};
pub use ops::OpEmitter;
pub use types::{AttrKind, MappedType, map_type};
