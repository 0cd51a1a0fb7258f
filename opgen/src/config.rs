//! Generator configuration.

use opgen_codegen::BindingKind;
use std::path::{Path, PathBuf};

/// Default location of the serialized operation list.
pub const DEFAULT_OP_LIST: &str = "ops.pb";

/// Default location of the generated source file.
pub const DEFAULT_OUTPUT: &str = "src/ops/generated.rs";

/// Documentation directory used when none is configured.
pub const DEFAULT_API_DEF_DIR: &str = "tensorflow/core/api_def/base_api";

/// Configuration for one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Serialized `OpList` file.
    pub op_list: PathBuf,
    /// Destination of the generated source.
    pub output: PathBuf,
    /// Documentation override directories, applied in order.
    pub api_def_dirs: Vec<PathBuf>,
    /// Target binding conventions.
    pub binding: BindingKind,
    /// File holding the license header, if not the built-in one.
    pub license: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            op_list: PathBuf::from(DEFAULT_OP_LIST),
            output: PathBuf::from(DEFAULT_OUTPUT),
            api_def_dirs: Vec::new(),
            binding: BindingKind::default(),
            license: None,
        }
    }

    /// Sets the operation list file.
    #[must_use]
    pub fn with_op_list(mut self, path: impl Into<PathBuf>) -> Self {
        self.op_list = path.into();
        self
    }

    /// Sets the output file.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Appends a documentation override directory.
    #[must_use]
    pub fn with_api_def_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.api_def_dirs.push(dir.into());
        self
    }

    /// Replaces the documentation override directories.
    #[must_use]
    pub fn with_api_def_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.api_def_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the binding conventions.
    #[must_use]
    pub fn with_binding(mut self, binding: BindingKind) -> Self {
        self.binding = binding;
        self
    }

    /// Sets the license header file.
    #[must_use]
    pub fn with_license(mut self, path: impl Into<PathBuf>) -> Self {
        self.license = Some(path.into());
        self
    }

    /// Directories to load, falling back to [`DEFAULT_API_DEF_DIR`].
    #[must_use]
    pub fn effective_api_def_dirs(&self) -> Vec<&Path> {
        if self.api_def_dirs.is_empty() {
            vec![Path::new(DEFAULT_API_DEF_DIR)]
        } else {
            self.api_def_dirs.iter().map(PathBuf::as_path).collect()
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
