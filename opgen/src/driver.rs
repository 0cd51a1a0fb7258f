//! End-to-end generator run.
//!
//! A run decodes the catalog, merges documentation overrides, generates the
//! whole file in memory and only then replaces the output. A failed run
//! leaves any previous output untouched.

use crate::config::GeneratorConfig;
use crate::error::RunError;
use opgen_catalog::{ApiDefMap, OpCatalog};
use opgen_codegen::{DEFAULT_HEADER, Generator, SkippedOp};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// File that was written.
    pub output: PathBuf,
    /// Emitted operations, in output order.
    pub emitted: Vec<String>,
    /// Operations left out.
    pub skipped: Vec<SkippedOp>,
    /// Number of documentation files merged.
    pub api_def_files: usize,
}

/// Runs the generator.
///
/// # Arguments
/// * `config` - Input, output and binding settings
///
/// # Returns
/// A summary of emitted and skipped operations.
///
/// # Errors
/// Returns `RunError` if the environment is unsupported, an input cannot be
/// read or parsed, emission fails, or the output cannot be written.
pub fn run(config: &GeneratorConfig) -> Result<RunSummary, RunError> {
    check_environment()?;

    let bytes = fs::read(&config.op_list).map_err(|e| RunError::read(&config.op_list, e))?;
    let catalog = OpCatalog::decode(&bytes).map_err(|source| RunError::Catalog {
        path: config.op_list.clone(),
        source,
    })?;
    tracing::info!(
        "Loaded {} operations from {}",
        catalog.len(),
        config.op_list.display()
    );

    let mut docs = ApiDefMap::from_catalog(&catalog);
    let api_def_files = load_api_defs(&mut docs, &config.effective_api_def_dirs())?;

    let header = match &config.license {
        Some(path) => fs::read_to_string(path).map_err(|e| RunError::read(path, e))?,
        None => DEFAULT_HEADER.to_string(),
    };

    let binding = config.binding.binding();
    let source = Generator::new(&catalog, &docs, binding.as_ref())
        .with_header(&header)
        .generate()?;

    write_atomic(&config.output, &source.code)?;
    tracing::info!(
        "Wrote {} wrappers to {} ({} skipped)",
        source.emitted.len(),
        config.output.display(),
        source.skipped.len()
    );

    Ok(RunSummary {
        output: config.output.clone(),
        emitted: source.emitted,
        skipped: source.skipped,
        api_def_files,
    })
}

/// Checks that the host uses 64-bit pointers, as the runtime requires.
///
/// # Errors
/// Returns `RunError::Environment` on other pointer widths.
pub fn check_environment() -> Result<(), RunError> {
    let width = std::mem::size_of::<usize>() * 8;
    if width != 64 {
        return Err(RunError::environment(format!(
            "the operation runtime requires a 64-bit host, found {width}-bit pointers"
        )));
    }
    Ok(())
}

/// Merges every file of each directory into `docs`.
///
/// Directories are applied in order; files within a directory in file name
/// order. Later entries replace earlier ones for the same operation. A
/// missing directory is skipped with a warning.
///
/// # Returns
/// The number of files merged.
///
/// # Errors
/// Returns `RunError` if a file cannot be read or parsed.
pub fn load_api_defs(docs: &mut ApiDefMap, dirs: &[&Path]) -> Result<usize, RunError> {
    let mut files = 0;

    for dir in dirs {
        if !dir.is_dir() {
            tracing::warn!("Documentation directory {} not found, skipping", dir.display());
            continue;
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| RunError::read(dir, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let text = fs::read_to_string(path).map_err(|e| RunError::read(path, e))?;
            let merged = docs.put(&text).map_err(|source| RunError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!("Merged {} entries from {}", merged, path.display());
            files += 1;
        }
    }

    Ok(files)
}

/// Writes `contents` to a temporary file beside `path`, then renames it.
fn write_atomic(path: &Path, contents: &str) -> Result<(), RunError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| RunError::write(path, e))?;

    let mut file = NamedTempFile::new_in(parent).map_err(|e| RunError::write(path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| RunError::write(path, e))?;
    file.persist(path)
        .map_err(|e| RunError::write(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opgen_catalog::{ArgDef, AttrDef, AttrValue, OpDef, OpList};
    use opgen_codegen::{BindingKind, SkipReason};
    use prost::Message;
    use tempfile::TempDir;

    fn create_op_list() -> OpList {
        OpList {
            op: vec![
                OpDef::new("Sub")
                    .with_input(ArgDef::new("x").with_type_attr("T"))
                    .with_input(ArgDef::new("y").with_type_attr("T"))
                    .with_output(ArgDef::new("z").with_type_attr("T"))
                    .with_attr(AttrDef::new("T", "type")),
                OpDef::new("Add")
                    .with_input(ArgDef::new("x").with_type_attr("T"))
                    .with_input(ArgDef::new("y").with_type_attr("T"))
                    .with_output(ArgDef::new("z").with_type_attr("T"))
                    .with_attr(AttrDef::new("T", "type")),
                OpDef::new("Unique")
                    .with_input(ArgDef::new("x").with_type_attr("T"))
                    .with_output(ArgDef::new("y").with_type_attr("T"))
                    .with_output(ArgDef::new("idx").with_type_attr("out_idx"))
                    .with_attr(AttrDef::new("T", "type"))
                    .with_attr(
                        AttrDef::new("out_idx", "type").with_default(AttrValue::data_type(3)),
                    ),
                OpDef::new("MapDataset")
                    .with_attr(AttrDef::new("f", "func"))
                    .with_summary("Maps a function over a dataset."),
                OpDef::new("_Send").with_summary("Sends a tensor."),
            ],
        }
    }

    const BASE_DOCS: &str = r#"
op {
  graph_op_name: "Add"
  summary: "Returns x + y element-wise."
}
op {
  graph_op_name: "Sub"
  summary: "Returns x - y element-wise."
}
"#;

    const OVERRIDE_DOCS: &str = r#"
op {
  graph_op_name: "Unique"
  summary: "Finds unique elements in a 1-D tensor."
  out_arg { name: "idx" description: "A 1-D tensor of indices." }
}
"#;

    struct Fixture {
        dir: TempDir,
        config: GeneratorConfig,
    }

    fn create_fixture() -> Fixture {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path();

        fs::write(root.join("ops.pb"), create_op_list().encode_to_vec()).expect("write ops");
        fs::create_dir_all(root.join("base")).expect("mkdir base");
        fs::create_dir_all(root.join("overrides")).expect("mkdir overrides");
        fs::write(root.join("base/api_def_Add.pbtxt"), BASE_DOCS).expect("write base");
        fs::write(root.join("overrides/api_def_Unique.pbtxt"), OVERRIDE_DOCS)
            .expect("write override");

        let config = GeneratorConfig::new()
            .with_op_list(root.join("ops.pb"))
            .with_output(root.join("out/generated.rs"))
            .with_api_def_dir(root.join("base"))
            .with_api_def_dir(root.join("overrides"));

        Fixture { dir, config }
    }

    #[test]
    fn test_run_writes_output() {
        let fixture = create_fixture();
        let summary = run(&fixture.config).expect("Failed to run");

        assert_eq!(summary.emitted, vec!["Add", "Sub", "Unique"]);
        assert_eq!(summary.api_def_files, 2);

        let skipped: Vec<(&str, &SkipReason)> = summary
            .skipped
            .iter()
            .map(|s| (s.name.as_str(), &s.reason))
            .collect();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].0, "MapDataset");
        assert!(matches!(skipped[0].1, SkipReason::UnmappedAttr { .. }));
        assert_eq!(skipped[1], ("_Send", &SkipReason::Internal));

        let code = fs::read_to_string(&summary.output).expect("Failed to read output");
        assert!(code.contains("/// Returns x + y element-wise."));
        assert!(code.contains("* `idx_` - A 1-D tensor of indices."));
        assert!(!code.contains("map_dataset"));
    }

    #[test]
    fn test_run_is_deterministic() {
        let fixture = create_fixture();
        run(&fixture.config).expect("Failed to run");
        let first = fs::read(&fixture.config.output).expect("read first");
        run(&fixture.config).expect("Failed to run");
        let second = fs::read(&fixture.config.output).expect("read second");

        assert_eq!(first, second);
    }

    #[test]
    fn test_later_directories_override_earlier() {
        let fixture = create_fixture();
        fs::write(
            fixture.dir.path().join("overrides/api_def_Add.pbtxt"),
            "op { graph_op_name: \"Add\" summary: \"Adds two tensors.\" }",
        )
        .expect("write override");

        run(&fixture.config).expect("Failed to run");
        let code = fs::read_to_string(&fixture.config.output).expect("read output");

        assert!(code.contains("/// Adds two tensors."));
        assert!(!code.contains("Returns x + y"));
    }

    #[test]
    fn test_module_binding_and_license() {
        let fixture = create_fixture();
        let license = fixture.dir.path().join("HEADER");
        fs::write(&license, "Example license text.").expect("write license");
        let config = fixture
            .config
            .clone()
            .with_binding(BindingKind::Module)
            .with_license(&license);

        run(&config).expect("Failed to run");
        let code = fs::read_to_string(&config.output).expect("read output");

        assert!(code.starts_with("// Example license text.\n"));
        assert!(code.contains("pub struct UniqueOutputs {"));
    }

    #[test]
    fn test_parse_error_leaves_output_untouched() {
        let fixture = create_fixture();
        let output = &fixture.config.output;
        fs::create_dir_all(output.parent().expect("parent")).expect("mkdir out");
        fs::write(output, "previous").expect("write previous");
        fs::write(
            fixture.dir.path().join("overrides/broken.pbtxt"),
            "op { graph_op_name: \"Add\"",
        )
        .expect("write broken");

        let err = run(&fixture.config).expect_err("run should fail");

        assert!(matches!(err, RunError::Parse { .. }));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(fs::read_to_string(output).expect("read"), "previous");
    }

    #[test]
    fn test_missing_op_list() {
        let fixture = create_fixture();
        let config = fixture
            .config
            .clone()
            .with_op_list(fixture.dir.path().join("missing.pb"));

        let err = run(&config).expect_err("run should fail");
        assert_eq!(err.exit_code(), 3);
        assert!(!config.output.exists());
    }

    #[test]
    fn test_corrupt_op_list() {
        let fixture = create_fixture();
        fs::write(&fixture.config.op_list, [0xffu8; 3]).expect("write corrupt");

        let err = run(&fixture.config).expect_err("run should fail");
        assert!(matches!(err, RunError::Catalog { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_directory_is_skipped() {
        let mut docs = ApiDefMap::new();
        let files = load_api_defs(&mut docs, &[Path::new("/nonexistent/opgen/api_def")])
            .expect("Failed to load");

        assert_eq!(files, 0);
        assert!(docs.is_empty());
    }

    #[test]
    fn test_files_load_in_name_order() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(
            dir.path().join("b.pbtxt"),
            "op { graph_op_name: \"Add\" summary: \"second\" }",
        )
        .expect("write b");
        fs::write(
            dir.path().join("a.pbtxt"),
            "op { graph_op_name: \"Add\" summary: \"first\" }",
        )
        .expect("write a");
        fs::create_dir(dir.path().join("nested")).expect("mkdir nested");

        let mut docs = ApiDefMap::new();
        let files = load_api_defs(&mut docs, &[dir.path()]).expect("Failed to load");

        assert_eq!(files, 2);
        assert_eq!(docs.get("Add").map(|d| d.summary.as_str()), Some("second"));
    }

    #[test]
    fn test_environment_check_passes_on_64_bit() {
        if cfg!(target_pointer_width = "64") {
            assert!(check_environment().is_ok());
        } else {
            assert_eq!(check_environment().map_err(|e| e.exit_code()), Err(4));
        }
    }
}
