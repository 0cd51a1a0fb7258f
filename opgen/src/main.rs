//! Command line entry point.

use clap::{ArgAction, Parser, ValueEnum};
use opgen::config::{DEFAULT_OP_LIST, DEFAULT_OUTPUT};
use opgen::{GeneratorConfig, run};
use opgen_codegen::BindingKind;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(ValueEnum, Clone, Copy, Debug)]
#[value(rename_all = "lower")]
enum BindingArg {
    /// Methods on `impl Graph`
    Method,
    /// Free functions in `pub mod ops`
    Module,
}

impl From<BindingArg> for BindingKind {
    fn from(arg: BindingArg) -> Self {
        match arg {
            BindingArg::Method => Self::Method,
            BindingArg::Module => Self::Module,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "opgen",
    version,
    about = "Generates typed Rust wrappers from a graph operation catalog"
)]
struct Cli {
    /// ApiDef documentation directories, applied in order
    #[arg(value_name = "API_DEF_DIR")]
    api_def_dirs: Vec<PathBuf>,

    /// Serialized OpList file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OP_LIST)]
    op_list: PathBuf,

    /// Generated source file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Binding conventions of the generated code
    #[arg(long, value_enum, default_value_t = BindingArg::Method)]
    binding: BindingArg,

    /// File with the license header text
    #[arg(long, value_name = "FILE")]
    license: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> GeneratorConfig {
        let config = GeneratorConfig::new()
            .with_op_list(self.op_list)
            .with_output(self.output)
            .with_api_def_dirs(self.api_def_dirs)
            .with_binding(self.binding.into());
        match self.license {
            Some(path) => config.with_license(path),
            None => config,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "opgen={level},opgen_catalog={level},opgen_codegen={level}"
        ))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli.into_config()) {
        Ok(summary) => {
            tracing::debug!(
                "Skipped: {}",
                summary
                    .skipped
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["opgen"]).expect("Failed to parse");
        let config = cli.into_config();

        assert_eq!(config.op_list, PathBuf::from("ops.pb"));
        assert_eq!(config.output, PathBuf::from("src/ops/generated.rs"));
        assert!(config.api_def_dirs.is_empty());
        assert_eq!(config.binding, BindingKind::Method);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "opgen",
            "--op-list",
            "catalog.pb",
            "--output",
            "out.rs",
            "--binding",
            "module",
            "--license",
            "HEADER",
            "-vv",
            "base",
            "overrides",
        ])
        .expect("Failed to parse");
        assert_eq!(cli.verbose, 2);

        let config = cli.into_config();
        assert_eq!(config.op_list, PathBuf::from("catalog.pb"));
        assert_eq!(config.binding, BindingKind::Module);
        assert_eq!(config.license, Some(PathBuf::from("HEADER")));
        assert_eq!(
            config.api_def_dirs,
            vec![PathBuf::from("base"), PathBuf::from("overrides")]
        );
    }

    #[test]
    fn test_unknown_binding_is_rejected() {
        assert!(Cli::try_parse_from(["opgen", "--binding", "class"]).is_err());
    }
}
