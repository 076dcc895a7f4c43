//! autoclient CLI
//!
//! # Usage
//!
//! ```bash
//! # Rewrite a source tree into out/
//! autoclient transform src/ --out-dir out/ --report report.json
//!
//! # Print the validator for one declared type
//! autoclient validator src/types.ts --type User --namespace V
//!
//! # Fail when any call site cannot be rewritten
//! autoclient check src/
//! ```

use std::path::{Path, PathBuf};

use autoclient_compiler::{Program, RewrittenFile, TransformConfig, TransformReport};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autoclient")]
#[command(about = "Expand typed API entry points into descriptors and validators", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite input files
    Transform {
        /// Files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (stdout when omitted)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Write a JSON diagnostics report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the validator synthesized for a declared type
    Validator {
        /// Files or directories declaring the type
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Declared type name
        #[arg(short, long = "type")]
        type_name: String,

        /// Validator DSL namespace expression
        #[arg(short, long, default_value = "V")]
        namespace: String,
    },

    /// Run the pass without writing output; fails on any diagnostic
    Check {
        /// Files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => TransformConfig::from_yaml(path)?,
        None => TransformConfig::default(),
    };

    match cli.command {
        Commands::Transform {
            inputs,
            out_dir,
            report,
        } => run_transform(config, &inputs, out_dir.as_deref(), report.as_deref())?,
        Commands::Validator {
            inputs,
            type_name,
            namespace,
        } => run_validator(config, &inputs, &type_name, &namespace)?,
        Commands::Check { inputs } => run_check(config, &inputs)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(config: TransformConfig, inputs: &[PathBuf]) -> Result<Program, Box<dyn std::error::Error>> {
    let mut program = Program::new(config)?;
    program.load_paths(inputs)?;
    Ok(program)
}

fn print_diagnostics(files: &[RewrittenFile]) {
    for diagnostic in files.iter().flat_map(|f| f.diagnostics.iter()) {
        eprintln!("{}", diagnostic);
    }
}

fn run_transform(
    config: TransformConfig,
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    report: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut program = load(config, inputs)?;
    let files = program.transform()?;
    print_diagnostics(&files);

    match out_dir {
        Some(dir) => {
            for file in &files {
                let target = dir.join(&file.relative);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, &file.text)?;
                info!(from = %file.path, to = %target.display(), "wrote file");
            }
        }
        None if files.len() == 1 => print!("{}", files[0].text),
        None => {
            for file in &files {
                println!("// ---- {}", file.path);
                print!("{}", file.text);
            }
        }
    }

    if let Some(path) = report {
        let report = TransformReport::from_files(&files);
        std::fs::write(path, report.to_json()?)?;
    }
    Ok(())
}

fn run_validator(
    config: TransformConfig,
    inputs: &[PathBuf],
    type_name: &str,
    namespace: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut program = load(config, inputs)?;
    match program.synthesize_named(type_name, namespace)? {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => Err(format!("no validator could be produced for `{}`", type_name).into()),
    }
}

fn run_check(config: TransformConfig, inputs: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let mut program = load(config, inputs)?;
    let files = program.transform()?;
    print_diagnostics(&files);

    let report = TransformReport::from_files(&files);
    eprintln!(
        "checked {} file(s): {} call(s) rewritten, {} diagnostic(s)",
        files.len(),
        report.total_rewritten,
        report.diagnostic_count()
    );
    if report.diagnostic_count() > 0 {
        return Err(format!("{} call site(s) could not be rewritten", report.diagnostic_count()).into());
    }
    Ok(())
}
