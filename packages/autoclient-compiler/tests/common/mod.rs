//! Common test utilities for autoclient-compiler
//!
//! Fixtures are TypeScript source generators; helpers run the compiler over
//! in-memory programs.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use std::path::PathBuf;

use autoclient_compiler::features::parsing::TypeScriptParser;
use autoclient_compiler::features::type_system::{Env, TypeNode, TypeTable};
use autoclient_compiler::features::validator_synthesis::{SynthesisOptions, Synthesizer};
use autoclient_compiler::{Program, RewrittenFile, TransformConfig, ValidatorExpr};

/// Rewrite one source with the default configuration
pub fn rewrite(source: &str) -> RewrittenFile {
    autoclient_compiler::transform_source(source).expect("transform failed")
}

/// Rewrite several in-memory files as one program
pub fn rewrite_program(files: &[(&str, &str)], config: TransformConfig) -> Vec<RewrittenFile> {
    let mut program = Program::new(config).expect("invalid config");
    for (path, source) in files {
        program.add_source(*path, *source).expect("parse failed");
    }
    program.transform().expect("transform failed")
}

/// Synthesize the validator for declared type `name` in `source`
pub fn synthesize(source: &str, name: &str) -> Option<ValidatorExpr> {
    let tree = TypeScriptParser::typescript()
        .parse(source, "fixture.ts")
        .expect("parse failed");
    let mut table = TypeTable::new();
    table.collect(&tree);
    let ty = table.alloc(TypeNode::Reference {
        name: name.to_string(),
        args: vec![],
    });
    Synthesizer::new(&table, SynthesisOptions::default())
        .synthesize(ty, &Env::root())
        .expect("synthesis failed")
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}
