//! Multi-file program

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::TransformConfig;
use crate::errors::{CompileError, Result};
use crate::features::parsing::{ParsedTree, TypeScriptParser};
use crate::features::rewrite::RewriteDriver;
use crate::features::type_system::{Env, TypeNode, TypeTable};
use crate::features::validator_synthesis::{SynthesisOptions, Synthesizer};
use crate::shared::models::Diagnostic;

/// File name used for in-memory sources without a path
const ANONYMOUS_SOURCE: &str = "input.ts";

/// Directories never descended into when walking inputs
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "build", "target"];

struct SourceEntry {
    tree: ParsedTree,
    /// Output location relative to the output directory
    relative: PathBuf,
}

/// Output of rewriting one file
#[derive(Debug, Clone)]
pub struct RewrittenFile {
    pub path: String,
    pub relative: PathBuf,
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    pub rewritten_calls: usize,
    pub elided_imports: usize,
}

impl RewrittenFile {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct Program {
    config: TransformConfig,
    files: Vec<SourceEntry>,
    table: TypeTable,
}

impl Program {
    pub fn new(config: TransformConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            files: Vec::new(),
            table: TypeTable::new(),
        })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Parse `source` and collect its declarations
    pub fn add_source(&mut self, path: impl Into<String>, source: impl Into<String>) -> Result<()> {
        let path = path.into();
        let relative = PathBuf::from(&path);
        self.add_entry(path, relative, source.into())
    }

    fn add_entry(&mut self, path: String, relative: PathBuf, source: String) -> Result<()> {
        let tree = TypeScriptParser::for_path(&path).parse(&source, &path)?;
        let declarations = self.table.collect(&tree);
        debug!(file = %path, declarations, "parsed source");
        self.files.push(SourceEntry { tree, relative });
        Ok(())
    }

    /// Add files and directories; directories are walked for configured
    /// extensions in sorted order. Returns the number of files added.
    pub fn load_paths(&mut self, inputs: &[PathBuf]) -> Result<usize> {
        let before = self.files.len();
        for input in inputs {
            if input.is_dir() {
                for path in self.discover(input)? {
                    let relative = path.strip_prefix(input).unwrap_or(&path).to_path_buf();
                    self.load_file(&path, relative)?;
                }
            } else {
                let relative = input
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| input.clone());
                self.load_file(input, relative)?;
            }
        }
        let added = self.files.len() - before;
        info!(files = added, declarations = self.table.len(), "program loaded");
        Ok(added)
    }

    fn load_file(&mut self, path: &Path, relative: PathBuf) -> Result<()> {
        let source = std::fs::read_to_string(path)?;
        self.add_entry(path.display().to_string(), relative, source)
    }

    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                e.depth() == 0 || !(name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()))
            });
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let accepted = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.config.accepts_extension(ext));
            if accepted {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    /// Rewrite every file. Fatal errors abort the whole pass.
    pub fn transform(&mut self) -> Result<Vec<RewrittenFile>> {
        let mut outputs = Vec::with_capacity(self.files.len());
        for entry in &self.files {
            let output = RewriteDriver::new(&entry.tree, &mut self.table, &self.config).run()?;
            outputs.push(RewrittenFile {
                path: entry.tree.file_path.clone(),
                relative: entry.relative.clone(),
                text: output.text,
                diagnostics: output.diagnostics,
                rewritten_calls: output.rewritten_calls,
                elided_imports: output.elided_imports,
            });
        }
        let rewritten: usize = outputs.iter().map(|o| o.rewritten_calls).sum();
        info!(files = outputs.len(), rewritten, "transform complete");
        Ok(outputs)
    }

    /// Validator text for a declared type, as `validator<Name>(namespace)`
    /// would produce. `None` when the type yields no validator.
    pub fn synthesize_named(&mut self, name: &str, namespace: &str) -> Result<Option<String>> {
        let (file, line) = self
            .table
            .declaration(name)
            .map(|d| (d.file.clone(), d.span.start_line))
            .unwrap_or_else(|| (ANONYMOUS_SOURCE.to_string(), 0));

        let ty = self.table.alloc(TypeNode::Reference {
            name: name.to_string(),
            args: Vec::new(),
        });
        let options = SynthesisOptions {
            max_depth: self.config.max_depth,
            label_unions: self.config.label_unions,
        };
        let expr = Synthesizer::new(&self.table, options)
            .synthesize(ty, &Env::root())
            .map_err(|e| CompileError::synthesis(file, line, e))?;
        Ok(expr.map(|e| e.render(namespace)))
    }
}

/// Rewrite a single in-memory source with the default configuration
pub fn transform_source(source: &str) -> Result<RewrittenFile> {
    let mut program = Program::new(TransformConfig::default())?;
    program.add_source(ANONYMOUS_SOURCE, source)?;
    let mut files = program.transform()?;
    files
        .pop()
        .ok_or_else(|| CompileError::parse(ANONYMOUS_SOURCE, 0, 0, "empty program"))
}
