//! JSON diagnostics report

use serde::Serialize;

use crate::errors::Result;
use crate::shared::models::{Diagnostic, Severity};

use super::RewrittenFile;

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub rewritten_calls: usize,
    pub elided_imports: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformReport {
    pub files: Vec<FileReport>,
    pub total_rewritten: usize,
    pub total_warnings: usize,
    pub total_errors: usize,
}

impl TransformReport {
    pub fn from_files(files: &[RewrittenFile]) -> Self {
        let mut report = Self::default();
        for file in files {
            report.total_rewritten += file.rewritten_calls;
            for diagnostic in &file.diagnostics {
                match diagnostic.severity {
                    Severity::Warning => report.total_warnings += 1,
                    Severity::Error => report.total_errors += 1,
                }
            }
            report.files.push(FileReport {
                path: file.path.clone(),
                rewritten_calls: file.rewritten_calls,
                elided_imports: file.elided_imports,
                diagnostics: file.diagnostics.clone(),
            });
        }
        report
    }

    pub fn diagnostic_count(&self) -> usize {
        self.total_warnings + self.total_errors
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
