/*
 * autoclient-compiler - typed API entry point expansion
 *
 * Feature-First Architecture:
 * - shared/      : Common models (Span, Diagnostic) and tree-sitter helpers
 * - features/    : Vertical slices (parsing → type_system → validator_synthesis
 *                  → descriptor_extraction → rewrite)
 * - pipeline/    : Multi-file program orchestration
 * - config/      : YAML-backed transform configuration
 *
 * A program is parsed once, its `type`/`interface`/`enum` declarations are
 * lowered into an arena-backed type table, and every call to one of the six
 * marker entry points is replaced by generated descriptor/validator code.
 */

#![allow(clippy::too_many_arguments)] // Emitters mirror the entry point arity
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Program orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, TransformConfig};
pub use errors::{CompileError, Result};
pub use features::rewrite::EntryPoint;
pub use features::validator_synthesis::{SynthesisError, ValidatorExpr};
pub use pipeline::{transform_source, Program, RewrittenFile, TransformReport};
pub use shared::models::{Diagnostic, Severity, Span};
