//! Descriptor Extraction Feature
//!
//! Reads endpoint metadata (`url`, `method`, `requiresMember`, `needsToken`,
//! `useValidator`, body parameter) out of endpoint-shaped types and renders
//! the five descriptor-based entry point replacements.
//!
//! ## Structure
//! - `domain/` - EndpointDescriptor, ApiTreeNode, Extraction
//! - `infrastructure/` - DescriptorExtractor, emitters

pub mod domain;
pub mod infrastructure;

pub use domain::{ApiTreeNode, DescriptorField, EndpointDescriptor, Extraction};
pub use infrastructure::{emitters, DescriptorExtractor, RequestArgs};
