//! Descriptor extraction infrastructure

pub mod emitters;
mod extractor;

pub use emitters::RequestArgs;
pub use extractor::DescriptorExtractor;
