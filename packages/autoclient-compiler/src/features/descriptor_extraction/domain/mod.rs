//! Descriptor extraction domain models

mod endpoint;

pub use endpoint::{ApiTreeNode, DescriptorField, EndpointDescriptor, Extraction};
