//! Fatal synthesis errors
//!
//! Any of these aborts the whole pass; the driver attaches file and line.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    #[error("unsupported type `{text}` ({kind})")]
    UnsupportedType { kind: String, text: String },

    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("enum `{0}` has no members")]
    EnumWithoutMembers(String),

    #[error("enum member `{enum_name}.{member}` has no literal initializer")]
    EnumMemberWithoutInitializer { enum_name: String, member: String },

    #[error("`{enum_name}.{member}` is not a member of an enum")]
    NotAnEnumMember { enum_name: String, member: String },

    #[error("endpoint type `{0}` has no call signature")]
    MissingCallSignature(String),

    #[error("type parameter `{0}` is not bound")]
    UnresolvedTypeParameter(String),

    #[error("type nesting exceeds the depth limit of {limit} while expanding `{text}`")]
    DepthExceeded { limit: u32, text: String },
}

pub type SynthesisResult<T> = std::result::Result<T, SynthesisError>;
