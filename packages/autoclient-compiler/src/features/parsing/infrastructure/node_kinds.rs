//! TypeScript tree-sitter node kinds
//!
//! These constants match the node type names of the tree-sitter-typescript
//! grammar (common/define-grammar.js). Only the kinds the compiler inspects
//! are listed.

// Declarations
pub const INTERFACE_DECLARATION: &str = "interface_declaration";
pub const ENUM_DECLARATION: &str = "enum_declaration";
pub const TYPE_ALIAS_DECLARATION: &str = "type_alias_declaration";
pub const AMBIENT_DECLARATION: &str = "ambient_declaration";

// Interface / object type members
pub const INTERFACE_BODY: &str = "interface_body";
pub const EXTENDS_TYPE_CLAUSE: &str = "extends_type_clause";
pub const PROPERTY_SIGNATURE: &str = "property_signature";
pub const CALL_SIGNATURE: &str = "call_signature";
pub const INDEX_SIGNATURE: &str = "index_signature";

// Enums
pub const ENUM_ASSIGNMENT: &str = "enum_assignment";

// Parameters
pub const FORMAL_PARAMETERS: &str = "formal_parameters";
pub const REQUIRED_PARAMETER: &str = "required_parameter";
pub const OPTIONAL_PARAMETER: &str = "optional_parameter";

// Import/Export
pub const IMPORT_STATEMENT: &str = "import_statement";
pub const IMPORT_CLAUSE: &str = "import_clause";
pub const NAMED_IMPORTS: &str = "named_imports";
pub const IMPORT_SPECIFIER: &str = "import_specifier";
pub const NAMESPACE_IMPORT: &str = "namespace_import";
pub const EXPORT_STATEMENT: &str = "export_statement";

// Types
pub const TYPE_ANNOTATION: &str = "type_annotation";
pub const TYPE_PARAMETER: &str = "type_parameter";
pub const TYPE_ARGUMENTS: &str = "type_arguments";
pub const TYPE_IDENTIFIER: &str = "type_identifier";
pub const NESTED_TYPE_IDENTIFIER: &str = "nested_type_identifier";
pub const PREDEFINED_TYPE: &str = "predefined_type";
pub const LITERAL_TYPE: &str = "literal_type";
pub const GENERIC_TYPE: &str = "generic_type";
pub const UNION_TYPE: &str = "union_type";
pub const INTERSECTION_TYPE: &str = "intersection_type";
pub const ARRAY_TYPE: &str = "array_type";
pub const READONLY_TYPE: &str = "readonly_type";
pub const PARENTHESIZED_TYPE: &str = "parenthesized_type";
pub const OBJECT_TYPE: &str = "object_type";

// Expressions
pub const CALL_EXPRESSION: &str = "call_expression";
pub const MEMBER_EXPRESSION: &str = "member_expression";
pub const UNARY_EXPRESSION: &str = "unary_expression";
pub const IDENTIFIER: &str = "identifier";
pub const PROPERTY_IDENTIFIER: &str = "property_identifier";
pub const STRING: &str = "string";
pub const NUMBER: &str = "number";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const NULL: &str = "null";
pub const UNDEFINED: &str = "undefined";
pub const ARGUMENTS: &str = "arguments";
