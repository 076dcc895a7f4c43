//! Endpoint descriptor extraction
//!
//! Missing literal fields are recoverable and reported all at once; an
//! endpoint type without any call signature is fatal. Whether a body
//! parameter is required depends on the entry point and is checked by the
//! caller.

use std::rc::Rc;

use tracing::debug;

use crate::features::descriptor_extraction::domain::{
    ApiTreeNode, DescriptorField, EndpointDescriptor, Extraction,
};
use crate::features::type_system::introspection::{
    literal_bool_of, literal_string_of, property_names_of, resolve_shape, type_node_of_parameter,
};
use crate::features::type_system::{render_type, ResolvedShape, Scope, TypeId, TypeTable};
use crate::features::validator_synthesis::{SynthesisError, SynthesisResult};

/// Position of the body in an endpoint call signature `(member, body)`
const BODY_PARAMETER: usize = 1;

pub struct DescriptorExtractor<'t> {
    table: &'t TypeTable,
    max_depth: u32,
}

impl<'t> DescriptorExtractor<'t> {
    pub fn new(table: &'t TypeTable, max_depth: u32) -> Self {
        Self { table, max_depth }
    }

    pub fn extract_endpoint(
        &self,
        ty: TypeId,
        scope: &Scope,
    ) -> SynthesisResult<Extraction<EndpointDescriptor>> {
        let shape = resolve_shape(self.table, ty, scope)
            .ok_or_else(|| SynthesisError::MissingCallSignature(self.render(ty)))?;
        self.endpoint_from_shape(ty, &shape, None)
    }

    /// Walk an object type whose members are endpoints or nested groups
    pub fn extract_api_tree(
        &self,
        ty: TypeId,
        scope: &Scope,
    ) -> SynthesisResult<Extraction<ApiTreeNode>> {
        let mut path = Vec::new();
        self.tree_node(ty, scope, &mut path)
    }

    fn tree_node(
        &self,
        ty: TypeId,
        scope: &Scope,
        path: &mut Vec<String>,
    ) -> SynthesisResult<Extraction<ApiTreeNode>> {
        if path.len() as u32 >= self.max_depth {
            return Err(SynthesisError::DepthExceeded {
                limit: self.max_depth,
                text: self.render(ty),
            });
        }

        let Some(shape) = resolve_shape(self.table, ty, scope) else {
            return Ok(Extraction::NotAnEndpoint {
                at: path.join("."),
                text: self.render(ty),
            });
        };

        if shape.is_callable() {
            let at = (!path.is_empty()).then(|| path.join("."));
            return Ok(self
                .endpoint_from_shape(ty, &shape, at)?
                .map(ApiTreeNode::Endpoint));
        }

        let mut children = Vec::with_capacity(shape.properties.len());
        for prop in &shape.properties {
            let Some((member_ty, member_scope)) = prop.primary() else {
                continue;
            };
            path.push(prop.name.clone());
            let child = self.tree_node(member_ty, member_scope, path)?;
            path.pop();
            match child {
                Extraction::Found(node) => children.push((prop.name.clone(), node)),
                problem => return Ok(problem),
            }
        }
        Ok(Extraction::Found(ApiTreeNode::Group(children)))
    }

    fn endpoint_from_shape(
        &self,
        ty: TypeId,
        shape: &ResolvedShape,
        at: Option<String>,
    ) -> SynthesisResult<Extraction<EndpointDescriptor>> {
        let (signature, signature_scope) = shape
            .call_signatures
            .first()
            .ok_or_else(|| SynthesisError::MissingCallSignature(self.render(ty)))?;

        let string = |field: DescriptorField| {
            shape
                .property(field.key())
                .and_then(|p| literal_string_of(self.table, p))
        };
        let boolean = |field: DescriptorField| {
            shape
                .property(field.key())
                .and_then(|p| literal_bool_of(self.table, p))
        };

        let url = string(DescriptorField::Url);
        let method = string(DescriptorField::Method);
        let requires_member = string(DescriptorField::RequiresMember);
        let needs_token = boolean(DescriptorField::NeedsToken);
        let use_validator = boolean(DescriptorField::UseValidator);
        let body = type_node_of_parameter(signature, BODY_PARAMETER)
            .map(|body_ty| (body_ty, Rc::clone(signature_scope)));

        let mut missing = Vec::new();
        if url.is_none() {
            missing.push(DescriptorField::Url);
        }
        if method.is_none() {
            missing.push(DescriptorField::Method);
        }
        if requires_member.is_none() {
            missing.push(DescriptorField::RequiresMember);
        }
        if needs_token.is_none() {
            missing.push(DescriptorField::NeedsToken);
        }
        if use_validator.is_none() {
            missing.push(DescriptorField::UseValidator);
        }

        let (
            Some(url),
            Some(method),
            Some(requires_member),
            Some(needs_token),
            Some(use_validator),
            true,
        ) = (url, method, requires_member, needs_token, use_validator, missing.is_empty())
        else {
            debug!(missing = ?missing, "endpoint descriptor incomplete");
            return Ok(Extraction::Missing {
                at,
                fields: missing,
            });
        };

        let param_keys = body
            .as_ref()
            .and_then(|(body_ty, body_scope)| property_names_of(self.table, *body_ty, body_scope))
            .unwrap_or_default();

        Ok(Extraction::Found(EndpointDescriptor {
            url,
            method,
            requires_member,
            needs_token,
            use_validator,
            body,
            param_keys,
        }))
    }

    fn render(&self, ty: TypeId) -> String {
        render_type(self.table.arena(), ty)
    }
}
