//! Rewrite driver
//!
//! Writes a new program text in one pre-order walk. Source between nodes is
//! copied verbatim; a recognized call is replaced by generated code built
//! from the rewritten text of its arguments, so entry point calls nested
//! inside arguments are expanded too. Marker imports are dropped.
//!
//! A call that cannot be compiled for a recoverable reason is kept as-is
//! (its children are still visited) and reported as a diagnostic.

use tracing::{debug, warn};
use tree_sitter::Node;

use crate::config::TransformConfig;
use crate::errors::{CompileError, Result};
use crate::features::descriptor_extraction::emitters::{
    render_add_api, render_api_call, render_api_tree, render_api_url, render_generate_request,
    RequestArgs,
};
use crate::features::descriptor_extraction::{
    ApiTreeNode, DescriptorExtractor, DescriptorField, EndpointDescriptor, Extraction,
};
use crate::features::parsing::{node_kinds, ParsedTree};
use crate::features::rewrite::domain::{CallSite, EntryPoint};
use crate::features::type_system::{render_type, Env, TypeId, TypeTable};
use crate::features::validator_synthesis::{
    SynthesisOptions, SynthesisResult, Synthesizer, ValidatorExpr,
};
use crate::shared::models::{Diagnostic, Severity, Span};
use crate::shared::utils::tree_sitter::{
    all_children, find_child_by_kind, named_children, node_to_span,
};

use super::imports::MarkerImports;

#[derive(Debug, Clone, Default)]
pub struct RewriteOutput {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    pub rewritten_calls: usize,
    pub elided_imports: usize,
}

/// What a recognized call compiles to
enum Plan {
    Validator(ValidatorExpr),
    AddApi {
        descriptor: EndpointDescriptor,
        body: ValidatorExpr,
    },
    ApiCall(EndpointDescriptor),
    ApiUrl(EndpointDescriptor),
    GenerateRequest(EndpointDescriptor),
    ApiTree(ApiTreeNode),
}

enum Planned {
    Ready(Plan),
    Keep {
        severity: Severity,
        message: String,
        missing_fields: Vec<String>,
    },
}

impl Planned {
    fn from_extraction<T>(extraction: &Extraction<T>) -> Self {
        Planned::Keep {
            severity: Severity::Error,
            message: extraction.problem().unwrap_or_default(),
            missing_fields: extraction
                .missing_fields()
                .iter()
                .map(|f| f.key().to_string())
                .collect(),
        }
    }

    fn no_validator(ty: String) -> Self {
        Planned::Keep {
            severity: Severity::Warning,
            message: format!("no validator could be produced for `{}`", ty),
            missing_fields: Vec::new(),
        }
    }
}

pub struct RewriteDriver<'a> {
    tree: &'a ParsedTree,
    table: &'a mut TypeTable,
    config: &'a TransformConfig,
    imports: MarkerImports,
    output: RewriteOutput,
}

impl<'a> RewriteDriver<'a> {
    pub fn new(tree: &'a ParsedTree, table: &'a mut TypeTable, config: &'a TransformConfig) -> Self {
        let imports = MarkerImports::scan(tree, config);
        Self {
            tree,
            table,
            config,
            imports,
            output: RewriteOutput::default(),
        }
    }

    pub fn run(mut self) -> Result<RewriteOutput> {
        let tree = self.tree;
        let source = tree.source.as_str();

        if self.imports.is_empty() {
            debug!(file = %tree.file_path, "no marker imports, copying source");
            self.output.text = source.to_string();
            return Ok(self.output);
        }

        let root = tree.root();
        let mut text = String::with_capacity(source.len());
        text.push_str(&source[..root.start_byte()]);
        self.emit(root, &mut text)?;
        text.push_str(&source[root.end_byte()..]);

        self.output.text = text;
        debug!(
            file = %tree.file_path,
            rewritten = self.output.rewritten_calls,
            elided = self.output.elided_imports,
            diagnostics = self.output.diagnostics.len(),
            "rewrite complete"
        );
        Ok(self.output)
    }

    fn emit(&mut self, node: Node<'a>, out: &mut String) -> Result<()> {
        if node.kind() == node_kinds::CALL_EXPRESSION {
            if let Some(replacement) = self.try_rewrite(node)? {
                out.push_str(&replacement);
                return Ok(());
            }
        }

        let tree = self.tree;
        let source = tree.source.as_str();
        let mut cursor = node.start_byte();
        for child in all_children(node) {
            out.push_str(&source[cursor..child.start_byte()]);
            cursor = child.end_byte();
            if self.config.elide_marker_imports && self.imports.is_marker_statement(child) {
                self.output.elided_imports += 1;
                cursor = skip_line_break(source, cursor);
                continue;
            }
            self.emit(child, out)?;
        }
        out.push_str(&source[cursor..node.end_byte()]);
        Ok(())
    }

    fn try_rewrite(&mut self, node: Node<'a>) -> Result<Option<String>> {
        let tree = self.tree;
        let source = tree.source.as_str();

        let Some(entry) = node
            .child_by_field_name("function")
            .and_then(|callee| self.imports.resolve_callee(callee, source))
        else {
            return Ok(None);
        };
        let span = node_to_span(node);

        let (type_node, arg_nodes) = match call_parts(node, entry) {
            Ok(parts) => parts,
            Err(message) => {
                self.keep(entry, span, Severity::Error, message, Vec::new());
                return Ok(None);
            }
        };

        let type_arg = self.table.lower_type_arg(type_node, source);
        let planned = self
            .plan(entry, type_arg)
            .map_err(|e| CompileError::synthesis(&tree.file_path, span.start_line, e))?;
        let plan = match planned {
            Planned::Ready(plan) => plan,
            Planned::Keep {
                severity,
                message,
                missing_fields,
            } => {
                self.keep(entry, span, severity, message, missing_fields);
                return Ok(None);
            }
        };

        let mut args = Vec::with_capacity(arg_nodes.len());
        for arg in arg_nodes {
            let mut text = String::new();
            self.emit(arg, &mut text)?;
            args.push(text);
        }

        let site = CallSite {
            entry,
            type_arg,
            args,
            span,
        };
        debug!(entry = %site.entry, line = site.span.start_line, "rewriting call");
        self.output.rewritten_calls += 1;
        Ok(Some(render(&site, plan)))
    }

    fn plan(&self, entry: EntryPoint, ty: TypeId) -> SynthesisResult<Planned> {
        let table: &TypeTable = self.table;
        let scope = Env::root();
        let options = SynthesisOptions {
            max_depth: self.config.max_depth,
            label_unions: self.config.label_unions,
        };
        let synthesizer = Synthesizer::new(table, options);
        let extractor = DescriptorExtractor::new(table, self.config.max_depth);
        let endpoint = |make: fn(EndpointDescriptor) -> Plan| -> SynthesisResult<Planned> {
            Ok(match extractor.extract_endpoint(ty, &scope)? {
                Extraction::Found(descriptor) => Planned::Ready(make(descriptor)),
                problem => Planned::from_extraction(&problem),
            })
        };

        match entry {
            EntryPoint::Validator => Ok(match synthesizer.synthesize(ty, &scope)? {
                Some(expr) => Planned::Ready(Plan::Validator(expr)),
                None => Planned::no_validator(render_type(table.arena(), ty)),
            }),
            EntryPoint::GenerateApiTree => Ok(match extractor.extract_api_tree(ty, &scope)? {
                Extraction::Found(tree) => Planned::Ready(Plan::ApiTree(tree)),
                problem => Planned::from_extraction(&problem),
            }),
            EntryPoint::ApiCall => endpoint(Plan::ApiCall),
            EntryPoint::ApiUrl => endpoint(Plan::ApiUrl),
            EntryPoint::GenerateRequest => endpoint(Plan::GenerateRequest),
            EntryPoint::AddApi => {
                let descriptor = match extractor.extract_endpoint(ty, &scope)? {
                    Extraction::Found(descriptor) => descriptor,
                    problem => return Ok(Planned::from_extraction(&problem)),
                };
                if descriptor.use_validator && descriptor.body.is_none() {
                    let missing: Extraction<EndpointDescriptor> = Extraction::Missing {
                        at: None,
                        fields: vec![DescriptorField::Body],
                    };
                    return Ok(Planned::from_extraction(&missing));
                }
                let body = match (&descriptor.body, descriptor.use_validator) {
                    (Some((body_ty, body_scope)), true) => {
                        match synthesizer.synthesize(*body_ty, body_scope)? {
                            Some(expr) => expr,
                            None => {
                                return Ok(Planned::no_validator(render_type(
                                    table.arena(),
                                    *body_ty,
                                )))
                            }
                        }
                    }
                    _ => ValidatorExpr::always_pass(),
                };
                Ok(Planned::Ready(Plan::AddApi { descriptor, body }))
            }
        }
    }

    fn keep(
        &mut self,
        entry: EntryPoint,
        span: Span,
        severity: Severity,
        message: String,
        missing_fields: Vec<String>,
    ) {
        let file = &self.tree.file_path;
        warn!(file = %file, line = span.start_line, entry = %entry, "{}", message);
        let message = format!("`{}` call left unrewritten: {}", entry, message);
        let diagnostic = match severity {
            Severity::Warning => Diagnostic::warning(file.as_str(), span, message),
            Severity::Error => Diagnostic::error(file.as_str(), span, message),
        };
        self.output
            .diagnostics
            .push(diagnostic.with_missing_fields(missing_fields));
    }
}

/// Type argument and value arguments of a recognized call
fn call_parts<'t>(
    node: Node<'t>,
    entry: EntryPoint,
) -> std::result::Result<(Node<'t>, Vec<Node<'t>>), String> {
    let type_args = node
        .child_by_field_name("type_arguments")
        .or_else(|| find_child_by_kind(node, node_kinds::TYPE_ARGUMENTS))
        .map(named_children)
        .unwrap_or_default();
    let [type_node] = type_args.as_slice() else {
        return Err(format!(
            "expected exactly one type argument, found {}",
            type_args.len()
        ));
    };

    let Some(arguments) = node
        .child_by_field_name("arguments")
        .filter(|a| a.kind() == node_kinds::ARGUMENTS)
    else {
        return Err("expected a parenthesized argument list".to_string());
    };
    let args = named_children(arguments);
    if !entry.accepts_arity(args.len()) {
        let expected = match entry.arity() {
            (min, max) if min == max => min.to_string(),
            (min, max) => format!("{} to {}", min, max),
        };
        return Err(format!(
            "expected {} argument(s), found {}",
            expected,
            args.len()
        ));
    }
    Ok((*type_node, args))
}

fn render(site: &CallSite, plan: Plan) -> String {
    let arg = |index: usize| site.arg(index).unwrap_or_default();
    match plan {
        Plan::Validator(expr) => expr.render(arg(0)),
        Plan::AddApi { descriptor, body } => {
            render_add_api(&descriptor, &body.render(arg(0)), arg(1), arg(2))
        }
        Plan::ApiCall(descriptor) => render_api_call(&descriptor, arg(0)),
        Plan::ApiUrl(descriptor) => render_api_url(&descriptor),
        Plan::GenerateRequest(descriptor) => render_generate_request(
            &descriptor,
            &RequestArgs {
                test_connection: arg(0),
                account: arg(1),
                params: arg(2),
                body: arg(3),
                conf: arg(4),
                member: site.arg(5),
                session: site.arg(6),
            },
        ),
        Plan::ApiTree(tree) => render_api_tree(&tree, arg(0)),
    }
}

/// Position after a single line break at `at`, if there is one
fn skip_line_break(source: &str, at: usize) -> usize {
    let rest = &source[at..];
    if rest.starts_with("\r\n") {
        at + 2
    } else if rest.starts_with('\n') {
        at + 1
    } else {
        at
    }
}
