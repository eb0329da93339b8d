//! AST-based API endpoint extraction using oxc_parser.

use crate::types::Finding;
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Member-call property names treated as network-call idioms.
const NETWORK_METHODS: &[&str] = &["ajax", "get", "post", "put", "delete"];

/// Extracts API endpoint references from script bodies.
#[derive(Clone, Default)]
pub struct EndpointAnalyzer;

impl EndpointAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Extract endpoint findings from one script body.
    ///
    /// The body is parsed in tolerant mode; regions that fail to parse do
    /// not prevent extraction from the regions that do, and a body that
    /// yields no usable tree simply produces no findings. Candidates are
    /// deduplicated before filtering, so a script that calls the same
    /// endpoint twice reports it once.
    pub fn extract_endpoints(&self, url: &str, body: &str) -> Vec<Finding> {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true);

        let parser_result = Parser::new(&allocator, body, source_type).parse();

        // Parse errors are common in minified code; the recovered program
        // is still walkable.
        if !parser_result.errors.is_empty() {
            trace!(
                "parse had {} errors for {}, continuing with recovered tree",
                parser_result.errors.len(),
                url
            );
        }

        let candidates = collect_candidates(&parser_result.program);

        let mut findings: Vec<Finding> = candidates
            .into_iter()
            .filter(|c| is_api_like(c))
            .map(|matched| Finding::Endpoint {
                source: url.to_string(),
                matched,
            })
            .collect();
        findings.sort_by(|a, b| a.matched().cmp(b.matched()));

        debug!("extracted {} endpoints from {}", findings.len(), url);
        findings
    }
}

/// Walk top-level expression statements and gather endpoint strings from
/// recognized call shapes.
fn collect_candidates(program: &Program<'_>) -> HashSet<String> {
    let mut candidates = HashSet::new();

    for statement in &program.body {
        let Statement::ExpressionStatement(stmt) = statement else {
            continue;
        };
        let Expression::CallExpression(call) = &stmt.expression else {
            continue;
        };

        match &call.callee {
            // fetch("/v1/users")
            Expression::Identifier(id) if id.name == "fetch" => {
                if let Some(Argument::StringLiteral(lit)) = call.arguments.first() {
                    candidates.insert(lit.value.to_string());
                }
            }
            // $.ajax({url: "..."}) / axios.get("...") / http.delete("...")
            Expression::StaticMemberExpression(member)
                if NETWORK_METHODS.contains(&member.property.name.as_str()) =>
            {
                match call.arguments.first() {
                    Some(Argument::StringLiteral(lit)) => {
                        candidates.insert(lit.value.to_string());
                    }
                    Some(Argument::ObjectExpression(obj)) => {
                        if let Some(endpoint) = url_property(obj) {
                            candidates.insert(endpoint);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    candidates
}

/// The string value of an object literal's `url` property, if present.
fn url_property(obj: &ObjectExpression<'_>) -> Option<String> {
    for property in &obj.properties {
        let ObjectPropertyKind::ObjectProperty(prop) = property else {
            continue;
        };

        let is_url_key = match &prop.key {
            PropertyKey::StaticIdentifier(ident) => ident.name == "url",
            PropertyKey::StringLiteral(lit) => lit.value == "url",
            _ => false,
        };

        if is_url_key {
            if let Expression::StringLiteral(lit) = &prop.value {
                return Some(lit.value.to_string());
            }
        }
    }

    None
}

/// Keep only path-like or API-like strings.
///
/// Filters static assets and absolute third-party URLs out of the result;
/// this deliberately trades recall for precision.
fn is_api_like(candidate: &str) -> bool {
    candidate.starts_with('/') || candidate.contains("api")
}
