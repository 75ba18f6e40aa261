//! Static extraction of module descriptors from `YUI.add(...)` calls.
//!
//! Module files are never evaluated. The source is parsed with oxc and the
//! first registration call found in source order supplies the module's
//! name, version and declared `requires`.

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, CallExpression, Expression, ObjectExpression,
    ObjectPropertyKind, PropertyKey,
};
use oxc_ast_visit::walk;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::oxc::{Allocator, Parser, SourceType, Visit};

/// Name, location and declared dependencies of one client module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    /// Path of the defining file, relative to the application root.
    pub path: String,
    pub version: Option<String>,
    /// Declared dependency names, in declaration order.
    pub requires: Vec<String>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            version: None,
            requires: Vec::new(),
        }
    }

    pub fn with_requires<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = requires.into_iter().map(Into::into).collect();
        self
    }
}

/// Parse `source` (read from `path`) and return its registered module.
///
/// # Errors
///
/// - [`ParseError::Syntax`] when the source does not parse
/// - [`ParseError::NoRegistration`] when no `YUI.add` call exists
/// - [`ParseError::InvalidRegistration`] when the first call's name is not a
///   string literal
pub fn parse_descriptor(source: &str, path: &str) -> Result<ModuleDescriptor, ParseError> {
    let allocator = Allocator::default();
    let parser_return = Parser::new(&allocator, source, SourceType::cjs()).parse();

    if parser_return.panicked || !parser_return.errors.is_empty() {
        let message = parser_return
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ParseError::Syntax {
            path: path.to_string(),
            message,
        });
    }

    let mut collector = RegistrationCollector::default();
    collector.visit_program(&parser_return.program);

    let mut found = collector.registrations.into_iter();
    let first = found.next().ok_or_else(|| ParseError::NoRegistration {
        path: path.to_string(),
    })?;

    let ignored = found.count();
    if ignored > 0 {
        debug!(path, ignored, "multiple YUI.add calls, using the first");
    }

    let registration = first.map_err(|reason| ParseError::InvalidRegistration {
        path: path.to_string(),
        reason,
    })?;

    trace!(path, name = %registration.name, requires = ?registration.requires, "parsed module");

    Ok(ModuleDescriptor {
        name: registration.name,
        path: path.to_string(),
        version: registration.version,
        requires: registration.requires,
    })
}

struct Registration {
    name: String,
    version: Option<String>,
    requires: Vec<String>,
}

/// Collects every `YUI.add` call in pre-order, which is source order.
#[derive(Default)]
struct RegistrationCollector {
    registrations: Vec<Result<Registration, String>>,
}

impl<'a> Visit<'a> for RegistrationCollector {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if is_registration_call(call) {
            self.registrations.push(read_registration(call));
        }
        walk::walk_call_expression(self, call);
    }
}

fn is_registration_call(call: &CallExpression<'_>) -> bool {
    let Expression::StaticMemberExpression(member) = &call.callee else {
        return false;
    };
    member.property.name.as_str() == "add"
        && matches!(&member.object, Expression::Identifier(ident) if ident.name.as_str() == "YUI")
}

fn read_registration(call: &CallExpression<'_>) -> Result<Registration, String> {
    let name = match call.arguments.first() {
        Some(Argument::StringLiteral(lit)) => lit.value.to_string(),
        Some(_) => return Err("module name must be a string literal".to_string()),
        None => return Err("missing module name".to_string()),
    };

    let version = match call.arguments.get(2) {
        Some(Argument::StringLiteral(lit)) => Some(lit.value.to_string()),
        _ => None,
    };

    let requires = match call.arguments.get(3) {
        Some(Argument::ObjectExpression(meta)) => declared_requires(meta),
        _ => Vec::new(),
    };

    Ok(Registration {
        name,
        version,
        requires,
    })
}

fn declared_requires(meta: &ObjectExpression<'_>) -> Vec<String> {
    let value = meta.properties.iter().find_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(prop) if key_name(&prop.key) == Some("requires") => {
            Some(&prop.value)
        }
        _ => None,
    });

    match value {
        Some(Expression::ArrayExpression(list)) => list
            .elements
            .iter()
            .filter_map(|element| match element {
                ArrayExpressionElement::StringLiteral(lit) => Some(lit.value.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn key_name<'k>(key: &'k PropertyKey<'_>) -> Option<&'k str> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}
