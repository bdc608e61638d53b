//! `google.api.http` method bindings.
//! Methods without one use the route grpc-gateway serves unbound methods on.

use prost_reflect::{DynamicMessage, ExtensionDescriptor, MethodDescriptor, Value};

pub const HTTP_RULE_EXTENSION: &str = "google.api.http";

/// `HttpRule.pattern` fields in declaration order
const PATTERN_FIELDS: [(&str, &str); 5] = [
    ("get", "GET"),
    ("put", "PUT"),
    ("post", "POST"),
    ("delete", "DELETE"),
    ("patch", "PATCH"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBinding {
    pub http_method: String,
    pub path_template: String,
    /// Raw `body` selector: `*`, a field path, or none
    pub body: Option<String>,
}

impl HttpBinding {
    pub fn default_route(service: &str, method: &str) -> Self {
        Self {
            http_method: "POST".to_string(),
            path_template: format!("/{}/{}", service, method),
            body: Some("*".to_string()),
        }
    }

    /// Primary rule declared on `method`. `additional_bindings` are not used.
    pub fn from_method(method: &MethodDescriptor, extension: &ExtensionDescriptor) -> Option<Self> {
        let options = method.options();
        if !options.has_extension(extension) {
            return None;
        }

        let rule = options.get_extension(extension);
        match rule.as_ref() {
            Value::Message(rule) => Self::from_rule(rule),
            _ => None,
        }
    }

    fn from_rule(rule: &DynamicMessage) -> Option<Self> {
        let pattern = PATTERN_FIELDS.iter().find_map(|(field, verb)| {
            string_field(rule, field).map(|path| (verb.to_string(), path))
        });
        let (http_method, path_template) = match pattern {
            Some(pattern) => pattern,
            None => custom_pattern(rule)?,
        };

        Some(Self {
            http_method,
            path_template,
            body: string_field(rule, "body"),
        })
    }
}

fn custom_pattern(rule: &DynamicMessage) -> Option<(String, String)> {
    if !rule.has_field_by_name("custom") {
        return None;
    }
    let custom = rule.get_field_by_name("custom")?;
    let custom = custom.as_message()?;
    let kind = string_field(custom, "kind")?;
    let path = string_field(custom, "path")?;
    Some((kind.to_ascii_uppercase(), path))
}

fn string_field(message: &DynamicMessage, name: &str) -> Option<String> {
    if !message.has_field_by_name(name) {
        return None;
    }
    let value = message.get_field_by_name(name)?;
    let text = value.as_str()?;
    (!text.is_empty()).then(|| text.to_string())
}

/// A path template rewritten as the body of a TypeScript template literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    pub path: String,
    /// Top-level request fields bound into the path, in first-use order
    pub params: Vec<String>,
}

/// `/v1/{name=shelves/*}/books/{book.id}` becomes
/// `/v1/${req["name"]}/books/${req["book"]["id"]}`. `field_name` maps each
/// proto field name to the name the request object uses.
pub fn render_path<F>(template: &str, field_name: F) -> Result<RoutePath, String>
where
    F: Fn(&str) -> String,
{
    let mut path = String::with_capacity(template.len());
    let mut params: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        path.push_str(&rest[..start]);
        let variable_start = &rest[start + 1..];
        let end = variable_start
            .find('}')
            .ok_or_else(|| format!("unterminated variable in {}", template))?;

        // "name=shelves/*" binds the field "name"
        let variable = &variable_start[..end];
        let field_path = variable.split('=').next().unwrap_or_default().trim();
        if field_path.is_empty() {
            return Err(format!("empty variable in {}", template));
        }

        let segments: Vec<String> = field_path.split('.').map(&field_name).collect();
        path.push_str("${req");
        for segment in &segments {
            path.push_str(&format!("[\"{}\"]", segment));
        }
        path.push('}');

        if let Some(first) = segments.first() {
            if !params.contains(first) {
                params.push(first.clone());
            }
        }
        rest = &variable_start[end + 1..];
    }

    if rest.contains('}') {
        return Err(format!("unbalanced braces in {}", template));
    }
    path.push_str(rest);

    Ok(RoutePath { path, params })
}
