use gwts_core::{FileModel, GenerationOptions};
use serde::Serialize;
use tera::{Context, Tera};

use crate::{GenerateError, Result};

pub const FILE_TEMPLATE: &str = "file.ts";
pub const SHARED_MODULE_TEMPLATE: &str = "fetch.ts";

/// Template sources for one generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub file: String,
    pub shared_module: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            file: include_str!("../templates/file.ts.tera").to_string(),
            shared_module: include_str!("../templates/fetch.ts.tera").to_string(),
        }
    }
}

/// Values a template sees. `file` is absent for the shared module.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub file: Option<&'a FileModel>,
    pub enable_styling_check: bool,
    pub use_static_classes: bool,
}

impl<'a> RenderContext<'a> {
    pub fn for_file(file: &'a FileModel, options: &GenerationOptions) -> Self {
        Self {
            file: Some(file),
            enable_styling_check: options.enable_styling_check,
            use_static_classes: options.use_static_classes,
        }
    }

    pub fn shared(options: &GenerationOptions) -> Self {
        Self {
            file: None,
            enable_styling_check: options.enable_styling_check,
            use_static_classes: options.use_static_classes,
        }
    }
}

/// Compiled templates for a single invocation
#[derive(Debug)]
pub struct TemplateProvider {
    tera: Tera,
}

impl TemplateProvider {
    pub fn new(templates: &TemplateSet) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (FILE_TEMPLATE, templates.file.as_str()),
            (SHARED_MODULE_TEMPLATE, templates.shared_module.as_str()),
        ])
        .map_err(GenerateError::Template)?;
        Ok(Self { tera })
    }

    pub fn render_file(&self, context: &RenderContext<'_>) -> tera::Result<String> {
        self.render(FILE_TEMPLATE, context)
    }

    pub fn render_shared_module(&self, context: &RenderContext<'_>) -> tera::Result<String> {
        self.render(SHARED_MODULE_TEMPLATE, context)
    }

    fn render(&self, name: &str, context: &RenderContext<'_>) -> tera::Result<String> {
        let context = Context::from_serialize(context)?;
        self.tera.render(name, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_compile() {
        assert!(TemplateProvider::new(&TemplateSet::default()).is_ok());
    }

    #[test]
    fn test_broken_template_fails_to_compile() {
        let templates = TemplateSet {
            file: "{% if %}".to_string(),
            shared_module: String::new(),
        };
        let err = TemplateProvider::new(&templates).unwrap_err();
        assert!(matches!(err, GenerateError::Template(_)));
    }

    #[test]
    fn test_shared_context_has_no_file() {
        let options = GenerationOptions {
            use_static_classes: false,
            ..Default::default()
        };
        let templates = TemplateSet {
            file: String::new(),
            shared_module: "{% if file %}file{% else %}none{% endif %} {{ use_static_classes }}"
                .to_string(),
        };
        let provider = TemplateProvider::new(&templates).unwrap();

        let rendered = provider
            .render_shared_module(&RenderContext::shared(&options))
            .unwrap();
        assert_eq!(rendered, "none false");
    }
}
