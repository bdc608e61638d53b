use std::collections::HashSet;

use gwts_core::{Analyzer, CodeGeneratorRequest, CodeGeneratorResponse, GenerationOptions};
use tracing::{debug, info};

use crate::renderer::{emit_shared_module, render_file};
use crate::response::ResponseAssembler;
use crate::template::{TemplateProvider, TemplateSet};
use crate::{GenerateError, Result};

/// Generates TypeScript gateway clients from a protoc request
#[derive(Debug)]
pub struct Generator<A> {
    analyzer: A,
    options: GenerationOptions,
    templates: TemplateSet,
}

impl<A: Analyzer> Generator<A> {
    pub fn new(analyzer: A, options: GenerationOptions) -> Self {
        Self {
            analyzer,
            options,
            templates: TemplateSet::default(),
        }
    }

    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    /// Render every requested file, plus the fetch module if any of them has
    /// services needing it. Any failure aborts the whole response.
    pub fn generate(&self, request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse> {
        let files = self
            .analyzer
            .analyze(request)
            .map_err(GenerateError::Analysis)?;
        let provider = TemplateProvider::new(&self.templates)?;

        let to_generate: HashSet<&str> = request
            .file_to_generate
            .iter()
            .map(String::as_str)
            .collect();
        debug!("files to generate {:?}", request.file_to_generate);

        let mut assembler = ResponseAssembler::new();
        let mut needs_shared_module = false;

        for file in &files {
            if !to_generate.contains(file.name.as_str()) {
                debug!("file {} is not the file to generate, skipping", file.name);
                continue;
            }

            debug!("generating file for {}", file.output_file_name);
            assembler.push(render_file(&provider, file, &self.options)?);
            needs_shared_module = needs_shared_module || file.services.requires_shared_adapter();
        }

        if needs_shared_module {
            debug!("generating fetch module");
            assembler.push(emit_shared_module(&provider, &self.options)?);
        }

        info!("Generated {} file(s)", assembler.len());
        Ok(assembler.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gwts_core::{FileModel, GatewayError};

    struct FailingAnalyzer;

    impl Analyzer for FailingAnalyzer {
        fn analyze(&self, _request: &CodeGeneratorRequest) -> gwts_core::Result<Vec<FileModel>> {
            Err(GatewayError::Descriptor("malformed graph".to_string()))
        }
    }

    #[test]
    fn test_analysis_failure_is_wrapped() {
        let generator = Generator::new(FailingAnalyzer, GenerationOptions::default());
        let err = generator.generate(&CodeGeneratorRequest::default()).unwrap_err();

        assert_eq!(err.to_string(), "error analysing proto files");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Descriptor error: malformed graph");
    }

    #[test]
    fn test_template_compile_failure() {
        struct NoFiles;
        impl Analyzer for NoFiles {
            fn analyze(
                &self,
                _request: &CodeGeneratorRequest,
            ) -> gwts_core::Result<Vec<FileModel>> {
                Ok(Vec::new())
            }
        }

        let templates = TemplateSet {
            file: "{% for %}".to_string(),
            shared_module: String::new(),
        };
        let generator =
            Generator::new(NoFiles, GenerationOptions::default()).with_templates(templates);
        assert!(matches!(
            generator.generate(&CodeGeneratorRequest::default()),
            Err(GenerateError::Template(_))
        ));
    }
}
