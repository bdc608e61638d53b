use gwts_core::{FileContent, FileModel, GenerationOptions, OutputFile, EMPTY_FILE_CONTENT};
use tracing::debug;

use crate::template::{RenderContext, TemplateProvider};
use crate::{GenerateError, Result};

/// Render one file model. Files with nothing to export get the placeholder
/// module and never reach the template.
pub fn render_file(
    provider: &TemplateProvider,
    file: &FileModel,
    options: &GenerationOptions,
) -> Result<OutputFile> {
    let content = match file.content() {
        FileContent::Empty => {
            debug!("{} has nothing to export, writing placeholder", file.name);
            EMPTY_FILE_CONTENT.to_string()
        }
        FileContent::HasContent => {
            provider
                .render_file(&RenderContext::for_file(file, options))
                .map_err(|source| GenerateError::Render {
                    file: file.name.clone(),
                    source,
                })?
        }
    };

    Ok(OutputFile::new(file.output_file_name.as_str(), &content))
}

/// Render the shared fetch module at its configured location
pub fn emit_shared_module(
    provider: &TemplateProvider,
    options: &GenerationOptions,
) -> Result<OutputFile> {
    let path = options.shared_module_path();
    let content = provider
        .render_shared_module(&RenderContext::shared(options))
        .map_err(|source| GenerateError::SharedModule {
            path: path.clone(),
            source,
        })?;

    Ok(OutputFile::new(path, &content))
}
