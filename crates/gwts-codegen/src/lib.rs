pub mod error;
pub mod generator;
pub mod renderer;
pub mod response;
pub mod template;

pub use error::*;
pub use generator::Generator;
pub use renderer::{emit_shared_module, render_file};
pub use response::ResponseAssembler;
pub use template::{RenderContext, TemplateProvider, TemplateSet};

use gwts_core::{CodeGeneratorRequest, CodeGeneratorResponse, GenerationOptions};
use gwts_registry::Registry;

/// Generate TypeScript clients for a request with the default analyzer and templates
pub fn generate_typescript(
    request: &CodeGeneratorRequest,
) -> anyhow::Result<CodeGeneratorResponse> {
    let options = GenerationOptions::from_parameter(request.parameter())?;
    let generator = Generator::new(Registry::new(options.clone()), options);
    Ok(generator.generate(request)?)
}
