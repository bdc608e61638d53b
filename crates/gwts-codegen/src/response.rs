use gwts_core::{code_generator_response, CodeGeneratorResponse, OutputFile};

/// Collects generated files in the order they were produced
#[derive(Debug, Default)]
pub struct ResponseAssembler {
    files: Vec<OutputFile>,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: OutputFile) {
        self.files.push(file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whole-file outputs only; insertion points and other response fields stay unset
    pub fn finish(self) -> CodeGeneratorResponse {
        CodeGeneratorResponse {
            file: self
                .files
                .into_iter()
                .map(|file| code_generator_response::File {
                    name: Some(file.name),
                    insertion_point: None,
                    content: Some(file.content),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }
}
