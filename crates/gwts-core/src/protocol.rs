use prost::Message;
use prost_types::FileDescriptorProto;

use crate::{FileModel, Result};

pub use prost_types::compiler::{code_generator_response, CodeGeneratorResponse, Version};

/// `google.protobuf.compiler.CodeGeneratorRequest` with every file descriptor
/// left encoded. Decoding them as `prost_types` messages would drop custom
/// options such as `google.api.http`.
#[derive(Clone, PartialEq, Message)]
pub struct CodeGeneratorRequest {
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub compiler_version: Option<Version>,
    /// Encoded `FileDescriptorProto`s, dependencies before dependents
    #[prost(bytes = "vec", repeated, tag = "15")]
    pub proto_file: Vec<Vec<u8>>,
}

impl CodeGeneratorRequest {
    /// Request over descriptors built in memory. Only options known to
    /// `prost_types` survive.
    pub fn from_descriptors(file_to_generate: Vec<String>, files: &[FileDescriptorProto]) -> Self {
        Self {
            file_to_generate,
            proto_file: files.iter().map(Message::encode_to_vec).collect(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }
}

/// Turns a compilation request into analyzed file models.
///
/// Implementations must return one model per file in `proto_file`, in a
/// deterministic order, and must not filter by `file_to_generate`.
pub trait Analyzer {
    fn analyze(&self, request: &CodeGeneratorRequest) -> Result<Vec<FileModel>>;
}

impl<A: Analyzer + ?Sized> Analyzer for &A {
    fn analyze(&self, request: &CodeGeneratorRequest) -> Result<Vec<FileModel>> {
        (**self).analyze(request)
    }
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn analyze(&self, request: &CodeGeneratorRequest) -> Result<Vec<FileModel>> {
        (**self).analyze(request)
    }
}
