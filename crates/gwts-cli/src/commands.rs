use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

use gwts_codegen::Generator;
use gwts_core::{
    Analyzer, CodeGeneratorRequest, CodeGeneratorResponse, GenerationOptions, PluginCodec,
};
use gwts_registry::Registry;

pub fn read_request(input: Option<&Path>) -> anyhow::Result<CodeGeneratorRequest> {
    let request = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open request file {}", path.display()))?;
            PluginCodec::read_request(&mut BufReader::new(file))
        }
        None => PluginCodec::read_request(&mut io::stdin().lock()),
    };

    request.context("failed to read CodeGeneratorRequest")
}

pub fn log_request(request: &CodeGeneratorRequest) {
    debug!(
        "Decoded request: {} proto files, {} to generate, parameter {:?}",
        request.proto_file.len(),
        request.file_to_generate.len(),
        request.parameter()
    );
}

pub fn generate(
    request: &CodeGeneratorRequest,
    options: GenerationOptions,
) -> anyhow::Result<CodeGeneratorResponse> {
    debug!("Generation options: {:?}", options);

    let generator = Generator::new(Registry::new(options.clone()), options);
    let response = generator
        .generate(request)
        .context("failed to generate TypeScript")?;

    info!(
        "Generated {} file(s) for {} requested proto file(s)",
        response.file.len(),
        request.file_to_generate.len()
    );
    Ok(response)
}

pub fn write_response(
    output: Option<&Path>,
    response: &CodeGeneratorResponse,
) -> anyhow::Result<()> {
    let written = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            PluginCodec::write_response(&mut BufWriter::new(file), response)
        }
        None => PluginCodec::write_response(&mut io::stdout().lock(), response),
    };

    written.context("failed to write CodeGeneratorResponse")
}

pub fn dump_models(
    request: &CodeGeneratorRequest,
    options: &GenerationOptions,
) -> anyhow::Result<()> {
    let models = Registry::new(options.clone())
        .analyze(request)
        .context("failed to analyze request")?;

    eprintln!("{}", serde_json::to_string_pretty(&models)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;
    use prost_types::{DescriptorProto, FileDescriptorProto};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gwts-cli-{}-{}", std::process::id(), name))
    }

    fn request() -> CodeGeneratorRequest {
        let notes = FileDescriptorProto {
            name: Some("notes.proto".to_string()),
            message_type: vec![DescriptorProto {
                name: Some("Note".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        CodeGeneratorRequest::from_descriptors(vec!["notes.proto".to_string()], &[notes])
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_request_file_to_response_file() {
        let input = scratch_path("request.bin");
        let output = scratch_path("response.bin");
        std::fs::write(&input, request().encode_to_vec()).unwrap();

        let request = read_request(Some(input.as_path())).unwrap();
        let response = generate(&request, GenerationOptions::default()).unwrap();
        write_response(Some(output.as_path()), &response).unwrap();

        let written = std::fs::read(&output).unwrap();
        let decoded = CodeGeneratorResponse::decode(written.as_slice()).unwrap();
        assert_eq!(decoded.file.len(), 1);
        assert_eq!(decoded.file[0].name(), "notes.pb.ts");
        assert!(decoded.file[0].content().contains("export type Note = {"));

        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(output);
    }

    #[test]
    fn test_missing_request_file() {
        let err = read_request(Some(scratch_path("does-not-exist.bin").as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to open request file"));
    }

    #[test]
    fn test_request_summary_is_logged() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || log_request(&request()));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Decoded request: 1 proto files, 1 to generate"));
    }
}
