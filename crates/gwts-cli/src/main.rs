use anyhow::Context;
use clap::Parser;
use gwts_core::GenerationOptions;
use std::path::PathBuf;

mod commands;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// protoc runs the plugin with no arguments; the flags are for debugging
/// against a saved request.
#[derive(Parser)]
#[command(name = "protoc-gen-grpc-gateway-ts")]
#[command(about = "protoc plugin generating TypeScript clients for grpc-gateway services")]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// Read the encoded CodeGeneratorRequest from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the encoded CodeGeneratorResponse to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log filter, overrides the `loglevel` plugin parameter
    #[arg(long)]
    log_level: Option<String>,

    /// Print the analyzed file models as JSON on stderr
    #[arg(long)]
    dump_models: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let request = commands::read_request(cli.input.as_deref())?;
    let options = GenerationOptions::from_parameter(request.parameter())
        .context("invalid plugin parameter")?;

    // stdout carries the response, logs go to stderr
    let log_level = cli.log_level.as_deref().unwrap_or(&options.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();
    commands::log_request(&request);

    if cli.dump_models {
        commands::dump_models(&request, &options)?;
    }

    let response = commands::generate(&request, options)?;
    commands::write_response(cli.output.as_deref(), &response)?;

    Ok(())
}
